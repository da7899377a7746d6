/// Paragraph tags `<p …>` and `</p>`.
///
/// The open tag carries style attributes; see [`crate::attrs`].
pub struct Paragraph;

impl Paragraph {
    pub const OPEN: &'static [u8; 2] = b"<p";
    pub const CLOSE: &'static [u8; 3] = b"</p";
}
