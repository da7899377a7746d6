/// Explicit line break `</n>`, whitespace allowed before the `>`.
pub struct LineBreak;

impl LineBreak {
    pub const OPEN: &'static [u8; 3] = b"</n";
}
