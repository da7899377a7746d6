/// Gap marker `</gap id='ID'>`.
///
/// The id is single-quoted in authored content; double quotes are tolerated.
pub struct Gap;

impl Gap {
    pub const OPEN: &'static [u8; 5] = b"</gap";
    pub const ID: &'static [u8; 2] = b"id";
    pub const EQ: u8 = b'=';
    pub const QUOTES: [u8; 2] = [b'\'', b'"'];
}
