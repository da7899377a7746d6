//! # Markup Kinds
//!
//! Token-specific types that own their delimiters. The tokenizer calls these
//! constants; it never hardcodes `</gap` or `</n`.
//!
//! ## Types
//!
//! - **`Gap`**: `OPEN = b"</gap"`, `ID = b"id"` - fill-in-the-blank marker
//! - **`LineBreak`**: `OPEN = b"</n"` - explicit line break
//! - **`Paragraph`**: `OPEN = b"<p"`, `CLOSE = b"</p"` - styled paragraph
//!
//! Every tag ends in [`TAG_END`]. Tag names match ASCII case-insensitively.

pub mod gap;
pub mod line_break;
pub mod paragraph;

pub use gap::Gap;
pub use line_break::LineBreak;
pub use paragraph::Paragraph;

/// The byte that terminates every tag in the dialect.
pub const TAG_END: u8 = b'>';
