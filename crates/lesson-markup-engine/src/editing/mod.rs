//! Formatting commands and the machinery that applies them.
//!
//! - [`command`]: the [`FormatCommand`] enum and its string form.
//! - [`mutator`]: rewrites one paragraph's open tag for a command.
//! - [`registry`]: routes commands to the active paragraph.

pub mod command;
pub mod mutator;
pub mod registry;

pub use command::{FormatCommand, FormatError};
pub use mutator::{apply_format, rewrite_tag};
pub use registry::{ActiveTargets, FormatTarget};
