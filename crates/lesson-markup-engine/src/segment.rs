use std::fmt;

use serde::Serialize;

/// Identity of a rendered segment.
///
/// Built from the field's optional section id and the token range the
/// segment covers, so it is stable for a given token list and changes only
/// when the markup tokenizes differently. Orphan segments use the same
/// index for `open` and `close`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct SegmentId {
    pub section: Option<String>,
    pub open: usize,
    pub close: usize,
}

impl SegmentId {
    pub fn new(section: Option<&str>, open: usize, close: usize) -> Self {
        Self {
            section: section.map(str::to_string),
            open,
            close,
        }
    }
}

impl fmt::Display for SegmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.section {
            Some(section) => write!(f, "{section}:{}-{}", self.open, self.close),
            None => write!(f, "{}-{}", self.open, self.close),
        }
    }
}
