use lesson_markup_syntax::{Importance, ParagraphAttrs};
use serde::Serialize;

/// Colours and sizes used when turning segments into styled output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderTheme {
    /// Border colour for hints without an importance.
    pub accent: String,
    pub low: String,
    pub medium: String,
    pub high: String,
    /// Height of the spacer a `</n>` turns into.
    pub line_break_height_px: u32,
}

impl Default for RenderTheme {
    fn default() -> Self {
        Self {
            accent: "#3f51b5".to_string(),
            low: "#43a047".to_string(),
            medium: "#fb8c00".to_string(),
            high: "#e53935".to_string(),
            line_break_height_px: 12,
        }
    }
}

impl RenderTheme {
    /// The dashed border for a hint-bearing paragraph, `None` without a hint.
    pub fn hint_border(&self, attrs: &ParagraphAttrs) -> Option<HintBorder> {
        attrs.hint.as_ref()?;
        let color = match attrs.importance {
            Some(Importance::Low) => &self.low,
            Some(Importance::Medium) => &self.medium,
            Some(Importance::High) => &self.high,
            None => &self.accent,
        };
        Some(HintBorder {
            color: color.clone(),
        })
    }
}

/// Dashed border marking a paragraph that carries a hint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HintBorder {
    pub color: String,
}
