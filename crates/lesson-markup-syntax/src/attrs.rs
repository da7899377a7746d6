//! # Paragraph Attributes
//!
//! [`ParagraphAttrs`] is the structured view of a `<p …>` tag. It is never
//! stored on its own: it is always re-derived from the raw tag text, so the
//! raw tag stays the single source of truth.
//!
//! Extraction never fails. Missing or garbled attributes fall back to the
//! defaults (`left`, not bold, no size, no colour, no hint).
//!
//! ## Rules
//!
//! 1. `bold`, `italic`, `underline` are bare words, matched ignoring case.
//! 2. `left`, `center`, `right` are bare words; the last one written wins.
//! 3. `size='N'` (or `size=N`, `size=Npx`) sets the font size. Without it,
//!    a bare integer counts as a legacy size, but only when the tag has no
//!    `color=` and no `hint=` pair.
//! 4. `color='…'` goes through [`display_color`].
//! 5. `hint='…'` / `hint="…"` is unquoted and unescaped.
//! 6. `importance='low'|'medium'|'high'`; anything else is ignored.

use serde::Serialize;

use crate::colors::display_color;
use crate::tag::{Tag, TagItem};

/// Horizontal alignment of a paragraph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Align {
    #[default]
    Left,
    Center,
    Right,
}

impl Align {
    pub const ALL: [Align; 3] = [Align::Left, Align::Center, Align::Right];

    /// The bare word that selects this alignment in a tag.
    pub const fn keyword(self) -> &'static str {
        match self {
            Align::Left => "left",
            Align::Center => "center",
            Align::Right => "right",
        }
    }

    pub fn from_keyword(word: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|a| a.keyword().eq_ignore_ascii_case(word))
    }
}

/// How strongly a hint should be drawn to the reader's attention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Importance {
    Low,
    Medium,
    High,
}

impl Importance {
    pub const fn keyword(self) -> &'static str {
        match self {
            Importance::Low => "low",
            Importance::Medium => "medium",
            Importance::High => "high",
        }
    }

    pub fn from_keyword(word: &str) -> Option<Self> {
        [Importance::Low, Importance::Medium, Importance::High]
            .into_iter()
            .find(|i| i.keyword().eq_ignore_ascii_case(word.trim()))
    }
}

/// Style and metadata derived from a paragraph open tag.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct ParagraphAttrs {
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
    pub align: Align,
    pub font_size_px: Option<u32>,
    /// Display colour, after named-colour lookup.
    pub color: Option<String>,
    pub hint: Option<String>,
    pub importance: Option<Importance>,
}

impl ParagraphAttrs {
    /// Derives attributes from a raw `<p …>` tag.
    pub fn from_tag(raw_tag: &str) -> Self {
        let tag = Tag::parse(raw_tag);
        let mut attrs = Self::default();
        let mut explicit_size: Option<Option<u32>> = None;
        let mut legacy_size: Option<u32> = None;
        let mut has_color = false;
        let mut has_hint = false;

        for item in tag.items() {
            match item {
                TagItem::Flag { word, .. } => {
                    let word = word.to_ascii_lowercase();
                    match word.as_str() {
                        "bold" => attrs.bold = true,
                        "italic" => attrs.italic = true,
                        "underline" => attrs.underline = true,
                        _ => {
                            if let Some(align) = Align::from_keyword(&word) {
                                attrs.align = align;
                            }
                        }
                    }
                }
                TagItem::Pair { name, value, .. } => {
                    let value = value.map(|v| v.unquoted().into_owned());
                    match name.to_ascii_lowercase().as_str() {
                        "size" => {
                            if explicit_size.is_none() {
                                explicit_size = Some(value.as_deref().and_then(parse_size));
                            }
                        }
                        "color" => {
                            has_color = true;
                            if let Some(v) = value.filter(|v| !v.trim().is_empty()) {
                                attrs.color.get_or_insert_with(|| display_color(v.trim()));
                            }
                        }
                        "hint" => {
                            has_hint = true;
                            if let Some(v) = value.filter(|v| !v.is_empty()) {
                                attrs.hint.get_or_insert(v);
                            }
                        }
                        "importance" => {
                            if attrs.importance.is_none() {
                                attrs.importance =
                                    value.as_deref().and_then(Importance::from_keyword);
                            }
                        }
                        _ => {}
                    }
                }
                TagItem::Number { text, .. } => {
                    if legacy_size.is_none() {
                        legacy_size = parse_size(text);
                    }
                }
            }
        }

        attrs.font_size_px = match explicit_size {
            Some(size) => size,
            None if !has_color && !has_hint => legacy_size,
            None => None,
        };

        attrs
    }

    /// True when the paragraph is drawn with a hint border and intercepts clicks.
    pub fn has_hint(&self) -> bool {
        self.hint.is_some()
    }
}

/// Parses `12`, `12px` or ` 12 ` into pixels.
fn parse_size(value: &str) -> Option<u32> {
    let value = value.trim();
    let digits = value
        .strip_suffix("px")
        .or_else(|| value.strip_suffix("PX"))
        .unwrap_or(value)
        .trim();
    digits.parse().ok()
}
