//! # Segment Rendering
//!
//! Turns a token list into an ordered list of [`RenderNode`]s.
//!
//! ## Segments
//!
//! Paragraphs become [`ParagraphSegment`]s carrying their derived
//! attributes, an optional hint border, a stable [`SegmentId`], and the
//! exact source text they span. That source text and the token range are
//! what the mutator needs to rewrite the paragraph later.
//!
//! Tokens outside any paragraph are emitted as unstyled top-level nodes.
//! A stray `</p>` renders as nothing.
//!
//! ## Gaps
//!
//! Gap markers are resolved by the caller through a [`GapResolver`], once
//! per marker, in source order. The widget type `W` is entirely the
//! caller's: an input box, a coloured answer, an HTML string. A resolver
//! returning `None` renders nothing for that marker.
//!
//! ## Text
//!
//! Text runs are plain text. HTML character entities are decoded; any other
//! markup left in a run is shown as written, never interpreted.

pub mod html;
pub mod theme;

use std::borrow::Cow;

use lesson_markup_syntax::{Block, ParagraphAttrs, ParagraphRange, Token, blocks, serialize};

use crate::segment::SegmentId;

pub use theme::{HintBorder, RenderTheme};

/// Supplies the widget for a gap marker.
///
/// Implemented for any `FnMut(&str) -> Option<W>`.
pub trait GapResolver<W> {
    fn resolve(&mut self, id: &str) -> Option<W>;
}

impl<W, F> GapResolver<W> for F
where
    F: FnMut(&str) -> Option<W>,
{
    fn resolve(&mut self, id: &str) -> Option<W> {
        self(id)
    }
}

/// A resolver that renders nothing for every gap.
pub struct NoGaps;

impl<W> GapResolver<W> for NoGaps {
    fn resolve(&mut self, _id: &str) -> Option<W> {
        None
    }
}

/// Content inside a paragraph.
#[derive(Debug, Clone, PartialEq)]
pub enum Inline<W> {
    Text(String),
    Gap { id: String, widget: W },
    Spacer { height_px: u32 },
}

/// A rendered paragraph.
#[derive(Debug, Clone, PartialEq)]
pub struct ParagraphSegment<W> {
    pub id: SegmentId,
    pub attrs: ParagraphAttrs,
    pub border: Option<HintBorder>,
    pub children: Vec<Inline<W>>,
    /// Plain text of the paragraph's text runs; line breaks become `\n`.
    pub text: String,
    /// The exact source the paragraph spans: open tag, content, and the
    /// close tag if it has one.
    pub source: String,
    pub range: ParagraphRange,
}

/// A top-level rendered node.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderNode<W> {
    Paragraph(ParagraphSegment<W>),
    Text {
        id: SegmentId,
        text: String,
    },
    Gap {
        id: SegmentId,
        gap_id: String,
        widget: W,
    },
    Spacer {
        id: SegmentId,
        height_px: u32,
    },
}

/// The output of one render pass.
#[derive(Debug, Clone, PartialEq)]
pub struct Rendered<W> {
    pub section: Option<String>,
    pub nodes: Vec<RenderNode<W>>,
}

impl<W> Rendered<W> {
    pub fn paragraphs(&self) -> impl Iterator<Item = &ParagraphSegment<W>> {
        self.nodes.iter().filter_map(|n| match n {
            RenderNode::Paragraph(p) => Some(p),
            _ => None,
        })
    }

    pub fn paragraph(&self, id: &SegmentId) -> Option<&ParagraphSegment<W>> {
        self.paragraphs().find(|p| &p.id == id)
    }
}

/// Renders token lists for one field.
pub struct Renderer<'a> {
    theme: &'a RenderTheme,
    section: Option<&'a str>,
}

impl<'a> Renderer<'a> {
    pub fn new(theme: &'a RenderTheme, section: Option<&'a str>) -> Self {
        Self { theme, section }
    }

    pub fn render<W>(&self, tokens: &[Token], resolver: &mut impl GapResolver<W>) -> Rendered<W> {
        let mut nodes = Vec::new();

        for block in blocks(tokens) {
            match block {
                Block::Paragraph(range) => {
                    nodes.push(RenderNode::Paragraph(self.paragraph(tokens, range, resolver)));
                }
                Block::Orphan(index) => {
                    if let Some(node) = self.orphan(tokens, index, resolver) {
                        nodes.push(node);
                    }
                }
            }
        }

        Rendered {
            section: self.section.map(str::to_string),
            nodes,
        }
    }

    fn paragraph<W>(
        &self,
        tokens: &[Token],
        range: ParagraphRange,
        resolver: &mut impl GapResolver<W>,
    ) -> ParagraphSegment<W> {
        let attrs = match &tokens[range.open] {
            Token::ParagraphOpen { attrs, .. } => attrs.clone(),
            _ => ParagraphAttrs::default(),
        };

        let mut children = Vec::new();
        let mut text = String::new();
        for token in &tokens[range.content()] {
            match token {
                Token::TextRun { content } => {
                    let decoded = decode(content);
                    text.push_str(&decoded);
                    children.push(Inline::Text(decoded.into_owned()));
                }
                Token::GapMarker { id, .. } => {
                    if let Some(widget) = resolver.resolve(id) {
                        children.push(Inline::Gap {
                            id: id.clone(),
                            widget,
                        });
                    }
                }
                Token::LineBreak { .. } => {
                    text.push('\n');
                    children.push(Inline::Spacer {
                        height_px: self.theme.line_break_height_px,
                    });
                }
                // Opens and closes never appear inside a paragraph's content
                Token::ParagraphOpen { .. } | Token::ParagraphClose { .. } => {}
            }
        }

        ParagraphSegment {
            id: SegmentId::new(self.section, range.open, range.close),
            border: self.theme.hint_border(&attrs),
            attrs,
            children,
            text,
            source: serialize(&tokens[range.tokens()]),
            range,
        }
    }

    fn orphan<W>(
        &self,
        tokens: &[Token],
        index: usize,
        resolver: &mut impl GapResolver<W>,
    ) -> Option<RenderNode<W>> {
        let id = SegmentId::new(self.section, index, index);
        match &tokens[index] {
            Token::TextRun { content } => Some(RenderNode::Text {
                id,
                text: decode(content).into_owned(),
            }),
            Token::GapMarker { id: gap_id, .. } => {
                resolver.resolve(gap_id).map(|widget| RenderNode::Gap {
                    id,
                    gap_id: gap_id.clone(),
                    widget,
                })
            }
            Token::LineBreak { .. } => Some(RenderNode::Spacer {
                id,
                height_px: self.theme.line_break_height_px,
            }),
            Token::ParagraphOpen { .. } | Token::ParagraphClose { .. } => None,
        }
    }
}

/// Renders `tokens` with the default theme and no section.
pub fn render<W>(tokens: &[Token], resolver: &mut impl GapResolver<W>) -> Rendered<W> {
    Renderer::new(&RenderTheme::default(), None).render(tokens, resolver)
}

fn decode(content: &str) -> Cow<'_, str> {
    html_escape::decode_html_entities(content)
}
