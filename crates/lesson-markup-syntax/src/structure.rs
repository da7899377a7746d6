//! # Paragraph Grouping
//!
//! Groups a flat token list into top-level [`Block`]s: paragraphs and the
//! orphan tokens that sit outside any paragraph.
//!
//! The grammar is flat. A paragraph ends at the first of:
//!
//! - its `</p>` (an explicit close, included in the paragraph),
//! - the next `<p …>` (an implicit close just before the new tag),
//! - the end of the token list (an implicit close at the end).
//!
//! A `</p>` with no open paragraph is reported as an orphan; renderers
//! treat it as a no-op, but it stays in the token list so serialization is
//! unchanged.

use std::ops::Range;

use crate::token::Token;

/// Token range of one paragraph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ParagraphRange {
    /// Index of the `ParagraphOpen` token.
    pub open: usize,
    /// Index of the last token belonging to the paragraph: the `</p>` when
    /// `closed`, otherwise the last content token (or `open` if empty).
    pub close: usize,
    /// Whether the paragraph ended with an explicit `</p>`.
    pub closed: bool,
}

impl ParagraphRange {
    /// Indices of the tokens between the open tag and the close.
    pub fn content(&self) -> Range<usize> {
        let end = if self.closed { self.close } else { self.close + 1 };
        self.open + 1..end
    }

    /// Indices of every token in the paragraph, tags included.
    pub fn tokens(&self) -> Range<usize> {
        self.open..self.close + 1
    }
}

/// A top-level unit of a token list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Block {
    Paragraph(ParagraphRange),
    /// A token outside any paragraph, by index.
    Orphan(usize),
}

/// Groups tokens into paragraphs and orphans, in order.
pub fn blocks(tokens: &[Token]) -> Vec<Block> {
    let mut out = Vec::new();
    let mut open: Option<usize> = None;

    for (i, token) in tokens.iter().enumerate() {
        match token {
            Token::ParagraphOpen { .. } => {
                if let Some(start) = open {
                    out.push(Block::Paragraph(ParagraphRange {
                        open: start,
                        close: i - 1,
                        closed: false,
                    }));
                }
                open = Some(i);
            }
            Token::ParagraphClose { .. } => match open.take() {
                Some(start) => out.push(Block::Paragraph(ParagraphRange {
                    open: start,
                    close: i,
                    closed: true,
                })),
                None => out.push(Block::Orphan(i)),
            },
            _ if open.is_some() => {}
            _ => out.push(Block::Orphan(i)),
        }
    }

    if let Some(start) = open {
        out.push(Block::Paragraph(ParagraphRange {
            open: start,
            close: tokens.len() - 1,
            closed: false,
        }));
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokenizer::tokenize;
    use pretty_assertions::assert_eq;

    fn para(open: usize, close: usize, closed: bool) -> Block {
        Block::Paragraph(ParagraphRange {
            open,
            close,
            closed,
        })
    }

    #[test]
    fn closed_paragraph_then_orphans() {
        // <p bold> Hello </p> gap </p> Tail
        let tokens = tokenize("<p bold>Hello</p></gap id='g1'></p>Tail");
        assert_eq!(
            blocks(&tokens),
            vec![
                para(0, 2, true),
                Block::Orphan(3),
                Block::Orphan(4),
                Block::Orphan(5)
            ]
        );
    }

    #[test]
    fn second_open_implicitly_closes_first() {
        // <p> one <p> two </p>
        let tokens = tokenize("<p>one<p>two</p>");
        assert_eq!(blocks(&tokens), vec![para(0, 1, false), para(2, 4, true)]);
    }

    #[test]
    fn unterminated_paragraph_closes_at_end() {
        let tokens = tokenize("lead<p center>tail</n>");
        assert_eq!(blocks(&tokens), vec![Block::Orphan(0), para(1, 3, false)]);
    }

    #[test]
    fn empty_paragraphs() {
        let tokens = tokenize("<p><p></p>");
        assert_eq!(blocks(&tokens), vec![para(0, 0, false), para(1, 2, true)]);
        let range = ParagraphRange {
            open: 0,
            close: 0,
            closed: false,
        };
        assert!(range.content().is_empty());
    }

    #[test]
    fn content_excludes_tags() {
        let closed = ParagraphRange {
            open: 2,
            close: 5,
            closed: true,
        };
        assert_eq!(closed.content(), 3..5);
        assert_eq!(closed.tokens(), 2..6);

        let open_ended = ParagraphRange {
            open: 2,
            close: 5,
            closed: false,
        };
        assert_eq!(open_ended.content(), 3..6);
    }

    #[test]
    fn empty_token_list() {
        assert!(blocks(&[]).is_empty());
    }
}
