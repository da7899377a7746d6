use serde::Serialize;

use crate::attrs::ParagraphAttrs;

/// A markup token.
///
/// Every variant keeps the exact source text it was lexed from, so
/// [`serialize`] on an untouched token list reproduces the input byte for
/// byte, including spellings like `</n >` or `</P>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind")]
pub enum Token {
    /// Literal text between recognised delimiters.
    TextRun { content: String },
    /// `<p …>`; `attrs` is derived from `raw_tag`.
    ParagraphOpen {
        raw_tag: String,
        attrs: ParagraphAttrs,
    },
    /// `</p>`
    ParagraphClose { raw: String },
    /// `</gap id='…'>`
    GapMarker { id: String, raw: String },
    /// `</n>`
    LineBreak { raw: String },
}

impl Token {
    /// Builds a paragraph open token, deriving its attributes from the tag text.
    pub fn paragraph_open(raw_tag: impl Into<String>) -> Self {
        let raw_tag = raw_tag.into();
        let attrs = ParagraphAttrs::from_tag(&raw_tag);
        Token::ParagraphOpen { raw_tag, attrs }
    }

    pub fn text(content: impl Into<String>) -> Self {
        Token::TextRun {
            content: content.into(),
        }
    }

    /// The source text this token covers.
    pub fn raw(&self) -> &str {
        match self {
            Token::TextRun { content } => content,
            Token::ParagraphOpen { raw_tag, .. } => raw_tag,
            Token::ParagraphClose { raw } | Token::GapMarker { raw, .. } | Token::LineBreak { raw } => {
                raw
            }
        }
    }

    pub fn is_paragraph_open(&self) -> bool {
        matches!(self, Token::ParagraphOpen { .. })
    }
}

/// Concatenates the source text of every token, in order.
pub fn serialize(tokens: &[Token]) -> String {
    let mut out = String::with_capacity(tokens.iter().map(|t| t.raw().len()).sum());
    for token in tokens {
        out.push_str(token.raw());
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paragraph_open_derives_attrs() {
        match Token::paragraph_open("<p bold>") {
            Token::ParagraphOpen { attrs, .. } => assert!(attrs.bold),
            other => panic!("expected ParagraphOpen, got {other:?}"),
        }
    }

    #[test]
    fn serialize_concatenates_raw_text() {
        let tokens = vec![
            Token::paragraph_open("<p>"),
            Token::text("a"),
            Token::LineBreak {
                raw: "</n >".into(),
            },
            Token::ParagraphClose { raw: "</P>".into() },
        ];
        assert_eq!(serialize(&tokens), "<p>a</n ></P>");
    }
}
