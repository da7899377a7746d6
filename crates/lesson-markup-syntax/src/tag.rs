//! # Tag Lexer - Attribute Text of `<p …>`
//!
//! Paragraph open tags carry their attributes as loosely written text:
//! bare words (`bold center`), `key='value'` pairs, and the occasional
//! legacy bare number. This module breaks a raw tag into lexemes using
//! [Logos] and then groups them into [`TagItem`]s.
//!
//! [Logos]: https://docs.rs/logos
//!
//! ## Lossless Lexing
//!
//! As with the markup tokenizer, every byte of the tag lands in exactly one
//! lexeme. Characters the lexer does not recognise become
//! [`LexemeKind::Other`]. This is what lets the mutator cut a single word
//! out of a tag by span and leave everything else untouched:
//!
//! ```
//! use lesson_markup_syntax::tag::lex_tag;
//!
//! let raw = "<p bold hint='a > b'>";
//! let text: String = lex_tag(raw).iter().map(|l| l.text).collect();
//! assert_eq!(text, raw);
//! ```
//!
//! ## Quotes
//!
//! Quoted values are single lexemes, so a `>` or a markup-looking fragment
//! inside `hint='…'` never ends the tag. A value may contain the opposite
//! quote character or backslash-escaped quotes. A quote that is never
//! closed lexes as a lone [`LexemeKind::Other`] byte and does not hide the
//! words or the `>` after it.

use std::borrow::Cow;
use std::ops::Range;

use logos::Logos;

use crate::kinds::{Gap, LineBreak, Paragraph, TAG_END};

/// Lexeme kinds produced by Logos.
///
/// Kept separate from [`LexemeKind`] because Logos needs to derive on it and
/// unrecognised input has to map somewhere.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
enum RawLexeme {
    /// `<p`, the tag opener
    #[token("<p", ignore(ascii_case))]
    Open,

    /// `>`, the tag closer
    #[token(">")]
    Close,

    #[token("=")]
    Eq,

    #[regex(r"[ \t\r\n\f]+")]
    Whitespace,

    #[regex(r"[0-9]+")]
    Number,

    #[regex(r"[A-Za-z_][A-Za-z0-9_-]*")]
    Word,

    #[regex(r"'([^'\\]|\\.)*'")]
    SingleQuoted,

    #[regex(r#""([^"\\]|\\.)*""#)]
    DoubleQuoted,
}

impl RawLexeme {
    fn to_kind(self) -> LexemeKind {
        match self {
            RawLexeme::Open => LexemeKind::Open,
            RawLexeme::Close => LexemeKind::Close,
            RawLexeme::Eq => LexemeKind::Eq,
            RawLexeme::Whitespace => LexemeKind::Whitespace,
            RawLexeme::Number => LexemeKind::Number,
            RawLexeme::Word => LexemeKind::Word,
            RawLexeme::SingleQuoted | RawLexeme::DoubleQuoted => LexemeKind::Quoted,
        }
    }
}

/// The kind of a tag lexeme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LexemeKind {
    Open,
    Close,
    Eq,
    Whitespace,
    Number,
    Word,
    /// A single- or double-quoted string, quotes included.
    Quoted,
    /// Anything the lexer does not recognise.
    Other,
}

/// A lexeme with its kind, text slice and byte span within the tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lexeme<'a> {
    pub kind: LexemeKind,
    pub text: &'a str,
    pub span: Range<usize>,
}

/// Lex a raw tag into lexemes. Every byte appears in the output.
pub fn lex_tag(raw: &str) -> Vec<Lexeme<'_>> {
    Lexemes::new(raw).collect()
}

/// Streams lexemes out of Logos.
///
/// A quote that is never closed fails as one long error token that can run
/// past the tag's `>`. Only the quote byte is kept as [`LexemeKind::Other`]
/// and lexing restarts right after it, so the rest of the tag still lexes
/// as words and its closing `>`.
struct Lexemes<'a> {
    src: &'a str,
    offset: usize,
    lexer: logos::Lexer<'a, RawLexeme>,
}

impl<'a> Lexemes<'a> {
    fn new(src: &'a str) -> Self {
        Self {
            src,
            offset: 0,
            lexer: RawLexeme::lexer(src),
        }
    }
}

impl<'a> Iterator for Lexemes<'a> {
    type Item = Lexeme<'a>;

    fn next(&mut self) -> Option<Lexeme<'a>> {
        let src = self.src;
        let result = self.lexer.next()?;
        let start = self.offset + self.lexer.span().start;
        let mut end = self.offset + self.lexer.span().end;

        let kind = match result {
            Ok(raw_kind) => raw_kind.to_kind(),
            Err(()) => {
                if end - start > 1 && matches!(src.as_bytes()[start], b'\'' | b'"') {
                    end = start + 1;
                    self.offset = end;
                    self.lexer = RawLexeme::lexer(&src[end..]);
                }
                LexemeKind::Other
            }
        };

        Some(Lexeme {
            kind,
            text: &src[start..end],
            span: start..end,
        })
    }
}

/// Finds the end of a paragraph open tag at the start of `input`.
///
/// `input` must start with `<p`. Returns the byte length of the tag
/// including its closing `>`, scanning quote-aware so that a `>` inside a
/// quoted value is skipped. Returns `None` if no unquoted `>` follows.
///
/// A quoted value may not carry the tag past markup. When the quote-aware
/// end lies beyond the first `>` and another delimiter starts in between
/// (an apostrophe in a hint pairing with one in the paragraph text), the
/// tag ends at the first `>` instead:
///
/// ```
/// use lesson_markup_syntax::tag::open_tag_len;
///
/// let input = "<p hint='It's easy'>Don't stop</p>";
/// assert_eq!(open_tag_len(input), Some("<p hint='It's easy'>".len()));
/// ```
pub fn open_tag_len(input: &str) -> Option<usize> {
    let end = Lexemes::new(input)
        .find(|l| l.kind == LexemeKind::Close)?
        .span
        .end;
    let first = input.find(char::from(TAG_END)).map_or(end, |at| at + 1);
    if end > first && starts_markup(&input[first..end]) {
        return Some(first);
    }
    Some(end)
}

/// Whether a markup delimiter starts anywhere in `text`.
fn starts_markup(text: &str) -> bool {
    let bytes = text.as_bytes();
    (0..bytes.len()).filter(|&i| bytes[i] == b'<').any(|i| {
        let rest = &bytes[i..];
        starts_with_ignore_case(rest, Paragraph::CLOSE)
            || starts_with_ignore_case(rest, Gap::OPEN)
            || starts_with_ignore_case(rest, LineBreak::OPEN)
            || (starts_with_ignore_case(rest, Paragraph::OPEN)
                && rest
                    .get(Paragraph::OPEN.len())
                    .is_some_and(|&b| b == TAG_END || b.is_ascii_whitespace()))
    })
}

fn starts_with_ignore_case(bytes: &[u8], prefix: &[u8]) -> bool {
    bytes
        .get(..prefix.len())
        .is_some_and(|b| b.eq_ignore_ascii_case(prefix))
}

/// A quoted or unquoted attribute value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttrValue<'a> {
    /// The value as written, quotes included.
    pub raw: &'a str,
    pub span: Range<usize>,
}

impl AttrValue<'_> {
    /// The value with surrounding quotes removed and `\'`, `\"`, `\\` unescaped.
    pub fn unquoted(&self) -> Cow<'_, str> {
        let bytes = self.raw.as_bytes();
        let quoted = bytes.len() >= 2
            && (bytes[0] == b'\'' || bytes[0] == b'"')
            && bytes[bytes.len() - 1] == bytes[0];
        if !quoted {
            return Cow::Borrowed(self.raw);
        }

        let inner = &self.raw[1..self.raw.len() - 1];
        if !inner.contains('\\') {
            return Cow::Borrowed(inner);
        }

        let mut out = String::with_capacity(inner.len());
        let mut chars = inner.chars();
        while let Some(c) = chars.next() {
            if c == '\\' {
                match chars.next() {
                    Some(next @ ('\'' | '"' | '\\')) => out.push(next),
                    Some(next) => {
                        out.push('\\');
                        out.push(next);
                    }
                    None => out.push('\\'),
                }
            } else {
                out.push(c);
            }
        }
        Cow::Owned(out)
    }
}

/// A grouped unit of tag content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TagItem<'a> {
    /// A bare word such as `bold` or `center`.
    Flag { word: &'a str, span: Range<usize> },
    /// `name=value`; the value is `None` when nothing follows the `=`.
    Pair {
        name: &'a str,
        value: Option<AttrValue<'a>>,
        span: Range<usize>,
    },
    /// A bare integer, the legacy way of writing a font size.
    Number { text: &'a str, span: Range<usize> },
}

impl TagItem<'_> {
    pub fn span(&self) -> Range<usize> {
        match self {
            TagItem::Flag { span, .. }
            | TagItem::Pair { span, .. }
            | TagItem::Number { span, .. } => span.clone(),
        }
    }
}

/// A lexed paragraph open tag.
#[derive(Debug, Clone)]
pub struct Tag<'a> {
    raw: &'a str,
    lexemes: Vec<Lexeme<'a>>,
}

impl<'a> Tag<'a> {
    pub fn parse(raw: &'a str) -> Self {
        Self {
            raw,
            lexemes: lex_tag(raw),
        }
    }

    pub fn raw(&self) -> &'a str {
        self.raw
    }

    pub fn lexemes(&self) -> &[Lexeme<'a>] {
        &self.lexemes
    }

    /// Groups lexemes into flags, pairs and bare numbers, in source order.
    pub fn items(&self) -> Vec<TagItem<'a>> {
        let lx = &self.lexemes;
        let mut items = Vec::new();
        let mut j = 0;

        while j < lx.len() {
            match lx[j].kind {
                LexemeKind::Word => {
                    let eq = self.skip_whitespace(j + 1);
                    if eq < lx.len() && lx[eq].kind == LexemeKind::Eq {
                        let (value, next) = self.value_at(self.skip_whitespace(eq + 1));
                        let end = value
                            .as_ref()
                            .map_or(lx[eq].span.end, |v| v.span.end);
                        items.push(TagItem::Pair {
                            name: lx[j].text,
                            value,
                            span: lx[j].span.start..end,
                        });
                        j = next.max(eq + 1);
                        continue;
                    }
                    items.push(TagItem::Flag {
                        word: lx[j].text,
                        span: lx[j].span.clone(),
                    });
                }
                LexemeKind::Number => items.push(TagItem::Number {
                    text: lx[j].text,
                    span: lx[j].span.clone(),
                }),
                _ => {}
            }
            j += 1;
        }

        items
    }

    /// Bare words matching `word`, ignoring ASCII case.
    pub fn flags(&self, word: &str) -> Vec<Range<usize>> {
        self.items()
            .into_iter()
            .filter_map(|item| match item {
                TagItem::Flag { word: w, span } if w.eq_ignore_ascii_case(word) => Some(span),
                _ => None,
            })
            .collect()
    }

    /// Every `name=…` pair for `name`, ignoring ASCII case.
    pub fn pairs(&self, name: &str) -> Vec<TagItem<'a>> {
        self.items()
            .into_iter()
            .filter(|item| matches!(item, TagItem::Pair { name: n, .. } if n.eq_ignore_ascii_case(name)))
            .collect()
    }

    pub fn has_pair(&self, name: &str) -> bool {
        !self.pairs(name).is_empty()
    }

    /// Byte offset of the tag's closing `>`, if it has one.
    pub fn close_offset(&self) -> Option<usize> {
        self.lexemes
            .iter()
            .rev()
            .find(|l| l.kind == LexemeKind::Close)
            .map(|l| l.span.start)
    }

    fn skip_whitespace(&self, mut j: usize) -> usize {
        while j < self.lexemes.len() && self.lexemes[j].kind == LexemeKind::Whitespace {
            j += 1;
        }
        j
    }

    /// Reads a value starting at lexeme `j`: one quoted lexeme, or a run of
    /// unquoted lexemes up to whitespace or the closing `>`.
    fn value_at(&self, j: usize) -> (Option<AttrValue<'a>>, usize) {
        let lx = &self.lexemes;
        if j >= lx.len() {
            return (None, j);
        }
        if lx[j].kind == LexemeKind::Quoted {
            return (
                Some(AttrValue {
                    raw: lx[j].text,
                    span: lx[j].span.clone(),
                }),
                j + 1,
            );
        }

        let mut k = j;
        while k < lx.len()
            && !matches!(
                lx[k].kind,
                LexemeKind::Whitespace | LexemeKind::Close | LexemeKind::Quoted
            )
        {
            k += 1;
        }
        if k == j {
            return (None, j);
        }
        let span = lx[j].span.start..lx[k - 1].span.end;
        (
            Some(AttrValue {
                raw: &self.raw[span.clone()],
                span,
            }),
            k,
        )
    }
}
