//! # Tokenizer - Splitting Markup into Tokens
//!
//! The tokenizer walks the input with a [`Cursor`] and tries each delimiter
//! in priority order: gap marker, line break, paragraph open, paragraph
//! close. Whatever lies between recognised delimiters becomes a
//! [`Token::TextRun`].
//!
//! ## Totality
//!
//! Tokenizing never fails and never drops a byte. A delimiter that only
//! partially matches (`</gap>` without an id, `<p` with no closing `>`,
//! `</nav>`) is left as literal text:
//!
//! ```
//! use lesson_markup_syntax::{serialize, tokenize};
//!
//! let input = "<p bold>Fill </gap id='g1'> in</p> </gap> <pre>";
//! assert_eq!(serialize(&tokenize(input)), input);
//! ```
//!
//! ## Flat Grammar
//!
//! Paragraphs do not nest and are not closed here; the token list is flat.
//! Implicit closes (a second `<p>` or end of input) are worked out by
//! [`crate::structure`].

use crate::cursor::Cursor;
use crate::kinds::{Gap, LineBreak, Paragraph, TAG_END};
use crate::span::Span;
use crate::tag::open_tag_len;
use crate::token::Token;

/// Tokenizes markup into a flat token list covering the whole input.
pub fn tokenize(input: &str) -> Vec<Token> {
    tokenize_with_spans(input)
        .into_iter()
        .map(|(token, _)| token)
        .collect()
}

/// Tokenizes and returns each token with its byte span in `input`.
pub fn tokenize_with_spans(input: &str) -> Vec<(Token, Span)> {
    let mut cur = Cursor::new(input);
    let mut out = Vec::new();
    let mut text_start = cur.pos();

    // Helper to flush accumulated text as a TextRun
    fn flush_text(out: &mut Vec<(Token, Span)>, input: &str, start: usize, end: usize) {
        if end > start {
            out.push((Token::text(&input[start..end]), Span { start, end }));
        }
    }

    while !cur.eof() {
        let start = cur.pos();
        let token = try_gap(&mut cur)
            .or_else(|| try_line_break(&mut cur))
            .or_else(|| try_paragraph_open(&mut cur))
            .or_else(|| try_paragraph_close(&mut cur));

        match token {
            Some(token) => {
                flush_text(&mut out, input, text_start, start);
                out.push((token, Span { start, end: cur.pos() }));
                text_start = cur.pos();
            }
            None => {
                cur.bump();
            }
        }
    }

    flush_text(&mut out, input, text_start, cur.pos());
    out
}

/// Attempts `</gap id='ID'>` at the current position.
///
/// On failure, cursor position is restored.
fn try_gap(cur: &mut Cursor<'_>) -> Option<Token> {
    if !cur.starts_with_ignore_case(Gap::OPEN) {
        return None;
    }

    let saved = cur.clone();
    let start = cur.pos();
    let parsed = (|| {
        cur.bump_n(Gap::OPEN.len());
        if cur.skip_whitespace() == 0 || !cur.starts_with_ignore_case(Gap::ID) {
            return None;
        }
        cur.bump_n(Gap::ID.len());
        cur.skip_whitespace();
        if !cur.eat(Gap::EQ) {
            return None;
        }
        cur.skip_whitespace();
        let quote = cur.peek().filter(|q| Gap::QUOTES.contains(q))?;
        cur.bump();
        let id_start = cur.pos();
        while let Some(b) = cur.peek() {
            if b == quote || b == TAG_END || b == b'\n' {
                break;
            }
            cur.bump();
        }
        let id_end = cur.pos();
        if !cur.eat(quote) {
            return None;
        }
        cur.skip_whitespace();
        if !cur.eat(TAG_END) {
            return None;
        }
        Some((id_start, id_end))
    })();

    match parsed {
        Some((id_start, id_end)) => Some(Token::GapMarker {
            id: cur.s[id_start..id_end].to_string(),
            raw: cur.s[start..cur.pos()].to_string(),
        }),
        None => {
            // Not a gap marker, restore cursor
            *cur = saved;
            None
        }
    }
}

/// Attempts `</n>` (whitespace allowed before `>`).
fn try_line_break(cur: &mut Cursor<'_>) -> Option<Token> {
    let raw = try_closing_tag(cur, LineBreak::OPEN)?;
    Some(Token::LineBreak { raw })
}

/// Attempts `</p>` (whitespace allowed before `>`).
fn try_paragraph_close(cur: &mut Cursor<'_>) -> Option<Token> {
    let raw = try_closing_tag(cur, Paragraph::CLOSE)?;
    Some(Token::ParagraphClose { raw })
}

/// Matches `open`, optional whitespace and `>`, returning the matched text.
fn try_closing_tag(cur: &mut Cursor<'_>, open: &[u8]) -> Option<String> {
    if !cur.starts_with_ignore_case(open) {
        return None;
    }

    let saved = cur.clone();
    let start = cur.pos();
    cur.bump_n(open.len());
    cur.skip_whitespace();
    if !cur.eat(TAG_END) {
        *cur = saved;
        return None;
    }
    Some(cur.s[start..cur.pos()].to_string())
}

/// Attempts `<p …>`.
///
/// The tag end is found quote-aware, so `>` inside a quoted attribute value
/// does not end the tag. If the quoted scan finds no end, or its end would
/// pull following markup into the tag (typically an apostrophe in a hint
/// pairing with one in the text), the first `>` is used instead; if there
/// is no `>` at all the text stays literal.
fn try_paragraph_open(cur: &mut Cursor<'_>) -> Option<Token> {
    if !cur.starts_with_ignore_case(Paragraph::OPEN) {
        return None;
    }
    let after = cur.rest().as_bytes().get(Paragraph::OPEN.len()).copied();
    if !after.is_some_and(|b| b == TAG_END || b.is_ascii_whitespace()) {
        return None;
    }

    let rest = cur.rest();
    let len = open_tag_len(rest).or_else(|| {
        rest.bytes()
            .position(|b| b == TAG_END)
            .map(|at| at + 1)
    })?;

    let raw_tag = &rest[..len];
    cur.bump_n(len);
    Some(Token::paragraph_open(raw_tag))
}
