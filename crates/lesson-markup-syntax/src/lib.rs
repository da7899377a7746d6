//! # lesson-markup-syntax
//!
//! A forgiving, lossless tokenizer for the lesson markup dialect: the small
//! tag language lesson and quiz content is authored in.
//!
//! ## The Dialect
//!
//! | Token | Syntax |
//! |---|---|
//! | Gap marker | `</gap id='ID'>` |
//! | Line break | `</n>` (whitespace allowed before `>`) |
//! | Paragraph open | `<p [bold] [italic] [underline] [center\|right] [size='N'] [color='C'] [hint='H'] [importance='low\|medium\|high']>` |
//! | Paragraph close | `</p>` |
//!
//! Everything else is text.
//!
//! ## Architecture Overview
//!
//! ```text
//! Source Text → Tokenizer → Tokens → structure::blocks → Paragraph ranges
//!                  │
//!                  └─ <p …> → Tag lexer (Logos) → ParagraphAttrs
//! ```
//!
//! ### 1. Tokenizer ([`tokenizer`] module)
//!
//! A cursor-based scanner that recognises the four delimiters and emits
//! everything else as text runs. It never fails: malformed or partial tags
//! are literal text, and the token list always re-serializes to the exact
//! input.
//!
//! ### 2. Tag lexer ([`tag`] module)
//!
//! Breaks a raw `<p …>` tag into lexemes with [Logos]. Quoted values are
//! single lexemes, which is how the tokenizer knows a `>` inside
//! `hint='…'` does not end the tag, and how the engine's mutator cuts
//! individual words out of a tag.
//!
//! [Logos]: https://docs.rs/logos
//!
//! ### 3. Attributes ([`attrs`] module)
//!
//! [`ParagraphAttrs`] is derived from the raw tag on demand and never
//! stored separately.
//!
//! ### 4. Grouping ([`structure`] module)
//!
//! Works out paragraph extents in the flat token list, including implicit
//! closes.
//!
//! ## Quick Start
//!
//! ```
//! use lesson_markup_syntax::{blocks, serialize, tokenize, Block, Token};
//!
//! let tokens = tokenize("<p bold center>Hello</p>world");
//! assert_eq!(serialize(&tokens), "<p bold center>Hello</p>world");
//!
//! let Token::ParagraphOpen { attrs, .. } = &tokens[0] else { unreachable!() };
//! assert!(attrs.bold);
//!
//! assert_eq!(blocks(&tokens).len(), 2);
//! assert!(matches!(blocks(&tokens)[1], Block::Orphan(3)));
//! ```

pub mod attrs;
pub mod colors;
pub mod cursor;
pub mod kinds;
pub mod span;
pub mod structure;
pub mod tag;
pub mod token;
pub mod tokenizer;

pub use attrs::{Align, Importance, ParagraphAttrs};
pub use span::Span;
pub use structure::{Block, ParagraphRange, blocks};
pub use token::{Token, serialize};
pub use tokenizer::{tokenize, tokenize_with_spans};
