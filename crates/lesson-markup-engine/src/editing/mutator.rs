//! # Tag Mutation
//!
//! Applies a [`FormatCommand`] to one paragraph by rewriting the text of its
//! open tag. Every other token is re-serialized untouched, so the output
//! differs from the input only inside that one tag.
//!
//! The tag is never regenerated from [`ParagraphAttrs`]: words the command
//! does not touch keep their spelling, order and spacing. Edits are
//! collected as byte-range replacements against the raw tag and applied
//! back to front.
//!
//! [`ParagraphAttrs`]: lesson_markup_syntax::ParagraphAttrs

use std::ops::Range;

use lesson_markup_syntax::tag::{Tag, TagItem};
use lesson_markup_syntax::{Align, Token};

use super::command::{FormatCommand, FormatError};

/// Returns the full raw string with the open tag at `open_index` rewritten.
pub fn apply_format(
    tokens: &[Token],
    open_index: usize,
    command: &FormatCommand,
) -> Result<String, FormatError> {
    let Some(Token::ParagraphOpen { raw_tag, .. }) = tokens.get(open_index) else {
        return Err(FormatError::NotAParagraph { index: open_index });
    };
    let rewritten = rewrite_tag(raw_tag, command);

    let mut out = String::new();
    for (i, token) in tokens.iter().enumerate() {
        if i == open_index {
            out.push_str(&rewritten);
        } else {
            out.push_str(token.raw());
        }
    }
    Ok(out)
}

/// Rewrites a single raw `<p …>` tag.
pub fn rewrite_tag(raw: &str, command: &FormatCommand) -> String {
    let tag = Tag::parse(raw);
    let mut edits = Edits::new(raw);

    match command {
        FormatCommand::Bold | FormatCommand::Italic | FormatCommand::Underline => {
            let word = command.kind();
            let found = tag.flags(word);
            if found.is_empty() {
                edits.append(word);
            } else {
                for span in found {
                    edits.remove(span);
                }
            }
        }
        FormatCommand::Align(align) => {
            for keyword in Align::ALL.map(Align::keyword) {
                for span in tag.flags(keyword) {
                    edits.remove(span);
                }
            }
            edits.append(align.keyword());
        }
        FormatCommand::Color(value) => set_pair(&tag, &mut edits, "color", value),
        FormatCommand::Size(value) => {
            // Bare numbers only count as a size when no color or hint is present
            if !tag.has_pair("color") && !tag.has_pair("hint") {
                for item in tag.items() {
                    if let TagItem::Number { span, .. } = item {
                        edits.remove(span);
                    }
                }
            }
            set_pair(&tag, &mut edits, "size", value);
        }
    }

    edits.apply()
}

/// Replaces the first `name=` pair and drops the rest; an empty value drops all.
fn set_pair(tag: &Tag<'_>, edits: &mut Edits<'_>, name: &str, value: &str) {
    let pairs = tag.pairs(name);
    let mut spans = pairs.iter().map(TagItem::span);

    if value.is_empty() {
        spans.for_each(|span| edits.remove(span));
        return;
    }

    let written = format!("{name}={}", quote(value));
    match spans.next() {
        Some(first) => {
            edits.replace(first, written);
            spans.for_each(|span| edits.remove(span));
        }
        None => edits.append(&written),
    }
}

/// Quotes an attribute value: single quotes unless the value has one.
fn quote(value: &str) -> String {
    match (value.contains('\''), value.contains('"')) {
        (false, _) => format!("'{value}'"),
        (true, false) => format!("\"{value}\""),
        (true, true) => format!("'{}'", value.replace('\'', "\\'")),
    }
}

/// Byte-range replacements against one raw tag.
struct Edits<'a> {
    raw: &'a str,
    edits: Vec<(Range<usize>, String)>,
}

impl<'a> Edits<'a> {
    fn new(raw: &'a str) -> Self {
        Self {
            raw,
            edits: Vec::new(),
        }
    }

    fn replace(&mut self, span: Range<usize>, text: String) {
        self.edits.push((span, text));
    }

    /// Removes `span` along with the whitespace before it, or after it when
    /// nothing precedes.
    fn remove(&mut self, span: Range<usize>) {
        let bytes = self.raw.as_bytes();
        let mut start = span.start;
        while start > 0 && bytes[start - 1].is_ascii_whitespace() {
            start -= 1;
        }
        let mut end = span.end;
        if start == span.start {
            while end < bytes.len() && bytes[end].is_ascii_whitespace() {
                end += 1;
            }
        }
        self.edits.push((start..end, String::new()));
    }

    /// Inserts ` text` before the closing `>`, after any trailing whitespace.
    fn append(&mut self, text: &str) {
        let close = Tag::parse(self.raw)
            .close_offset()
            .or_else(|| self.raw.rfind('>'))
            .unwrap_or(self.raw.len());
        let at = self.raw[..close].trim_end().len();
        self.edits.push((at..at, format!(" {text}")));
    }

    fn apply(mut self) -> String {
        // Back to front; at equal starts the wider edit goes first so an
        // insertion is never swallowed by a removal
        self.edits
            .sort_by(|(a, _), (b, _)| b.start.cmp(&a.start).then(b.end.cmp(&a.end)));

        let mut out = self.raw.to_string();
        let mut floor = usize::MAX;
        for (span, text) in self.edits {
            // Overlapping removals (a word listed twice) are already covered
            if span.end > floor {
                continue;
            }
            out.replace_range(span.clone(), &text);
            floor = span.start;
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lesson_markup_syntax::{ParagraphAttrs, serialize, tokenize};
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn cmd(kind: &str, value: Option<&str>) -> FormatCommand {
        FormatCommand::parse(kind, value).unwrap()
    }

    #[rstest]
    #[case("<p>", "bold", None, "<p bold>")]
    #[case("<p bold>", "bold", None, "<p>")]
    #[case("<p bold italic>", "bold", None, "<p italic>")]
    #[case("<p italic bold>", "bold", None, "<p italic>")]
    #[case("<p  BOLD  center >", "bold", None, "<p  center >")]
    #[case("<p center >", "italic", None, "<p center italic >")]
    #[case("<p center size='12'>", "right", None, "<p size='12' right>")]
    #[case("<p right center>", "left", None, "<p left>")]
    #[case("<p>", "center", None, "<p center>")]
    #[case("<p color='ff0000'>", "color", Some(""), "<p>")]
    #[case("<p bold color='red' italic>", "color", Some("blue"), "<p bold color='blue' italic>")]
    #[case("<p bold>", "color", Some("blue"), "<p bold color='blue'>")]
    #[case("<p size=12 size='14'>", "size", Some("20"), "<p size='20'>")]
    #[case("<p bold 14>", "size", Some("20"), "<p bold size='20'>")]
    #[case("<p 14 hint='x'>", "size", Some("20"), "<p 14 hint='x' size='20'>")]
    #[case("<p size='12'>", "size", Some(""), "<p>")]
    #[case("<p>", "color", Some("it's"), "<p color=\"it's\">")]
    #[case("<p>", "color", Some("it's \"x\""), "<p color='it\\'s \"x\"'>")]
    fn rewrites_tags(
        #[case] raw: &str,
        #[case] kind: &str,
        #[case] value: Option<&str>,
        #[case] expected: &str,
    ) {
        assert_eq!(rewrite_tag(raw, &cmd(kind, value)), expected);
    }

    #[test]
    fn hint_text_containing_bold_is_left_alone() {
        let raw = "<p hint='be bold'>";
        assert_eq!(rewrite_tag(raw, &FormatCommand::Bold), "<p hint='be bold' bold>");
    }

    #[test]
    fn quoted_gt_in_hint_does_not_move_the_insertion_point() {
        let raw = "<p hint='a > b'>";
        assert_eq!(
            rewrite_tag(raw, &FormatCommand::Underline),
            "<p hint='a > b' underline>"
        );
    }

    #[test]
    fn bold_toggles_on_a_tag_with_an_unclosed_quote() {
        let input = "<p hint='it's'>x</p>";
        let once = apply_format(&tokenize(input), 0, &FormatCommand::Bold).unwrap();
        assert_eq!(once, "<p hint='it's' bold>x</p>");
        let tokens = tokenize(&once);
        assert!(matches!(&tokens[0], Token::ParagraphOpen { attrs, .. } if attrs.bold));

        let twice = apply_format(&tokens, 0, &FormatCommand::Bold).unwrap();
        assert_eq!(twice, input);
    }

    #[test]
    fn written_values_read_back() {
        let raw = rewrite_tag("<p>", &cmd("color", Some("it's \"x\"")));
        assert_eq!(
            ParagraphAttrs::from_tag(&raw).color.as_deref(),
            Some("it's \"x\"")
        );
    }

    #[test]
    fn only_the_target_tag_changes() {
        let input = "<p bold>One</p> mid </gap id='g'><p italic>Two</n></p>tail";
        let tokens = tokenize(input);
        let out = apply_format(&tokens, 5, &FormatCommand::Align(Align::Center)).unwrap();
        assert_eq!(
            out,
            "<p bold>One</p> mid </gap id='g'><p italic center>Two</n></p>tail"
        );

        let after = tokenize(&out);
        assert_eq!(after.len(), tokens.len());
        for (i, (a, b)) in tokens.iter().zip(&after).enumerate() {
            if i != 5 {
                assert_eq!(a, b);
            }
        }
    }

    #[test]
    fn non_open_index_is_an_error() {
        let tokens = tokenize("<p>x</p>");
        assert_eq!(
            apply_format(&tokens, 1, &FormatCommand::Bold),
            Err(FormatError::NotAParagraph { index: 1 })
        );
        assert_eq!(
            apply_format(&tokens, 9, &FormatCommand::Bold),
            Err(FormatError::NotAParagraph { index: 9 })
        );
        assert_eq!(serialize(&tokens), "<p>x</p>");
    }
}
