//! HTML output for rendered markup.
//!
//! Text is escaped; gap widgets are written as the caller formats them.
//! Paragraph styling goes into an inline `style` attribute and the segment
//! id into `data-segment`, so a web surface can map clicks back to segments.

use html_escape::{encode_double_quoted_attribute, encode_text};
use lesson_markup_syntax::Align;

use super::{Inline, ParagraphSegment, RenderNode, Rendered};

/// Writes `rendered` as HTML, formatting gap widgets with `widget`.
pub fn to_html<W>(rendered: &Rendered<W>, widget: impl Fn(&W) -> String) -> String {
    let mut out = String::new();
    for node in &rendered.nodes {
        match node {
            RenderNode::Paragraph(p) => write_paragraph(&mut out, p, &widget),
            RenderNode::Text { text, .. } => out.push_str(&encode_text(text)),
            RenderNode::Gap { widget: w, .. } => out.push_str(&widget(w)),
            RenderNode::Spacer { height_px, .. } => write_spacer(&mut out, *height_px),
        }
    }
    out
}

fn write_paragraph<W>(out: &mut String, p: &ParagraphSegment<W>, widget: &impl Fn(&W) -> String) {
    out.push_str("<p data-segment=\"");
    out.push_str(&encode_double_quoted_attribute(&p.id.to_string()));
    out.push('"');

    let style = paragraph_style(p);
    if !style.is_empty() {
        out.push_str(" style=\"");
        out.push_str(&encode_double_quoted_attribute(&style));
        out.push('"');
    }
    if let Some(hint) = &p.attrs.hint {
        out.push_str(" title=\"");
        out.push_str(&encode_double_quoted_attribute(hint));
        out.push('"');
    }
    out.push('>');

    for child in &p.children {
        match child {
            Inline::Text(text) => out.push_str(&encode_text(text)),
            Inline::Gap { widget: w, .. } => out.push_str(&widget(w)),
            Inline::Spacer { height_px } => write_spacer(out, *height_px),
        }
    }
    out.push_str("</p>");
}

fn write_spacer(out: &mut String, height_px: u32) {
    out.push_str(&format!(
        "<span class=\"line-break\" style=\"display:block;height:{height_px}px\"></span>"
    ));
}

fn paragraph_style<W>(p: &ParagraphSegment<W>) -> String {
    let attrs = &p.attrs;
    let mut rules = Vec::new();
    if attrs.bold {
        rules.push("font-weight:bold".to_string());
    }
    if attrs.italic {
        rules.push("font-style:italic".to_string());
    }
    if attrs.underline {
        rules.push("text-decoration:underline".to_string());
    }
    if attrs.align != Align::Left {
        rules.push(format!("text-align:{}", attrs.align.keyword()));
    }
    if let Some(size) = attrs.font_size_px {
        rules.push(format!("font-size:{size}px"));
    }
    if let Some(color) = attrs.color.as_deref().filter(|c| is_css_value(c)) {
        rules.push(format!("color:{color}"));
    }
    if let Some(border) = p.border.as_ref().filter(|b| is_css_value(&b.color)) {
        rules.push(format!("border:1px dashed {}", border.color));
    }
    rules.join(";")
}

/// Colours are stored as written; one that would end its declaration is
/// left out of the style.
fn is_css_value(value: &str) -> bool {
    !value.contains([';', '{', '}'])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::{NoGaps, render};
    use insta::assert_snapshot;
    use lesson_markup_syntax::tokenize;

    #[test]
    fn html_for_styled_paragraph_with_gap() {
        let tokens = tokenize(
            "<p bold center size='18' color='blue'>I </gap id='v'> &amp; you</p> after </n>",
        );
        let rendered = render(&tokens, &mut |id: &str| Some(id.to_string()));
        let html = to_html(&rendered, |id| format!("<input name=\"{id}\">"));
        assert_snapshot!(html, @r#"<p data-segment="0-4" style="font-weight:bold;text-align:center;font-size:18px;color:#1e88e5">I <input name="v"> &amp; you</p> after <span class="line-break" style="display:block;height:12px"></span>"#);
    }

    #[test]
    fn html_escapes_text_and_hint() {
        let tokens = tokenize("<p hint='a \"quote\" <here>'>1 < 2</p>");
        let rendered = render::<()>(&tokens, &mut NoGaps);
        let html = to_html(&rendered, |_| String::new());
        assert!(html.contains("1 &lt; 2"));
        assert!(html.contains("border:1px dashed #3f51b5"));
        assert!(html.contains("title=\"a &quot;quote&quot; "));
    }

    #[test]
    fn colour_cannot_add_declarations() {
        let tokens = tokenize("<p bold color='red;background:url(x)'>x</p>");
        let rendered = render::<()>(&tokens, &mut NoGaps);
        assert_eq!(
            to_html(&rendered, |_| String::new()),
            "<p data-segment=\"0-2\" style=\"font-weight:bold\">x</p>"
        );
    }

    #[test]
    fn plain_paragraph_has_no_style() {
        let rendered = render::<()>(&tokenize("<p>x</p>"), &mut NoGaps);
        assert_eq!(to_html(&rendered, |_| String::new()), "<p data-segment=\"0-2\">x</p>");
    }
}
