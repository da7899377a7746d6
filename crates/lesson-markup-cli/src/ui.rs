use lesson_markup_engine::{Inline, ParagraphSegment, RenderNode};
use lesson_markup_syntax::{Align, ParagraphAttrs};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};

use crate::app::App;

pub fn draw(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([Constraint::Min(0), Constraint::Length(3), Constraint::Length(1)])
        .split(f.area());

    let title = if app.is_dirty() { "Lesson *" } else { "Lesson" };
    let content = Paragraph::new(lesson_lines(app))
        .block(Block::default().borders(Borders::ALL).title(title))
        .wrap(Wrap { trim: false });
    f.render_widget(content, chunks[0]);

    let status = Paragraph::new(vec![Line::from(status_line(app))])
        .block(Block::default().borders(Borders::ALL).title("Segment"));
    f.render_widget(status, chunks[1]);

    let help = Line::from(vec![
        Span::raw("q: Quit | ↑/k ↓/j: Select | "),
        Span::raw("b/i/u: Style | l/c/r: Align | +/-: Size | "),
        Span::raw("1-5: Colour | 0: Clear colour | s: Save"),
    ]);
    f.render_widget(Paragraph::new(vec![help]), chunks[2]);
}

fn status_line(app: &App) -> String {
    let Some(p) = app.active_paragraph() else {
        return app.status.clone();
    };
    let mut parts = vec![format!("align {}", p.attrs.align.keyword())];
    if let Some(size) = p.attrs.font_size_px {
        parts.push(format!("size {size}px"));
    }
    if let Some(color) = &p.attrs.color {
        parts.push(format!("color {color}"));
    }
    if !app.status.is_empty() {
        parts.push(app.status.clone());
    }
    parts.join(" | ")
}

fn lesson_lines(app: &App) -> Vec<Line<'static>> {
    let active = app.active();
    let mut lines = Vec::new();
    let mut loose: Vec<Span<'static>> = Vec::new();

    for node in &app.rendered().nodes {
        match node {
            RenderNode::Paragraph(p) => {
                if !loose.is_empty() {
                    lines.push(Line::from(std::mem::take(&mut loose)));
                }
                lines.extend(paragraph_lines(p, active == Some(&p.id)));
            }
            RenderNode::Text { text, .. } => loose.push(Span::raw(text.clone())),
            RenderNode::Gap { widget, .. } => loose.push(gap_span(widget)),
            RenderNode::Spacer { .. } => lines.push(Line::from(std::mem::take(&mut loose))),
        }
    }
    if !loose.is_empty() {
        lines.push(Line::from(loose));
    }
    lines
}

fn paragraph_lines(p: &ParagraphSegment<String>, selected: bool) -> Vec<Line<'static>> {
    let style = paragraph_style(&p.attrs);
    let marker = match &p.border {
        Some(border) => Span::styled("┃ ", Style::default().fg(parse_color(&border.color))),
        None => Span::raw("  "),
    };
    let cursor = if selected {
        Span::styled("▶", Style::default().add_modifier(Modifier::BOLD))
    } else {
        Span::raw(" ")
    };

    let mut lines = Vec::new();
    let mut spans = vec![cursor, marker.clone()];
    for child in &p.children {
        match child {
            Inline::Text(text) => spans.push(Span::styled(text.clone(), style)),
            Inline::Gap { widget, .. } => spans.push(gap_span(widget)),
            Inline::Spacer { .. } => {
                lines.push(aligned(Line::from(std::mem::take(&mut spans)), p.attrs.align));
                spans = vec![Span::raw(" "), marker.clone()];
            }
        }
    }
    lines.push(aligned(Line::from(spans), p.attrs.align));
    lines.push(Line::default());
    lines
}

fn aligned(line: Line<'static>, align: Align) -> Line<'static> {
    match align {
        Align::Left => line.left_aligned(),
        Align::Center => line.centered(),
        Align::Right => line.right_aligned(),
    }
}

fn paragraph_style(attrs: &ParagraphAttrs) -> Style {
    let mut style = Style::default();
    if attrs.bold {
        style = style.add_modifier(Modifier::BOLD);
    }
    if attrs.italic {
        style = style.add_modifier(Modifier::ITALIC);
    }
    if attrs.underline {
        style = style.add_modifier(Modifier::UNDERLINED);
    }
    if let Some(color) = &attrs.color {
        style = style.fg(parse_color(color));
    }
    style
}

fn gap_span(widget: &str) -> Span<'static> {
    Span::styled(
        widget.to_string(),
        Style::default().fg(Color::Black).bg(Color::Gray),
    )
}

/// Terminal colour for a display value; unknown values fall back to the default.
fn parse_color(value: &str) -> Color {
    value.parse().unwrap_or(Color::Reset)
}
