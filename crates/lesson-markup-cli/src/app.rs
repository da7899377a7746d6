use anyhow::{Context, Result};
use lesson_markup_config::Config;
use lesson_markup_engine::{
    Field, FormatCommand, Interactions, MarkupView, ParagraphSegment, RenderNode, RenderTheme,
    Rendered, SegmentId,
};
use lesson_markup_syntax::Align;
use std::{
    cell::{Cell, RefCell},
    path::PathBuf,
    rc::Rc,
};

/// Named colours on the number keys, `1` first.
pub const COLOR_KEYS: [&str; 5] = ["red", "green", "blue", "orange", "purple"];

const DEFAULT_SIZE_PX: u32 = 16;
const MIN_SIZE_PX: u32 = 8;
const SIZE_STEP_PX: u32 = 2;

pub fn theme_from_config(config: &Config) -> RenderTheme {
    RenderTheme {
        accent: config.accent_color.clone(),
        low: config.hint_colors.low.clone(),
        medium: config.hint_colors.medium.clone(),
        high: config.hint_colors.high.clone(),
        line_break_height_px: config.line_break_height_px,
    }
}

/// Shows a gap as an empty answer box.
pub fn gap_widget(id: &str) -> Option<String> {
    Some(format!("[____ {id}]"))
}

pub struct App {
    path: PathBuf,
    source: Rc<RefCell<String>>,
    dirty: Rc<Cell<bool>>,
    view: MarkupView<()>,
    rendered: Rendered<String>,
    paragraphs: Vec<SegmentId>,
    selected: usize,
    pub status: String,
}

impl App {
    pub fn new(path: PathBuf, source: String, theme: RenderTheme) -> Self {
        let mut app = Self {
            path,
            source: Rc::new(RefCell::new(source)),
            dirty: Rc::new(Cell::new(false)),
            view: MarkupView::new(theme),
            rendered: Rendered {
                section: None,
                nodes: Vec::new(),
            },
            paragraphs: Vec::new(),
            selected: 0,
            status: String::new(),
        };
        app.refresh();
        app.select(0);
        app
    }

    pub fn source(&self) -> String {
        self.source.borrow().clone()
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty.get()
    }

    pub fn rendered(&self) -> &Rendered<String> {
        &self.rendered
    }

    pub fn active(&self) -> Option<&SegmentId> {
        self.view.active()
    }

    pub fn active_paragraph(&self) -> Option<&ParagraphSegment<String>> {
        self.rendered.paragraph(self.active()?)
    }

    /// Re-renders from the current source and re-registers paragraphs.
    fn refresh(&mut self) {
        let source = self.source();
        let store = Rc::clone(&self.source);
        let dirty = Rc::clone(&self.dirty);
        let field = Field::new(&source).on_change(move |new_source| {
            *store.borrow_mut() = new_source;
            dirty.set(true);
        });

        self.rendered = self.view.render(&field, &mut gap_widget);
        self.paragraphs = self.rendered.paragraphs().map(|p| p.id.clone()).collect();
    }

    fn select(&mut self, index: usize) {
        if self.paragraphs.is_empty() {
            self.view.deactivate();
            self.status = "No paragraphs to format".to_string();
            return;
        }
        self.selected = index.min(self.paragraphs.len() - 1);
        let id = &self.paragraphs[self.selected];
        let Some(node) = self
            .rendered
            .nodes
            .iter()
            .find(|n| matches!(n, RenderNode::Paragraph(p) if &p.id == id))
        else {
            return;
        };
        self.view.click(node, &mut Interactions::new());
        self.status = match self.active_paragraph().and_then(|p| p.attrs.hint.clone()) {
            Some(hint) => format!("Hint: {hint}"),
            None => String::new(),
        };
    }

    pub fn next(&mut self) {
        if !self.paragraphs.is_empty() {
            self.select((self.selected + 1) % self.paragraphs.len());
        }
    }

    pub fn previous(&mut self) {
        if !self.paragraphs.is_empty() {
            let len = self.paragraphs.len();
            self.select((self.selected + len - 1) % len);
        }
    }

    /// Sends `command` to the active paragraph and re-renders.
    pub fn apply(&mut self, command: FormatCommand) {
        if !self.view.dispatch(&command) {
            self.status = format!("Nothing selected for {command}");
            return;
        }
        log::info!("applied {command} to {:?}", self.active());
        self.refresh();
        self.select(self.selected);
    }

    pub fn set_align(&mut self, align: Align) {
        self.apply(FormatCommand::Align(align));
    }

    pub fn set_color(&mut self, color: &str) {
        self.apply(FormatCommand::Color(color.to_string()));
    }

    /// Grows or shrinks the active paragraph's font size by one step.
    pub fn step_size(&mut self, grow: bool) {
        let Some(current) = self.active_paragraph().map(|p| p.attrs.font_size_px) else {
            return;
        };
        let current = current.unwrap_or(DEFAULT_SIZE_PX);
        let next = if grow {
            current.saturating_add(SIZE_STEP_PX)
        } else {
            current.saturating_sub(SIZE_STEP_PX).max(MIN_SIZE_PX)
        };
        self.apply(FormatCommand::Size(next.to_string()));
    }

    pub fn save(&mut self) -> Result<()> {
        std::fs::write(&self.path, self.source())
            .with_context(|| format!("writing {}", self.path.display()))?;
        self.dirty.set(false);
        self.status = format!("Saved {}", self.path.display());
        log::info!("saved {}", self.path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn app(source: &str) -> App {
        App::new(PathBuf::from("lesson.markup"), source.to_string(), RenderTheme::default())
    }

    #[test]
    fn first_paragraph_starts_active() {
        let app = app("intro<p>one</p><p>two</p>");
        assert_eq!(app.active(), Some(&SegmentId::new(None, 1, 3)));
    }

    #[test]
    fn formatting_follows_selection() {
        let mut app = app("<p>one</p><p>two</p>");
        app.next();
        app.apply(FormatCommand::Bold);
        app.set_align(Align::Center);

        assert_eq!(app.source(), "<p>one</p><p bold center>two</p>");
        assert!(app.is_dirty());
        assert_eq!(app.active(), Some(&SegmentId::new(None, 3, 5)));
    }

    #[test]
    fn selection_wraps() {
        let mut app = app("<p>a</p><p>b</p>");
        app.previous();
        assert_eq!(app.active(), Some(&SegmentId::new(None, 3, 5)));
        app.next();
        assert_eq!(app.active(), Some(&SegmentId::new(None, 0, 2)));
    }

    #[test]
    fn size_steps_from_default_and_clamps() {
        let mut app = app("<p>a</p>");
        app.step_size(true);
        assert_eq!(app.source(), "<p size='18'>a</p>");

        let mut app = self::app("<p size='9'>a</p>");
        app.step_size(false);
        assert_eq!(app.source(), "<p size='8'>a</p>");
    }

    #[test]
    fn size_step_saturates_at_the_largest_size() {
        let mut app = app("<p size='4294967295'>a</p>");
        app.step_size(true);
        assert_eq!(app.source(), "<p size='4294967295'>a</p>");
        assert_eq!(
            app.active_paragraph().and_then(|p| p.attrs.font_size_px),
            Some(u32::MAX)
        );
    }

    #[test]
    fn colors_set_and_clear() {
        let mut app = app("<p>a</p>");
        app.set_color(COLOR_KEYS[2]);
        assert_eq!(app.source(), "<p color='blue'>a</p>");
        app.set_color("");
        assert_eq!(app.source(), "<p>a</p>");
    }

    #[test]
    fn hint_is_shown_for_active_paragraph() {
        let app = app("<p hint='Use the past tense'>I </gap id='q1'> home.</p>");
        assert_eq!(app.status, "Hint: Use the past tense");
    }

    #[test]
    fn no_paragraphs_means_nothing_to_format() {
        let mut app = app("just text");
        app.apply(FormatCommand::Bold);
        assert_eq!(app.source(), "just text");
        assert!(!app.is_dirty());
    }

    #[test]
    fn save_writes_source_and_clears_dirty() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("lesson.markup");
        let mut app = App::new(path.clone(), "<p>a</p>".to_string(), RenderTheme::default());
        app.apply(FormatCommand::Italic);
        app.save().unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "<p italic>a</p>");
        assert!(!app.is_dirty());
    }

    #[test]
    fn theme_comes_from_config() {
        let config = Config {
            accent_color: "teal".to_string(),
            line_break_height_px: 4,
            ..Config::default()
        };
        let theme = theme_from_config(&config);
        assert_eq!(theme.accent, "teal");
        assert_eq!(theme.line_break_height_px, 4);
        assert_eq!(theme.high, config.hint_colors.high);
    }
}
