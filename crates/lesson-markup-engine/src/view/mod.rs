//! # Markup View
//!
//! Ties rendering, the active-target registry and resource slots together
//! for one top-level view that may show several markup fields.
//!
//! ## Lifecycle
//!
//! Each [`MarkupView::render`] call is one mount pass for a field:
//!
//! 1. the field's source is tokenized and rendered,
//! 2. segments from the previous pass that no longer exist are unmounted:
//!    unregistered (clearing activity if one was active) and their
//!    resource slots forgotten,
//! 3. when the field is editable, every paragraph registers a target that
//!    rewrites its open tag and reports the new source through the field's
//!    change callback.
//!
//! The view never stores the source. After a change the host passes the
//! new string back in on its next render.
//!
//! ## Sections
//!
//! Fields are told apart by their optional section id. Two fields rendered
//! without a section share one namespace and their segment ids collide.

pub mod assets;

use std::collections::{HashMap, HashSet};
use std::rc::Rc;

use lesson_markup_syntax::{Token, tokenize};
use log::{debug, warn};

use crate::editing::{ActiveTargets, FormatCommand, FormatTarget, apply_format};
use crate::render::{GapResolver, RenderNode, RenderTheme, Rendered, Renderer};
use crate::segment::SegmentId;

pub use assets::{AssetSlots, AssetState, AssetTicket};

/// Receives the full new source after a formatting command.
pub type ChangeCallback = Rc<dyn Fn(String)>;

/// One markup field to render.
#[derive(Clone)]
pub struct Field<'a> {
    pub section: Option<&'a str>,
    pub source: &'a str,
    /// Present when the field is editable.
    pub on_change: Option<ChangeCallback>,
}

impl<'a> Field<'a> {
    /// A read-only field without a section.
    pub fn new(source: &'a str) -> Self {
        Self {
            section: None,
            source,
            on_change: None,
        }
    }

    pub fn section(mut self, section: &'a str) -> Self {
        self.section = Some(section);
        self
    }

    /// Makes the field editable.
    pub fn on_change(mut self, callback: impl Fn(String) + 'static) -> Self {
        self.on_change = Some(Rc::new(callback));
        self
    }

    pub fn is_editable(&self) -> bool {
        self.on_change.is_some()
    }
}

type ClickHandler<'a> = Box<dyn FnMut(&str) + 'a>;

/// Click handlers supplied by the host.
#[derive(Default)]
pub struct Interactions<'a> {
    on_text_click: Option<ClickHandler<'a>>,
    on_hint_click: Option<ClickHandler<'a>>,
}

impl<'a> Interactions<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Called with a segment's plain text when it is clicked outside editing.
    pub fn on_text_click(mut self, handler: impl FnMut(&str) + 'a) -> Self {
        self.on_text_click = Some(Box::new(handler));
        self
    }

    /// Called with a paragraph's hint when a hint paragraph is clicked.
    pub fn on_hint_click(mut self, handler: impl FnMut(&str) + 'a) -> Self {
        self.on_hint_click = Some(Box::new(handler));
        self
    }
}

/// What a click on a segment did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClickOutcome {
    /// The hint handler was called.
    Hint,
    /// The segment became the active format target.
    Activated(SegmentId),
    /// The text handler was called.
    Text,
    Ignored,
}

/// Applies commands to one paragraph of the token list it was rendered from.
struct ParagraphTarget {
    tokens: Rc<[Token]>,
    open: usize,
    on_change: ChangeCallback,
}

impl FormatTarget for ParagraphTarget {
    fn apply_format(&mut self, command: &FormatCommand) {
        match apply_format(&self.tokens, self.open, command) {
            Ok(source) => (self.on_change)(source),
            Err(e) => warn!("could not apply {command}: {e}"),
        }
    }
}

/// Render state for one top-level view.
///
/// `A` is the type of loaded resources kept in [`AssetSlots`].
pub struct MarkupView<A = Vec<u8>> {
    theme: RenderTheme,
    targets: ActiveTargets,
    mounted: HashMap<Option<String>, HashSet<SegmentId>>,
    assets: AssetSlots<A>,
}

impl<A> Default for MarkupView<A> {
    fn default() -> Self {
        Self::new(RenderTheme::default())
    }
}

impl<A> MarkupView<A> {
    pub fn new(theme: RenderTheme) -> Self {
        Self {
            theme,
            targets: ActiveTargets::new(),
            mounted: HashMap::new(),
            assets: AssetSlots::new(),
        }
    }

    pub fn theme(&self) -> &RenderTheme {
        &self.theme
    }

    /// Renders `field`, unmounting segments that disappeared since its last
    /// render and registering paragraphs when the field is editable.
    pub fn render<W>(&mut self, field: &Field<'_>, resolver: &mut impl GapResolver<W>) -> Rendered<W> {
        let tokens = tokenize(field.source);
        let rendered = Renderer::new(&self.theme, field.section).render(&tokens, resolver);

        let section = field.section.map(str::to_string);
        let ids: HashSet<SegmentId> = rendered.nodes.iter().map(|n| node_id(n).clone()).collect();

        if let Some(previous) = self.mounted.remove(&section) {
            for id in previous.difference(&ids) {
                self.unmount_segment(id);
            }
        }

        let tokens: Rc<[Token]> = tokens.into();
        for paragraph in rendered.paragraphs() {
            match &field.on_change {
                Some(on_change) => self.targets.register(
                    paragraph.id.clone(),
                    ParagraphTarget {
                        tokens: Rc::clone(&tokens),
                        open: paragraph.range.open,
                        on_change: Rc::clone(on_change),
                    },
                ),
                None => self.targets.unregister(&paragraph.id),
            }
        }

        self.mounted.insert(section, ids);
        rendered
    }

    /// Unmounts every segment of a field, e.g. when it leaves the screen.
    pub fn unmount(&mut self, section: Option<&str>) {
        let section = section.map(str::to_string);
        if let Some(ids) = self.mounted.remove(&section) {
            debug!("unmounting {} segments of {section:?}", ids.len());
            for id in &ids {
                self.unmount_segment(id);
            }
        }
    }

    fn unmount_segment(&mut self, id: &SegmentId) {
        self.targets.unregister(id);
        self.assets.forget_segment(id);
    }

    /// Resolves a click on a rendered node.
    ///
    /// A hint paragraph goes to the hint handler when there is one;
    /// otherwise a registered paragraph becomes active; otherwise the text
    /// handler gets the segment's text.
    pub fn click<W>(&mut self, node: &RenderNode<W>, interactions: &mut Interactions<'_>) -> ClickOutcome {
        let (id, text, hint) = match node {
            RenderNode::Paragraph(p) => (&p.id, p.text.as_str(), p.attrs.hint.as_deref()),
            RenderNode::Text { id, text } => (id, text.as_str(), None),
            RenderNode::Gap { .. } | RenderNode::Spacer { .. } => return ClickOutcome::Ignored,
        };

        if let (Some(hint), Some(handler)) = (hint, interactions.on_hint_click.as_mut()) {
            handler(hint);
            return ClickOutcome::Hint;
        }
        if self.activate(id) {
            return ClickOutcome::Activated(id.clone());
        }
        if let Some(handler) = interactions.on_text_click.as_mut() {
            handler(text);
            return ClickOutcome::Text;
        }
        ClickOutcome::Ignored
    }

    /// Makes `id` the active format target if it is registered.
    pub fn activate(&mut self, id: &SegmentId) -> bool {
        if !self.targets.is_registered(id) {
            return false;
        }
        self.targets.set_active(Some(id.clone()));
        true
    }

    pub fn deactivate(&mut self) {
        self.targets.set_active(None);
    }

    pub fn active(&self) -> Option<&SegmentId> {
        self.targets.active()
    }

    /// Sends `command` to the active paragraph; see [`ActiveTargets::dispatch`].
    pub fn dispatch(&mut self, command: &FormatCommand) -> bool {
        self.targets.dispatch(command)
    }

    pub fn targets(&self) -> &ActiveTargets {
        &self.targets
    }

    /// Segment ids currently mounted for a field.
    pub fn mounted(&self, section: Option<&str>) -> Option<&HashSet<SegmentId>> {
        self.mounted.get(&section.map(str::to_string))
    }

    pub fn assets(&self) -> &AssetSlots<A> {
        &self.assets
    }

    pub fn assets_mut(&mut self) -> &mut AssetSlots<A> {
        &mut self.assets
    }
}

fn node_id<W>(node: &RenderNode<W>) -> &SegmentId {
    match node {
        RenderNode::Paragraph(p) => &p.id,
        RenderNode::Text { id, .. } | RenderNode::Gap { id, .. } | RenderNode::Spacer { id, .. } => id,
    }
}
