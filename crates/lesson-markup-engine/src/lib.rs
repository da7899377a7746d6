//! # lesson-markup-engine
//!
//! Rendering and in-place formatting for lesson markup.
//!
//! ```text
//! source ─ tokenize ─▶ tokens ─ render ─▶ segments ─ click ─▶ active target
//!    ▲                                                           │
//!    └──────────── on_change(new source) ◀── mutator ◀── dispatch(command)
//! ```
//!
//! - [`render`]: tokens to segments, gap widgets via a caller resolver,
//!   and an HTML writer.
//! - [`editing`]: format commands, the open-tag mutator and the
//!   active-target registry.
//! - [`view`]: [`MarkupView`], which owns a registry and resource slots for
//!   one top-level view and drives mount and unmount.
//!
//! ```
//! use std::cell::RefCell;
//! use std::rc::Rc;
//! use lesson_markup_engine::{Field, FormatCommand, Interactions, MarkupView, NoGaps};
//!
//! let saved = Rc::new(RefCell::new(String::new()));
//! let sink = Rc::clone(&saved);
//! let field = Field::new("<p center>Hello</p>").on_change(move |s| *sink.borrow_mut() = s);
//!
//! let mut view = MarkupView::<()>::default();
//! let rendered = view.render::<()>(&field, &mut NoGaps);
//! view.click(&rendered.nodes[0], &mut Interactions::new());
//! view.dispatch(&FormatCommand::Bold);
//!
//! assert_eq!(*saved.borrow(), "<p center bold>Hello</p>");
//! ```

pub mod editing;
pub mod render;
pub mod segment;
pub mod view;

pub use editing::{ActiveTargets, FormatCommand, FormatError, FormatTarget, apply_format};
pub use render::{
    GapResolver, HintBorder, Inline, NoGaps, ParagraphSegment, RenderNode, RenderTheme, Rendered,
    Renderer, render,
};
pub use segment::SegmentId;
pub use view::{
    AssetSlots, AssetState, AssetTicket, ChangeCallback, ClickOutcome, Field, Interactions,
    MarkupView,
};
