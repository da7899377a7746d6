//! # Active-Target Registry
//!
//! Tracks which rendered paragraphs can take formatting commands and which
//! one of them is active. A toolbar dispatches commands here without
//! knowing anything about the paragraph on the other end.
//!
//! At most one id is active at a time. Unregistering the active id clears
//! it, so a paragraph that unmounts mid-edit can never receive a command.

use std::collections::HashMap;
use std::fmt;

use log::debug;

use super::command::FormatCommand;
use crate::segment::SegmentId;

/// Something that applies formatting commands; usually one paragraph.
///
/// Implemented for any `FnMut(&FormatCommand)`.
pub trait FormatTarget {
    fn apply_format(&mut self, command: &FormatCommand);
}

impl<F> FormatTarget for F
where
    F: FnMut(&FormatCommand),
{
    fn apply_format(&mut self, command: &FormatCommand) {
        self(command)
    }
}

/// Registered targets plus the single active id.
#[derive(Default)]
pub struct ActiveTargets {
    targets: HashMap<SegmentId, Box<dyn FormatTarget>>,
    active: Option<SegmentId>,
}

impl ActiveTargets {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `target` under `id`, replacing any previous target.
    ///
    /// An id that was active stays active.
    pub fn register(&mut self, id: SegmentId, target: impl FormatTarget + 'static) {
        debug!("register format target {id}");
        self.targets.insert(id, Box::new(target));
    }

    /// Removes `id`, clearing the active id if it was this one.
    pub fn unregister(&mut self, id: &SegmentId) {
        if self.targets.remove(id).is_some() {
            debug!("unregister format target {id}");
        }
        if self.active.as_ref() == Some(id) {
            self.active = None;
        }
    }

    /// Makes `id` the active target, or clears activity with `None`.
    pub fn set_active(&mut self, id: Option<SegmentId>) {
        debug!(
            "active format target: {}",
            id.as_ref().map_or_else(|| "none".to_string(), SegmentId::to_string)
        );
        self.active = id;
    }

    pub fn active(&self) -> Option<&SegmentId> {
        self.active.as_ref()
    }

    pub fn is_registered(&self, id: &SegmentId) -> bool {
        self.targets.contains_key(id)
    }

    /// Sends `command` to the active target.
    ///
    /// Returns false, doing nothing, when no id is active or the active id
    /// has no registered target.
    pub fn dispatch(&mut self, command: &FormatCommand) -> bool {
        let Some(id) = &self.active else {
            debug!("dropping {command}: no active target");
            return false;
        };
        match self.targets.get_mut(id) {
            Some(target) => {
                debug!("dispatching {command} to {id}");
                target.apply_format(command);
                true
            }
            None => {
                debug!("dropping {command}: {id} is not registered");
                false
            }
        }
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    /// Registered ids, in no particular order.
    pub fn ids(&self) -> impl Iterator<Item = &SegmentId> {
        self.targets.keys()
    }
}

impl fmt::Debug for ActiveTargets {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActiveTargets")
            .field("targets", &self.targets.keys().collect::<Vec<_>>())
            .field("active", &self.active)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn recorder() -> (Rc<RefCell<Vec<FormatCommand>>>, impl FnMut(&FormatCommand)) {
        let log = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&log);
        (log, move |c: &FormatCommand| sink.borrow_mut().push(c.clone()))
    }

    fn id(open: usize) -> SegmentId {
        SegmentId::new(None, open, open + 2)
    }

    #[test]
    fn dispatch_reaches_only_the_active_target() {
        let (first, a) = recorder();
        let (second, b) = recorder();
        let mut targets = ActiveTargets::new();
        targets.register(id(0), a);
        targets.register(id(3), b);

        targets.set_active(Some(id(3)));
        assert!(targets.dispatch(&FormatCommand::Bold));

        assert!(first.borrow().is_empty());
        assert_eq!(*second.borrow(), vec![FormatCommand::Bold]);
    }

    #[test]
    fn dispatch_without_active_is_a_no_op() {
        let (seen, a) = recorder();
        let mut targets = ActiveTargets::new();
        targets.register(id(0), a);

        assert!(!targets.dispatch(&FormatCommand::Italic));
        assert!(seen.borrow().is_empty());
    }

    #[test]
    fn unregistering_the_active_id_clears_it() {
        let (seen, a) = recorder();
        let mut targets = ActiveTargets::new();
        targets.register(id(0), a);
        targets.set_active(Some(id(0)));

        targets.unregister(&id(0));
        assert_eq!(targets.active(), None);
        assert!(!targets.dispatch(&FormatCommand::Bold));
        assert!(seen.borrow().is_empty());
        assert!(targets.is_empty());
    }

    #[test]
    fn unregistering_another_id_keeps_activity() {
        let mut targets = ActiveTargets::new();
        targets.register(id(0), |_: &FormatCommand| {});
        targets.register(id(3), |_: &FormatCommand| {});
        targets.set_active(Some(id(0)));

        targets.unregister(&id(3));
        assert_eq!(targets.active(), Some(&id(0)));
        assert_eq!(targets.len(), 1);
    }

    #[test]
    fn active_id_without_target_drops_commands() {
        let mut targets = ActiveTargets::new();
        targets.set_active(Some(id(7)));
        assert!(!targets.dispatch(&FormatCommand::Underline));
        assert!(!targets.is_registered(&id(7)));
    }

    #[test]
    fn re_registering_replaces_target_and_keeps_activity() {
        let (old, a) = recorder();
        let (new, b) = recorder();
        let mut targets = ActiveTargets::new();
        targets.register(id(0), a);
        targets.set_active(Some(id(0)));
        targets.register(id(0), b);

        assert!(targets.dispatch(&FormatCommand::Bold));
        assert!(old.borrow().is_empty());
        assert_eq!(new.borrow().len(), 1);
        assert_eq!(targets.len(), 1);
    }
}
