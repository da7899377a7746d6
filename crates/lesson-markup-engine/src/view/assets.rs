//! Pending-resource bookkeeping for rendered segments.
//!
//! Resources referenced from markup (images, audio) are loaded by the host.
//! A segment asks for a slot with [`AssetSlots::request`] and hands the
//! returned [`AssetTicket`] to the loader; the loader later calls
//! [`AssetSlots::resolve`]. A ticket whose segment has since unmounted, or
//! whose slot was requested again, no longer matches and its result is
//! dropped.

use std::collections::HashMap;

use log::debug;

use crate::segment::SegmentId;

/// Proof of a pending request, handed to the loader.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetTicket {
    segment: SegmentId,
    key: String,
    generation: u64,
}

impl AssetTicket {
    pub fn segment(&self) -> &SegmentId {
        &self.segment
    }

    pub fn key(&self) -> &str {
        &self.key
    }
}

/// What a segment currently has for one resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetState<'a, T> {
    Missing,
    Pending,
    Ready(&'a T),
}

#[derive(Debug)]
enum Slot<T> {
    Pending(u64),
    Ready(T),
}

/// Resource slots keyed by segment and resource key.
#[derive(Debug)]
pub struct AssetSlots<T> {
    slots: HashMap<(SegmentId, String), Slot<T>>,
    next_generation: u64,
}

impl<T> Default for AssetSlots<T> {
    fn default() -> Self {
        Self {
            slots: HashMap::new(),
            next_generation: 0,
        }
    }
}

impl<T> AssetSlots<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens a pending slot and returns its ticket.
    ///
    /// Returns `None` when the slot is already pending or ready, so a
    /// segment that re-renders does not start a second load.
    pub fn request(&mut self, segment: &SegmentId, key: &str) -> Option<AssetTicket> {
        let slot_key = (segment.clone(), key.to_string());
        if self.slots.contains_key(&slot_key) {
            return None;
        }
        let generation = self.next_generation;
        self.next_generation += 1;
        self.slots.insert(slot_key, Slot::Pending(generation));
        debug!("asset {key} requested for {segment} (generation {generation})");

        Some(AssetTicket {
            segment: segment.clone(),
            key: key.to_string(),
            generation,
        })
    }

    /// Stores `value` if the ticket's slot is still pending under the same
    /// request. Returns whether it was stored.
    pub fn resolve(&mut self, ticket: AssetTicket, value: T) -> bool {
        let slot_key = (ticket.segment, ticket.key);
        match self.slots.get_mut(&slot_key) {
            Some(slot) if matches!(*slot, Slot::Pending(g) if g == ticket.generation) => {
                *slot = Slot::Ready(value);
                true
            }
            _ => {
                debug!(
                    "dropping stale asset {} for {} (generation {})",
                    slot_key.1, slot_key.0, ticket.generation
                );
                false
            }
        }
    }

    pub fn state(&self, segment: &SegmentId, key: &str) -> AssetState<'_, T> {
        match self.slots.get(&(segment.clone(), key.to_string())) {
            None => AssetState::Missing,
            Some(Slot::Pending(_)) => AssetState::Pending,
            Some(Slot::Ready(value)) => AssetState::Ready(value),
        }
    }

    /// Drops every slot belonging to `segment`, pending or ready.
    pub fn forget_segment(&mut self, segment: &SegmentId) {
        self.slots.retain(|(owner, _), _| owner != segment);
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}
