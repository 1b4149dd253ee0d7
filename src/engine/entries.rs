//! Per-entry annotations, kept beside the page instead of on its nodes.

use crate::context::{EntryHandle, EntryKey, RecordedDecision};
use std::collections::HashMap;

/// What the engine knows about one entry
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EntryState {
    /// Reconciled; never reconciled again
    pub processed: bool,
    /// Permanently excluded by the site
    pub invalid: bool,
    pub processing: Option<RecordedDecision>,
}

struct Slot<E> {
    handle: E,
    state: EntryState,
}

/// Side-table of entry states, keyed by node. Detached nodes are pruned.
pub struct EntryTable<E> {
    slots: HashMap<EntryKey, Slot<E>>,
}

impl<E: EntryHandle> EntryTable<E> {
    pub fn new() -> Self {
        Self {
            slots: HashMap::new(),
        }
    }

    pub fn get(&self, key: EntryKey) -> Option<&EntryState> {
        self.slots.get(&key).map(|slot| &slot.state)
    }

    pub(crate) fn state_mut(&mut self, entry: &E) -> &mut EntryState {
        &mut self
            .slots
            .entry(entry.key())
            .or_insert_with(|| Slot {
                handle: entry.clone(),
                state: EntryState::default(),
            })
            .state
    }

    /// Whether the entry is done with: processed or invalid
    pub fn is_settled(&self, key: EntryKey) -> bool {
        self.get(key).is_some_and(|s| s.processed || s.invalid)
    }

    /// Drop the states of nodes the page no longer holds
    pub fn prune(&mut self) -> usize {
        let before = self.slots.len();
        self.slots.retain(|_, slot| slot.handle.is_attached());
        before - self.slots.len()
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

impl<E: EntryHandle> Default for EntryTable<E> {
    fn default() -> Self {
        Self::new()
    }
}

/// Lets a site's validity check exclude an entry for good
pub struct EntryMarks<'a, E> {
    table: &'a mut EntryTable<E>,
}

impl<'a, E: EntryHandle> EntryMarks<'a, E> {
    pub(crate) fn new(table: &'a mut EntryTable<E>) -> Self {
        Self { table }
    }

    /// Mark the entry invalid. Returns false, so a validity check can `return marks.mark_invalid(e)`.
    pub fn mark_invalid(&mut self, entry: &E) -> bool {
        self.table.state_mut(entry).invalid = true;
        false
    }

    pub fn is_invalid(&self, entry: &E) -> bool {
        self.table.get(entry.key()).is_some_and(|s| s.invalid)
    }
}
