//! Checklist state store.
//!
//! Owns the single current checklist (none before the first successful
//! generation) and exposes the toggle transition. The store is the only
//! writer of completion flags; everything else receives read-only views.
//!
//! Not internally synchronized: designed for single-writer use (a UI
//! event loop or one command invocation). Wrap it in external locking if
//! shared across threads.

use tracing::debug;

use crate::checklist::Checklist;

/// Holds the current checklist and applies toggles to it.
#[derive(Debug, Default)]
pub struct ChecklistStore {
    current: Option<Checklist>,
}

impl ChecklistStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read-only view of the current checklist, if any.
    pub fn current(&self) -> Option<&Checklist> {
        self.current.as_ref()
    }

    /// Atomically replace the current checklist. No merging with prior
    /// state: the previous value is dropped wholesale.
    pub fn replace(&mut self, checklist: Checklist) {
        self.current = Some(checklist);
    }

    /// Drop the current checklist (end of session).
    pub fn clear(&mut self) {
        self.current = None;
    }

    /// Toggle the completion flag of the item at `(group_key, item_id)`.
    ///
    /// Returns the current checklist after the operation, or `None` when
    /// no checklist has been generated yet. A `(group_key, item_id)`
    /// that matches nothing is a silent no-op: the current value is
    /// returned unchanged. Applying the same toggle twice restores the
    /// original value.
    pub fn toggle(&mut self, group_key: &str, item_id: &str) -> Option<&Checklist> {
        let current = self.current.as_ref()?;

        if current.item(group_key, item_id).is_none() {
            debug!(group = %group_key, item = %item_id, "toggle target not found, ignoring");
            return self.current.as_ref();
        }

        let next = current.with_toggled(group_key, item_id);
        self.current = Some(next);
        self.current.as_ref()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
