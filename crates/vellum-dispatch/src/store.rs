//! View-data correlation store.
//!
//! Navigation produces data; requests consume it — but the two meet only
//! through a URL, after the navigation call has already returned. The store
//! bridges that gap: `navigate` records a payload under the view id it is
//! about to load, and the dispatcher reads it back when the host's
//! interception mechanism asks for that view.
//!
//! Entries are upserted unconditionally (the last navigation for a given id
//! wins) and never evicted: lifetime is the lifetime of the store, which is
//! the lifetime of the application. Desktop applications address a small,
//! fixed set of views, so unbounded growth is accepted; [`ViewDataStore::len`]
//! exposes the entry count for hosts that want to watch it.

use std::collections::HashMap;

/// Mapping from view id to the data payload supplied at navigation time.
#[derive(Debug, Default)]
pub struct ViewDataStore {
    entries: HashMap<String, serde_json::Value>,
}

impl ViewDataStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `data` under `view_id`, replacing any previous entry.
    pub fn put(&mut self, view_id: impl Into<String>, data: serde_json::Value) {
        self.entries.insert(view_id.into(), data);
    }

    /// Looks up the entry for `view_id`.
    ///
    /// A view id that was never loaded has no entry; that is a normal
    /// outcome, not an error.
    pub fn get(&self, view_id: &str) -> Option<&serde_json::Value> {
        self.entries.get(view_id)
    }

    /// Returns an owned copy of the entry for `view_id`.
    ///
    /// Dispatch takes this snapshot in its synchronous section so that a
    /// `put` landing while a render is in flight affects only later
    /// requests.
    pub fn snapshot(&self, view_id: &str) -> Option<serde_json::Value> {
        self.entries.get(view_id).cloned()
    }

    /// Returns the number of distinct view ids ever loaded.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no view was ever loaded.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
