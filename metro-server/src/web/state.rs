//! Application state for the web layer.

use std::sync::Arc;

use crate::nearest::EntryConfig;
use crate::store::DocumentStore;

/// Shared application state.
///
/// Holds only read-only collaborators; every request loads its records
/// from the store and builds its own graphs.
pub struct AppState<S> {
    /// Backing document store
    pub store: Arc<S>,

    /// Entry-station selection tuning
    pub entry: Arc<EntryConfig>,
}

impl<S: DocumentStore> AppState<S> {
    pub fn new(store: S, entry: EntryConfig) -> Self {
        Self {
            store: Arc::new(store),
            entry: Arc::new(entry),
        }
    }
}

// Manual impl: `S` itself need not be `Clone`.
impl<S> Clone for AppState<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            entry: Arc::clone(&self.entry),
        }
    }
}
