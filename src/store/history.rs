//! The history store collaborator.

use crate::core::{History, HistoryEntry};
use crate::store::backend::KeyValueStore;
use crate::store::effects;
use crate::store::error::StoreResult;
use stillwater::effect::Effect;
use tracing::{info, warn};

/// Default namespace key for the persisted history blob.
pub const HISTORY_KEY: &str = "calculator_history";

/// Persisted, most-recent-first calculation history under one key.
///
/// Cheap to clone: it is a handle onto the same backend.
#[derive(Clone, Debug)]
pub struct HistoryStore<K> {
    store: K,
    key: String,
}

impl<K: KeyValueStore> HistoryStore<K> {
    /// History store under the default [`HISTORY_KEY`].
    pub fn new(store: K) -> Self {
        Self::with_key(store, HISTORY_KEY)
    }

    pub fn with_key(store: K, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn backend(&self) -> &K {
        &self.store
    }

    /// Load the stored history, surfacing any failure.
    pub async fn try_load_all(&self) -> StoreResult<History> {
        effects::load_history(self.key.clone())
            .run(&self.store)
            .await
    }

    /// Load the stored history. Failures are logged and read as empty.
    pub async fn load_all(&self) -> History {
        match self.try_load_all().await {
            Ok(history) => {
                info!(key = %self.key, count = history.len(), "Loaded calculation history");
                history
            }
            Err(e) => {
                warn!(key = %self.key, error = %e, "Failed to load history, starting empty");
                History::new()
            }
        }
    }

    /// Prepend one entry to the stored history.
    pub async fn append(&self, entry: HistoryEntry) -> StoreResult<History> {
        effects::append_entry(self.key.clone(), entry)
            .run(&self.store)
            .await
    }

    /// Overwrite the stored history with a full snapshot.
    pub async fn save_all(&self, history: &History) -> StoreResult<()> {
        effects::save_history(self.key.clone(), history.clone())
            .run(&self.store)
            .await
    }

    /// Remove the stored history.
    pub async fn clear_all(&self) -> StoreResult<()> {
        effects::clear_history(self.key.clone())
            .run(&self.store)
            .await
    }
}
