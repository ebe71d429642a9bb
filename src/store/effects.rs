//! History persistence as effects.
//!
//! Each operation is a stillwater effect whose environment is the
//! key-value store. Building an effect does nothing; running it against a
//! store performs the I/O. This keeps the calculator itself free of
//! storage concerns and lets tests run the same effects against a
//! [`MemoryStore`](crate::store::MemoryStore).

use crate::core::{History, HistoryEntry};
use crate::store::backend::KeyValueStore;
use crate::store::error::{StoreError, StoreResult};
use stillwater::effect::Effect;
use stillwater::prelude::*;

/// Encode a history as the on-disk JSON array.
pub fn encode_history(history: &History) -> StoreResult<String> {
    serde_json::to_string(history).map_err(|e| StoreError::SerializationFailed(e.to_string()))
}

/// Decode the on-disk JSON array, newest entry first.
pub fn decode_history(blob: &str) -> StoreResult<History> {
    serde_json::from_str(blob).map_err(|e| StoreError::DeserializationFailed(e.to_string()))
}

/// Read the history stored under `key`. A missing key is an empty history.
pub fn load_history<K: KeyValueStore>(
    key: String,
) -> impl Effect<Output = History, Error = StoreError, Env = K> {
    from_fn(move |store: &K| match store.get(&key)? {
        Some(blob) => decode_history(&blob),
        None => Ok(History::new()),
    })
}

/// Replace the stored history with `history`.
pub fn save_history<K: KeyValueStore>(
    key: String,
    history: History,
) -> impl Effect<Output = (), Error = StoreError, Env = K> {
    from_fn(move |store: &K| {
        let blob = encode_history(&history)?;
        store.set(&key, &blob)
    })
}

/// Prepend one entry to the stored history, returning the new history.
pub fn append_entry<K: KeyValueStore>(
    key: String,
    entry: HistoryEntry,
) -> impl Effect<Output = History, Error = StoreError, Env = K> {
    from_fn(move |store: &K| {
        let current = match store.get(&key)? {
            Some(blob) => decode_history(&blob)?,
            None => History::new(),
        };
        let updated = current.record(entry.clone());
        store.set(&key, &encode_history(&updated)?)?;
        Ok(updated)
    })
}

/// Remove the stored history entirely.
pub fn clear_history<K: KeyValueStore>(
    key: String,
) -> impl Effect<Output = (), Error = StoreError, Env = K> {
    from_fn(move |store: &K| store.remove(&key))
}
