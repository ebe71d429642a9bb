//! Store error types.

use thiserror::Error;

/// Result type alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors that can occur while reading or writing persisted data.
///
/// None of these are fatal to a calculator session. Callers log them and
/// carry on with in-memory state.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Encoding history to JSON failed
    #[error("Serialization failed: {0}")]
    SerializationFailed(String),

    /// Stored blob could not be decoded
    #[error("Deserialization failed: {0}")]
    DeserializationFailed(String),

    /// Reading or writing the backing file failed
    #[error("Storage I/O failed for key '{key}': {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },

    /// Key contains characters the backend can not store
    #[error("Invalid storage key: '{0}'")]
    InvalidKey(String),

    /// Backend can not be used at all (lock poisoned, directory missing)
    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}
