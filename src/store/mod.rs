//! Persistence for history and preferences.
//!
//! The calculator never blocks on anything in this module. History is
//! loaded once at session start and written back through a debounced,
//! superseding flush; every failure is logged and absorbed by the caller.

mod backend;
pub mod effects;
pub mod error;
mod flush;
mod history;
mod preferences;

pub use backend::{FileStore, KeyValueStore, MemoryStore};
pub use error::{StoreError, StoreResult};
pub use flush::{DebouncedFlusher, DEFAULT_FLUSH_DELAY};
pub use history::{HistoryStore, HISTORY_KEY};
pub use preferences::{Theme, ThemeStore, UnknownTheme, THEME_KEY};
