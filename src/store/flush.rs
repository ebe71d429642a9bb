//! Debounced history persistence.
//!
//! Every history mutation schedules a write of the full history after a
//! quiet period. A newer schedule aborts the older one before it fires.
//! Because each write carries the whole snapshot, superseding a write
//! never loses entries.

use crate::core::History;
use crate::store::backend::KeyValueStore;
use crate::store::error::StoreResult;
use crate::store::history::HistoryStore;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

/// Default quiet period before history is written.
pub const DEFAULT_FLUSH_DELAY: Duration = Duration::from_millis(500);

struct PendingFlush {
    snapshot: History,
    handle: JoinHandle<()>,
}

/// Schedules delayed, superseding writes of the history.
///
/// Must be used from within a tokio runtime.
pub struct DebouncedFlusher<K: KeyValueStore> {
    store: HistoryStore<K>,
    delay: Duration,
    pending: Option<PendingFlush>,
}

impl<K: KeyValueStore> DebouncedFlusher<K> {
    pub fn new(store: HistoryStore<K>, delay: Duration) -> Self {
        Self {
            store,
            delay,
            pending: None,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub fn store(&self) -> &HistoryStore<K> {
        &self.store
    }

    /// Whether a write is scheduled and has not run yet.
    pub fn is_pending(&self) -> bool {
        self.pending
            .as_ref()
            .is_some_and(|p| !p.handle.is_finished())
    }

    /// Schedule a write of `snapshot`, superseding any scheduled write.
    pub fn schedule(&mut self, snapshot: History) {
        if let Some(previous) = self.pending.take() {
            if !previous.handle.is_finished() {
                previous.handle.abort();
                debug!("Superseded pending history flush");
            }
        }

        let store = self.store.clone();
        let delay = self.delay;
        let to_write = snapshot.clone();
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            match store.save_all(&to_write).await {
                Ok(()) => debug!(count = to_write.len(), "Flushed history"),
                Err(e) => warn!(error = %e, "Failed to flush history"),
            }
        });

        self.pending = Some(PendingFlush { snapshot, handle });
    }

    /// Write the scheduled snapshot now instead of waiting.
    ///
    /// Does nothing when no write is pending.
    pub async fn flush(&mut self) -> StoreResult<()> {
        let Some(pending) = self.pending.take() else {
            return Ok(());
        };
        if pending.handle.is_finished() {
            return Ok(());
        }
        settle(pending.handle).await;
        self.store.save_all(&pending.snapshot).await?;
        debug!(count = pending.snapshot.len(), "Flushed history early");
        Ok(())
    }

    /// Drop any scheduled write without performing it.
    ///
    /// A write that had already started is allowed to finish before this
    /// returns, so nothing lands on the store afterwards.
    pub async fn cancel(&mut self) {
        if let Some(pending) = self.pending.take() {
            settle(pending.handle).await;
        }
    }
}

/// Abort a flush task and wait until it has stopped.
///
/// Aborting only takes effect at an await point. A task already inside
/// the store write runs to completion first.
async fn settle(handle: JoinHandle<()>) {
    handle.abort();
    match handle.await {
        Ok(()) => debug!("Pending history flush had already written"),
        Err(e) if e.is_cancelled() => debug!("Cancelled pending history flush"),
        Err(e) => warn!(error = %e, "History flush task failed"),
    }
}
