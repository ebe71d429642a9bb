//! A calculator session wired to its persistence.
//!
//! [`CalculatorApp`] is the imperative shell around the pure
//! [`Calculator`]: it loads history and the theme at start, schedules a
//! debounced write after every evaluation, and persists theme changes.
//! Storage failures are logged and never reach the keypad.

use crate::config::CalculatorConfig;
use crate::core::{History, HistoryEntry, Phase};
use crate::machine::{Calculator, DisplayState, Key, Step};
use crate::store::{DebouncedFlusher, HistoryStore, KeyValueStore, Theme, ThemeStore};
use tracing::{info, warn};

pub struct CalculatorApp<K: KeyValueStore> {
    calculator: Calculator,
    flusher: DebouncedFlusher<K>,
    themes: ThemeStore<K>,
    theme: Theme,
}

impl<K: KeyValueStore> CalculatorApp<K> {
    /// Open a session over `store`, loading persisted history and theme.
    ///
    /// Must be called from within a tokio runtime.
    pub async fn start(config: &CalculatorConfig, store: K) -> Self {
        let history_store = HistoryStore::with_key(store.clone(), &config.storage.history_key);
        let history = history_store.load_all().await;

        let themes = ThemeStore::new(store, &config.storage.theme_key, config.theme);
        let theme = themes.load();

        let mut calculator = Calculator::new().with_history_limit(config.history.limit);
        calculator.replace_history(history);

        info!(
            entries = calculator.history().len(),
            %theme,
            "Calculator session started"
        );

        Self {
            calculator,
            flusher: DebouncedFlusher::new(history_store, config.flush_delay()),
            themes,
            theme,
        }
    }

    pub fn calculator(&self) -> &Calculator {
        &self.calculator
    }

    pub fn display(&self) -> DisplayState {
        self.calculator.display()
    }

    pub fn phase(&self) -> Phase {
        self.calculator.phase()
    }

    pub fn history(&self) -> &History {
        self.calculator.history()
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    /// Whether a history write is waiting for its quiet period.
    pub fn has_pending_flush(&self) -> bool {
        self.flusher.is_pending()
    }

    /// Apply one keystroke. An evaluation schedules a history write.
    pub fn press(&mut self, key: Key) -> Step {
        let step = self.calculator.press(key);
        if matches!(step, Step::Evaluated(_)) {
            self.flusher.schedule(self.calculator.history().clone());
        }
        step
    }

    pub fn press_all(&mut self, keys: impl IntoIterator<Item = Key>) -> Vec<Step> {
        keys.into_iter().map(|key| self.press(key)).collect()
    }

    /// Recall the entry at `index` (0 is the most recent) into the buffer.
    pub fn recall(&mut self, index: usize) -> Option<HistoryEntry> {
        let entry = self.calculator.history().get(index)?.clone();
        self.calculator.recall(&entry);
        Some(entry)
    }

    /// Empty the history in memory and remove the stored copy.
    pub async fn clear_history(&mut self) {
        self.calculator.clear_history();
        self.flusher.cancel().await;
        if let Err(e) = self.flusher.store().clear_all().await {
            warn!(error = %e, "Failed to clear stored history");
        }
    }

    /// Switch between light and dark, persisting the choice.
    pub fn toggle_theme(&mut self) -> Theme {
        self.theme = self.theme.toggled();
        if let Err(e) = self.themes.save(self.theme) {
            warn!(theme = %self.theme, error = %e, "Failed to save theme");
        }
        self.theme
    }

    /// Write any pending history now. Call before the session ends.
    pub async fn shutdown(mut self) {
        if let Err(e) = self.flusher.flush().await {
            warn!(error = %e, "Failed to flush history on shutdown");
        }
    }
}
