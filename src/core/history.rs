//! Calculation history.
//!
//! History is an immutable, most-recent-first list of completed
//! calculations. Recording returns a new history and leaves the old one
//! untouched.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use uuid::Uuid;

/// Record of a single completed calculation.
///
/// Entries are immutable once created. The `timestamp` serializes as an
/// ISO-8601 / RFC 3339 string.
///
/// # Example
///
/// ```rust
/// use reckon::core::HistoryEntry;
///
/// let entry = HistoryEntry::new("72 + 18 =", "90");
/// assert_eq!(entry.expression, "72 + 18 =");
/// assert_eq!(entry.result, "90");
/// assert!(!entry.id.is_empty());
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// Unique identifier
    pub id: String,
    /// Expression text, for example `"72 + 18 ="`
    pub expression: String,
    /// Display-formatted result, or `"Undefined"`
    pub result: String,
    /// When the calculation was evaluated
    pub timestamp: DateTime<Utc>,
}

impl HistoryEntry {
    /// Create an entry stamped with a fresh id and the current time.
    pub fn new(expression: impl Into<String>, result: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            expression: expression.into(),
            result: result.into(),
            timestamp: Utc::now(),
        }
    }
}

/// Ordered history of calculations, newest first.
///
/// # Example
///
/// ```rust
/// use reckon::core::{History, HistoryEntry};
///
/// let history = History::new()
///     .record(HistoryEntry::new("1 + 1 =", "2"))
///     .record(HistoryEntry::new("2 × 3 =", "6"));
///
/// assert_eq!(history.len(), 2);
/// assert_eq!(history.latest().unwrap().result, "6");
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct History {
    entries: Vec<HistoryEntry>,
}

impl History {
    /// Create a new empty history.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Build a history from entries already ordered newest first.
    pub fn from_entries(entries: Vec<HistoryEntry>) -> Self {
        Self { entries }
    }

    /// Record an entry, returning a new history with it in front.
    ///
    /// This is a pure function - the existing history is not mutated.
    ///
    /// ```rust
    /// use reckon::core::{History, HistoryEntry};
    ///
    /// let history = History::new();
    /// let newer = history.record(HistoryEntry::new("5 ÷ 0 =", "Undefined"));
    ///
    /// assert_eq!(newer.len(), 1);
    /// assert!(history.is_empty()); // Original unchanged
    /// ```
    pub fn record(&self, entry: HistoryEntry) -> Self {
        let mut entries = Vec::with_capacity(self.entries.len() + 1);
        entries.push(entry);
        entries.extend(self.entries.iter().cloned());
        Self { entries }
    }

    /// Keep only the newest `limit` entries.
    pub fn truncated(&self, limit: usize) -> Self {
        Self {
            entries: self.entries.iter().take(limit).cloned().collect(),
        }
    }

    /// All entries, newest first.
    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    /// Entry at a position in newest-first order.
    pub fn get(&self, index: usize) -> Option<&HistoryEntry> {
        self.entries.get(index)
    }

    /// Look up an entry by id.
    pub fn find(&self, id: &str) -> Option<&HistoryEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    /// The most recent entry.
    pub fn latest(&self) -> Option<&HistoryEntry> {
        self.entries.first()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Time between the oldest and the newest entry.
    ///
    /// Returns `None` for an empty history, or when the clock went
    /// backwards between entries.
    pub fn span(&self) -> Option<Duration> {
        let (newest, oldest) = (self.entries.first()?, self.entries.last()?);
        newest
            .timestamp
            .signed_duration_since(oldest.timestamp)
            .to_std()
            .ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry_at(expression: &str, result: &str, timestamp: DateTime<Utc>) -> HistoryEntry {
        HistoryEntry {
            id: Uuid::new_v4().to_string(),
            expression: expression.to_string(),
            result: result.to_string(),
            timestamp,
        }
    }

    #[test]
    fn new_history_is_empty() {
        let history = History::new();
        assert!(history.is_empty());
        assert!(history.latest().is_none());
        assert!(history.span().is_none());
    }

    #[test]
    fn record_prepends_entry() {
        let history = History::new()
            .record(HistoryEntry::new("1 + 1 =", "2"))
            .record(HistoryEntry::new("2 + 2 =", "4"));

        assert_eq!(history.get(0).unwrap().result, "4");
        assert_eq!(history.get(1).unwrap().result, "2");
    }

    #[test]
    fn record_is_immutable() {
        let history = History::new();
        let new_history = history.record(HistoryEntry::new("1 + 1 =", "2"));

        assert_eq!(history.len(), 0);
        assert_eq!(new_history.len(), 1);
    }

    #[test]
    fn entries_get_unique_ids() {
        let a = HistoryEntry::new("1 + 1 =", "2");
        let b = HistoryEntry::new("1 + 1 =", "2");
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn find_looks_up_by_id() {
        let entry = HistoryEntry::new("3 × 3 =", "9");
        let id = entry.id.clone();
        let history = History::new().record(entry);

        assert_eq!(history.find(&id).unwrap().result, "9");
        assert!(history.find("missing").is_none());
    }

    #[test]
    fn truncated_keeps_newest() {
        let history = History::new()
            .record(HistoryEntry::new("a", "1"))
            .record(HistoryEntry::new("b", "2"))
            .record(HistoryEntry::new("c", "3"));

        let kept = history.truncated(2);
        assert_eq!(kept.len(), 2);
        assert_eq!(kept.get(0).unwrap().expression, "c");
        assert_eq!(kept.get(1).unwrap().expression, "b");
    }

    #[test]
    fn span_measures_oldest_to_newest() {
        let start = Utc::now();
        let history = History::new()
            .record(entry_at("1 + 1 =", "2", start))
            .record(entry_at("2 + 2 =", "4", start + chrono::Duration::seconds(90)));

        assert_eq!(history.span(), Some(Duration::from_secs(90)));
    }

    #[test]
    fn single_entry_has_zero_span() {
        let history = History::new().record(HistoryEntry::new("1 + 1 =", "2"));
        assert_eq!(history.span(), Some(Duration::ZERO));
    }

    #[test]
    fn history_serializes_as_plain_array() {
        let history = History::new().record(HistoryEntry::new("72 + 18 =", "90"));

        let json = serde_json::to_value(&history).unwrap();
        let items = json.as_array().expect("history should serialize as an array");
        assert_eq!(items.len(), 1);
        assert_eq!(items[0]["expression"], "72 + 18 =");
        assert_eq!(items[0]["result"], "90");
        assert!(items[0]["timestamp"].is_string());

        let back: History = serde_json::from_value(json).unwrap();
        assert_eq!(back, history);
    }

    #[test]
    fn timestamp_accepts_millisecond_iso_strings() {
        let json = r#"[{"id":"17000000000001234","expression":"5 ÷ 0 =","result":"Undefined","timestamp":"2024-03-01T10:15:30.123Z"}]"#;
        let history: History = serde_json::from_str(json).unwrap();
        let entry = history.latest().unwrap();
        assert_eq!(entry.result, "Undefined");
        assert_eq!(entry.timestamp.timestamp_millis(), 1_709_288_130_123);
    }
}
