//! Saved reflections and windowed queries over them.
//!
//! The history holds at most one entry per calendar date, newest first.
//! Saving an entry for a date that already has one replaces it wholesale.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::cadence::{Cadence, PromptCategory};
use crate::dates::{iso_date, DateWindow};
use crate::prompts::{PromptSelection, ThemeFilter};
use crate::storage::lenient;

/// Upper bound on reflection length enforced by the writing surface.
pub const MAX_WORDS: usize = 500;

/// Count whitespace-separated words in a reflection body.
pub fn count_words(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Whether a draft may be saved: non-blank and within [`MAX_WORDS`].
pub fn can_save(body: &str) -> bool {
    let words = count_words(body);
    words > 0 && words <= MAX_WORDS
}

/// One saved reflection.
///
/// Field names on the wire follow the stored history format:
/// `prompt`, `action`, `reflection` and `words`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    #[serde(with = "iso_date")]
    pub date: NaiveDate,
    #[serde(default, deserialize_with = "lenient")]
    pub theme: ThemeFilter,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub cadence: Option<Cadence>,
    #[serde(rename = "prompt", default)]
    pub prompt_text: String,
    #[serde(rename = "action", default, skip_serializing_if = "Option::is_none")]
    pub action_text: Option<String>,
    #[serde(rename = "reflection", default)]
    pub body_text: String,
    /// Derived from `body_text`; recomputed whenever an entry is loaded.
    #[serde(rename = "words", default)]
    pub word_count: usize,
}

impl Entry {
    pub fn new(
        date: NaiveDate,
        theme: ThemeFilter,
        cadence: Option<Cadence>,
        prompt_text: impl Into<String>,
        action_text: Option<String>,
        body_text: impl Into<String>,
    ) -> Self {
        let body_text = body_text.into();
        Self {
            date,
            theme,
            cadence,
            prompt_text: prompt_text.into(),
            action_text,
            word_count: count_words(&body_text),
            body_text,
        }
    }

    /// Build an entry from the prompt shown for that day.
    pub fn from_selection(
        date: NaiveDate,
        cadence: Cadence,
        theme: ThemeFilter,
        selection: &PromptSelection,
        body_text: impl Into<String>,
    ) -> Self {
        Self::new(
            date,
            theme,
            Some(cadence),
            selection.pair.reflection,
            Some(selection.pair.action.to_string()),
            body_text,
        )
    }

    pub fn category(&self) -> Option<PromptCategory> {
        self.cadence.map(|c| c.prompt_category())
    }

    fn normalized(mut self) -> Self {
        self.word_count = count_words(&self.body_text);
        self
    }
}

/// Saved entries, unique by date and sorted newest first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct History {
    entries: Vec<Entry>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a history from arbitrary entries.
    ///
    /// When several entries share a date the earliest one in `entries` wins,
    /// matching how a newest-first stored list is read.
    pub fn from_entries(entries: Vec<Entry>) -> Self {
        let mut kept: Vec<Entry> = Vec::with_capacity(entries.len());
        for entry in entries {
            if kept.iter().all(|e| e.date != entry.date) {
                kept.push(entry.normalized());
            }
        }
        kept.sort_by(|a, b| b.date.cmp(&a.date));
        Self { entries: kept }
    }

    /// Decode a stored history blob, failing soft.
    ///
    /// Anything that is not a JSON array yields an empty history. Array
    /// elements that are not valid entries (for example, missing `date`)
    /// are dropped one by one.
    pub fn from_json_soft(raw: &str) -> Self {
        let value: serde_json::Value = match serde_json::from_str(raw) {
            Ok(v) => v,
            Err(e) => {
                tracing::warn!("discarding unparsable history blob: {e}");
                return Self::new();
            }
        };
        Self::from_value_soft(value)
    }

    /// Same as [`History::from_json_soft`] for an already-parsed value.
    pub fn from_value_soft(value: serde_json::Value) -> Self {
        let serde_json::Value::Array(items) = value else {
            tracing::warn!("stored history is not an array; starting empty");
            return Self::new();
        };

        let total = items.len();
        let entries: Vec<Entry> = items
            .into_iter()
            .filter_map(|item| match serde_json::from_value::<Entry>(item) {
                Ok(entry) => Some(entry),
                Err(e) => {
                    tracing::warn!("skipping malformed history entry: {e}");
                    None
                }
            })
            .collect();

        if entries.len() < total {
            tracing::warn!(kept = entries.len(), total, "history loaded with skipped entries");
        }
        Self::from_entries(entries)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.entries)
    }

    /// Insert `entry`, replacing any entry with the same date.
    ///
    /// Consumes the history and returns the updated one, still unique by
    /// date and sorted newest first.
    pub fn upsert(self, entry: Entry) -> Self {
        let date = entry.date;
        let replaced = self.entries.iter().any(|e| e.date == date);
        let mut entries = Vec::with_capacity(self.entries.len() + 1);
        entries.push(entry.normalized());
        entries.extend(self.entries.into_iter().filter(|e| e.date != date));
        entries.sort_by(|a, b| b.date.cmp(&a.date));

        tracing::info!(date = %date, replaced, total = entries.len(), "saved reflection");
        Self { entries }
    }

    /// Entries dated inside `window`, oldest first.
    ///
    /// An empty window (end before start) yields nothing.
    pub fn window_query(&self, window: &DateWindow) -> Vec<&Entry> {
        // Stored newest first, so reversing gives ascending order.
        self.entries
            .iter()
            .rev()
            .filter(|e| window.contains(e.date))
            .collect()
    }

    /// Whether [`History::window_query`] would return anything.
    pub fn has_any(&self, window: &DateWindow) -> bool {
        self.entries.iter().any(|e| window.contains(e.date))
    }

    pub fn get(&self, date: NaiveDate) -> Option<&Entry> {
        self.entries.iter().find(|e| e.date == date)
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn iter(&self) -> impl Iterator<Item = &Entry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'de> Deserialize<'de> for History {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = serde_json::Value::deserialize(deserializer)?;
        Ok(Self::from_value_soft(value))
    }
}
