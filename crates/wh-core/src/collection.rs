//! The full set of stored entries, keyed by date.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::entry::TimeEntry;
use crate::types::DateKey;

/// Mapping from [`DateKey`] to [`TimeEntry`]; the unit of persistence.
///
/// Iteration is chronological. Mutating operations return a new collection
/// and leave `self` untouched, so callers can keep earlier snapshots around.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntryCollection {
    entries: BTreeMap<DateKey, TimeEntry>,
}

impl EntryCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, key: DateKey) -> bool {
        self.entries.contains_key(&key)
    }

    /// Looks up the entry for a date.
    pub fn get(&self, key: DateKey) -> Option<&TimeEntry> {
        self.entries.get(&key)
    }

    /// Returns a copy with `key` mapped to `entry`.
    #[must_use]
    pub fn upsert(&self, key: DateKey, entry: TimeEntry) -> Self {
        let mut entries = self.entries.clone();
        entries.insert(key, entry);
        Self { entries }
    }

    /// Returns a copy without `key`. Removing an absent key is a no-op.
    #[must_use]
    pub fn remove(&self, key: DateKey) -> Self {
        let mut entries = self.entries.clone();
        entries.remove(&key);
        Self { entries }
    }

    /// Returns the entries dated within `from..=to`. Either bound may be open.
    #[must_use]
    pub fn between(&self, from: Option<DateKey>, to: Option<DateKey>) -> Self {
        self.entries
            .iter()
            .filter(|(key, _)| from.is_none_or(|from| **key >= from))
            .filter(|(key, _)| to.is_none_or(|to| **key <= to))
            .map(|(key, entry)| (*key, *entry))
            .collect()
    }

    /// Entries in chronological order.
    pub fn iter(&self) -> impl Iterator<Item = (DateKey, &TimeEntry)> {
        self.entries.iter().map(|(key, entry)| (*key, entry))
    }

    pub fn complete_count(&self) -> usize {
        self.entries.values().filter(|e| e.is_complete()).count()
    }

    /// Serializes to the stored JSON object form.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Parses the stored JSON object form.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

impl FromIterator<(DateKey, TimeEntry)> for EntryCollection {
    fn from_iter<I: IntoIterator<Item = (DateKey, TimeEntry)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}
