//! In-process key-value store.

use std::collections::HashMap;

use crate::{DbError, KeyValueStore};

/// A [`KeyValueStore`] held in memory, with an optional size limit.
///
/// The limit counts the bytes of every key and value. A write that would
/// exceed it fails and leaves the store as it was.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: HashMap<String, String>,
    quota: Option<usize>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store that rejects writes beyond `quota` total bytes.
    pub fn with_quota(quota: usize) -> Self {
        Self {
            values: HashMap::new(),
            quota: Some(quota),
        }
    }

    fn used_bytes_excluding(&self, key: &str) -> usize {
        self.values
            .iter()
            .filter(|(k, _)| k.as_str() != key)
            .map(|(k, v)| k.len() + v.len())
            .sum()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, DbError> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), DbError> {
        if let Some(quota) = self.quota {
            let requested = self.used_bytes_excluding(key) + key.len() + value.len();
            if requested > quota {
                return Err(DbError::QuotaExceeded { requested, quota });
            }
        }
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
