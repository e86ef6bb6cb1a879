//! In-process key-value store with an optional byte quota.
//!
//! Stands in for browser-style local storage: data lives only as long as the
//! value, and writes beyond the quota are rejected without touching the
//! previous value.

use crate::store::{KeyValueStore, StoreError, StoreResult};
use std::collections::HashMap;

/// Map-backed key-value store.
#[derive(Debug, Clone, Default)]
pub struct MemoryKeyValueStore {
    entries: HashMap<String, String>,
    quota_bytes: Option<usize>,
}

impl MemoryKeyValueStore {
    /// Creates an empty store without a quota.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty store that holds at most `quota_bytes` of keys and
    /// values combined.
    pub fn with_quota(quota_bytes: usize) -> Self {
        Self {
            entries: HashMap::new(),
            quota_bytes: Some(quota_bytes),
        }
    }

    /// Replaces the quota. `None` removes the limit.
    pub fn set_quota(&mut self, quota_bytes: Option<usize>) {
        self.quota_bytes = quota_bytes;
    }

    /// Returns the number of bytes currently stored.
    pub fn used_bytes(&self) -> usize {
        self.entries
            .iter()
            .map(|(key, value)| key.len() + value.len())
            .sum()
    }

    fn bytes_after_write(&self, key: &str, value: &str) -> usize {
        let replaced = self
            .entries
            .get(key)
            .map_or(0, |previous| key.len() + previous.len());
        self.used_bytes() - replaced + key.len() + value.len()
    }
}

impl KeyValueStore for MemoryKeyValueStore {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> StoreResult<()> {
        if let Some(quota_bytes) = self.quota_bytes {
            let required_bytes = self.bytes_after_write(key, value);
            if required_bytes > quota_bytes {
                return Err(StoreError::QuotaExceeded {
                    key: key.to_string(),
                    required_bytes,
                    quota_bytes,
                });
            }
        }
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
