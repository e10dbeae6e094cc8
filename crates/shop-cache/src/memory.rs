//! In-memory store.

use std::collections::BTreeMap;

use crate::{CacheError, KvStore};

/// Volatile store backed by a map.
///
/// An optional byte quota mirrors the capacity limit of browser storage: a
/// write that would push the total stored bytes past the quota fails with
/// [`CacheError::QuotaExceeded`] and leaves the previous value in place.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    slots: BTreeMap<String, Vec<u8>>,
    quota: Option<usize>,
}

impl MemoryStore {
    /// Create an unbounded store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store that holds at most `bytes` bytes of values.
    pub fn with_quota(bytes: usize) -> Self {
        Self {
            slots: BTreeMap::new(),
            quota: Some(bytes),
        }
    }

    /// Total bytes currently stored.
    pub fn used_bytes(&self) -> usize {
        self.slots.values().map(Vec::len).sum()
    }

    /// Number of slots.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Check if the store holds no slots.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

impl KvStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError> {
        Ok(self.slots.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &[u8]) -> Result<(), CacheError> {
        if let Some(quota) = self.quota {
            let replaced = self.slots.get(key).map_or(0, Vec::len);
            let available = quota.saturating_sub(self.used_bytes() - replaced);
            if value.len() > available {
                return Err(CacheError::QuotaExceeded {
                    key: key.to_string(),
                    needed: value.len(),
                    available,
                });
            }
        }
        self.slots.insert(key.to_string(), value.to_vec());
        Ok(())
    }

    fn delete(&mut self, key: &str) -> Result<(), CacheError> {
        self.slots.remove(key);
        Ok(())
    }

    fn exists(&self, key: &str) -> Result<bool, CacheError> {
        Ok(self.slots.contains_key(key))
    }

    fn keys(&self) -> Result<Vec<String>, CacheError> {
        Ok(self.slots.keys().cloned().collect())
    }
}
