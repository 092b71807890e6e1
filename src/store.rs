//! Process-wide key/value store.
//!
//! A sharded concurrent map from key to value. All state of the server lives
//! here; both transports reach it only through the methods below.

use dashmap::DashMap;

/// Thread-safe in-memory key/value store.
///
/// Keys and values are opaque strings. The empty string is never a valid key:
/// every operation given one reports failure without touching the map.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: DashMap<String, String>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite `key`. Returns false if the key is empty.
    pub fn store(&self, key: &str, value: &str) -> bool {
        if key.is_empty() {
            return false;
        }
        self.entries.insert(key.to_string(), value.to_string());
        true
    }

    /// Get the current value for `key`.
    pub fn get(&self, key: &str) -> Option<String> {
        if key.is_empty() {
            return None;
        }
        self.entries.get(key).map(|entry| entry.value().clone())
    }

    /// Snapshot of the keys present at call time, in no particular order.
    pub fn list_keys(&self) -> Vec<String> {
        self.entries.iter().map(|entry| entry.key().clone()).collect()
    }

    /// Remove `key`. Returns false if the key is empty or absent.
    pub fn delete(&self, key: &str) -> bool {
        if key.is_empty() {
            return false;
        }
        self.entries.remove(key).is_some()
    }

    /// Remove every entry and return how many were removed.
    pub fn clear(&self) -> usize {
        // Counting inside retain gives the exact number of entries this call
        // removed, even while other callers write to already-visited shards.
        let mut removed = 0;
        self.entries.retain(|_, _| {
            removed += 1;
            false
        });
        removed
    }

    /// Number of entries currently stored.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the store holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
