//! Cache Store Module
//!
//! Concurrency-safe key-value table at the center of the read-through path.
//! The store itself is a plain map plus counters; thread safety comes from the
//! single `RwLock` the application wraps it in (see `api::AppState`), so reads
//! overlap freely and writes are exclusive over the whole map.

use std::collections::HashMap;

use crate::cache::CacheStats;
use crate::error::{CacheError, Result};

// == Cache Store ==
/// In-memory key-value storage.
///
/// No eviction, no capacity bound, no TTL: entries live until removed or until
/// the process exits. Keys are arbitrary strings (embedded `/` included) and
/// values are opaque byte payloads the store never inspects.
#[derive(Debug, Default)]
pub struct CacheStore {
    /// Key-value storage
    entries: HashMap<String, Vec<u8>>,
    /// Hit/miss counters
    stats: CacheStats,
}

impl CacheStore {
    // == Constructor ==
    /// Creates a new, empty CacheStore.
    pub fn new() -> Self {
        Self::default()
    }

    // == Get ==
    /// Retrieves a value by key.
    ///
    /// Takes `&self` so concurrent readers can overlap under a read lock.
    ///
    /// # Arguments
    /// * `key` - The key to retrieve
    pub fn get(&self, key: &str) -> Result<Vec<u8>> {
        if let Some(value) = self.entries.get(key) {
            self.stats.record_hit();
            Ok(value.clone())
        } else {
            self.stats.record_miss();
            Err(CacheError::NotFound(key.to_string()))
        }
    }

    // == Set ==
    /// Stores a key-value pair.
    ///
    /// If the key already exists the value is silently overwritten; the last
    /// completed write wins.
    ///
    /// # Arguments
    /// * `key` - The key to store
    /// * `value` - The payload to store
    pub fn set(&mut self, key: String, value: Vec<u8>) {
        self.entries.insert(key, value);
    }

    // == Remove ==
    /// Removes an entry by key; no-op if the key is absent.
    ///
    /// Not invoked by the read-through path. Retained as the manual
    /// invalidation primitive, and guarded by the same lock as `get`/`set`.
    ///
    /// # Arguments
    /// * `key` - The key to remove
    pub fn remove(&mut self, key: &str) {
        self.entries.remove(key);
    }

    // == Stats ==
    /// Returns the hit/miss counters.
    pub fn stats(&self) -> &CacheStats {
        &self.stats
    }

    // == Length ==
    /// Returns the current number of entries in the cache.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    // == Is Empty ==
    /// Returns true if the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_new() {
        let store = CacheStore::new();
        assert_eq!(store.len(), 0);
        assert!(store.is_empty());
    }

    #[test]
    fn test_store_set_and_get() {
        let mut store = CacheStore::new();

        store.set("key1".to_string(), b"value1".to_vec());
        let value = store.get("key1").unwrap();

        assert_eq!(value, b"value1");
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_store_get_nonexistent() {
        let store = CacheStore::new();

        let result = store.get("nonexistent");
        assert!(matches!(result, Err(CacheError::NotFound(_))));
    }

    #[test]
    fn test_store_overwrite_last_write_wins() {
        let mut store = CacheStore::new();

        store.set("key1".to_string(), b"value1".to_vec());
        store.set("key1".to_string(), b"value2".to_vec());

        let value = store.get("key1").unwrap();
        assert_eq!(value, b"value2");
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_store_remove() {
        let mut store = CacheStore::new();

        store.set("key1".to_string(), b"value1".to_vec());
        store.remove("key1");

        assert!(store.is_empty());
        assert!(matches!(store.get("key1"), Err(CacheError::NotFound(_))));
    }

    #[test]
    fn test_store_remove_nonexistent_is_noop() {
        let mut store = CacheStore::new();
        store.set("key1".to_string(), b"value1".to_vec());

        store.remove("nonexistent");
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_store_path_like_keys() {
        let mut store = CacheStore::new();

        store.set("dir/sub/file.json".to_string(), b"{}".to_vec());
        let value = store.get("dir/sub/file.json").unwrap();

        assert_eq!(value, b"{}");
        assert!(matches!(store.get("dir/sub"), Err(CacheError::NotFound(_))));
    }

    #[test]
    fn test_store_stats_counts() {
        let mut store = CacheStore::new();

        store.set("key1".to_string(), b"value1".to_vec());
        store.get("key1").unwrap(); // hit
        let _ = store.get("nonexistent"); // miss

        assert_eq!(store.stats().hits(), 1);
        assert_eq!(store.stats().misses(), 1);
    }

    #[tokio::test]
    async fn test_store_concurrent_same_key_writes() {
        use std::sync::Arc;
        use tokio::sync::RwLock;

        let store = Arc::new(RwLock::new(CacheStore::new()));
        let payload = b"{\"a\":1}".to_vec();

        let mut handles = Vec::new();
        for _ in 0..8 {
            let store = store.clone();
            let payload = payload.clone();
            handles.push(tokio::spawn(async move {
                store.write().await.set("abc".to_string(), payload);
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        // All writers carried the same payload, so whichever write landed last
        // the observable value is identical.
        let value = store.read().await.get("abc").unwrap();
        assert_eq!(value, payload);
        assert_eq!(store.read().await.len(), 1);
    }
}
