//! Keyed query cache with in-flight deduplication and freshness
//!
//! The cache is plain data owned by the application state. The reducer asks it
//! whether a key needs fetching, and feeds completions back into it. Time is
//! passed in explicitly so every decision stays deterministic.

use std::collections::HashMap;
use std::hash::Hash;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// One cached query: last good data, fetch flag and last error.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct QueryEntry<V> {
    pub data: Option<V>,
    /// In-flight flag. Not persisted: a restored snapshot has no running fetch.
    #[serde(skip)]
    pub fetching: bool,
    pub error: Option<String>,
    pub fetched_at_ms: Option<u64>,
}

impl<V> Default for QueryEntry<V> {
    fn default() -> Self {
        Self {
            data: None,
            fetching: false,
            error: None,
            fetched_at_ms: None,
        }
    }
}

impl<V> QueryEntry<V> {
    /// Fetching with nothing to show yet.
    pub fn is_loading(&self) -> bool {
        self.fetching && self.data.is_none()
    }

    pub fn is_fetching(&self) -> bool {
        self.fetching
    }

    pub fn data(&self) -> Option<&V> {
        self.data.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, JsonSchema)]
#[serde(bound(
    serialize = "K: Serialize + Eq + Hash, V: Serialize",
    deserialize = "K: Deserialize<'de> + Eq + Hash, V: Deserialize<'de>"
))]
pub struct QueryCache<K, V> {
    entries: HashMap<K, QueryEntry<V>>,
    stale_after_ms: u64,
}

impl<K, V> Default for QueryCache<K, V> {
    fn default() -> Self {
        Self {
            entries: HashMap::new(),
            stale_after_ms: 0,
        }
    }
}

impl<K: Eq + Hash, V> QueryCache<K, V> {
    pub fn new(stale_after_ms: u64) -> Self {
        Self {
            entries: HashMap::new(),
            stale_after_ms,
        }
    }

    pub fn stale_after_ms(&self) -> u64 {
        self.stale_after_ms
    }

    /// Mark `key` as fetching if it needs a fetch.
    ///
    /// Returns `false` when a fetch for `key` is already in flight, or when the
    /// cached data is still fresh. Stale data stays visible while refetching.
    pub fn begin(&mut self, key: K, now_ms: u64) -> bool {
        let stale_after_ms = self.stale_after_ms;
        let entry = self.entries.entry(key).or_default();
        if entry.fetching {
            return false;
        }
        if entry.error.is_none() && is_fresh(entry, stale_after_ms, now_ms) {
            return false;
        }
        entry.fetching = true;
        true
    }

    pub fn resolve(&mut self, key: K, value: V, now_ms: u64) {
        let entry = self.entries.entry(key).or_default();
        entry.data = Some(value);
        entry.fetching = false;
        entry.error = None;
        entry.fetched_at_ms = Some(now_ms);
    }

    /// Record a failed fetch. Previously cached data is kept.
    pub fn fail(&mut self, key: K, error: String) {
        let entry = self.entries.entry(key).or_default();
        entry.fetching = false;
        entry.error = Some(error);
    }

    pub fn get(&self, key: &K) -> Option<&QueryEntry<V>> {
        self.entries.get(key)
    }

    pub fn data(&self, key: &K) -> Option<&V> {
        self.entries.get(key).and_then(QueryEntry::data)
    }

    pub fn is_loading(&self, key: &K) -> bool {
        self.entries.get(key).is_some_and(QueryEntry::is_loading)
    }

    pub fn is_fresh(&self, key: &K, now_ms: u64) -> bool {
        self.entries
            .get(key)
            .is_some_and(|entry| is_fresh(entry, self.stale_after_ms, now_ms))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

fn is_fresh<V>(entry: &QueryEntry<V>, stale_after_ms: u64, now_ms: u64) -> bool {
    match (entry.data.as_ref(), entry.fetched_at_ms) {
        (Some(_), Some(fetched_at)) => now_ms.saturating_sub(fetched_at) < stale_after_ms,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_begin_dedupes_in_flight_key() {
        let mut cache: QueryCache<u32, Vec<String>> = QueryCache::new(1_000);
        assert!(cache.begin(0, 0));
        assert!(!cache.begin(0, 10));
        assert!(cache.is_loading(&0));
        // Other keys are independent.
        assert!(cache.begin(1, 10));
    }

    #[test]
    fn test_fresh_data_is_served_from_cache() {
        let mut cache: QueryCache<u32, Vec<String>> = QueryCache::new(1_000);
        assert!(cache.begin(3, 0));
        cache.resolve(3, vec!["bulbasaur".into()], 100);

        assert!(cache.is_fresh(&3, 500));
        assert!(!cache.begin(3, 500));
        assert_eq!(cache.data(&3), Some(&vec!["bulbasaur".to_string()]));
    }

    #[test]
    fn test_stale_data_is_refetched_but_stays_visible() {
        let mut cache: QueryCache<u32, Vec<String>> = QueryCache::new(1_000);
        cache.begin(0, 0);
        cache.resolve(0, vec!["ivysaur".into()], 0);

        assert!(cache.begin(0, 1_000));
        let entry = cache.get(&0).unwrap();
        assert!(entry.is_fetching());
        assert!(!entry.is_loading());
        assert_eq!(entry.data(), Some(&vec!["ivysaur".to_string()]));
    }

    #[test]
    fn test_zero_ttl_always_refetches() {
        let mut cache: QueryCache<u32, u8> = QueryCache::default();
        cache.begin(0, 0);
        cache.resolve(0, 1, 0);
        assert!(cache.begin(0, 0));
    }

    #[test]
    fn test_failure_keeps_data_and_allows_retry() {
        let mut cache: QueryCache<u32, u8> = QueryCache::new(60_000);
        cache.begin(0, 0);
        cache.resolve(0, 7, 0);
        cache.begin(0, 60_000);
        cache.fail(0, "boom".into());

        let entry = cache.get(&0).unwrap();
        assert_eq!(entry.error(), Some("boom"));
        assert_eq!(entry.data(), Some(&7));
        assert!(!entry.is_fetching());
        assert!(cache.begin(0, 60_001));
    }

    #[test]
    fn test_failed_first_fetch_retries_on_next_begin() {
        let mut cache: QueryCache<u32, u8> = QueryCache::new(60_000);
        cache.begin(5, 0);
        cache.fail(5, "offline".into());
        assert!(!cache.is_loading(&5));
        assert!(cache.begin(5, 1));
    }

    #[test]
    fn test_resolve_clears_error() {
        let mut cache: QueryCache<u32, u8> = QueryCache::new(60_000);
        cache.begin(0, 0);
        cache.fail(0, "boom".into());
        cache.begin(0, 1);
        cache.resolve(0, 9, 2);
        assert_eq!(cache.get(&0).unwrap().error(), None);
        assert_eq!(cache.len(), 1);
        cache.clear();
        assert!(cache.is_empty());
    }

    #[test]
    fn test_restored_snapshot_has_no_fetch_in_flight() {
        let mut cache: QueryCache<u32, u8> = QueryCache::new(60_000);
        cache.begin(0, 0);
        cache.begin(1, 0);
        cache.resolve(1, 4, 0);

        let json = serde_json::to_string(&cache).unwrap();
        let mut restored: QueryCache<u32, u8> = serde_json::from_str(&json).unwrap();

        assert!(!restored.get(&0).unwrap().is_fetching());
        assert!(restored.begin(0, 10));
        assert_eq!(restored.data(&1), Some(&4));
        assert!(!restored.begin(1, 10));
    }
}
