//! Cache Store Module
//!
//! Process-local key/value map with per-entry expiry. Expiry is lazy: an
//! expired entry is deleted the first time a lookup observes it, or by an
//! explicit purge.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use std::time::Duration;

use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use crate::cache::key::{namespace_of, KEY_DELIMITER};
use crate::cache::{CacheCounters, CacheEntry, CacheStats, Clock, SystemClock, DEFAULT_TTL};
use crate::error::{Result, SalaryError};

/// Multiplier applied to serialized length for the memory estimate.
const MEMORY_ESTIMATE_FACTOR: usize = 2;

// == Cache Store ==
/// Key/value storage with TTL support.
#[derive(Debug)]
pub struct CacheStore {
    /// Key-value storage
    entries: HashMap<String, CacheEntry>,
    /// Hit / miss / expiry counters
    counters: CacheCounters,
    /// Time source for expiry checks
    clock: Arc<dyn Clock>,
}

impl Default for CacheStore {
    fn default() -> Self {
        Self::new()
    }
}

impl CacheStore {
    // == Constructor ==
    /// Creates an empty store on the system clock.
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    /// Creates an empty store reading time from `clock`.
    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: HashMap::new(),
            counters: CacheCounters::default(),
            clock,
        }
    }

    // == Get ==
    /// Retrieves a live value by key.
    ///
    /// Returns `None` when the key is absent or expired. An expired entry is
    /// removed as a side effect.
    pub fn get(&mut self, key: &str) -> Option<Value> {
        let now = self.clock.now_ms();

        let expired = match self.entries.get(key) {
            Some(entry) => entry.is_expired(now),
            None => {
                self.counters.record_miss();
                return None;
            }
        };

        if expired {
            self.entries.remove(key);
            self.counters.record_expired(1);
            self.counters.record_miss();
            debug!(key, "Cache entry expired");
            return None;
        }

        self.counters.record_hit();
        self.entries.get(key).map(|entry| entry.value.clone())
    }

    /// Retrieves a live value and deserializes it.
    ///
    /// A stored value that no longer matches `T` is dropped and counted as a
    /// miss rather than a hit.
    pub fn get_as<T: DeserializeOwned>(&mut self, key: &str) -> Option<T> {
        let value = self.get(key)?;
        match serde_json::from_value(value) {
            Ok(typed) => Some(typed),
            Err(e) => {
                warn!(key, error = %e, "Dropping cache entry with unexpected shape");
                self.entries.remove(key);
                self.counters.reclassify_hit_as_miss();
                None
            }
        }
    }

    // == Set ==
    /// Stores a value under `key`, expiring `ttl` from now.
    ///
    /// Any existing entry is replaced outright.
    pub fn set(&mut self, key: impl Into<String>, value: Value, ttl: Duration) {
        let now = self.clock.now_ms();
        let ttl_ms = u64::try_from(ttl.as_millis()).unwrap_or(u64::MAX);
        let entry = CacheEntry::new(value, now, ttl_ms);
        self.entries.insert(key.into(), entry);
    }

    /// Stores a value with the default 24h TTL.
    pub fn set_default(&mut self, key: impl Into<String>, value: Value) {
        self.set(key, value, DEFAULT_TTL);
    }

    /// Serializes and stores a typed value.
    ///
    /// A value that cannot be represented as JSON is an internal error, not
    /// an upstream one.
    pub fn set_as<T: Serialize>(
        &mut self,
        key: impl Into<String>,
        value: &T,
        ttl: Duration,
    ) -> Result<()> {
        let value = serde_json::to_value(value)
            .map_err(|e| SalaryError::Internal(format!("cannot cache value: {}", e)))?;
        self.set(key, value, ttl);
        Ok(())
    }

    // == Clear ==
    /// Removes entries and returns how many were removed.
    ///
    /// - `None` clears everything.
    /// - A bare namespace such as `"company"` removes keys whose namespace
    ///   segment is exactly that, so `"companyx:..."` survives.
    /// - A prefix containing the delimiter such as `"company:acme"` removes
    ///   keys starting with it.
    pub fn clear(&mut self, prefix: Option<&str>) -> usize {
        let before = self.entries.len();

        match prefix {
            None => self.entries.clear(),
            Some(prefix) if prefix.contains(KEY_DELIMITER) => {
                self.entries.retain(|key, _| !key.starts_with(prefix));
            }
            Some(namespace) => {
                self.entries.retain(|key, _| namespace_of(key) != namespace);
            }
        }

        before - self.entries.len()
    }

    // == Purge Expired ==
    /// Removes all expired entries.
    ///
    /// Returns the number of entries removed.
    pub fn purge_expired(&mut self) -> usize {
        let now = self.clock.now_ms();
        let before = self.entries.len();

        self.entries.retain(|_, entry| !entry.is_expired(now));

        let removed = before - self.entries.len();
        self.counters.record_expired(removed);
        removed
    }

    // == Stats ==
    /// Returns a snapshot of the store.
    pub fn stats(&self) -> CacheStats {
        let mut by_prefix: BTreeMap<String, usize> = BTreeMap::new();
        let mut serialized_len = 0usize;

        for (key, entry) in &self.entries {
            *by_prefix.entry(namespace_of(key).to_string()).or_default() += 1;
            serialized_len += key.len() + entry.value.to_string().len();
        }

        CacheStats {
            total_entries: self.entries.len(),
            by_prefix,
            memory_usage_estimate: serialized_len * MEMORY_ESTIMATE_FACTOR,
            hits: self.counters.hits,
            misses: self.counters.misses,
            expired: self.counters.expired,
        }
    }

    // == Length ==
    /// Returns the current number of entries in the store.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    // == Is Empty ==
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::{make_key, ManualClock, Namespace};
    use serde::Deserialize;
    use serde_json::json;

    fn store_with_clock() -> (CacheStore, Arc<ManualClock>) {
        let clock = Arc::new(ManualClock::starting_at(1_700_000_000_000));
        (CacheStore::with_clock(clock.clone()), clock)
    }

    #[test]
    fn test_store_new() {
        let store = CacheStore::new();
        assert_eq!(store.len(), 0);
        assert!(store.is_empty());
    }

    #[test]
    fn test_store_set_and_get() {
        let mut store = CacheStore::new();

        store.set("key1", json!("value1"), Duration::from_secs(60));
        assert_eq!(store.get("key1"), Some(json!("value1")));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_store_get_nonexistent() {
        let mut store = CacheStore::new();
        assert_eq!(store.get("nonexistent"), None);
    }

    #[test]
    fn test_store_overwrite() {
        let (mut store, clock) = store_with_clock();

        store.set("key1", json!("value1"), Duration::from_secs(10));
        store.set("key1", json!("value2"), Duration::from_secs(100));

        // The second write also replaced the expiry.
        clock.advance(Duration::from_secs(50));
        assert_eq!(store.get("key1"), Some(json!("value2")));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_store_ttl_expiration_removes_entry() {
        let (mut store, clock) = store_with_clock();

        store.set("k", json!({"v": 1}), Duration::from_secs(60));
        assert_eq!(store.get("k"), Some(json!({"v": 1})));

        clock.advance(Duration::from_secs(60));

        // Still counted until a lookup observes the expiry.
        assert_eq!(store.stats().total_entries, 1);
        assert_eq!(store.get("k"), None);
        assert_eq!(store.stats().total_entries, 0);
        assert_eq!(store.stats().expired, 1);
    }

    #[test]
    fn test_store_default_ttl_is_a_day() {
        let (mut store, clock) = store_with_clock();

        store.set_default("k", json!(true));
        clock.advance(Duration::from_secs(24 * 60 * 60 - 1));
        assert!(store.get("k").is_some());

        clock.advance(Duration::from_secs(1));
        assert!(store.get("k").is_none());
    }

    #[test]
    fn test_clear_by_namespace() {
        let mut store = CacheStore::new();
        let ttl = Duration::from_secs(60);

        store.set(make_key(Namespace::Company, &["acme"]), json!(1), ttl);
        store.set(make_key(Namespace::Company, &["globex"]), json!(2), ttl);
        store.set("companyx:acme", json!(3), ttl);
        store.set("job:x", json!(4), ttl);

        assert_eq!(store.clear(Some("company")), 2);
        assert!(store.get("companyx:acme").is_some());
        assert!(store.get("job:x").is_some());
        assert!(store.get("company:acme").is_none());
    }

    #[test]
    fn test_clear_by_delimited_prefix() {
        let mut store = CacheStore::new();
        let ttl = Duration::from_secs(60);

        store.set("salary:acme:engineer", json!(1), ttl);
        store.set("salary:acme:manager", json!(2), ttl);
        store.set("salary:globex:engineer", json!(3), ttl);

        assert_eq!(store.clear(Some("salary:acme:")), 2);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_clear_all() {
        let mut store = CacheStore::new();
        store.set("a:1", json!(1), Duration::from_secs(60));
        store.set("b:1", json!(1), Duration::from_secs(60));

        assert_eq!(store.clear(None), 2);
        assert!(store.is_empty());
    }

    #[test]
    fn test_stats_by_prefix_and_estimate() {
        let mut store = CacheStore::new();
        let ttl = Duration::from_secs(60);

        store.set("company:acme", json!([1]), ttl);
        store.set("job:engineer", json!("x"), ttl);
        store.set("job:manager", json!("y"), ttl);

        let stats = store.stats();
        assert_eq!(stats.total_entries, 3);
        assert_eq!(stats.by_prefix.get("company"), Some(&1));
        assert_eq!(stats.by_prefix.get("job"), Some(&2));

        let raw = "company:acme".len() + "[1]".len() + "job:engineer".len() + 3 + "job:manager".len() + 3;
        assert_eq!(stats.memory_usage_estimate, raw * 2);
    }

    #[test]
    fn test_hit_and_miss_counters() {
        let mut store = CacheStore::new();
        store.set("k", json!(1), Duration::from_secs(60));

        store.get("k");
        store.get("k");
        store.get("missing");

        let stats = store.stats();
        assert_eq!(stats.hits, 2);
        assert_eq!(stats.misses, 1);
    }

    #[test]
    fn test_purge_expired() {
        let (mut store, clock) = store_with_clock();

        store.set("short", json!(1), Duration::from_secs(1));
        store.set("long", json!(2), Duration::from_secs(3600));

        clock.advance(Duration::from_secs(2));
        assert_eq!(store.purge_expired(), 1);
        assert_eq!(store.len(), 1);
        assert!(store.get("long").is_some());
    }

    #[derive(Debug, Serialize, Deserialize, PartialEq)]
    struct Sample {
        id: u64,
        name: String,
    }

    #[test]
    fn test_typed_round_trip() {
        let mut store = CacheStore::new();
        let sample = Sample {
            id: 7,
            name: "Acme".into(),
        };

        store
            .set_as("company:acme", &sample, Duration::from_secs(60))
            .unwrap();
        assert_eq!(store.get_as::<Sample>("company:acme"), Some(sample));
    }

    #[test]
    fn test_unserializable_value_is_internal_error() {
        let mut store = CacheStore::new();
        let mut value = HashMap::new();
        value.insert((1u8, 2u8), "non-string key");

        let err = store
            .set_as("job:pair", &value, Duration::from_secs(60))
            .unwrap_err();
        assert!(matches!(err, SalaryError::Internal(_)));
        assert!(store.is_empty());
    }

    #[test]
    fn test_typed_get_drops_mismatched_value() {
        let mut store = CacheStore::new();
        store.set("company:acme", json!("not a sample"), Duration::from_secs(60));

        assert_eq!(store.get_as::<Sample>("company:acme"), None);
        assert!(store.is_empty());
    }

    #[test]
    fn test_typed_get_mismatch_counts_as_miss() {
        let mut store = CacheStore::new();
        store.set("job:engineer", json!("text"), Duration::from_secs(60));

        assert_eq!(store.get_as::<u32>("job:engineer"), None);

        let stats = store.stats();
        assert_eq!(stats.hits, 0);
        assert_eq!(stats.misses, 1);
    }

    #[test]
    fn test_huge_ttl_saturates_instead_of_wrapping() {
        let (mut store, clock) = store_with_clock();

        // Millisecond count is just past u64::MAX.
        let ttl = Duration::new(18_446_744_073_709_551, 621_000_000);
        store.set("k", json!(1), ttl);

        clock.advance(Duration::from_millis(20));
        assert_eq!(store.get("k"), Some(json!(1)));

        clock.advance(Duration::from_secs(365 * 24 * 60 * 60));
        assert_eq!(store.get("k"), Some(json!(1)));
    }
}
