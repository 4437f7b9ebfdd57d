//! Cache Statistics Module
//!
//! Counters kept by the store plus the snapshot reported to callers.

use std::collections::BTreeMap;

use serde::Serialize;

// == Counters ==
/// Running counters updated by the store on every lookup.
#[derive(Debug, Clone, Default)]
pub struct CacheCounters {
    /// Lookups that returned a live value
    pub hits: u64,
    /// Lookups that found nothing or an expired value
    pub misses: u64,
    /// Entries removed because they expired (lazily or by a purge)
    pub expired: u64,
}

impl CacheCounters {
    pub fn record_hit(&mut self) {
        self.hits += 1;
    }

    pub fn record_miss(&mut self) {
        self.misses += 1;
    }

    /// Turns the last recorded hit into a miss.
    pub fn reclassify_hit_as_miss(&mut self) {
        self.hits = self.hits.saturating_sub(1);
        self.misses += 1;
    }

    pub fn record_expired(&mut self, count: usize) {
        self.expired += count as u64;
    }
}

// == Cache Stats ==
/// Snapshot of the store contents.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheStats {
    /// Number of entries currently held (expired-but-unread entries included)
    pub total_entries: usize,
    /// Entry count per namespace segment
    pub by_prefix: BTreeMap<String, usize>,
    /// Rough size in bytes: serialized key + value length times two.
    /// This is an estimate, not byte accounting.
    pub memory_usage_estimate: usize,
    pub hits: u64,
    pub misses: u64,
    pub expired: u64,
}
