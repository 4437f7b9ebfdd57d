//! Cache Module
//!
//! Namespaced in-memory cache with per-entry TTL and lazy expiry.

mod clock;
mod entry;
mod key;
mod stats;
mod store;


use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;

// Re-export public types
pub use clock::{current_timestamp_ms, Clock, ManualClock, SystemClock};
pub use entry::CacheEntry;
pub use key::{make_key, namespace_of, Namespace, KEY_DELIMITER};
pub use stats::{CacheCounters, CacheStats};
pub use store::CacheStore;

/// Store shared between handlers and the pipeline. Lookups take the write
/// lock because a lookup may delete an expired entry.
pub type SharedCache = Arc<RwLock<CacheStore>>;

// == Public Constants ==
const DAY: Duration = Duration::from_secs(24 * 60 * 60);

/// TTL used when a caller does not pick one
pub const DEFAULT_TTL: Duration = DAY;

/// TTL for company and job title search results
pub const LOOKUP_TTL: Duration = Duration::from_secs(30 * 24 * 60 * 60);

/// TTL for composed salary results
pub const SALARY_TTL: Duration = Duration::from_secs(15 * 24 * 60 * 60);

/// Wraps a store for sharing.
pub fn shared(store: CacheStore) -> SharedCache {
    Arc::new(RwLock::new(store))
}
