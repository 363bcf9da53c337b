//! Recency caching of message lists.
//!
//! - [`RecencyCache`]: single-owner LRU keyed by filter semantic equality
//! - [`SharedRecencyCache`]: the same cache behind one mutex
//! - [`CacheStats`]: hit/miss/eviction counters
//!
//! # Thread-Safety
//!
//! `RecencyCache` has no internal synchronization; `&mut self` on every
//! mutating call is the guard. `SharedRecencyCache` holds a single
//! `parking_lot::Mutex` and never calls out while holding it, except for the
//! builder passed to `get_or_insert_with`.

mod recency;
mod shared;
mod stats;

pub use recency::{RecencyCache, CACHE_STORAGE_LIMIT, KEY_RESET_THRESHOLD};
pub use shared::SharedRecencyCache;
pub use stats::CacheStats;
