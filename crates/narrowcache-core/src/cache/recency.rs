//! Recency cache of message lists keyed by filter.
//!
//! Entries live in an `IndexMap` from surrogate key to dataset. Iteration
//! order is recency order: oldest first, most recently touched last. Every
//! promotion or insertion takes key `latest_key + 1`, so the newest entry is
//! always at the back. Keys only encode order and never leave this module.

use std::sync::Arc;

use indexmap::IndexMap;

use super::CacheStats;
use crate::config::CacheConfig;
use crate::dataset::Dataset;
use crate::filter::SemanticEq;

/// Maximum number of cached lists, the permanent one included.
pub const CACHE_STORAGE_LIMIT: usize = 100;

/// Key value at which surrogate keys are renumbered densely.
pub const KEY_RESET_THRESHOLD: u64 = 1_000_000_000;

/// LRU cache of datasets keyed by semantic equality of their filters.
///
/// Lookups are a linear scan: filters are compared with
/// [`SemanticEq::semantic_eq`], not hashed. One permanent dataset is seeded
/// at construction and survives every eviction and [`clear`](Self::clear).
///
/// Mutating methods take `&mut self`; wrap the cache in
/// [`SharedRecencyCache`](super::SharedRecencyCache) to share it across
/// threads.
pub struct RecencyCache<D: Dataset> {
    /// The non-evictable superset list.
    permanent: Arc<D>,
    /// Surrogate key -> dataset, in recency order.
    entries: IndexMap<u64, Arc<D>>,
    /// Last key handed out.
    latest_key: u64,
    storage_limit: usize,
    key_reset_threshold: u64,
    stats: CacheStats,
}

impl<D: Dataset> RecencyCache<D> {
    /// Creates a cache seeded with `permanent`, using the default limits.
    #[must_use]
    pub fn new(permanent: Arc<D>) -> Self {
        Self::with_limits(permanent, CACHE_STORAGE_LIMIT, KEY_RESET_THRESHOLD)
    }

    /// Creates a cache seeded with `permanent`, using configured limits.
    #[must_use]
    pub fn with_config(permanent: Arc<D>, config: &CacheConfig) -> Self {
        Self::with_limits(permanent, config.storage_limit, config.key_reset_threshold)
    }

    /// Creates a cache seeded with `permanent` and explicit limits.
    ///
    /// `storage_limit` must be at least 2 (the permanent list plus one) and
    /// `key_reset_threshold` must exceed it. Use
    /// [`NarrowCacheConfig::validate`](crate::NarrowCacheConfig::validate)
    /// to check values that come from outside.
    #[must_use]
    pub fn with_limits(permanent: Arc<D>, storage_limit: usize, key_reset_threshold: u64) -> Self {
        debug_assert!(
            storage_limit >= 2,
            "storage_limit {storage_limit} must be >= 2"
        );
        debug_assert!(
            key_reset_threshold > storage_limit as u64,
            "key_reset_threshold {key_reset_threshold} must exceed storage_limit {storage_limit}"
        );
        let entries = seeded(&permanent);
        Self {
            permanent,
            entries,
            latest_key: 0,
            storage_limit,
            key_reset_threshold,
            stats: CacheStats::default(),
        }
    }

    /// Returns the first cached dataset whose filter equals `criterion`,
    /// promoting it to most recently used.
    pub fn get(&mut self, criterion: &D::Criterion) -> Option<Arc<D>> {
        let Some(key) = self.key_of(criterion) else {
            self.stats.misses += 1;
            tracing::trace!(len = self.entries.len(), "message list cache miss");
            return None;
        };

        self.stats.hits += 1;
        tracing::trace!(key, "message list cache hit");
        self.promote(key)
    }

    /// Caches `dataset` as the most recently used entry.
    ///
    /// If a dataset with an equal filter is already cached, that entry is
    /// promoted and kept; `dataset` itself is dropped. Otherwise, when the
    /// cache is full, the oldest entry that is not the permanent dataset is
    /// evicted first.
    pub fn add(&mut self, dataset: Arc<D>) {
        if let Some(key) = self.key_of(dataset.filter()) {
            tracing::trace!(key, "message list already cached");
            self.promote(key);
            return;
        }

        if self.entries.len() >= self.storage_limit {
            self.evict_oldest();
        }

        self.latest_key += 1;
        self.entries.insert(self.latest_key, dataset);
        tracing::debug!(
            key = self.latest_key,
            len = self.entries.len(),
            "message list cached"
        );

        self.renumber_if_needed();
    }

    /// Snapshot of every cached dataset, oldest first.
    #[must_use]
    pub fn all(&self) -> Vec<Arc<D>> {
        self.entries.values().cloned().collect()
    }

    /// Drops every entry except the permanent dataset and resets the keys.
    ///
    /// Statistics are kept.
    pub fn clear(&mut self) {
        let dropped = self.entries.len().saturating_sub(1);
        self.entries = seeded(&self.permanent);
        self.latest_key = 0;
        tracing::debug!(dropped, "message list cache cleared");
    }

    /// Returns true if a dataset with a filter equal to `criterion` is
    /// cached. Does not affect recency.
    #[must_use]
    pub fn contains(&self, criterion: &D::Criterion) -> bool {
        self.key_of(criterion).is_some()
    }

    /// Number of cached datasets, the permanent one included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always false: the permanent dataset is always cached.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The permanent dataset.
    #[must_use]
    pub fn permanent(&self) -> &Arc<D> {
        &self.permanent
    }

    /// Maximum number of entries kept after an `add`.
    #[must_use]
    pub fn storage_limit(&self) -> usize {
        self.storage_limit
    }

    /// Get cache statistics.
    #[must_use]
    pub fn stats(&self) -> CacheStats {
        self.stats
    }

    /// The most recently used entry.
    pub(crate) fn newest(&self) -> Option<&Arc<D>> {
        self.entries.last().map(|(_, data)| data)
    }

    #[cfg(test)]
    pub(crate) fn latest_key(&self) -> u64 {
        self.latest_key
    }

    #[cfg(test)]
    pub(crate) fn keys(&self) -> Vec<u64> {
        self.entries.keys().copied().collect()
    }

    /// Key of the oldest entry whose filter equals `criterion`.
    fn key_of(&self, criterion: &D::Criterion) -> Option<u64> {
        self.entries
            .iter()
            .find(|(_, data)| data.filter().semantic_eq(criterion))
            .map(|(key, _)| *key)
    }

    /// Moves the entry at `key` to the back under a fresh key.
    fn promote(&mut self, key: u64) -> Option<Arc<D>> {
        let data = self.entries.shift_remove(&key)?;
        self.latest_key += 1;
        self.entries.insert(self.latest_key, Arc::clone(&data));
        self.stats.promotions += 1;

        self.renumber_if_needed();
        Some(data)
    }

    /// Removes the least recently used entry that is not the permanent one.
    fn evict_oldest(&mut self) {
        let permanent_filter = self.permanent.filter();
        let victim = self
            .entries
            .iter()
            .find(|(_, data)| !data.filter().semantic_eq(permanent_filter))
            .map(|(key, _)| *key);

        match victim {
            Some(key) => {
                self.entries.shift_remove(&key);
                self.stats.evictions += 1;
                tracing::debug!(key, "evicted least recently used message list");
            }
            None => {
                // Keeping the permanent list wins over the storage limit.
                tracing::warn!(
                    len = self.entries.len(),
                    storage_limit = self.storage_limit,
                    "no evictable message list, exceeding storage limit"
                );
            }
        }
    }

    fn renumber_if_needed(&mut self) {
        if self.latest_key >= self.key_reset_threshold {
            self.renumber();
        }
    }

    /// Reassigns keys `0..len` in current recency order.
    fn renumber(&mut self) {
        let previous = self.latest_key;
        let entries = std::mem::take(&mut self.entries);
        self.entries = entries
            .into_values()
            .enumerate()
            .map(|(key, data)| (key as u64, data))
            .collect();
        self.latest_key = (self.entries.len() as u64).saturating_sub(1);
        self.stats.renumberings += 1;
        tracing::debug!(
            previous,
            latest_key = self.latest_key,
            "renumbered message list cache keys"
        );
    }
}

fn seeded<D>(permanent: &Arc<D>) -> IndexMap<u64, Arc<D>> {
    let mut entries = IndexMap::with_capacity(1);
    entries.insert(0, Arc::clone(permanent));
    entries
}
