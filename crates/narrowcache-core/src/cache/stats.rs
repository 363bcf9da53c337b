//! Cache statistics.

#![allow(clippy::cast_precision_loss)] // Precision loss acceptable for hit rate calculation

/// Cache statistics for monitoring.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Number of `get` calls that found a list.
    pub hits: u64,
    /// Number of `get` calls that found nothing.
    pub misses: u64,
    /// Number of lists dropped to respect the storage limit.
    pub evictions: u64,
    /// Number of entries moved to the most-recent position, by `get` hits
    /// and by duplicate `add` calls.
    pub promotions: u64,
    /// Number of times surrogate keys were renumbered.
    pub renumberings: u64,
}

impl CacheStats {
    /// Calculate hit rate (0.0 to 1.0).
    #[must_use]
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}
