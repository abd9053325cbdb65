//! Per-cache counters reported by `GET /stats`.

use serde::Serialize;

/// Lookup and removal counters of one cache namespace.
///
/// `total_entries` is only meaningful on a [`snapshot`](Self::snapshot);
/// the live counters inside a store leave it at zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CacheStats {
    pub hits: u64,
    /// Lookups that found nothing, including entries found expired
    pub misses: u64,
    /// Entries dropped to stay under the capacity limit
    pub evictions: u64,
    /// Expired entries removed, lazily or by a stale sweep
    pub expirations: u64,
    pub total_entries: usize,
}

impl CacheStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lookups(&self) -> u64 {
        self.hits + self.misses
    }

    /// Fraction of lookups served from the cache, 0.0 before the first lookup.
    pub fn hit_rate(&self) -> f64 {
        match self.lookups() {
            0 => 0.0,
            lookups => self.hits as f64 / lookups as f64,
        }
    }

    pub fn record_hit(&mut self) {
        self.hits += 1;
    }

    pub fn record_miss(&mut self) {
        self.misses += 1;
    }

    pub fn record_eviction(&mut self) {
        self.evictions += 1;
    }

    pub fn record_expirations(&mut self, count: usize) {
        self.expirations += count as u64;
    }

    /// Copy of the counters paired with the store's current size.
    pub fn snapshot(&self, total_entries: usize) -> Self {
        Self {
            total_entries,
            ..self.clone()
        }
    }
}
