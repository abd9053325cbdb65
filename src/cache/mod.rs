//! Cache Module
//!
//! Provides in-memory caching with TTL expiration and LRU eviction.

mod entry;
mod lru;
mod shared;
mod stats;
mod store;

#[cfg(test)]
mod property_tests;

// Re-export public types
pub use entry::CacheEntry;
pub use lru::LruTracker;
pub use shared::SharedCache;
pub use stats::CacheStats;
pub use store::CacheStore;

// == Public Constants ==
/// Default maximum number of entries per cache namespace
pub const DEFAULT_MAX_ENTRIES: usize = 1000;

/// Default entry lifetime in seconds (1 hour)
pub const DEFAULT_TTL_SECS: u64 = 3600;
