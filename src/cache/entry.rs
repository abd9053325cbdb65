//! Cache Entry Module
//!
//! Defines the structure for individual cache entries with TTL support.
//! Timestamps come from the monotonic clock, so wall-clock adjustments
//! never extend or shorten an entry's lifetime.

use std::time::{Duration, Instant};

// == Cache Entry ==
/// Represents a single cache entry with value and metadata.
#[derive(Debug, Clone)]
pub struct CacheEntry<V> {
    /// The stored value
    pub value: V,
    /// When the entry was written
    pub created_at: Instant,
    /// Last successful read
    pub last_accessed_at: Instant,
    /// Expiry instant, `None` when the TTL is too large to represent
    pub expires_at: Option<Instant>,
}

impl<V> CacheEntry<V> {
    /// Creates a new cache entry that expires `ttl` from now.
    pub fn new(value: V, ttl: Duration) -> Self {
        let now = Instant::now();

        Self {
            value,
            created_at: now,
            last_accessed_at: now,
            expires_at: now.checked_add(ttl),
        }
    }

    // == Is Expired ==
    /// An entry is expired once the current time is greater than or equal
    /// to its expiration time.
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Instant::now())
    }

    /// Same as [`is_expired`](Self::is_expired) against a caller-supplied clock.
    pub fn is_expired_at(&self, now: Instant) -> bool {
        self.expires_at.is_some_and(|expires_at| now >= expires_at)
    }

    /// Records a read of this entry.
    pub fn touch(&mut self) {
        self.last_accessed_at = Instant::now();
    }

    /// Remaining lifetime, zero once expired.
    pub fn ttl_remaining(&self) -> Duration {
        match self.expires_at {
            Some(expires_at) => expires_at.saturating_duration_since(Instant::now()),
            None => Duration::MAX,
        }
    }
}
