//! Shared Cache Module
//!
//! Thread-safe handle around a [`CacheStore`] with a compute-on-miss helper.

use std::future::Future;
use std::hash::Hash;
use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::debug;

use crate::cache::{CacheStats, CacheStore};

// == Shared Cache ==
/// A named, cloneable handle to a cache store guarded by an async RwLock.
///
/// Each operation takes the lock exactly once, so a concurrent reader sees
/// either the state before or after a bulk eviction, never a partial one.
#[derive(Debug)]
pub struct SharedCache<K, V> {
    name: &'static str,
    inner: Arc<RwLock<CacheStore<K, V>>>,
}

impl<K, V> Clone for SharedCache<K, V> {
    fn clone(&self) -> Self {
        Self {
            name: self.name,
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<K, V> SharedCache<K, V>
where
    K: Eq + Hash + Clone + Send + Sync,
    V: Clone + Send + Sync,
{
    pub fn new(name: &'static str, store: CacheStore<K, V>) -> Self {
        Self {
            name,
            inner: Arc::new(RwLock::new(store)),
        }
    }

    /// Namespace this cache serves, used in logs and responses.
    pub fn name(&self) -> &'static str {
        self.name
    }

    pub async fn get(&self, key: &K) -> Option<V> {
        // Write lock: a hit updates recency and stats
        self.inner.write().await.get(key)
    }

    pub async fn put(&self, key: K, value: V) {
        self.inner.write().await.put(key, value);
    }

    // == Get Or Compute ==
    /// Returns the cached value for `key`, or computes, stores and returns it.
    ///
    /// `compute` runs at most once per call and without the lock held.
    /// Concurrent misses on the same key may each compute; the last write
    /// wins. Errors are returned as-is and nothing is stored.
    pub async fn get_or_compute<F, Fut, E>(&self, key: K, compute: F) -> Result<V, E>
    where
        F: FnOnce(&K) -> Fut,
        Fut: Future<Output = Result<V, E>>,
    {
        if let Some(value) = self.get(&key).await {
            debug!(cache = self.name, "Cache hit");
            return Ok(value);
        }

        debug!(cache = self.name, "Cache miss, computing value");
        let value = compute(&key).await?;
        self.put(key, value.clone()).await;
        Ok(value)
    }

    pub async fn evict(&self, key: &K) -> bool {
        self.inner.write().await.evict(key)
    }

    pub async fn evict_all(&self) -> usize {
        self.inner.write().await.evict_all()
    }

    pub async fn evict_stale(&self) -> usize {
        self.inner.write().await.evict_stale()
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.is_empty()
    }

    pub async fn stats(&self) -> CacheStats {
        self.inner.read().await.stats()
    }
}
