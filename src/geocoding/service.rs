//! Geocoding Cache Service
//!
//! Binds the forward and reverse caches to the upstream client and owns
//! the caching policy: key derivation, the bypass address and eviction.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info};

use crate::cache::{CacheStats, CacheStore, SharedCache};
use crate::config::Config;
use crate::error::{GeocodingError, Result};
use crate::geocoding::{CoordinateKey, Coordinates, GeocodingClient};

/// Namespace of the address -> coordinates cache
pub const FORWARD_CACHE: &str = "geocoding";

/// Namespace of the coordinates -> address cache
pub const REVERSE_CACHE: &str = "reverse-geocoding";

// == Service ==
/// Forward and reverse geocoding with a cache in front of each direction.
pub struct GeocodingService {
    client: Arc<dyn GeocodingClient>,
    forward: SharedCache<String, Coordinates>,
    reverse: SharedCache<CoordinateKey, String>,
    /// Addresses matching this (trimmed, case-insensitive) are never cached
    bypass_address: Option<String>,
}

impl GeocodingService {
    // == Constructor ==
    /// Creates a service whose two caches share the same capacity and TTL.
    pub fn new(
        client: Arc<dyn GeocodingClient>,
        max_entries: usize,
        ttl: Duration,
        bypass_address: Option<String>,
    ) -> Self {
        Self {
            client,
            forward: SharedCache::new(FORWARD_CACHE, CacheStore::new(max_entries, ttl)),
            reverse: SharedCache::new(REVERSE_CACHE, CacheStore::new(max_entries, ttl)),
            bypass_address: bypass_address
                .map(|a| a.trim().to_lowercase())
                .filter(|a| !a.is_empty()),
        }
    }

    pub fn from_config(client: Arc<dyn GeocodingClient>, config: &Config) -> Self {
        Self::new(
            client,
            config.max_entries,
            Duration::from_secs(config.cache_ttl_secs),
            config.bypass_address.clone(),
        )
    }

    // == Resolve Coordinates ==
    /// Forward geocoding: address -> coordinates.
    ///
    /// Blank input fails before the cache or upstream is consulted. The
    /// bypass address is always fetched fresh and never stored.
    pub async fn resolve_coordinates(&self, address: &str) -> Result<Coordinates> {
        let key = normalize_address(address)?;

        if self.is_bypass(&key) {
            debug!(address = %key, "Bypass address, skipping cache");
            return self.fetch_coordinates(&key).await;
        }

        let coordinates = self
            .forward
            .get_or_compute(key, |key| {
                let key = key.clone();
                async move { self.fetch_coordinates(&key).await }
            })
            .await?;
        debug!(address, ?coordinates, "Resolved address");
        Ok(coordinates)
    }

    // == Resolve Address ==
    /// Reverse geocoding: coordinates -> address label.
    pub async fn resolve_address(&self, latitude: f64, longitude: f64) -> Result<String> {
        let coordinates = Coordinates::new(latitude, longitude);
        coordinates.validate()?;

        let address = self
            .reverse
            .get_or_compute(coordinates.key(), |key| self.fetch_address(key.coordinates()))
            .await?;
        debug!(latitude, longitude, %address, "Resolved coordinates");
        Ok(address)
    }

    // == Single Entry Eviction ==
    /// Removes the cached coordinates for `address`. Returns whether an entry existed.
    pub async fn evict_address_entry(&self, address: &str) -> bool {
        let Ok(key) = normalize_address(address) else {
            return false;
        };
        let removed = self.forward.evict(&key).await;
        info!(cache = FORWARD_CACHE, address = %key, removed, "Evicted cache entry");
        removed
    }

    /// Removes the cached address for a coordinate pair. Returns whether an entry existed.
    pub async fn evict_coordinate_entry(&self, latitude: f64, longitude: f64) -> bool {
        let key = Coordinates::new(latitude, longitude).key();
        let removed = self.reverse.evict(&key).await;
        info!(cache = REVERSE_CACHE, latitude, longitude, removed, "Evicted cache entry");
        removed
    }

    // == Bulk Eviction ==
    pub async fn evict_all_forward(&self) -> usize {
        let removed = self.forward.evict_all().await;
        info!(cache = FORWARD_CACHE, removed, "Evicted all entries");
        removed
    }

    pub async fn evict_all_reverse(&self) -> usize {
        let removed = self.reverse.evict_all().await;
        info!(cache = REVERSE_CACHE, removed, "Evicted all entries");
        removed
    }

    // == Stale Eviction ==
    /// Removes only expired forward entries.
    pub async fn evict_stale_forward(&self) -> usize {
        let removed = self.forward.evict_stale().await;
        info!(cache = FORWARD_CACHE, removed, "Evicted stale entries");
        removed
    }

    /// Removes only expired reverse entries.
    pub async fn evict_stale_reverse(&self) -> usize {
        let removed = self.reverse.evict_stale().await;
        info!(cache = REVERSE_CACHE, removed, "Evicted stale entries");
        removed
    }

    // == Stats ==
    /// Returns (forward, reverse) cache statistics.
    pub async fn stats(&self) -> (CacheStats, CacheStats) {
        (self.forward.stats().await, self.reverse.stats().await)
    }

    pub fn bypass_address(&self) -> Option<&str> {
        self.bypass_address.as_deref()
    }

    fn is_bypass(&self, key: &str) -> bool {
        self.bypass_address
            .as_deref()
            .map(|bypass| key.to_lowercase() == bypass)
            .unwrap_or(false)
    }

    async fn fetch_coordinates(&self, address: &str) -> Result<Coordinates> {
        let coordinates = self.client.forward(address).await?.ok_or_else(|| {
            GeocodingError::NoResultFound(format!("No data found for address '{}'", address))
        })?;
        info!(address, ?coordinates, "Fetched coordinates from upstream");
        Ok(coordinates)
    }

    async fn fetch_address(&self, coordinates: Coordinates) -> Result<String> {
        let address = self.client.reverse(coordinates).await?.ok_or_else(|| {
            GeocodingError::NoResultFound(format!(
                "No address found for coordinates ({}, {})",
                coordinates.latitude, coordinates.longitude
            ))
        })?;
        info!(
            latitude = coordinates.latitude,
            longitude = coordinates.longitude,
            %address,
            "Fetched address from upstream"
        );
        Ok(address)
    }
}

/// Cache key for an address: surrounding whitespace trimmed, case kept.
fn normalize_address(address: &str) -> Result<String> {
    let trimmed = address.trim();
    if trimmed.is_empty() {
        return Err(GeocodingError::InvalidInput(
            "Address cannot be empty".to_string(),
        ));
    }
    Ok(trimmed.to_string())
}
