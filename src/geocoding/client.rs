//! Upstream geocoding client abstraction.
//!
//! The service only talks to the provider through this trait so that tests
//! can substitute a scripted client for the real HTTP one.

use async_trait::async_trait;

use crate::error::Result;
use crate::geocoding::Coordinates;

/// Outbound lookups against a geocoding provider.
///
/// `Ok(None)` means the provider was reachable and answered with no result.
/// Every other failure is reported as
/// [`GeocodingError::UpstreamUnavailable`](crate::error::GeocodingError::UpstreamUnavailable).
#[async_trait]
pub trait GeocodingClient: Send + Sync {
    /// Resolves an address to the coordinates of the provider's first result.
    async fn forward(&self, address: &str) -> Result<Option<Coordinates>>;

    /// Resolves coordinates to the label of the provider's first result.
    async fn reverse(&self, coordinates: Coordinates) -> Result<Option<String>>;
}
