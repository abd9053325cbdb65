//! Request DTOs for the geocoding API
//!
//! Query-string parameters. Every field is optional at the extractor level
//! so that a missing parameter is reported through the service's own
//! 400 error body rather than axum's plain-text rejection.

use serde::Deserialize;

use crate::error::{GeocodingError, Result};

/// Query for `GET /geocoding` and `DELETE /evict-geocoding-entry`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AddressQuery {
    pub address: Option<String>,
}

impl AddressQuery {
    /// Returns the address, failing if it is missing or blank.
    pub fn required(self) -> Result<String> {
        match self.address {
            Some(address) if !address.trim().is_empty() => Ok(address),
            _ => Err(GeocodingError::InvalidInput(
                "Query parameter 'address' is required and cannot be blank".to_string(),
            )),
        }
    }
}

/// Query for `GET /reverse-geocoding` and `DELETE /evict-reverse-geocoding-entry`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CoordinatesQuery {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl CoordinatesQuery {
    /// Returns (latitude, longitude), failing if either is missing.
    ///
    /// Range checks belong to the service.
    pub fn required(self) -> Result<(f64, f64)> {
        match (self.latitude, self.longitude) {
            (Some(latitude), Some(longitude)) => Ok((latitude, longitude)),
            _ => Err(GeocodingError::InvalidInput(
                "Query parameters 'latitude' and 'longitude' are required".to_string(),
            )),
        }
    }
}
