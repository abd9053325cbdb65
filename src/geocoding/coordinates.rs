//! Coordinate types and the reverse-cache key.

use serde::{Deserialize, Serialize};

use crate::error::{GeocodingError, Result};

pub const MIN_LATITUDE: f64 = -90.0;
pub const MAX_LATITUDE: f64 = 90.0;
pub const MIN_LONGITUDE: f64 = -180.0;
pub const MAX_LONGITUDE: f64 = 180.0;

// == Coordinates ==
/// A latitude/longitude pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    // == Validate ==
    /// Checks both components are inside their ranges. NaN is rejected.
    pub fn validate(&self) -> Result<()> {
        if !(MIN_LATITUDE..=MAX_LATITUDE).contains(&self.latitude)
            || !(MIN_LONGITUDE..=MAX_LONGITUDE).contains(&self.longitude)
        {
            return Err(GeocodingError::InvalidInput(format!(
                "Invalid latitude or longitude ({}, {}). Latitude must be between {} and {}, and longitude between {} and {}.",
                self.latitude, self.longitude, MIN_LATITUDE, MAX_LATITUDE, MIN_LONGITUDE, MAX_LONGITUDE
            )));
        }
        Ok(())
    }

    pub fn key(&self) -> CoordinateKey {
        CoordinateKey::from(*self)
    }
}

// == Coordinate Key ==
/// Hashable compound key for the reverse cache.
///
/// Two keys are equal only when both components have the same value.
/// `-0.0` and `0.0` map to the same key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CoordinateKey {
    latitude_bits: u64,
    longitude_bits: u64,
}

impl CoordinateKey {
    pub fn coordinates(&self) -> Coordinates {
        Coordinates::new(
            f64::from_bits(self.latitude_bits),
            f64::from_bits(self.longitude_bits),
        )
    }
}

impl From<Coordinates> for CoordinateKey {
    fn from(coordinates: Coordinates) -> Self {
        Self {
            latitude_bits: canonical_bits(coordinates.latitude),
            longitude_bits: canonical_bits(coordinates.longitude),
        }
    }
}

fn canonical_bits(value: f64) -> u64 {
    // -0.0 == 0.0 but their bit patterns differ
    if value == 0.0 {
        0.0f64.to_bits()
    } else {
        value.to_bits()
    }
}
