//! Geocoding Module
//!
//! Coordinate types, the upstream provider client and the caching service.

mod client;
mod coordinates;
mod positionstack;
mod service;

pub use client::GeocodingClient;
pub use coordinates::{CoordinateKey, Coordinates};
pub use positionstack::{
    PositionstackClient, PositionstackConfig, DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS,
};
pub use service::{GeocodingService, FORWARD_CACHE, REVERSE_CACHE};
