//! API Module
//!
//! HTTP handlers and routing for the geocoding REST API.
//!
//! # Endpoints
//! - `GET /geocoding?address=` - Forward geocoding
//! - `GET /reverse-geocoding?latitude=&longitude=` - Reverse geocoding
//! - `DELETE /evict-geocoding-cache`, `DELETE /evict-reverse-geocoding-cache` - Clear a cache
//! - `DELETE /evict-geocoding-entry`, `DELETE /evict-reverse-geocoding-entry` - Evict one entry
//! - `DELETE /evict-stale-geocoding-entries`, `DELETE /evict-stale-reverse-geocoding-entries` - Sweep expired entries
//! - `GET /stats`, `GET /health`, `GET /`

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
