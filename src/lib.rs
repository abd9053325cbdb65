//! geocache - A caching geocoding HTTP facade
//!
//! Resolves addresses to coordinates and back through an upstream provider,
//! keeping recent answers in bounded, TTL-expiring in-memory caches.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod geocoding;
pub mod models;
pub mod tasks;

pub use api::AppState;
pub use config::Config;
pub use tasks::spawn_stale_sweep_task;
