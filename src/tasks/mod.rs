//! Background Tasks Module
//!
//! Contains background tasks that run periodically during server operation.
//!
//! # Tasks
//! - Stale sweep: removes expired entries from both geocoding caches

mod sweep;

pub use sweep::spawn_stale_sweep_task;
