//! Stale Sweep Task
//!
//! Background task that periodically removes expired geocoding cache entries.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::geocoding::GeocodingService;

/// Spawns a background task that sweeps stale entries from both caches.
///
/// Only expired entries are removed; fresh ones are left in place. Returns
/// `None` when `interval_secs` is 0, otherwise the task's JoinHandle so it
/// can be aborted during graceful shutdown.
///
/// # Example
/// ```ignore
/// let handle = spawn_stale_sweep_task(service.clone(), 60);
/// // Later, during shutdown:
/// if let Some(handle) = handle { handle.abort(); }
/// ```
pub fn spawn_stale_sweep_task(
    service: Arc<GeocodingService>,
    interval_secs: u64,
) -> Option<JoinHandle<()>> {
    if interval_secs == 0 {
        info!("Stale sweep task disabled");
        return None;
    }

    Some(spawn_with_interval(service, Duration::from_secs(interval_secs)))
}

fn spawn_with_interval(service: Arc<GeocodingService>, interval: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        info!(interval_ms = interval.as_millis() as u64, "Starting stale sweep task");

        loop {
            tokio::time::sleep(interval).await;

            let forward = service.evict_stale_forward().await;
            let reverse = service.evict_stale_reverse().await;

            if forward + reverse > 0 {
                info!(forward, reverse, "Stale sweep removed expired entries");
            } else {
                debug!("Stale sweep: no expired entries found");
            }
        }
    })
}
