//! API Handlers
//!
//! HTTP request handlers for each geocoding endpoint.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use tracing::debug;

use crate::config::Config;
use crate::error::Result;
use crate::geocoding::{Coordinates, GeocodingService, PositionstackClient};
use crate::models::{AddressQuery, CoordinatesQuery, HealthResponse, StatsResponse};

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<GeocodingService>,
}

impl AppState {
    pub fn new(service: GeocodingService) -> Self {
        Self {
            service: Arc::new(service),
        }
    }

    /// Builds the service and its positionstack client from configuration.
    pub fn from_config(config: &Config) -> Result<Self> {
        let client = PositionstackClient::new(config.upstream())?;
        Ok(Self::new(GeocodingService::from_config(Arc::new(client), config)))
    }
}

/// Handler for GET /
pub async fn home_handler() -> &'static str {
    "Welcome to the geocoding cache service"
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}

/// Handler for GET /stats
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    let (forward, reverse) = state.service.stats().await;

    Json(StatsResponse {
        geocoding: forward.into(),
        reverse_geocoding: reverse.into(),
    })
}

/// Handler for GET /geocoding?address=
pub async fn geocoding_handler(
    State(state): State<AppState>,
    Query(query): Query<AddressQuery>,
) -> Result<Json<Coordinates>> {
    let address = query.required()?;
    debug!(%address, "Forward geocoding request received");

    let coordinates = state.service.resolve_coordinates(&address).await?;
    Ok(Json(coordinates))
}

/// Handler for GET /reverse-geocoding?latitude=&longitude=
///
/// Responds with the address as plain text.
pub async fn reverse_geocoding_handler(
    State(state): State<AppState>,
    Query(query): Query<CoordinatesQuery>,
) -> Result<String> {
    let (latitude, longitude) = query.required()?;
    debug!(latitude, longitude, "Reverse geocoding request received");

    state.service.resolve_address(latitude, longitude).await
}

/// Handler for DELETE /evict-geocoding-cache
///
/// Eviction endpoints answer 200 with an empty body; the removed count is
/// logged by the service.
pub async fn evict_geocoding_cache_handler(State(state): State<AppState>) -> StatusCode {
    state.service.evict_all_forward().await;
    StatusCode::OK
}

/// Handler for DELETE /evict-reverse-geocoding-cache
pub async fn evict_reverse_geocoding_cache_handler(State(state): State<AppState>) -> StatusCode {
    state.service.evict_all_reverse().await;
    StatusCode::OK
}

/// Handler for DELETE /evict-geocoding-entry?address=
pub async fn evict_geocoding_entry_handler(
    State(state): State<AppState>,
    Query(query): Query<AddressQuery>,
) -> Result<StatusCode> {
    let address = query.required()?;
    state.service.evict_address_entry(&address).await;
    Ok(StatusCode::OK)
}

/// Handler for DELETE /evict-reverse-geocoding-entry?latitude=&longitude=
pub async fn evict_reverse_geocoding_entry_handler(
    State(state): State<AppState>,
    Query(query): Query<CoordinatesQuery>,
) -> Result<StatusCode> {
    let (latitude, longitude) = query.required()?;
    state.service.evict_coordinate_entry(latitude, longitude).await;
    Ok(StatusCode::OK)
}

/// Handler for DELETE /evict-stale-geocoding-entries
pub async fn evict_stale_geocoding_handler(State(state): State<AppState>) -> StatusCode {
    state.service.evict_stale_forward().await;
    StatusCode::OK
}

/// Handler for DELETE /evict-stale-reverse-geocoding-entries
pub async fn evict_stale_reverse_geocoding_handler(State(state): State<AppState>) -> StatusCode {
    state.service.evict_stale_reverse().await;
    StatusCode::OK
}
