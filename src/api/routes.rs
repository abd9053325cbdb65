//! API Routes
//!
//! Configures the Axum router with all geocoding endpoints.

use axum::{
    middleware,
    routing::{delete, get},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::error::attach_error_details;

use super::handlers::{
    evict_geocoding_cache_handler, evict_geocoding_entry_handler,
    evict_reverse_geocoding_cache_handler, evict_reverse_geocoding_entry_handler,
    evict_stale_geocoding_handler, evict_stale_reverse_geocoding_handler, geocoding_handler,
    health_handler, home_handler, reverse_geocoding_handler, stats_handler, AppState,
};

/// Creates the main router with all endpoints configured.
///
/// # Middleware
/// - Error details: Adds the request path to error bodies
/// - CORS: Allows any origin
/// - Tracing: Logs all requests
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(home_handler))
        .route("/health", get(health_handler))
        .route("/stats", get(stats_handler))
        .route("/geocoding", get(geocoding_handler))
        .route("/reverse-geocoding", get(reverse_geocoding_handler))
        .route("/evict-geocoding-cache", delete(evict_geocoding_cache_handler))
        .route(
            "/evict-reverse-geocoding-cache",
            delete(evict_reverse_geocoding_cache_handler),
        )
        .route("/evict-geocoding-entry", delete(evict_geocoding_entry_handler))
        .route(
            "/evict-reverse-geocoding-entry",
            delete(evict_reverse_geocoding_entry_handler),
        )
        .route(
            "/evict-stale-geocoding-entries",
            delete(evict_stale_geocoding_handler),
        )
        .route(
            "/evict-stale-reverse-geocoding-entries",
            delete(evict_stale_reverse_geocoding_handler),
        )
        .layer(middleware::from_fn(attach_error_details))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
