//! Error types for the geocoding service
//!
//! Provides unified error handling using thiserror.

use axum::{
    extract::Request,
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::models::ErrorResponse;

// == Geocoding Error Enum ==
/// Unified error type for the geocoding service.
///
/// Cache operations never fail; every variant here comes from input
/// validation or the upstream provider.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeocodingError {
    /// Malformed or out-of-range caller input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The provider answered but had nothing for the query
    #[error("No result found: {0}")]
    NoResultFound(String),

    /// Transport failure, timeout, non-success status or unparsable body
    #[error("Upstream unavailable: {0}")]
    UpstreamUnavailable(String),

    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

impl GeocodingError {
    /// HTTP status this error is surfaced as.
    pub fn status_code(&self) -> StatusCode {
        match self {
            GeocodingError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            GeocodingError::NoResultFound(_) => StatusCode::NOT_FOUND,
            GeocodingError::UpstreamUnavailable(_) => StatusCode::INTERNAL_SERVER_ERROR,
            GeocodingError::Unexpected(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn render(&self, details: Option<String>) -> Response {
        let body = Json(ErrorResponse::new(self.to_string(), details));
        (self.status_code(), body).into_response()
    }
}

// == IntoResponse Implementation ==
/// Renders `{error, timestamp}` and keeps the error in the response
/// extensions so [`attach_error_details`] can add the request path.
impl IntoResponse for GeocodingError {
    fn into_response(self) -> Response {
        if self.status_code().is_server_error() {
            tracing::error!(error = %self, "Request failed");
        }

        let mut response = self.render(None);
        response.extensions_mut().insert(self);
        response
    }
}

/// Middleware that adds `details: "uri=<path>"` to error bodies.
pub async fn attach_error_details(request: Request, next: Next) -> Response {
    let details = format!("uri={}", request.uri().path());
    let response = next.run(request).await;

    if let Some(error) = response.extensions().get::<GeocodingError>().cloned() {
        return error.render(Some(details));
    }
    response
}

impl From<reqwest::Error> for GeocodingError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            GeocodingError::UpstreamUnavailable(format!("Request timed out: {}", e))
        } else if e.is_decode() {
            GeocodingError::UpstreamUnavailable(format!("Unparsable response: {}", e))
        } else {
            GeocodingError::UpstreamUnavailable(format!("Request failed: {}", e))
        }
    }
}

// == Result Type Alias ==
/// Convenience Result type for the geocoding service.
pub type Result<T> = std::result::Result<T, GeocodingError>;

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    #[test]
    fn test_error_status_codes() {
        let test_cases = vec![
            (GeocodingError::InvalidInput("bad".into()), StatusCode::BAD_REQUEST),
            (GeocodingError::NoResultFound("none".into()), StatusCode::NOT_FOUND),
            (
                GeocodingError::UpstreamUnavailable("down".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (
                GeocodingError::Unexpected("oops".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (error, expected_status) in test_cases {
            assert_eq!(error.into_response().status(), expected_status);
        }
    }

    #[test]
    fn test_error_response_body() {
        let response = GeocodingError::NoResultFound("Atlantis".into()).into_response();

        let content_type = response
            .headers()
            .get("content-type")
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();
        assert!(content_type.contains("application/json"));

        let bytes = tokio_test::block_on(to_bytes(response.into_body(), usize::MAX)).unwrap();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();

        assert_eq!(json["error"], "No result found: Atlantis");
        assert!(json["timestamp"].is_string());
        assert!(json.get("details").is_none());
    }

    #[tokio::test]
    async fn test_error_details_carry_request_path() {
        use axum::{body::Body, http, middleware, routing::get, Router};
        use tower::ServiceExt;

        let app = Router::new()
            .route(
                "/geocoding",
                get(|| async {
                    Err::<String, _>(GeocodingError::NoResultFound("Atlantis".into()))
                }),
            )
            .route("/ok", get(|| async { "fine" }))
            .layer(middleware::from_fn(attach_error_details));

        let response = app
            .clone()
            .oneshot(
                http::Request::builder()
                    .uri("/geocoding?address=Atlantis")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(json["error"], "No result found: Atlantis");
        assert_eq!(json["details"], "uri=/geocoding");

        let response = app
            .oneshot(http::Request::builder().uri("/ok").body(Body::empty()).unwrap())
            .await
            .unwrap();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&bytes[..], b"fine");
    }
}
