//! HTTP client for positionstack-compatible geocoding providers.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::error::{GeocodingError, Result};
use crate::geocoding::{Coordinates, GeocodingClient};

/// Default provider endpoint
pub const DEFAULT_BASE_URL: &str = "http://api.positionstack.com/v1";

/// Default per-request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Provider connection settings.
#[derive(Debug, Clone)]
pub struct PositionstackConfig {
    /// Base URL; `/forward` and `/reverse` are appended
    pub base_url: String,
    /// API access key sent as the `access_key` query parameter
    pub access_key: String,
    /// Upper bound on each outbound request
    pub timeout: Duration,
}

impl Default for PositionstackConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            access_key: String::new(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

/// Envelope of a provider answer. Only the first element of `data` is
/// ever decoded; a null or absent `data` means nothing matched.
#[derive(Debug, Deserialize)]
struct ProviderResponse {
    data: Option<Vec<serde_json::Value>>,
}

#[derive(Debug, Deserialize)]
struct ProviderResult {
    latitude: Option<f64>,
    longitude: Option<f64>,
    label: Option<String>,
}

/// reqwest-backed [`GeocodingClient`].
pub struct PositionstackClient {
    config: PositionstackConfig,
    http_client: reqwest::Client,
}

impl PositionstackClient {
    pub fn new(config: PositionstackConfig) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| {
                GeocodingError::Unexpected(format!("Failed to create HTTP client: {}", e))
            })?;

        Ok(Self {
            config,
            http_client,
        })
    }

    /// Issues one lookup and decodes the provider's first result, if any.
    async fn lookup(&self, endpoint: &str, query: &str) -> Result<Option<ProviderResult>> {
        let url = format!("{}/{}", self.config.base_url.trim_end_matches('/'), endpoint);
        debug!(%url, query, "Calling geocoding provider");

        let response = self
            .http_client
            .get(&url)
            .query(&[("access_key", self.config.access_key.as_str()), ("query", query)])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            warn!(%status, endpoint, "Geocoding provider returned an error status");
            return Err(GeocodingError::UpstreamUnavailable(format!(
                "Failed to fetch {} geocoding data. HTTP status: {}",
                endpoint, status
            )));
        }

        let body = response.text().await?;
        let parsed: ProviderResponse = serde_json::from_str(&body).map_err(|e| {
            warn!(error = %e, endpoint, "Unparsable geocoding provider response");
            GeocodingError::UpstreamUnavailable(format!("Unparsable response: {}", e))
        })?;

        let Some(first) = parsed.data.and_then(|data| data.into_iter().next()) else {
            debug!(endpoint, "Geocoding provider returned no data");
            return Ok(None);
        };

        let result = serde_json::from_value(first).map_err(|e| {
            warn!(error = %e, endpoint, "Malformed first result from geocoding provider");
            GeocodingError::UpstreamUnavailable(format!("Malformed result: {}", e))
        })?;

        Ok(Some(result))
    }
}

#[async_trait]
impl GeocodingClient for PositionstackClient {
    async fn forward(&self, address: &str) -> Result<Option<Coordinates>> {
        let Some(first) = self.lookup("forward", address).await? else {
            return Ok(None);
        };

        match (first.latitude, first.longitude) {
            (Some(latitude), Some(longitude)) => Ok(Some(Coordinates::new(latitude, longitude))),
            _ => Err(GeocodingError::UpstreamUnavailable(
                "First forward result has no coordinates".to_string(),
            )),
        }
    }

    async fn reverse(&self, coordinates: Coordinates) -> Result<Option<String>> {
        let query = format!("{},{}", coordinates.latitude, coordinates.longitude);
        let first = self.lookup("reverse", &query).await?;

        Ok(first
            .and_then(|first| first.label)
            .filter(|label| !label.trim().is_empty()))
    }
}
