//! Configuration Module
//!
//! Handles loading and managing server configuration from environment variables.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use crate::cache::{DEFAULT_MAX_ENTRIES, DEFAULT_TTL_SECS};
use crate::geocoding::{PositionstackConfig, DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS};

/// Address that skips the cache unless overridden
pub const DEFAULT_BYPASS_ADDRESS: &str = "goa";

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Maximum number of entries per cache namespace
    pub max_entries: usize,
    /// Entry lifetime in seconds
    pub cache_ttl_secs: u64,
    /// HTTP server port
    pub server_port: u16,
    /// Stale sweep interval in seconds, 0 disables the sweeper
    pub sweep_interval_secs: u64,
    /// Geocoding provider base URL
    pub upstream_base_url: String,
    /// Geocoding provider access key
    pub upstream_access_key: String,
    /// Timeout for each upstream request in seconds
    pub upstream_timeout_secs: u64,
    /// Address that is always fetched fresh, None disables the rule
    pub bypass_address: Option<String>,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `MAX_ENTRIES` - Maximum entries per cache (default: 1000)
    /// - `CACHE_TTL_SECS` - Entry lifetime in seconds (default: 3600)
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `SWEEP_INTERVAL_SECS` - Stale sweep frequency in seconds, 0 disables (default: 60)
    /// - `UPSTREAM_BASE_URL` - Provider base URL (default: positionstack v1)
    /// - `UPSTREAM_ACCESS_KEY` - Provider access key (default: empty)
    /// - `UPSTREAM_TIMEOUT_SECS` - Upstream request timeout (default: 10)
    /// - `BYPASS_ADDRESS` - Address never cached, empty disables (default: "goa")
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            max_entries: parse_var("MAX_ENTRIES").unwrap_or(defaults.max_entries),
            cache_ttl_secs: parse_var("CACHE_TTL_SECS").unwrap_or(defaults.cache_ttl_secs),
            server_port: parse_var("SERVER_PORT").unwrap_or(defaults.server_port),
            sweep_interval_secs: parse_var("SWEEP_INTERVAL_SECS")
                .unwrap_or(defaults.sweep_interval_secs),
            upstream_base_url: env::var("UPSTREAM_BASE_URL")
                .ok()
                .filter(|v| !v.trim().is_empty())
                .unwrap_or(defaults.upstream_base_url),
            upstream_access_key: env::var("UPSTREAM_ACCESS_KEY")
                .unwrap_or(defaults.upstream_access_key),
            upstream_timeout_secs: parse_var("UPSTREAM_TIMEOUT_SECS")
                .unwrap_or(defaults.upstream_timeout_secs),
            bypass_address: match env::var("BYPASS_ADDRESS") {
                Ok(v) if v.trim().is_empty() => None,
                Ok(v) => Some(v),
                Err(_) => defaults.bypass_address,
            },
        }
    }

    /// Provider settings derived from this configuration.
    pub fn upstream(&self) -> PositionstackConfig {
        PositionstackConfig {
            base_url: self.upstream_base_url.clone(),
            access_key: self.upstream_access_key.clone(),
            timeout: Duration::from_secs(self.upstream_timeout_secs),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_entries: DEFAULT_MAX_ENTRIES,
            cache_ttl_secs: DEFAULT_TTL_SECS,
            server_port: 3000,
            sweep_interval_secs: 60,
            upstream_base_url: DEFAULT_BASE_URL.to_string(),
            upstream_access_key: String::new(),
            upstream_timeout_secs: DEFAULT_TIMEOUT_SECS,
            bypass_address: Some(DEFAULT_BYPASS_ADDRESS.to_string()),
        }
    }
}

fn parse_var<T: FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|v| v.trim().parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.max_entries, 1000);
        assert_eq!(config.cache_ttl_secs, 3600);
        assert_eq!(config.server_port, 3000);
        assert_eq!(config.sweep_interval_secs, 60);
        assert_eq!(config.upstream_timeout_secs, 10);
        assert_eq!(config.bypass_address.as_deref(), Some("goa"));
    }

    // Single test so parallel test threads don't race on the process environment
    #[test]
    fn test_config_from_env() {
        for name in [
            "MAX_ENTRIES",
            "CACHE_TTL_SECS",
            "SERVER_PORT",
            "SWEEP_INTERVAL_SECS",
            "UPSTREAM_BASE_URL",
            "UPSTREAM_ACCESS_KEY",
            "UPSTREAM_TIMEOUT_SECS",
            "BYPASS_ADDRESS",
        ] {
            env::remove_var(name);
        }

        let config = Config::from_env();
        assert_eq!(config.max_entries, 1000);
        assert_eq!(config.cache_ttl_secs, 3600);
        assert_eq!(config.upstream_base_url, DEFAULT_BASE_URL);
        assert_eq!(config.bypass_address.as_deref(), Some("goa"));

        env::set_var("MAX_ENTRIES", "25");
        env::set_var("CACHE_TTL_SECS", "not-a-number");
        env::set_var("BYPASS_ADDRESS", "  ");
        env::set_var("UPSTREAM_TIMEOUT_SECS", "3");

        let config = Config::from_env();
        assert_eq!(config.max_entries, 25);
        assert_eq!(config.cache_ttl_secs, 3600);
        assert_eq!(config.bypass_address, None);
        assert_eq!(config.upstream().timeout, Duration::from_secs(3));

        for name in ["MAX_ENTRIES", "CACHE_TTL_SECS", "BYPASS_ADDRESS", "UPSTREAM_TIMEOUT_SECS"] {
            env::remove_var(name);
        }
    }
}
