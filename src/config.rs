//! Configuration Module
//!
//! Handles loading and managing service configuration from environment variables.

use std::collections::BTreeMap;
use std::env;

use crate::error::{Result, SalaryError};

pub const BASE_URL_VAR: &str = "SALARY_API_BASE_URL";
pub const HEADERS_VAR: &str = "SALARY_API_HEADERS";

/// Service configuration parameters.
///
/// The upstream settings are kept raw here and validated when the provider
/// needs them, so the server can start without them.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port
    pub server_port: u16,
    /// Expiry reaper interval in seconds, 0 disables it
    pub cleanup_interval: u64,
    /// Provider name shown in the `source` field
    pub provider_name: String,
    /// Country region id sent with salary queries
    pub location_id: u64,
    /// Upstream base URL (`SALARY_API_BASE_URL`)
    pub upstream_base_url: Option<String>,
    /// Upstream headers as a JSON object (`SALARY_API_HEADERS`)
    pub upstream_headers: Option<String>,
}

/// Validated upstream connection settings.
#[derive(Debug, Clone, PartialEq)]
pub struct UpstreamConfig {
    pub base_url: String,
    pub headers: BTreeMap<String, String>,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `CLEANUP_INTERVAL` - Reaper frequency in seconds (default: 0, disabled)
    /// - `SALARY_PROVIDER_NAME` - Source label (default: "Glassdoor")
    /// - `SALARY_LOCATION_ID` - Country region id (default: 115)
    /// - `SALARY_API_BASE_URL` - Upstream base URL (required for lookups)
    /// - `SALARY_API_HEADERS` - Upstream headers, JSON object (required for lookups)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            server_port: env::var("SERVER_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.server_port),
            cleanup_interval: env::var("CLEANUP_INTERVAL")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.cleanup_interval),
            provider_name: env::var("SALARY_PROVIDER_NAME")
                .ok()
                .filter(|v| !v.trim().is_empty())
                .unwrap_or(defaults.provider_name),
            location_id: env::var("SALARY_LOCATION_ID")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.location_id),
            upstream_base_url: env::var(BASE_URL_VAR).ok(),
            upstream_headers: env::var(HEADERS_VAR).ok(),
        }
    }

    /// Validates and returns the upstream settings.
    pub fn upstream(&self) -> Result<UpstreamConfig> {
        let base_url = self
            .upstream_base_url
            .as_deref()
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .ok_or_else(|| SalaryError::Configuration(format!("{} is not set", BASE_URL_VAR)))?;

        let raw_headers = self
            .upstream_headers
            .as_deref()
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| SalaryError::Configuration(format!("{} is not set", HEADERS_VAR)))?;

        let headers: BTreeMap<String, String> = serde_json::from_str(raw_headers).map_err(|e| {
            SalaryError::Configuration(format!("{} is not a JSON object of strings: {}", HEADERS_VAR, e))
        })?;

        Ok(UpstreamConfig {
            base_url: base_url.trim_end_matches('/').to_string(),
            headers,
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_port: 3000,
            cleanup_interval: 0,
            provider_name: "Glassdoor".to_string(),
            location_id: 115,
            upstream_base_url: None,
            upstream_headers: None,
        }
    }
}
