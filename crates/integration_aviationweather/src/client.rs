//! Aviation weather client
//!
//! HTTP client for the aviationweather.gov data API.

use std::time::Duration;

use async_trait::async_trait;
use domain::{ReportKind, ReportRecord, StationSet};
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, instrument, warn};

use crate::models::{parse_records, truncate_body};

/// Aviation weather client errors
#[derive(Debug, Error)]
pub enum AviationWeatherError {
    /// Connection to the service failed
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Request to the service failed
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// The request did not complete within the configured timeout
    #[error("Request timed out: {0}")]
    Timeout(String),

    /// The service answered with a non-success status
    #[error("HTTP {status}: {body}")]
    HttpStatus {
        /// Response status code
        status: u16,
        /// Response body, truncated
        body: String,
    },

    /// Failed to parse response from the service
    #[error("Parse error: {0}")]
    ParseError(String),
}

impl AviationWeatherError {
    /// Classify a transport-level reqwest error
    fn from_transport(err: &reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout(err.to_string())
        } else if err.is_connect() {
            Self::ConnectionFailed(err.to_string())
        } else {
            Self::RequestFailed(err.to_string())
        }
    }
}

/// Aviation weather client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AviationWeatherConfig {
    /// Data API base URL (default: <https://aviationweather.gov/api/data>)
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout in seconds (default: 20)
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    "https://aviationweather.gov/api/data".to_string()
}

const fn default_timeout() -> u64 {
    20
}

impl Default for AviationWeatherConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout(),
        }
    }
}

/// Client trait for fetching report records
#[async_trait]
pub trait AviationWeatherClient: Send + Sync {
    /// Fetch the current records of one kind for the given stations
    ///
    /// A `204 No Content` answer is an empty list, not an error.
    async fn fetch_reports(
        &self,
        kind: ReportKind,
        stations: &StationSet,
    ) -> Result<Vec<ReportRecord>, AviationWeatherError>;
}

/// reqwest-backed client implementation
#[derive(Debug)]
pub struct AviationWeatherHttpClient {
    client: Client,
    config: AviationWeatherConfig,
}

impl AviationWeatherHttpClient {
    /// Create a new client with the given configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn new(config: AviationWeatherConfig) -> Result<Self, AviationWeatherError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(concat!("aeroweather/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| AviationWeatherError::ConnectionFailed(e.to_string()))?;

        Ok(Self { client, config })
    }

    /// Create a new client with default configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn with_defaults() -> Result<Self, AviationWeatherError> {
        Self::new(AviationWeatherConfig::default())
    }

    /// The configuration this client was built with
    pub const fn config(&self) -> &AviationWeatherConfig {
        &self.config
    }

    /// Build the endpoint URL for a report kind
    fn endpoint_url(&self, kind: ReportKind) -> String {
        format!(
            "{}/{}",
            self.config.base_url.trim_end_matches('/'),
            kind.endpoint()
        )
    }
}

#[async_trait]
impl AviationWeatherClient for AviationWeatherHttpClient {
    #[instrument(skip(self, stations), fields(kind = %kind, stations = stations.len()))]
    async fn fetch_reports(
        &self,
        kind: ReportKind,
        stations: &StationSet,
    ) -> Result<Vec<ReportRecord>, AviationWeatherError> {
        let url = self.endpoint_url(kind);
        let ids = stations.joined();
        debug!(url = %url, ids = %ids, "Fetching reports");

        let response = self
            .client
            .get(&url)
            .query(&[("ids", ids.as_str()), ("format", "json")])
            .send()
            .await
            .map_err(|e| AviationWeatherError::from_transport(&e))?;

        let status = response.status();
        if status == StatusCode::NO_CONTENT {
            debug!("No reports available");
            return Ok(Vec::new());
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(status = status.as_u16(), "Report request rejected");
            return Err(AviationWeatherError::HttpStatus {
                status: status.as_u16(),
                body: truncate_body(&body),
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| AviationWeatherError::from_transport(&e))?;

        let records = parse_records(&body, kind)?;
        debug!(count = records.len(), "Received reports");
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AviationWeatherConfig::default();
        assert_eq!(config.base_url, "https://aviationweather.gov/api/data");
        assert_eq!(config.timeout_secs, 20);
    }

    #[test]
    fn test_endpoint_url() {
        let client = AviationWeatherHttpClient::with_defaults().expect("client creation should succeed");
        assert_eq!(
            client.endpoint_url(ReportKind::Metar),
            "https://aviationweather.gov/api/data/metar"
        );
        assert_eq!(
            client.endpoint_url(ReportKind::Taf),
            "https://aviationweather.gov/api/data/taf"
        );
    }

    #[test]
    fn test_endpoint_url_strips_trailing_slash() {
        let config = AviationWeatherConfig {
            base_url: "http://localhost:8080/api/".to_string(),
            ..Default::default()
        };
        let client = AviationWeatherHttpClient::new(config).expect("client creation should succeed");
        assert_eq!(client.endpoint_url(ReportKind::Taf), "http://localhost:8080/api/taf");
    }

    #[test]
    fn test_error_display() {
        let err = AviationWeatherError::HttpStatus {
            status: 503,
            body: "Service Unavailable".to_string(),
        };
        assert_eq!(err.to_string(), "HTTP 503: Service Unavailable");

        let err = AviationWeatherError::Timeout("deadline".to_string());
        assert!(err.to_string().contains("timed out"));
    }

    #[test]
    fn test_config_deserialization_applies_defaults() {
        let config: AviationWeatherConfig =
            serde_json::from_str(r#"{"base_url": "https://mirror.example"}"#).expect("should deserialize");
        assert_eq!(config.base_url, "https://mirror.example");
        assert_eq!(config.timeout_secs, 20);
    }
}
