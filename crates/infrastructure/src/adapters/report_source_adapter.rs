//! Report source adapter - Implements ReportSourcePort using integration_aviationweather

use application::{error::ApplicationError, ports::ReportSourcePort};
use async_trait::async_trait;
use domain::{ReportKind, ReportRecord, StationSet};
use integration_aviationweather::{
    AviationWeatherClient, AviationWeatherConfig, AviationWeatherError, AviationWeatherHttpClient,
};
use tracing::{debug, instrument};

/// Adapter fetching reports from the aviationweather.gov data API
pub struct ReportSourceAdapter {
    client: AviationWeatherHttpClient,
}

impl std::fmt::Debug for ReportSourceAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReportSourceAdapter")
            .field("base_url", &self.client.config().base_url)
            .finish()
    }
}

impl ReportSourceAdapter {
    /// Create a new adapter with default configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to initialize.
    pub fn new() -> Result<Self, ApplicationError> {
        Self::with_config(AviationWeatherConfig::default())
    }

    /// Create with custom configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to initialize.
    pub fn with_config(config: AviationWeatherConfig) -> Result<Self, ApplicationError> {
        let client = AviationWeatherHttpClient::new(config)
            .map_err(|e| ApplicationError::Internal(e.to_string()))?;
        Ok(Self { client })
    }

    /// Map integration error to application error
    fn map_error(err: AviationWeatherError) -> ApplicationError {
        match err {
            AviationWeatherError::ConnectionFailed(e) | AviationWeatherError::RequestFailed(e) => {
                ApplicationError::ExternalService(e)
            },
            AviationWeatherError::Timeout(e) => ApplicationError::Timeout(e),
            AviationWeatherError::HttpStatus { status, body } => {
                ApplicationError::UpstreamStatus { status, body }
            },
            AviationWeatherError::ParseError(e) => ApplicationError::Parse(e),
        }
    }
}

#[async_trait]
impl ReportSourcePort for ReportSourceAdapter {
    #[instrument(skip(self, stations), fields(kind = %kind))]
    async fn fetch_reports(
        &self,
        kind: ReportKind,
        stations: &StationSet,
    ) -> Result<Vec<ReportRecord>, ApplicationError> {
        let records = self
            .client
            .fetch_reports(kind, stations)
            .await
            .map_err(Self::map_error)?;

        debug!(records = records.len(), "Fetched reports");
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn adapter_creation() {
        let adapter = ReportSourceAdapter::new();
        assert!(adapter.is_ok());
    }

    #[test]
    fn adapter_debug_shows_base_url() {
        let adapter = ReportSourceAdapter::with_config(AviationWeatherConfig {
            base_url: "http://localhost:9".to_string(),
            timeout_secs: 1,
        })
        .unwrap();
        let debug = format!("{adapter:?}");
        assert!(debug.contains("ReportSourceAdapter"));
        assert!(debug.contains("http://localhost:9"));
    }

    #[test]
    fn map_transport_errors() {
        let err = ReportSourceAdapter::map_error(AviationWeatherError::ConnectionFailed(
            "refused".into(),
        ));
        assert!(matches!(err, ApplicationError::ExternalService(_)));

        let err =
            ReportSourceAdapter::map_error(AviationWeatherError::RequestFailed("reset".into()));
        assert!(matches!(err, ApplicationError::ExternalService(_)));
    }

    #[test]
    fn map_timeout_error() {
        let err = ReportSourceAdapter::map_error(AviationWeatherError::Timeout("20s".into()));
        assert!(matches!(err, ApplicationError::Timeout(_)));
        assert!(err.is_retryable());
    }

    #[test]
    fn map_status_error_keeps_status_and_body() {
        let err = ReportSourceAdapter::map_error(AviationWeatherError::HttpStatus {
            status: 503,
            body: "down".into(),
        });
        match err {
            ApplicationError::UpstreamStatus { status, body } => {
                assert_eq!(status, 503);
                assert_eq!(body, "down");
            },
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn map_parse_error() {
        let err = ReportSourceAdapter::map_error(AviationWeatherError::ParseError("eof".into()));
        assert!(matches!(err, ApplicationError::Parse(_)));
        assert!(!err.is_retryable());
    }
}
