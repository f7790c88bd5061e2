//! Application-level errors

use domain::ReportKind;
use thiserror::Error;

/// Errors that can occur in the application layer
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// External service could not be reached or the request failed in transit
    #[error("External service error: {0}")]
    ExternalService(String),

    /// External service did not answer in time
    #[error("Timed out: {0}")]
    Timeout(String),

    /// External service answered with a non-success status
    #[error("Upstream returned HTTP {status}: {body}")]
    UpstreamStatus {
        /// HTTP status code
        status: u16,
        /// Truncated response body
        body: String,
    },

    /// Response could not be interpreted
    #[error("Parse error: {0}")]
    Parse(String),

    /// One fetch of an update cycle failed
    #[error("{kind} fetch failed: {source}")]
    FetchFailed {
        /// Report kind whose fetch failed
        kind: ReportKind,
        /// Underlying failure
        #[source]
        source: Box<ApplicationError>,
    },

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApplicationError {
    /// Wrap a failure of the fetch for `kind`
    #[must_use]
    pub fn fetch_failed(kind: ReportKind, source: Self) -> Self {
        Self::FetchFailed {
            kind,
            source: Box::new(source),
        }
    }

    /// Check if this error is retryable on the next tick
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::ExternalService(_) | Self::Timeout(_) => true,
            Self::UpstreamStatus { status, .. } => *status == 429 || *status >= 500,
            Self::FetchFailed { source, .. } => source.is_retryable(),
            _ => false,
        }
    }
}
