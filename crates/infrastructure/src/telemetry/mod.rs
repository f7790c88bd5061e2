//! Logging setup
//!
//! Installs a `tracing` subscriber with an env-filter and either
//! human-readable or JSON output. Logs go to stderr so that stdout stays free
//! for command output.

use serde::{Deserialize, Serialize};
use tracing::debug;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Configuration for logging
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TelemetryConfig {
    /// Log level filter (e.g., "info", "application=debug,reqwest=warn")
    ///
    /// `RUST_LOG` takes precedence when set.
    #[serde(default = "default_log_filter")]
    pub log_filter: String,

    /// Emit one JSON object per event instead of formatted lines
    #[serde(default)]
    pub json: bool,
}

fn default_log_filter() -> String {
    "info,reqwest=warn".to_string()
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_filter: default_log_filter(),
            json: false,
        }
    }
}

/// Error type for telemetry initialization
#[derive(Debug, thiserror::Error)]
pub enum TelemetryError {
    /// The configured filter directive is malformed
    #[error("Invalid log filter '{filter}': {reason}")]
    InvalidFilter {
        /// Offending filter string
        filter: String,
        /// Parser message
        reason: String,
    },

    /// Failed to install the tracing subscriber
    #[error("Failed to initialize tracing: {0}")]
    Init(String),
}

/// Build the env-filter, preferring `RUST_LOG` over the configured filter
fn build_filter(config: &TelemetryConfig) -> Result<EnvFilter, TelemetryError> {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return Ok(filter);
    }
    EnvFilter::try_new(&config.log_filter).map_err(|e| TelemetryError::InvalidFilter {
        filter: config.log_filter.clone(),
        reason: e.to_string(),
    })
}

/// Initialize logging with the given configuration
///
/// Can only succeed once per process; later calls return
/// [`TelemetryError::Init`].
pub fn init_telemetry(config: &TelemetryConfig) -> Result<(), TelemetryError> {
    let env_filter = build_filter(config)?;

    let result = if config.json {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_target(true)
                    .with_writer(std::io::stderr),
            )
            .try_init()
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(true)
                    .with_writer(std::io::stderr),
            )
            .try_init()
    };
    result.map_err(|e| TelemetryError::Init(e.to_string()))?;

    debug!(filter = %config.log_filter, json = config.json, "Telemetry initialized");
    Ok(())
}
