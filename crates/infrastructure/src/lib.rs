//! Infrastructure layer - Adapters and runtime plumbing
//!
//! Implements the application ports against the aviation weather service and
//! hosts the pieces a long-running poller needs: configuration loading,
//! logging setup and the update coordinator that keeps the last-known-good
//! snapshot.

pub mod adapters;
pub mod config;
pub mod scheduler;
pub mod telemetry;

pub use adapters::ReportSourceAdapter;
pub use config::{AppConfig, ConfigError};
pub use scheduler::{UpdateCoordinator, UpdateStats, spawn_polling_task};
pub use telemetry::{TelemetryConfig, TelemetryError, init_telemetry};
