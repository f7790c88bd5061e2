//! Application layer - Use cases and orchestration
//!
//! Contains the update cycle that turns fetched reports into a snapshot,
//! the sensor view over a snapshot, and the port the infrastructure layer
//! implements to reach the aviation weather service.

pub mod error;
pub mod ports;
pub mod services;

pub use error::ApplicationError;
pub use ports::*;
pub use services::*;
