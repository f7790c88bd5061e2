//! Domain layer for AeroWeather
//!
//! Contains the station identifiers, report kinds, report records and the
//! immutable snapshot produced by each update cycle.
//! This layer performs no I/O.

pub mod entities;
pub mod errors;
pub mod value_objects;

pub use entities::*;
pub use errors::DomainError;
pub use value_objects::*;
