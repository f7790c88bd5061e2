//! Domain-level errors

use thiserror::Error;

/// Errors that can occur in the domain layer
#[derive(Debug, Error)]
pub enum DomainError {
    /// Station identifier is empty, too long or not alphanumeric
    #[error("Invalid station identifier: {0}")]
    InvalidStationId(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_station_error_message() {
        let err = DomainError::InvalidStationId("K-LAX".to_string());
        assert_eq!(err.to_string(), "Invalid station identifier: K-LAX");
    }
}
