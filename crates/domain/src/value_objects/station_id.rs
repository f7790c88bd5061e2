//! Station identifier value object
//!
//! Airport codes as used by the aviation weather service.
//!
//! # Examples
//!
//! ```
//! use domain::StationId;
//!
//! // Identifiers are trimmed and uppercased
//! let station = StationId::new(" klax ").unwrap();
//! assert_eq!(station.as_str(), "KLAX");
//!
//! // Blank or punctuated input is rejected
//! assert!(StationId::new("   ").is_err());
//! assert!(StationId::new("K-LAX").is_err());
//!
//! // Identifiers found in reports are only normalized
//! let reported = StationId::from_report("k-lax").unwrap();
//! assert_eq!(reported.as_str(), "K-LAX");
//! ```

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, de};
use validator::{Validate, ValidationError};

use crate::errors::DomainError;

/// A normalized airport station identifier
///
/// Configured identifiers go through [`StationId::new`]. Identifiers read
/// back from reports or serialized snapshots go through
/// [`StationId::from_report`], so whatever the service returns is kept.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Validate)]
#[serde(into = "String")]
pub struct StationId {
    #[validate(
        length(min = 1, max = 8),
        custom(function = "validate_alphanumeric")
    )]
    value: String,
}

fn validate_alphanumeric(value: &str) -> Result<(), ValidationError> {
    if value.chars().all(|c| c.is_ascii_alphanumeric()) {
        Ok(())
    } else {
        Err(ValidationError::new("alphanumeric"))
    }
}

impl StationId {
    /// Create a station identifier, trimming and uppercasing the input
    ///
    /// # Errors
    ///
    /// Returns an error if the trimmed identifier is empty, longer than
    /// eight characters or contains non-alphanumeric characters.
    pub fn new(id: impl AsRef<str>) -> Result<Self, DomainError> {
        let raw = id.as_ref();
        let candidate = Self {
            value: raw.trim().to_uppercase(),
        };
        candidate
            .validate()
            .map_err(|_| DomainError::InvalidStationId(raw.to_string()))?;

        Ok(candidate)
    }

    /// Normalize an identifier found in a report record
    ///
    /// Only trims and uppercases; returns `None` for blank input.
    #[must_use]
    pub fn from_report(id: &str) -> Option<Self> {
        let value = id.trim().to_uppercase();
        if value.is_empty() {
            None
        } else {
            Some(Self { value })
        }
    }

    /// Get the identifier as a string slice
    pub fn as_str(&self) -> &str {
        &self.value
    }
}

impl fmt::Display for StationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

impl AsRef<str> for StationId {
    fn as_ref(&self) -> &str {
        &self.value
    }
}

impl<'de> Deserialize<'de> for StationId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        match Self::from_report(&raw) {
            Some(id) => Ok(id),
            None => Err(de::Error::custom(DomainError::InvalidStationId(raw))),
        }
    }
}

impl From<StationId> for String {
    fn from(id: StationId) -> Self {
        id.value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_identifier_is_accepted() {
        let id = StationId::new("KLAX").unwrap();
        assert_eq!(id.as_str(), "KLAX");
    }

    #[test]
    fn identifier_is_uppercased_and_trimmed() {
        let id = StationId::new("  eddf\t").unwrap();
        assert_eq!(id.as_str(), "EDDF");
    }

    #[test]
    fn empty_identifier_is_rejected() {
        assert!(StationId::new("").is_err());
        assert!(StationId::new("   ").is_err());
    }

    #[test]
    fn punctuation_is_rejected() {
        assert!(StationId::new("K-LAX").is_err());
        assert!(StationId::new("KL AX").is_err());
        assert!(StationId::new("KLAX,KSFO").is_err());
    }

    #[test]
    fn overlong_identifier_is_rejected() {
        assert!(StationId::new("ABCDEFGHI").is_err());
        assert!(StationId::new("ABCDEFGH").is_ok());
    }

    #[test]
    fn numeric_identifiers_are_allowed() {
        let id = StationId::new("3j7").unwrap();
        assert_eq!(id.as_str(), "3J7");
    }

    #[test]
    fn display_format() {
        let id = StationId::new("ksfo").unwrap();
        assert_eq!(id.to_string(), "KSFO");
    }

    #[test]
    fn serialization_roundtrip_normalizes() {
        let parsed: StationId = serde_json::from_str("\" egll \"").unwrap();
        assert_eq!(parsed.as_str(), "EGLL");
        assert_eq!(serde_json::to_string(&parsed).unwrap(), "\"EGLL\"");
    }

    #[test]
    fn report_identifiers_are_only_normalized() {
        assert_eq!(StationId::from_report(" k-lax ").unwrap().as_str(), "K-LAX");
        assert_eq!(StationId::from_report("abcdefghij").unwrap().as_str(), "ABCDEFGHIJ");
        assert_eq!(StationId::from_report("k lax").unwrap().as_str(), "K LAX");
        assert!(StationId::from_report(" \t").is_none());
    }

    #[test]
    fn report_identifier_matches_configured_one() {
        assert_eq!(StationId::from_report("klax"), Some(StationId::new("KLAX").unwrap()));
    }

    #[test]
    fn deserializing_keeps_report_identifiers() {
        let parsed: StationId = serde_json::from_str("\"k-lax\"").unwrap();
        assert_eq!(parsed.as_str(), "K-LAX");
    }

    #[test]
    fn deserializing_blank_identifier_fails() {
        let parsed: Result<StationId, _> = serde_json::from_str("\"\"");
        assert!(parsed.is_err());
    }

    #[test]
    fn error_keeps_original_input() {
        let err = StationId::new("k?ax").unwrap_err();
        assert_eq!(err.to_string(), "Invalid station identifier: k?ax");
    }
}
