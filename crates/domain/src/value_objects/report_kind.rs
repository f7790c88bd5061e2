//! Report kind value object

use std::fmt;

use serde::{Deserialize, Serialize};

/// The two report products polled from the aviation weather service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportKind {
    /// Routine surface observation
    Metar,
    /// Terminal aerodrome forecast
    Taf,
}

impl ReportKind {
    /// All kinds, in the order sensors are registered
    pub const ALL: [Self; 2] = [Self::Metar, Self::Taf];

    /// Endpoint name under the service base URL, also used as a wrapper key
    #[must_use]
    pub const fn endpoint(&self) -> &'static str {
        match self {
            Self::Metar => "metar",
            Self::Taf => "taf",
        }
    }

    /// Human-readable product name
    #[must_use]
    pub const fn display_name(&self) -> &'static str {
        match self {
            Self::Metar => "METAR",
            Self::Taf => "TAF",
        }
    }

    /// Field of a report record holding the undecoded report text
    #[must_use]
    pub const fn raw_text_field(&self) -> &'static str {
        match self {
            Self::Metar => "rawOb",
            Self::Taf => "rawTAF",
        }
    }

    /// Material Design icon used by the presentation layer
    #[must_use]
    pub const fn icon(&self) -> &'static str {
        match self {
            Self::Metar => "mdi:weather-windy",
            Self::Taf => "mdi:weather-cloudy-clock",
        }
    }
}

impl fmt::Display for ReportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.endpoint())
    }
}
