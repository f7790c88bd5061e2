//! Report records as returned by the aviation weather service
//!
//! Records are kept opaque: the only field the domain interprets is the
//! station identifier, which the service spells differently depending on
//! product and API revision.

use serde_json::{Map, Value};

use crate::value_objects::StationId;

/// One METAR or TAF record, keyed by the service's own field names
pub type ReportRecord = Map<String, Value>;

/// Identifier fields, most specific first
pub const STATION_ID_FIELDS: [&str; 5] = ["icaoId", "stationId", "station", "id", "icao"];

/// Find the station a record belongs to
///
/// Candidate fields are tried in [`STATION_ID_FIELDS`] order and the first
/// non-blank one decides. Numbers are accepted as text; nulls, blanks and
/// nested values are skipped. The identifier is trimmed and uppercased but
/// otherwise kept as the service spelled it.
#[must_use]
pub fn station_id_of(record: &ReportRecord) -> Option<StationId> {
    STATION_ID_FIELDS
        .iter()
        .filter_map(|field| record.get(*field))
        .find_map(|value| match value {
            Value::String(s) => StationId::from_report(s),
            Value::Number(n) => StationId::from_report(&n.to_string()),
            _ => None,
        })
}
