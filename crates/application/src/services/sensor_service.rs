//! Sensor view over the latest snapshot
//!
//! Exposes one sensor per configured station and report kind. A sensor's
//! value is the raw report text and its attributes are the whole record.
//! Nothing here performs I/O or fails: missing data reads as absence.

use domain::{ReportKind, ReportRecord, Snapshot, StationId, StationSet};
use serde::Serialize;
use serde_json::Value;

/// Static description of a sensor type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SensorDescription {
    /// Report kind the sensor reads
    pub kind: ReportKind,
    /// Stable key, used in unique ids
    pub key: &'static str,
    /// Human-readable product name
    pub name: &'static str,
    /// Icon hint for the presentation layer
    pub icon: &'static str,
}

impl SensorDescription {
    const fn for_kind(kind: ReportKind) -> Self {
        Self {
            kind,
            key: kind.endpoint(),
            name: kind.display_name(),
            icon: kind.icon(),
        }
    }
}

/// Sensor descriptions, METAR first
pub const SENSOR_DESCRIPTIONS: [SensorDescription; 2] = [
    SensorDescription::for_kind(ReportKind::Metar),
    SensorDescription::for_kind(ReportKind::Taf),
];

/// Display value for a station and kind
///
/// Returns the record's raw-text field. String values are returned as is,
/// other JSON values are rendered as JSON text, and null or missing data
/// yields `None`.
#[must_use]
pub fn native_value(
    snapshot: Option<&Snapshot>,
    station: &StationId,
    kind: ReportKind,
) -> Option<String> {
    let field = snapshot?.get(kind, station)?.get(kind.raw_text_field())?;
    match field {
        Value::Null => None,
        Value::String(text) => Some(text.clone()),
        other => Some(other.to_string()),
    }
}

/// Attribute bag for a station and kind: the whole record, or an empty map
#[must_use]
pub fn attributes(snapshot: Option<&Snapshot>, station: &StationId, kind: ReportKind) -> ReportRecord {
    snapshot
        .and_then(|s| s.get(kind, station))
        .cloned()
        .unwrap_or_default()
}

/// One registered sensor
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sensor {
    /// Station the sensor reports on
    pub station: StationId,
    /// Sensor type
    pub description: SensorDescription,
    /// Identifier stable across restarts
    pub unique_id: String,
    /// Display name, e.g. `KLAX METAR`
    pub name: String,
}

impl Sensor {
    /// Create a sensor for a station within an integration instance
    pub fn new(instance_id: &str, station: StationId, description: SensorDescription) -> Self {
        let unique_id = format!("{instance_id}_{station}_{}", description.key);
        let name = format!("{station} {}", description.name);
        Self {
            station,
            description,
            unique_id,
            name,
        }
    }

    /// Current display value
    pub fn native_value(&self, snapshot: Option<&Snapshot>) -> Option<String> {
        native_value(snapshot, &self.station, self.description.kind)
    }

    /// Current attribute bag
    pub fn extra_state_attributes(&self, snapshot: Option<&Snapshot>) -> ReportRecord {
        attributes(snapshot, &self.station, self.description.kind)
    }

    /// Full rendered state
    pub fn state(&self, snapshot: Option<&Snapshot>) -> SensorState {
        SensorState {
            unique_id: self.unique_id.clone(),
            name: self.name.clone(),
            icon: self.description.icon,
            value: self.native_value(snapshot),
            attributes: self.extra_state_attributes(snapshot),
        }
    }
}

/// Rendered sensor state
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SensorState {
    /// Sensor unique id
    pub unique_id: String,
    /// Sensor display name
    pub name: String,
    /// Icon hint
    pub icon: &'static str,
    /// Raw report text, if available
    pub value: Option<String>,
    /// Full report record, empty when unavailable
    pub attributes: ReportRecord,
}

/// The sensors registered for one integration instance
#[derive(Debug, Clone)]
pub struct SensorService {
    sensors: Vec<Sensor>,
}

impl SensorService {
    /// Register one sensor per station and report kind
    ///
    /// Sensors are ordered by station, METAR before TAF.
    pub fn new(instance_id: &str, stations: &StationSet) -> Self {
        let sensors = stations
            .iter()
            .flat_map(|station| {
                SENSOR_DESCRIPTIONS
                    .into_iter()
                    .map(move |description| Sensor::new(instance_id, station.clone(), description))
            })
            .collect();
        Self { sensors }
    }

    /// Registered sensors
    pub fn sensors(&self) -> &[Sensor] {
        &self.sensors
    }

    /// Render every sensor against a snapshot
    pub fn states(&self, snapshot: Option<&Snapshot>) -> Vec<SensorState> {
        self.sensors.iter().map(|s| s.state(snapshot)).collect()
    }
}
