//! Snapshot of the latest reports for all configured stations

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::report::{ReportRecord, station_id_of};
use crate::value_objects::{ReportKind, StationId};

/// Reports of one kind, keyed by station
pub type StationReports = BTreeMap<StationId, ReportRecord>;

/// The result of one successful update cycle
///
/// A snapshot is never mutated after it has been published; every cycle
/// builds a new one. A station missing from a sub-map simply had no report
/// of that kind this cycle.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Latest observation per station
    pub metar: StationReports,
    /// Latest forecast per station
    pub taf: StationReports,
}

impl Snapshot {
    /// A snapshot with no reports, `{metar: {}, taf: {}}`
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a snapshot from the records returned for each kind
    ///
    /// Records without a station identifier are dropped. When a station
    /// appears twice within one kind, the later record wins.
    #[must_use]
    pub fn from_records(metars: Vec<ReportRecord>, tafs: Vec<ReportRecord>) -> Self {
        Self {
            metar: key_by_station(metars),
            taf: key_by_station(tafs),
        }
    }

    /// Reports of the given kind
    #[must_use]
    pub const fn reports(&self, kind: ReportKind) -> &StationReports {
        match kind {
            ReportKind::Metar => &self.metar,
            ReportKind::Taf => &self.taf,
        }
    }

    /// The report of the given kind for a station, if any
    #[must_use]
    pub fn get(&self, kind: ReportKind, station: &StationId) -> Option<&ReportRecord> {
        self.reports(kind).get(station)
    }

    /// Whether neither kind holds any report
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.metar.is_empty() && self.taf.is_empty()
    }

    /// Stations with a report of the given kind
    pub fn stations(&self, kind: ReportKind) -> impl Iterator<Item = &StationId> {
        self.reports(kind).keys()
    }
}

fn key_by_station(records: Vec<ReportRecord>) -> StationReports {
    let mut keyed = StationReports::new();
    for record in records {
        if let Some(station) = station_id_of(&record) {
            keyed.insert(station, record);
        }
    }
    keyed
}
