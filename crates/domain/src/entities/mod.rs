//! Domain entities - Report records and the snapshots built from them

mod report;
mod snapshot;

pub use report::{ReportRecord, STATION_ID_FIELDS, station_id_of};
pub use snapshot::{Snapshot, StationReports};
