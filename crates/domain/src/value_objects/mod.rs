//! Value Objects - Immutable, identity-less domain primitives

mod report_kind;
mod station_id;
mod station_set;

pub use report_kind::ReportKind;
pub use station_id::StationId;
pub use station_set::StationSet;
