//! Report source port
//!
//! Defines the interface for retrieving METAR and TAF records.

use async_trait::async_trait;
use domain::{ReportKind, ReportRecord, StationSet};
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Port for fetching report records from the aviation weather service
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ReportSourcePort: Send + Sync {
    /// Fetch the current records of one kind for the given stations
    ///
    /// Implementations make a single attempt. Stations without a current
    /// report are simply absent from the result.
    async fn fetch_reports(
        &self,
        kind: ReportKind,
        stations: &StationSet,
    ) -> Result<Vec<ReportRecord>, ApplicationError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn _assert_object_safe(_: &dyn ReportSourcePort) {}

    #[test]
    fn trait_is_send_sync() {
        fn assert_send_sync<T: Send + Sync + ?Sized>() {}
        assert_send_sync::<dyn ReportSourcePort>();
    }
}
