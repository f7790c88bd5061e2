//! Update cycle - fetch both report kinds and build a snapshot

use std::{fmt, sync::Arc, time::Instant};

use domain::{ReportKind, ReportRecord, Snapshot, StationSet};
use tracing::{debug, instrument};

use crate::{error::ApplicationError, ports::ReportSourcePort};

/// Service running one poll-fetch-normalize cycle
///
/// Both kinds are fetched concurrently. A failure of either fetch aborts the
/// whole cycle and drops the other request; no partial snapshot is produced.
pub struct UpdateService {
    source: Arc<dyn ReportSourcePort>,
}

impl fmt::Debug for UpdateService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UpdateService").finish_non_exhaustive()
    }
}

impl UpdateService {
    /// Create a new update service
    pub fn new(source: Arc<dyn ReportSourcePort>) -> Self {
        Self { source }
    }

    /// Run one update cycle for the given stations
    ///
    /// An empty station set yields [`Snapshot::empty`] without contacting
    /// the source.
    #[instrument(skip(self, stations), fields(stations = stations.len()))]
    pub async fn run_cycle(&self, stations: &StationSet) -> Result<Snapshot, ApplicationError> {
        if stations.is_empty() {
            debug!("No stations configured, skipping fetch");
            return Ok(Snapshot::empty());
        }

        let start = Instant::now();
        let (metars, tafs) = tokio::try_join!(
            self.fetch(ReportKind::Metar, stations),
            self.fetch(ReportKind::Taf, stations),
        )?;

        let snapshot = Snapshot::from_records(metars, tafs);

        let metar_stations: Vec<_> = snapshot.stations(ReportKind::Metar).collect();
        let taf_stations: Vec<_> = snapshot.stations(ReportKind::Taf).collect();
        debug!(
            metar = ?metar_stations,
            taf = ?taf_stations,
            latency_ms = start.elapsed().as_millis(),
            "Update cycle complete"
        );

        Ok(snapshot)
    }

    async fn fetch(
        &self,
        kind: ReportKind,
        stations: &StationSet,
    ) -> Result<Vec<ReportRecord>, ApplicationError> {
        self.source
            .fetch_reports(kind, stations)
            .await
            .map_err(|e| ApplicationError::fetch_failed(kind, e))
    }
}
