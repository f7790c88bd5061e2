//! Update coordination for the fixed-interval poller
//!
//! [`UpdateCoordinator`] owns the last-known-good [`Snapshot`]. Each refresh
//! runs one update cycle; success swaps in the new snapshot and bumps a
//! version counter, failure is logged and recorded while readers keep seeing
//! the previous snapshot. [`spawn_polling_task`] drives refreshes on a
//! `tokio::time::interval` until shut down.

use std::{
    sync::{
        Arc,
        atomic::{AtomicU64, Ordering},
    },
    time::{Duration, Instant},
};

use application::{ApplicationError, UpdateService};
use arc_swap::ArcSwapOption;
use chrono::{DateTime, Utc};
use domain::{Snapshot, StationSet};
use parking_lot::RwLock;
use tokio::{
    sync::{Mutex as AsyncMutex, watch},
    task::JoinHandle,
    time::MissedTickBehavior,
};
use tracing::{debug, info, instrument, warn};

/// Statistics of the coordinator's refreshes
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateStats {
    /// Number of successful refreshes
    pub success_count: u64,
    /// Number of failed refreshes
    pub failure_count: u64,
    /// Last successful refresh
    pub last_success: Option<DateTime<Utc>>,
    /// Last failed refresh
    pub last_failure: Option<DateTime<Utc>>,
    /// Message of the last failure
    pub last_error: Option<String>,
    /// Duration of the last refresh in milliseconds
    pub last_duration_ms: u64,
}

/// Internal counters behind [`UpdateStats`]
#[derive(Debug, Default)]
struct StatsRecorder {
    success_count: AtomicU64,
    failure_count: AtomicU64,
    last_success: RwLock<Option<DateTime<Utc>>>,
    last_failure: RwLock<Option<DateTime<Utc>>>,
    last_error: RwLock<Option<String>>,
    last_duration_ms: AtomicU64,
}

impl StatsRecorder {
    fn record_success(&self, duration_ms: u64) {
        self.success_count.fetch_add(1, Ordering::Relaxed);
        self.last_duration_ms.store(duration_ms, Ordering::Relaxed);
        *self.last_success.write() = Some(Utc::now());
    }

    fn record_failure(&self, error: String, duration_ms: u64) {
        self.failure_count.fetch_add(1, Ordering::Relaxed);
        self.last_duration_ms.store(duration_ms, Ordering::Relaxed);
        *self.last_failure.write() = Some(Utc::now());
        *self.last_error.write() = Some(error);
    }

    fn to_stats(&self) -> UpdateStats {
        UpdateStats {
            success_count: self.success_count.load(Ordering::Relaxed),
            failure_count: self.failure_count.load(Ordering::Relaxed),
            last_success: *self.last_success.read(),
            last_failure: *self.last_failure.read(),
            last_error: self.last_error.read().clone(),
            last_duration_ms: self.last_duration_ms.load(Ordering::Relaxed),
        }
    }
}

/// Holder of the last-known-good snapshot
pub struct UpdateCoordinator {
    service: UpdateService,
    stations: StationSet,
    snapshot: ArcSwapOption<Snapshot>,
    refresh_lock: AsyncMutex<()>,
    version: watch::Sender<u64>,
    stats: StatsRecorder,
}

impl std::fmt::Debug for UpdateCoordinator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UpdateCoordinator")
            .field("stations", &self.stations)
            .field("version", &*self.version.borrow())
            .field("has_snapshot", &self.snapshot.load().is_some())
            .finish_non_exhaustive()
    }
}

impl UpdateCoordinator {
    /// Create a coordinator with no snapshot yet
    pub fn new(service: UpdateService, stations: StationSet) -> Self {
        let (version, _) = watch::channel(0);
        Self {
            service,
            stations,
            snapshot: ArcSwapOption::empty(),
            refresh_lock: AsyncMutex::new(()),
            version,
            stats: StatsRecorder::default(),
        }
    }

    /// Configured stations
    pub const fn stations(&self) -> &StationSet {
        &self.stations
    }

    /// The last-known-good snapshot, if any refresh has succeeded
    pub fn snapshot(&self) -> Option<Arc<Snapshot>> {
        self.snapshot.load_full()
    }

    /// Number of successful refreshes so far
    pub fn version(&self) -> u64 {
        *self.version.borrow()
    }

    /// Subscribe to snapshot changes
    ///
    /// The received value is bumped after every successful refresh.
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.version.subscribe()
    }

    /// Current refresh statistics
    pub fn stats(&self) -> UpdateStats {
        self.stats.to_stats()
    }

    /// Run one update cycle
    ///
    /// Concurrent calls are serialized. On failure the stored snapshot is
    /// left untouched and the error is returned.
    #[instrument(skip(self), fields(stations = self.stations.len()))]
    pub async fn refresh(&self) -> Result<Arc<Snapshot>, ApplicationError> {
        let _guard = self.refresh_lock.lock().await;
        let start = Instant::now();

        let result = self.service.run_cycle(&self.stations).await;
        let duration_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);

        match result {
            Ok(snapshot) => {
                let snapshot = Arc::new(snapshot);
                self.snapshot.store(Some(Arc::clone(&snapshot)));
                self.stats.record_success(duration_ms);
                self.version.send_modify(|v| *v += 1);
                info!(
                    metar = snapshot.metar.len(),
                    taf = snapshot.taf.len(),
                    duration_ms,
                    "Snapshot updated"
                );
                Ok(snapshot)
            },
            Err(e) => {
                self.stats.record_failure(e.to_string(), duration_ms);
                warn!(
                    error = %e,
                    retryable = e.is_retryable(),
                    "Update failed, keeping previous snapshot"
                );
                Err(e)
            },
        }
    }
}

/// Spawn a background task refreshing the coordinator on a fixed interval
///
/// The first refresh runs immediately. Missed ticks are delayed rather than
/// bursted. Setting `shutdown` to `true` (or dropping its sender) stops the
/// task, dropping any in-flight fetches; the stored snapshot is not touched.
pub fn spawn_polling_task(
    coordinator: Arc<UpdateCoordinator>,
    interval: Duration,
    mut shutdown: watch::Receiver<bool>,
) -> JoinHandle<()> {
    info!(
        interval_secs = interval.as_secs(),
        stations = %coordinator.stations().joined(),
        "Starting polling task"
    );

    tokio::spawn(async move {
        // interval() panics on a zero period
        let mut ticker = tokio::time::interval(interval.max(Duration::from_millis(1)));
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = ticker.tick() => {},
                _ = shutdown.wait_for(|stop| *stop) => break,
            }

            tokio::select! {
                result = coordinator.refresh() => {
                    if result.is_err() {
                        debug!("Retrying on next tick");
                    }
                },
                _ = shutdown.wait_for(|stop| *stop) => {
                    info!("Shutdown requested during refresh, dropping in-flight fetches");
                    break;
                },
            }
        }

        info!("Polling task stopped");
    })
}
