use super::{CandidateSelector, ControlState};
use crate::feed::{FeedReader, PendingItemStore};
use crate::http_handler::FleetGateway;
use crate::mission::{MissionKey, MissionRepository, StatusStore, StoreError};
use crate::topology::TopologyMap;
use crate::util::DispatchConfig;
use crate::{info, warn};
use chrono::{TimeDelta, Utc};
use std::{collections::HashSet, future::Future, sync::Arc, time::Duration};
use tokio::{
    sync::{Mutex, MutexGuard},
    time::{MissedTickBehavior, interval},
};
use tokio_util::sync::CancellationToken;

/// Everything both loops read and write. Guarded by the one engine mutex.
#[derive(Debug)]
pub(super) struct EngineState {
    /// Authority on every dispatched mission.
    pub(super) repo: MissionRepository,
    /// Alternation and single-in-flight bookkeeping.
    pub(super) control: ControlState,
    /// Pending view of the feed, remembers already reported bad lines.
    pub(super) pending: PendingItemStore,
    /// The status log on disk lags behind `repo`.
    pub(super) store_dirty: bool,
    /// The arrival feed failed to read on the previous tick.
    pub(super) feed_failing: bool,
    /// Missions already reported as stale.
    pub(super) stale_reported: HashSet<MissionKey>,
}

/// The mission selection and lifecycle engine.
///
/// Two loops run against one instance: the dispatch loop promotes at most one
/// pending arrival per tick to a mission, the tracking loop polls the fleet
/// for every open mission and advances its status. All shared state lives in
/// [`EngineState`] behind a single mutex; fleet calls are made with the lock
/// released.
pub struct MissionEngine<G: FleetGateway> {
    pub(super) gateway: G,
    pub(super) topology: TopologyMap,
    pub(super) selector: CandidateSelector,
    pub(super) feed: FeedReader,
    pub(super) store: StatusStore,
    /// Label of the blocks counted towards mission progress.
    pub(super) block_label: String,
    /// Age after which an open mission is reported once.
    pub(super) stale_after: TimeDelta,
    pub(super) state: Mutex<EngineState>,
}

impl<G: FleetGateway> MissionEngine<G> {
    /// Creates the engine and recovers its state from the status log.
    ///
    /// # Arguments
    /// * `gateway` – Fleet API used for dispatch and status queries.
    /// * `topology` – Validated routing topology.
    /// * `cfg` – Paths and scheduling parameters.
    ///
    /// # Returns
    /// The engine, or a [`StoreError`] if an existing status log cannot be
    /// read. Starting without the history could dispatch missions twice.
    pub fn new(gateway: G, topology: TopologyMap, cfg: &DispatchConfig) -> Result<Self, StoreError> {
        let store = StatusStore::new(&cfg.status_path);
        let (repo, rejected) = MissionRepository::from_lines(&store.load()?, Utc::now());
        for (line, reason) in rejected {
            warn!("Status log line {line}: {reason}");
        }
        let control = ControlState::recover(&repo, &topology);
        let open = repo.active();
        if open.len() > 1 {
            warn!("Status log holds {} open missions, dispatching paused until all complete", open.len());
        }
        info!(
            "Recovered {} missions ({} open), last completed phase: {}",
            repo.mission_count(),
            open.len(),
            control.last_completed_phase().map_or(String::from("none"), |p| p.to_string())
        );
        Ok(Self {
            gateway,
            selector: CandidateSelector::new(cfg.relief_window, cfg.startup_phase),
            topology,
            feed: FeedReader::new(&cfg.feed_path),
            store,
            block_label: cfg.block_label.clone(),
            stale_after: cfg.stale_after,
            state: Mutex::new(EngineState {
                repo,
                control,
                pending: PendingItemStore::new(),
                store_dirty: false,
                feed_failing: false,
                stale_reported: HashSet::new(),
            }),
        })
    }

    /// Locks the shared state.
    pub(super) async fn lock_state(&self) -> MutexGuard<'_, EngineState> { self.state.lock().await }

    /// Copy of the current control state.
    #[cfg(test)]
    pub async fn control_state(&self) -> ControlState { self.lock_state().await.control }

    /// Runs the dispatch loop until `token` is cancelled.
    pub async fn run_dispatch_loop(self: Arc<Self>, period: Duration, token: CancellationToken) {
        Self::run_periodic("dispatch", period, token, || {
            let engine = Arc::clone(&self);
            async move { engine.dispatch_tick(Utc::now()).await; }
        })
        .await;
    }

    /// Runs the tracking loop until `token` is cancelled.
    pub async fn run_tracking_loop(self: Arc<Self>, period: Duration, token: CancellationToken) {
        Self::run_periodic("tracking", period, token, || {
            let engine = Arc::clone(&self);
            async move { engine.track_tick(Utc::now()).await; }
        })
        .await;
    }

    /// Fires `tick` on a fixed period. A running tick is never interrupted;
    /// cancellation is only observed between ticks.
    async fn run_periodic<F, Fut>(name: &str, period: Duration, token: CancellationToken, mut tick: F)
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = ()>,
    {
        let mut ticker = interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            tokio::select! {
                () = token.cancelled() => break,
                _ = ticker.tick() => tick().await,
            }
        }
        info!("Stopped {name} loop");
    }
}
