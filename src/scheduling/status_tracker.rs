use super::{BlockProgress, MissionEngine, mission_engine::EngineState};
use crate::http_handler::FleetGateway;
use crate::mission::MissionKey;
use crate::{error, event, info, warn};
use chrono::{DateTime, Utc};

impl<G: FleetGateway> MissionEngine<G> {
    /// One tick of the status tracking loop.
    ///
    /// Polls the fleet for every open mission, advances statuses that moved
    /// forward and, on completion, updates the control state so the next
    /// mission can be selected. Query failures leave the mission untouched
    /// and it is polled again on the next tick.
    ///
    /// # Arguments
    /// * `now` – Tick time, stamped on completions.
    ///
    /// # Returns
    /// The number of missions whose status changed.
    pub async fn track_tick(&self, now: DateTime<Utc>) -> usize {
        let open = self.lock_state().await.repo.active();
        let mut observed: Vec<(MissionKey, BlockProgress)> = Vec::with_capacity(open.len());
        for record in &open {
            let task_id = record.key().task_record_id();
            match self.gateway.query_blocks(&task_id).await {
                Ok(blocks) => {
                    observed.push((record.key().clone(), BlockProgress::from_blocks(&blocks, &self.block_label)));
                }
                Err(e) => warn!("Status query for task {task_id} failed: {e}"),
            }
        }

        let mut guard = self.lock_state().await;
        let state = &mut *guard;
        let mut changed = 0;
        for (key, progress) in observed {
            let Some(status) = progress.observed_status() else {
                event!("Task {} not observable yet", key.task_record_id());
                continue;
            };
            match state.repo.advance(&key, status, now) {
                Ok(true) => {
                    changed += 1;
                    state.store_dirty = true;
                    info!(
                        "Mission {key} is now {status} ({}/{} blocks done)",
                        progress.complete(),
                        progress.total()
                    );
                    if status.is_terminal() {
                        state.control.mark_completed(self.topology.phase_of(key.origin_slot()), now);
                        state.stale_reported.remove(&key);
                    }
                }
                Ok(false) => {}
                Err(e) => error!("Cannot advance mission: {e}"),
            }
        }
        if !state.repo.active().is_empty() {
            // only reachable with several open missions recovered from the log
            state.control.mark_dispatched();
        }
        self.report_stale(state, now);
        if state.store_dirty {
            match self.store.rewrite(&state.repo) {
                Ok(()) => state.store_dirty = false,
                Err(e) => error!("{e}"),
            }
        }
        changed
    }

    /// Reports every open mission older than the staleness limit, once.
    fn report_stale(&self, state: &mut EngineState, now: DateTime<Utc>) {
        for record in state.repo.active() {
            let age = now - record.dispatched_at();
            if age >= self.stale_after && state.stale_reported.insert(record.key().clone()) {
                warn!(
                    "Mission {} to {} still {} after {} min, fleet task {} may be stuck",
                    record.key(),
                    record.destination_slot(),
                    record.status(),
                    age.num_minutes(),
                    record.key().task_record_id()
                );
            }
        }
    }
}
