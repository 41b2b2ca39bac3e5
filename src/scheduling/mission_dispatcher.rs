use super::MissionEngine;
use crate::http_handler::{FleetGateway, MissionOrder};
use crate::mission::MissionRecord;
use crate::{error, event, info, warn};
use chrono::{DateTime, Utc};

impl<G: FleetGateway> MissionEngine<G> {
    /// One tick of the selection and dispatch loop.
    ///
    /// Reads the whole feed, selects at most one candidate and submits it.
    /// Only an acknowledged submission creates a mission record; a failed one
    /// leaves the candidate pending for the next tick.
    ///
    /// # Arguments
    /// * `now` – Tick time used for the relief window and the dispatch stamp.
    ///
    /// # Returns
    /// The record of the dispatched mission, if any.
    pub async fn dispatch_tick(&self, now: DateTime<Utc>) -> Option<MissionRecord> {
        let lines = self.read_feed().await?;
        let candidate = {
            let mut guard = self.lock_state().await;
            if guard.control.mission_in_flight() {
                event!("Mission in flight, skipping selection");
                return None;
            }
            let state = &mut *guard;
            let repo = &state.repo;
            let pending = state.pending.refresh(&lines, |k| repo.contains(k), &self.topology);
            self.selector.select(&pending, &state.control, now)?.clone()
        };

        let key = candidate.key();
        let order = MissionOrder {
            label_ref: key.label_ref().to_string(),
            origin_slot: candidate.origin_slot(),
            destination_slot: candidate.destination(),
        };
        info!(
            "Dispatching {} from {} to {} ({}, arrived {} at {})",
            order.label_ref,
            order.origin_slot,
            order.destination_slot,
            candidate.phase(),
            candidate.item().timestamp(),
            candidate.item().location_id()
        );
        if let Err(e) = self.gateway.dispatch(&order).await {
            warn!("Dispatch of {key} failed, keeping it pending: {e}");
            return None;
        }

        let mut state = self.lock_state().await;
        if state.control.mission_in_flight() {
            // accepted orders are always recorded
            error!("Fleet accepted {key} while another mission is in flight");
        }
        let record = MissionRecord::dispatched(key, order.destination_slot, now);
        if let Err(e) = state.repo.insert(record.clone()) {
            error!("Fleet accepted {}, but it cannot be recorded: {e}", record.key());
            return None;
        }
        state.control.mark_dispatched();
        if let Err(e) = self.store.append(&record) {
            error!("{e}; mission {} is kept in memory and rewritten later", record.key());
            state.store_dirty = true;
        }
        info!("Mission {} sent and recorded", record.key());
        Some(record)
    }

    /// Reads the feed, reporting a failure only on the first failing tick.
    async fn read_feed(&self) -> Option<Vec<String>> {
        let result = self.feed.read_all();
        let mut state = self.lock_state().await;
        match result {
            Ok(lines) => {
                if state.feed_failing {
                    info!("Arrival feed {} readable again", self.feed.path().display());
                }
                state.feed_failing = false;
                Some(lines)
            }
            Err(e) => {
                if !state.feed_failing {
                    error!("Cannot read arrival feed {}: {e}", self.feed.path().display());
                }
                state.feed_failing = true;
                None
            }
        }
    }
}
