use super::ControlState;
use crate::feed::PendingCandidate;
use crate::topology::Phase;
use chrono::{DateTime, TimeDelta, Utc};
use itertools::Itertools;
use std::{cmp::Ordering, collections::HashMap};

/// Greedy, single-mission-per-tick selection over the pending candidates.
///
/// Per phase only the candidate on the highest-priority occupied slot is
/// eligible. The required phase alternates with every completion; the other
/// phase is served only once the relief window after the last completion
/// has elapsed and the required phase has nothing eligible.
#[derive(Debug, Clone, Copy)]
pub struct CandidateSelector {
    relief_window: TimeDelta,
    startup_phase: Phase,
}

impl CandidateSelector {
    pub fn new(relief_window: TimeDelta, startup_phase: Phase) -> Self {
        Self { relief_window, startup_phase }
    }

    /// Picks at most one candidate to dispatch.
    ///
    /// # Arguments
    /// * `candidates` – Pending candidates in feed order.
    /// * `state` – Current scheduler control state.
    /// * `now` – Tick time, compared against the last completion.
    ///
    /// # Returns
    /// The selected candidate or `None` if a mission is in flight or nothing
    /// may be dispatched this tick.
    pub fn select<'a>(
        &self,
        candidates: &'a [PendingCandidate],
        state: &ControlState,
        now: DateTime<Utc>,
    ) -> Option<&'a PendingCandidate> {
        if state.mission_in_flight() {
            return None;
        }
        let eligible = Self::eligible_per_phase(candidates);
        let required = state.required_phase(self.startup_phase);
        if let Some(candidate) = eligible.get(&required).copied() {
            return Some(candidate);
        }
        if !state.relief_open(now, self.relief_window) {
            return None;
        }
        eligible
            .into_iter()
            .filter(|(phase, _)| *phase != required)
            .map(|(_, candidate)| candidate)
            .min_by(|a, b| Self::arrival_order(a, b))
    }

    /// The single eligible candidate of every phase that has one.
    pub fn eligible_per_phase(candidates: &[PendingCandidate]) -> HashMap<Phase, &PendingCandidate> {
        candidates
            .iter()
            .into_group_map_by(|c| c.phase())
            .into_iter()
            .filter_map(|(phase, group)| {
                group
                    .into_iter()
                    .min_by(|a, b| a.rank().cmp(&b.rank()).then_with(|| Self::arrival_order(a, b)))
                    .map(|best| (phase, best))
            })
            .collect()
    }

    /// Earliest arrival first, feed position as the last resort.
    fn arrival_order(a: &PendingCandidate, b: &PendingCandidate) -> Ordering {
        a.item()
            .timestamp()
            .cmp(b.item().timestamp())
            .then_with(|| a.feed_index().cmp(&b.feed_index()))
    }
}
