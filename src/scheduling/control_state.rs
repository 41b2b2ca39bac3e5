use crate::mission::MissionRepository;
use crate::topology::{Phase, TopologyMap};
use chrono::{DateTime, TimeDelta, Utc};

/// Process-wide scheduler control state, mutated only by the engine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ControlState {
    /// Whether a mission is dispatched and not yet completed.
    mission_in_flight: bool,
    /// Phase of the origin slot of the last completed mission.
    last_completed_phase: Option<Phase>,
    /// When the last mission was observed as completed.
    last_completion_time: Option<DateTime<Utc>>,
}

impl ControlState {
    /// Rebuilds the control state from a loaded status log.
    ///
    /// Any non-completed record blocks dispatching; the latest completion
    /// determines the phase to serve next.
    pub fn recover(repo: &MissionRepository, topology: &TopologyMap) -> Self {
        let last = repo.last_completed();
        Self {
            mission_in_flight: repo.records().any(|r| !r.status().is_terminal()),
            last_completed_phase: last.and_then(|r| topology.phase_of(r.origin_slot())),
            last_completion_time: last.and_then(|r| r.completed_at()),
        }
    }

    pub fn mission_in_flight(&self) -> bool { self.mission_in_flight }
    pub fn last_completed_phase(&self) -> Option<Phase> { self.last_completed_phase }
    #[cfg(test)]
    pub fn last_completion_time(&self) -> Option<DateTime<Utc>> { self.last_completion_time }

    /// The phase that has to be served next: the opposite of the last
    /// completed one, or `startup` if nothing has completed yet.
    pub fn required_phase(&self, startup: Phase) -> Phase {
        self.last_completed_phase.map_or(startup, Phase::opposite)
    }

    /// Whether at least `window` has passed since the last completion.
    /// Never open before the first completion.
    pub fn relief_open(&self, now: DateTime<Utc>, window: TimeDelta) -> bool {
        self.last_completion_time.is_some_and(|done| now - done >= window)
    }

    pub fn mark_dispatched(&mut self) { self.mission_in_flight = true; }

    /// Records a completion. A `None` phase (origin no longer classified)
    /// leaves the alternation where it was.
    pub fn mark_completed(&mut self, phase: Option<Phase>, now: DateTime<Utc>) {
        self.mission_in_flight = false;
        if phase.is_some() {
            self.last_completed_phase = phase;
        }
        self.last_completion_time = Some(now);
    }
}
