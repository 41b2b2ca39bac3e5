use super::{Phase, SlotId};
use std::{collections::HashMap, fmt};

/// Static slot-to-slot routing table together with the phase grouping and
/// per-phase priority order of every routed origin slot.
///
/// The map is validated once on construction and is read-only afterwards.
#[derive(Debug, Clone)]
pub struct TopologyMap {
    /// Origin slot to destination slot.
    routes: HashMap<SlotId, SlotId>,
    /// Phase and rank (0 = highest priority) of every routed origin slot.
    classes: HashMap<SlotId, (Phase, usize)>,
}

/// Reasons a routing table and its phase grouping are rejected.
#[derive(Debug, PartialEq, Eq)]
pub enum TopologyError {
    /// A slot appears in both phases or twice in one phase.
    DuplicateSlot(SlotId),
    /// A phase lists a slot that has no route.
    UnroutedSlot(SlotId),
    /// A routed slot belongs to neither phase.
    UnclassifiedSlot(SlotId),
}

impl fmt::Display for TopologyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TopologyError::DuplicateSlot(s) => write!(f, "slot {s} is classified twice"),
            TopologyError::UnroutedSlot(s) => write!(f, "slot {s} is classified but has no route"),
            TopologyError::UnclassifiedSlot(s) => write!(f, "slot {s} is routed but in no phase"),
        }
    }
}

impl std::error::Error for TopologyError {}

impl TopologyMap {
    /// Builds a validated topology.
    ///
    /// # Arguments
    /// * `routes` – Origin/destination pairs.
    /// * `phase_one` – Phase 1 origin slots, highest priority first.
    /// * `phase_two` – Phase 2 origin slots, highest priority first.
    ///
    /// # Returns
    /// The map, or the first [`TopologyError`] found. The two phases must be
    /// disjoint and together cover exactly the routed origin slots.
    pub fn new(
        routes: &[(SlotId, SlotId)],
        phase_one: &[SlotId],
        phase_two: &[SlotId],
    ) -> Result<Self, TopologyError> {
        let mut route_map = HashMap::new();
        for (origin, dest) in routes {
            if route_map.insert(*origin, *dest).is_some() {
                return Err(TopologyError::DuplicateSlot(*origin));
            }
        }
        let mut classes = HashMap::new();
        for (phase, order) in [(Phase::One, phase_one), (Phase::Two, phase_two)] {
            for (rank, slot) in order.iter().enumerate() {
                if !route_map.contains_key(slot) {
                    return Err(TopologyError::UnroutedSlot(*slot));
                }
                if classes.insert(*slot, (phase, rank)).is_some() {
                    return Err(TopologyError::DuplicateSlot(*slot));
                }
            }
        }
        if let Some(slot) = route_map.keys().find(|s| !classes.contains_key(*s)) {
            return Err(TopologyError::UnclassifiedSlot(*slot));
        }
        Ok(Self { routes: route_map, classes })
    }

    /// The two-lane layout of the site the dispatcher ships for.
    pub fn site_default() -> Self {
        use SlotId::{Amr01, Amr02, Amr03, Amr04, Amr05, Amr06, Amr07, Amr08, Amr09, Amr10, Amr11, Amr12, Amr13, Amr14};
        Self::new(
            &[
                (Amr01, Amr08),
                (Amr02, Amr09),
                (Amr03, Amr10),
                (Amr04, Amr11),
                (Amr12, Amr05),
                (Amr13, Amr06),
                (Amr14, Amr07),
            ],
            &[Amr01, Amr02, Amr03, Amr04],
            &[Amr12, Amr13, Amr14],
        )
        .unwrap_or_else(|e| unreachable!("built-in topology is invalid: {e}"))
    }

    pub fn destination_of(&self, slot: SlotId) -> Option<SlotId> { self.routes.get(&slot).copied() }

    pub fn phase_of(&self, slot: SlotId) -> Option<Phase> { self.classes.get(&slot).map(|c| c.0) }

    /// Lower rank means higher priority within the slot's phase.
    pub fn priority_rank(&self, slot: SlotId) -> Option<usize> {
        self.classes.get(&slot).map(|c| c.1)
    }
}
