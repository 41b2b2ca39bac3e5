use super::ArrivalItem;
use crate::mission::MissionKey;
use crate::topology::{Phase, SlotId, TopologyMap};
use crate::warn;
use std::collections::HashSet;

/// An arrival that has not been dispatched yet, annotated with its routing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingCandidate {
    item: ArrivalItem,
    destination: SlotId,
    phase: Phase,
    rank: usize,
    /// Position of the line in the feed, used as the last tie breaker.
    feed_index: usize,
}

impl PendingCandidate {
    pub fn item(&self) -> &ArrivalItem { &self.item }
    pub fn origin_slot(&self) -> SlotId { self.item.origin_slot() }
    pub fn destination(&self) -> SlotId { self.destination }
    pub fn phase(&self) -> Phase { self.phase }
    pub fn rank(&self) -> usize { self.rank }
    pub fn feed_index(&self) -> usize { self.feed_index }
    pub fn key(&self) -> MissionKey { self.item.key() }
}

/// Derives the pending candidates from the raw feed.
///
/// Malformed lines and arrivals on unschedulable slots are configuration
/// errors. They are dropped and diagnosed once each; re-reading the feed on
/// the next tick does not report them again.
#[derive(Debug, Default)]
pub struct PendingItemStore {
    reported: HashSet<String>,
}

impl PendingItemStore {
    pub fn new() -> Self { Self::default() }

    /// Computes the pending candidates in feed order.
    ///
    /// # Arguments
    /// * `lines` – The full arrival feed.
    /// * `is_dispatched` – Whether a mission record already exists for a key.
    /// * `topology` – Routing table used to resolve destination, phase and rank.
    ///
    /// # Returns
    /// One candidate per identity (first feed occurrence wins) that has no
    /// mission record and a schedulable origin slot.
    pub fn refresh<F>(
        &mut self,
        lines: &[String],
        is_dispatched: F,
        topology: &TopologyMap,
    ) -> Vec<PendingCandidate>
    where
        F: Fn(&MissionKey) -> bool,
    {
        let mut seen = HashSet::new();
        let mut pending = Vec::new();
        for (feed_index, line) in lines.iter().enumerate() {
            let item = match ArrivalItem::parse_line(line) {
                Ok(Some(item)) => item,
                Ok(None) => continue,
                Err(e) => {
                    self.report(line, || format!("Dropping feed line '{}': {e}", line.trim()));
                    continue;
                }
            };
            let key = item.key();
            if is_dispatched(&key) || !seen.insert(key) {
                continue;
            }
            let slot = item.origin_slot();
            let routing = (
                topology.destination_of(slot),
                topology.phase_of(slot),
                topology.priority_rank(slot),
            );
            let (Some(destination), Some(phase), Some(rank)) = routing else {
                self.report(line, || {
                    format!("No destination defined for {slot}, ignoring '{}'", item.label_ref())
                });
                continue;
            };
            pending.push(PendingCandidate { item, destination, phase, rank, feed_index });
        }
        pending
    }

    fn report<M>(&mut self, line: &str, msg: M)
    where M: FnOnce() -> String {
        if self.reported.insert(line.trim().to_string()) {
            warn!("{}", msg());
        }
    }
}
