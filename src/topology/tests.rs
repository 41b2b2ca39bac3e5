use super::topology_map::TopologyError;
use super::{Phase, SlotId, TopologyMap};
use std::str::FromStr;
use strum::IntoEnumIterator;

#[test]
fn test_site_default_routes() {
    let topo = TopologyMap::site_default();
    assert_eq!(topo.destination_of(SlotId::Amr01), Some(SlotId::Amr08));
    assert_eq!(topo.destination_of(SlotId::Amr14), Some(SlotId::Amr07));
    assert_eq!(topo.destination_of(SlotId::Amr05), None);
    assert_eq!(topo.phase_of(SlotId::Amr04), Some(Phase::One));
    assert_eq!(topo.phase_of(SlotId::Amr12), Some(Phase::Two));
    assert_eq!(topo.priority_rank(SlotId::Amr01), Some(0));
    assert_eq!(topo.priority_rank(SlotId::Amr13), Some(1));
    assert_eq!(topo.priority_rank(SlotId::Amr09), None);
}

#[test]
fn test_schedulable_slots_are_exactly_the_routed_ones() {
    let topo = TopologyMap::site_default();
    let schedulable: Vec<SlotId> = SlotId::iter().filter(|s| topo.phase_of(*s).is_some()).collect();
    assert_eq!(schedulable.len(), 7);
    for slot in SlotId::iter() {
        assert_eq!(topo.phase_of(slot).is_some(), topo.destination_of(slot).is_some(), "{slot}");
        assert_eq!(topo.priority_rank(slot).is_some(), topo.destination_of(slot).is_some(), "{slot}");
    }
}

#[test]
fn test_rejects_overlapping_phases() {
    let routes = [(SlotId::Amr01, SlotId::Amr08), (SlotId::Amr12, SlotId::Amr05)];
    let err = TopologyMap::new(&routes, &[SlotId::Amr01, SlotId::Amr12], &[SlotId::Amr12]);
    assert_eq!(err.unwrap_err(), TopologyError::DuplicateSlot(SlotId::Amr12));
}

#[test]
fn test_rejects_unclassified_and_unrouted() {
    let routes = [(SlotId::Amr01, SlotId::Amr08), (SlotId::Amr12, SlotId::Amr05)];
    let missing = TopologyMap::new(&routes, &[SlotId::Amr01], &[]);
    assert_eq!(missing.unwrap_err(), TopologyError::UnclassifiedSlot(SlotId::Amr12));
    let unrouted = TopologyMap::new(&routes, &[SlotId::Amr01, SlotId::Amr02], &[SlotId::Amr12]);
    assert_eq!(unrouted.unwrap_err(), TopologyError::UnroutedSlot(SlotId::Amr02));
}

#[test]
fn test_slot_names() {
    assert_eq!(SlotId::from_str("amr03").unwrap(), SlotId::Amr03);
    assert_eq!(SlotId::Amr10.to_string(), "AMR10");
    assert!(SlotId::from_str("AMR15").is_err());
    assert_eq!(Phase::One.opposite(), Phase::Two);
    assert_eq!(Phase::Two.opposite(), Phase::One);
}
