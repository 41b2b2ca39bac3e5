use super::arrival_item::{ArrivalTimestamp, FeedError};
use super::{ArrivalItem, FeedReader, PendingItemStore};
use crate::mission::MissionKey;
use crate::topology::{Phase, SlotId, TopologyMap};
use std::fs;

fn lines(raw: &[&str]) -> Vec<String> { raw.iter().map(|l| (*l).to_string()).collect() }

#[test]
fn test_parse_feed_line() {
    let item = ArrivalItem::parse_line("00400160200426780644 20250301101500 LOC7 AMR02 extra")
        .unwrap()
        .unwrap();
    assert_eq!(item.label_ref(), "00400160200426780644");
    assert_eq!(item.timestamp().as_str(), "20250301101500");
    assert_eq!(item.location_id(), "LOC7");
    assert_eq!(item.origin_slot(), SlotId::Amr02);
    assert_eq!(item.key(), MissionKey::new("00400160200426780644", SlotId::Amr02));
}

#[test]
fn test_parse_bad_feed_lines() {
    assert_eq!(ArrivalItem::parse_line("   ").unwrap(), None);
    assert_eq!(ArrivalItem::parse_line("L1 100 X").unwrap_err(), FeedError::MissingFields(3));
    assert_eq!(
        ArrivalItem::parse_line("L1 100 X DOCK9").unwrap_err(),
        FeedError::UnknownSlot(String::from("DOCK9"))
    );
}

#[test]
fn test_timestamp_order() {
    let ts = ArrivalTimestamp::new;
    assert!(ts("99") < ts("100"));
    assert!(ts("2025-03-01T10:00") < ts("2025-03-01T11:00"));
    assert!(ts("100") < ts("a"));
    assert_eq!(ts("7"), ts("7"));
}

#[test]
fn test_pending_excludes_dispatched_and_unrouted() {
    let feed = lines(&[
        "L1 100 X AMR01",
        "L2 101 X AMR05",
        "garbage",
        "L3 102 X AMR12",
        "L1 103 X AMR01",
        "L1 104 X AMR02",
    ]);
    let dispatched = MissionKey::new("L3", SlotId::Amr12);
    let pending = PendingItemStore::new().refresh(&feed, |k| *k == dispatched, &TopologyMap::site_default());
    let keys: Vec<MissionKey> = pending.iter().map(|c| c.key()).collect();
    assert_eq!(keys, vec![MissionKey::new("L1", SlotId::Amr01), MissionKey::new("L1", SlotId::Amr02)]);
    assert_eq!(pending[0].item().timestamp().as_str(), "100");
    assert_eq!(pending[0].destination(), SlotId::Amr08);
    assert_eq!(pending[1].phase(), Phase::One);
    assert_eq!(pending[1].rank(), 1);
    assert_eq!(pending[1].feed_index(), 5);
}

#[test]
fn test_feed_reader_rereads_whole_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("labels_disp.txt");
    fs::write(&path, "L1 100 X AMR01\n").unwrap();
    let reader = FeedReader::new(&path);
    assert_eq!(reader.read_all().unwrap(), lines(&["L1 100 X AMR01"]));
    fs::write(&path, "L1 100 X AMR01\nL2 101 X AMR02\n").unwrap();
    assert_eq!(reader.read_all().unwrap().len(), 2);
    assert!(FeedReader::new(dir.path().join("missing.txt")).read_all().is_err());
}
