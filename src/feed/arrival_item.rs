use crate::mission::MissionKey;
use crate::topology::SlotId;
use std::{cmp::Ordering, fmt, str::FromStr};

/// Opaque, ordered arrival token taken verbatim from the feed.
///
/// Purely numeric tokens compare by value and sort before any non-numeric
/// token; non-numeric tokens compare lexicographically.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ArrivalTimestamp(String);

impl ArrivalTimestamp {
    pub fn new(token: &str) -> Self { Self(token.to_string()) }

    #[cfg(test)]
    pub fn as_str(&self) -> &str { &self.0 }

    fn numeric(&self) -> Option<u128> { self.0.parse::<u128>().ok() }
}

impl Ord for ArrivalTimestamp {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.numeric(), other.numeric()) {
            (Some(a), Some(b)) => a.cmp(&b).then_with(|| self.0.cmp(&other.0)),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => self.0.cmp(&other.0),
        }
    }
}

impl PartialOrd for ArrivalTimestamp {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> { Some(self.cmp(other)) }
}

impl fmt::Display for ArrivalTimestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(&self.0) }
}

/// One line of the arrival feed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArrivalItem {
    label_ref: String,
    timestamp: ArrivalTimestamp,
    location_id: String,
    origin_slot: SlotId,
}

/// Reasons a feed line cannot be turned into an [`ArrivalItem`].
#[derive(Debug, PartialEq, Eq)]
pub enum FeedError {
    /// Fewer than the four required fields.
    MissingFields(usize),
    /// The origin slot is not part of the slot universe.
    UnknownSlot(String),
}

impl fmt::Display for FeedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeedError::MissingFields(n) => write!(f, "expected 4 fields, found {n}"),
            FeedError::UnknownSlot(s) => write!(f, "unknown slot '{s}'"),
        }
    }
}

impl std::error::Error for FeedError {}

impl ArrivalItem {
    pub fn new(label_ref: &str, timestamp: &str, location_id: &str, origin_slot: SlotId) -> Self {
        Self {
            label_ref: label_ref.to_string(),
            timestamp: ArrivalTimestamp::new(timestamp),
            location_id: location_id.to_string(),
            origin_slot,
        }
    }

    /// Parses `label_ref timestamp location_id origin_slot`.
    ///
    /// # Returns
    /// * `Ok(None)` for blank lines.
    /// * `Ok(Some(item))` for a well-formed line; trailing extra fields are ignored.
    /// * `Err(FeedError)` otherwise.
    pub fn parse_line(line: &str) -> Result<Option<Self>, FeedError> {
        let parts: Vec<&str> = line.split_whitespace().collect();
        if parts.is_empty() {
            return Ok(None);
        }
        let [label_ref, timestamp, location_id, slot, ..] = parts.as_slice() else {
            return Err(FeedError::MissingFields(parts.len()));
        };
        let origin_slot =
            SlotId::from_str(slot).map_err(|_| FeedError::UnknownSlot((*slot).to_string()))?;
        Ok(Some(Self::new(label_ref, timestamp, location_id, origin_slot)))
    }

    pub fn label_ref(&self) -> &str { &self.label_ref }
    pub fn timestamp(&self) -> &ArrivalTimestamp { &self.timestamp }
    pub fn location_id(&self) -> &str { &self.location_id }
    pub fn origin_slot(&self) -> SlotId { self.origin_slot }

    /// Identity of the item; at most one mission is ever created per key.
    pub fn key(&self) -> MissionKey { MissionKey::new(&self.label_ref, self.origin_slot) }
}
