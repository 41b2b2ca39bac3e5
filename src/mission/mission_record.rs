use super::MissionStatus;
use crate::topology::SlotId;
use chrono::{DateTime, SubsecRound, Utc};
use std::{fmt, str::FromStr};

/// Format of every timestamp written to the status log.
const STATUS_TS_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// Identity of a mission: one labeled item at one origin slot.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MissionKey {
    label_ref: String,
    origin_slot: SlotId,
}

impl MissionKey {
    pub fn new(label_ref: &str, origin_slot: SlotId) -> Self {
        Self { label_ref: label_ref.to_string(), origin_slot }
    }

    pub fn label_ref(&self) -> &str { &self.label_ref }
    pub fn origin_slot(&self) -> SlotId { self.origin_slot }

    /// Task identifier the fleet system files the mission under.
    pub fn task_record_id(&self) -> String { format!("{}{}", self.origin_slot, self.label_ref) }
}

impl fmt::Display for MissionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.label_ref, self.origin_slot)
    }
}

/// One dispatched mission as persisted in the status log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissionRecord {
    key: MissionKey,
    destination_slot: SlotId,
    status: MissionStatus,
    dispatched_at: DateTime<Utc>,
    completed_at: Option<DateTime<Utc>>,
}

/// Reasons a status log line cannot be read back.
#[derive(Debug, PartialEq, Eq)]
pub enum RecordParseError {
    FieldCount(usize),
    Slot(String),
    Status(String),
    Timestamp(String),
    /// A completion timestamp on a non-completed record or vice versa.
    Inconsistent,
}

impl fmt::Display for RecordParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordParseError::FieldCount(n) => write!(f, "expected 5 or 6 fields, found {n}"),
            RecordParseError::Slot(s) => write!(f, "unknown slot '{s}'"),
            RecordParseError::Status(s) => write!(f, "unknown status token '{s}'"),
            RecordParseError::Timestamp(s) => write!(f, "invalid timestamp '{s}'"),
            RecordParseError::Inconsistent => write!(f, "completion timestamp does not match status"),
        }
    }
}

impl std::error::Error for RecordParseError {}

impl MissionRecord {
    /// Creates the record of a freshly accepted dispatch, in status `Sent`.
    pub fn dispatched(key: MissionKey, destination_slot: SlotId, now: DateTime<Utc>) -> Self {
        Self {
            key,
            destination_slot,
            status: MissionStatus::Sent,
            dispatched_at: now.trunc_subsecs(0),
            completed_at: None,
        }
    }

    pub fn key(&self) -> &MissionKey { &self.key }
    pub fn origin_slot(&self) -> SlotId { self.key.origin_slot() }
    pub fn destination_slot(&self) -> SlotId { self.destination_slot }
    pub fn status(&self) -> MissionStatus { self.status }
    pub fn dispatched_at(&self) -> DateTime<Utc> { self.dispatched_at }
    pub fn completed_at(&self) -> Option<DateTime<Utc>> { self.completed_at }

    /// Moves the record forward to `status`.
    ///
    /// # Returns
    /// `true` if the status changed. Equal or lower statuses are ignored, so a
    /// record never regresses. Reaching `Completed` stamps `now`.
    pub(super) fn advance(&mut self, status: MissionStatus, now: DateTime<Utc>) -> bool {
        if status <= self.status {
            return false;
        }
        self.status = status;
        if status.is_terminal() {
            self.completed_at = Some(now.trunc_subsecs(0));
        }
        true
    }

    /// Renders `label_ref origin destination status dispatched_at [completed_at]`.
    pub fn render_line(&self) -> String {
        let mut line = format!(
            "{} {} {} {} {}",
            self.key.label_ref,
            self.key.origin_slot,
            self.destination_slot,
            self.status,
            self.dispatched_at.format(STATUS_TS_FORMAT)
        );
        if let Some(done) = self.completed_at {
            line.push(' ');
            line.push_str(&done.format(STATUS_TS_FORMAT).to_string());
        }
        line
    }

    /// Reads back a line produced by [`MissionRecord::render_line`].
    pub fn parse_line(line: &str) -> Result<Self, RecordParseError> {
        let fields = RecordFields::split(line)?;
        let status = fields.status()?;
        let completed_at = fields.done.map(parse_ts).transpose()?;
        if status.is_terminal() != completed_at.is_some() {
            return Err(RecordParseError::Inconsistent);
        }
        Ok(Self {
            key: fields.key()?,
            destination_slot: fields.destination()?,
            status,
            dispatched_at: parse_ts(fields.sent)?,
            completed_at,
        })
    }

    /// Reads a line whose identity and status are intact but whose timestamps
    /// are not in the log format, e.g. a line written by an older dispatcher.
    ///
    /// The dispatch time falls back to `loaded_at`; an unreadable completion
    /// time is dropped, so the record does not count as the last completion.
    pub fn recover_line(line: &str, loaded_at: DateTime<Utc>) -> Result<Self, RecordParseError> {
        let fields = RecordFields::split(line)?;
        let status = fields.status()?;
        let completed_at = fields.done.and_then(|raw| parse_ts(raw).ok()).filter(|_| status.is_terminal());
        Ok(Self {
            key: fields.key()?,
            destination_slot: fields.destination()?,
            status,
            dispatched_at: parse_ts(fields.sent).unwrap_or_else(|_| loaded_at.trunc_subsecs(0)),
            completed_at,
        })
    }
}

/// Whitespace separated fields of a status log line.
struct RecordFields<'a> {
    label: &'a str,
    origin: &'a str,
    dest: &'a str,
    status: &'a str,
    sent: &'a str,
    done: Option<&'a str>,
}

impl<'a> RecordFields<'a> {
    fn split(line: &'a str) -> Result<Self, RecordParseError> {
        let parts: Vec<&str> = line.split_whitespace().collect();
        match *parts.as_slice() {
            [label, origin, dest, status, sent] => {
                Ok(Self { label, origin, dest, status, sent, done: None })
            }
            [label, origin, dest, status, sent, done] => {
                Ok(Self { label, origin, dest, status, sent, done: Some(done) })
            }
            _ => Err(RecordParseError::FieldCount(parts.len())),
        }
    }

    fn key(&self) -> Result<MissionKey, RecordParseError> {
        Ok(MissionKey::new(self.label, parse_slot(self.origin)?))
    }

    fn destination(&self) -> Result<SlotId, RecordParseError> { parse_slot(self.dest) }

    fn status(&self) -> Result<MissionStatus, RecordParseError> {
        MissionStatus::from_str(self.status).map_err(RecordParseError::Status)
    }
}

fn parse_slot(raw: &str) -> Result<SlotId, RecordParseError> {
    SlotId::from_str(raw).map_err(|_| RecordParseError::Slot(raw.to_string()))
}

fn parse_ts(raw: &str) -> Result<DateTime<Utc>, RecordParseError> {
    DateTime::parse_from_rfc3339(raw)
        .map(|ts| ts.with_timezone(&Utc))
        .map_err(|_| RecordParseError::Timestamp(raw.to_string()))
}
