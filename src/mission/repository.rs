use super::{MissionKey, MissionRecord, MissionStatus};
use chrono::{DateTime, Utc};
use std::{collections::HashMap, fmt};

/// A line of the status log as held in memory.
#[derive(Debug, Clone)]
enum StoredEntry {
    /// A mission record. `raw` keeps the line exactly as loaded until the
    /// record is modified, so unchanged lines are written back verbatim.
    Record { record: MissionRecord, raw: Option<String> },
    /// A line that could not be read back; preserved untouched.
    Verbatim(String),
}

/// Append-only history of every mission, indexed by [`MissionKey`].
///
/// This is the single authority on which identities were already dispatched.
#[derive(Debug, Default)]
pub struct MissionRepository {
    entries: Vec<StoredEntry>,
    index: HashMap<MissionKey, usize>,
}

#[derive(Debug, PartialEq, Eq)]
pub enum RepositoryError {
    /// A mission with this identity already exists.
    DuplicateMission(MissionKey),
    /// No mission with this identity exists.
    UnknownMission(MissionKey),
}

impl fmt::Display for RepositoryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RepositoryError::DuplicateMission(k) => write!(f, "mission {k} was already dispatched"),
            RepositoryError::UnknownMission(k) => write!(f, "mission {k} is unknown"),
        }
    }
}

impl std::error::Error for RepositoryError {}

impl MissionRepository {
    pub fn new() -> Self { Self::default() }

    /// Rebuilds the repository from the lines of a status log.
    ///
    /// A line with readable identity and status but unreadable timestamps is
    /// still indexed (see [`MissionRecord::recover_line`]), so its mission is
    /// never dispatched again. It is written back unchanged until it advances.
    ///
    /// # Arguments
    /// * `lines` – The status log content.
    /// * `loaded_at` – Substitute dispatch time for recovered lines.
    ///
    /// # Returns
    /// The repository and a diagnostic (as `(line number, reason)`) for every
    /// line that was recovered or kept verbatim.
    pub fn from_lines(lines: &[String], loaded_at: DateTime<Utc>) -> (Self, Vec<(usize, String)>) {
        let mut repo = Self::new();
        let mut rejected = Vec::new();
        for (n, line) in lines.iter().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            let record = MissionRecord::parse_line(line).or_else(|e| {
                let recovered = MissionRecord::recover_line(line, loaded_at).map_err(|_| e.to_string())?;
                rejected.push((n + 1, format!("{e}, recovered with dispatch time {loaded_at}")));
                Ok::<_, String>(recovered)
            });
            match record {
                Ok(record) if repo.index.contains_key(record.key()) => {
                    let err = RepositoryError::DuplicateMission(record.key().clone());
                    rejected.push((n + 1, err.to_string()));
                    repo.entries.push(StoredEntry::Verbatim(line.clone()));
                }
                Ok(record) => {
                    repo.index.insert(record.key().clone(), repo.entries.len());
                    repo.entries.push(StoredEntry::Record { record, raw: Some(line.clone()) });
                }
                Err(reason) => {
                    rejected.push((n + 1, reason));
                    repo.entries.push(StoredEntry::Verbatim(line.clone()));
                }
            }
        }
        (repo, rejected)
    }

    /// Adds a new mission, enforcing identity uniqueness.
    pub fn insert(&mut self, record: MissionRecord) -> Result<(), RepositoryError> {
        if self.index.contains_key(record.key()) {
            return Err(RepositoryError::DuplicateMission(record.key().clone()));
        }
        self.index.insert(record.key().clone(), self.entries.len());
        self.entries.push(StoredEntry::Record { record, raw: None });
        Ok(())
    }

    pub fn contains(&self, key: &MissionKey) -> bool { self.index.contains_key(key) }

    #[cfg(test)]
    pub fn get(&self, key: &MissionKey) -> Option<&MissionRecord> {
        match self.entries.get(*self.index.get(key)?)? {
            StoredEntry::Record { record, .. } => Some(record),
            StoredEntry::Verbatim(_) => None,
        }
    }

    /// Moves a mission forward.
    ///
    /// # Returns
    /// `Ok(true)` if the status changed, `Ok(false)` if `status` is not ahead
    /// of the current one.
    pub fn advance(
        &mut self,
        key: &MissionKey,
        status: MissionStatus,
        now: DateTime<Utc>,
    ) -> Result<bool, RepositoryError> {
        let pos = *self.index.get(key).ok_or_else(|| RepositoryError::UnknownMission(key.clone()))?;
        match &mut self.entries[pos] {
            StoredEntry::Record { record, raw } => {
                let changed = record.advance(status, now);
                if changed {
                    *raw = None;
                }
                Ok(changed)
            }
            StoredEntry::Verbatim(_) => Err(RepositoryError::UnknownMission(key.clone())),
        }
    }

    pub fn records(&self) -> impl Iterator<Item = &MissionRecord> {
        self.entries.iter().filter_map(|e| match e {
            StoredEntry::Record { record, .. } => Some(record),
            StoredEntry::Verbatim(_) => None,
        })
    }

    /// Snapshot of all missions not yet completed, in dispatch order.
    pub fn active(&self) -> Vec<MissionRecord> {
        self.records().filter(|r| !r.status().is_terminal()).cloned().collect()
    }

    /// The most recently completed mission, if any.
    pub fn last_completed(&self) -> Option<&MissionRecord> {
        self.records().filter(|r| r.completed_at().is_some()).max_by_key(|r| r.completed_at())
    }

    /// Full status log content, one line per entry.
    pub fn render(&self) -> String {
        let mut out = String::new();
        for entry in &self.entries {
            match entry {
                StoredEntry::Record { raw: Some(raw), .. } | StoredEntry::Verbatim(raw) => {
                    out.push_str(raw);
                }
                StoredEntry::Record { record, raw: None } => out.push_str(&record.render_line()),
            }
            out.push('\n');
        }
        out
    }

    /// Number of indexed missions.
    pub fn mission_count(&self) -> usize { self.index.len() }
}
