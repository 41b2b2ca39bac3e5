use crate::http_handler::TaskBlock;
use crate::mission::MissionStatus;
use regex::Regex;
use std::sync::LazyLock;

/// Matches any run of whitespace, stripped before comparing block labels.
static WS_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Progress of a fleet task as counted over its dispatch-unit blocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockProgress {
    total: usize,
    complete: usize,
}

impl BlockProgress {
    /// Fleet status code of a finished block.
    pub const COMPLETE_STATUS: i64 = 1003;

    #[cfg(test)]
    pub fn new(total: usize, complete: usize) -> Self { Self { total, complete } }

    /// Counts the blocks whose label equals `tag`, ignoring case and whitespace.
    pub fn from_blocks(blocks: &[TaskBlock], tag: &str) -> Self {
        let tag = Self::normalize(tag);
        let units: Vec<&TaskBlock> =
            blocks.iter().filter(|b| Self::normalize(b.block_label()) == tag).collect();
        Self {
            total: units.len(),
            complete: units.iter().filter(|b| b.status() == Self::COMPLETE_STATUS).count(),
        }
    }

    fn normalize(label: &str) -> String { WS_REGEX.replace_all(label, "").to_lowercase() }

    pub fn total(&self) -> usize { self.total }
    pub fn complete(&self) -> usize { self.complete }

    /// Status implied by the counts, `None` while the task is not observable.
    pub fn observed_status(&self) -> Option<MissionStatus> {
        match (self.total, self.complete) {
            (0, _) => None,
            (_, 0) => Some(MissionStatus::Sent),
            (total, complete) if complete < total => Some(MissionStatus::InTransit),
            _ => Some(MissionStatus::Completed),
        }
    }
}
