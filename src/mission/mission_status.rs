use std::{fmt, str::FromStr};

/// Lifecycle status of a dispatched mission. The derived order is the only
/// direction a mission may move in.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Hash)]
pub enum MissionStatus {
    Sent,
    InTransit,
    Completed,
}

impl MissionStatus {
    /// Fixed-width token written to the status log.
    pub const fn token(self) -> &'static str {
        match self {
            MissionStatus::Sent => "TAREA*ENVIADA*******",
            MissionStatus::InTransit => "TAREA*EN*TRANSITO***",
            MissionStatus::Completed => "TAREA*COMPLETADA****",
        }
    }

    pub fn is_terminal(self) -> bool { self == MissionStatus::Completed }
}

impl fmt::Display for MissionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.token()) }
}

impl FromStr for MissionStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        [MissionStatus::Sent, MissionStatus::InTransit, MissionStatus::Completed]
            .into_iter()
            .find(|status| status.token() == s)
            .ok_or_else(|| s.to_string())
    }
}
