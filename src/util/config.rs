use crate::topology::Phase;
use chrono::TimeDelta;
use std::{fmt, path::PathBuf, str::FromStr, time::Duration};

/// Runtime configuration of the dispatcher, read from the process environment.
#[derive(Debug, Clone)]
pub struct DispatchConfig {
    /// Base URL of the fleet-control API, e.g. `http://localhost:8080`.
    pub fleet_base_url: String,
    /// Path of the append-only arrival feed.
    pub feed_path: PathBuf,
    /// Path of the durable mission status log.
    pub status_path: PathBuf,
    /// Path of the append-only fault log.
    pub fault_log_path: PathBuf,
    /// Period of the selection and dispatch loop.
    pub dispatch_interval: Duration,
    /// Period of the status tracking loop.
    pub track_interval: Duration,
    /// Upper bound for a single fleet API call.
    pub http_timeout: Duration,
    /// Time after the last completion from which the other phase may be served.
    pub relief_window: TimeDelta,
    /// Phase required before any mission has completed.
    pub startup_phase: Phase,
    /// Label of the fleet blocks that count towards mission progress.
    pub block_label: String,
    /// Age after which a non-terminal mission is reported as stale.
    pub stale_after: TimeDelta,
}

/// Error raised when an environment variable holds an unusable value.
#[derive(Debug)]
pub struct ConfigError {
    var: &'static str,
    value: String,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid value '{}' for {}", self.value, self.var)
    }
}

impl std::error::Error for ConfigError {}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            fleet_base_url: String::from("http://localhost:8080"),
            feed_path: PathBuf::from("labels_disp.txt"),
            status_path: PathBuf::from("AMR_STATUS.txt"),
            fault_log_path: PathBuf::from("AMR_FAULTS.txt"),
            dispatch_interval: Duration::from_secs(5),
            track_interval: Duration::from_secs(5),
            http_timeout: Duration::from_secs(5),
            relief_window: TimeDelta::seconds(120),
            startup_phase: Phase::One,
            block_label: String::from("DispatchUnit"),
            stale_after: TimeDelta::seconds(1800),
        }
    }
}

impl DispatchConfig {
    /// Builds the configuration from `AMR_*` environment variables, falling
    /// back to [`DispatchConfig::default`] for every variable that is unset.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup.
    pub(crate) fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where F: Fn(&str) -> Option<String> {
        let mut cfg = Self::default();
        if let Some(url) = lookup("AMR_FLEET_BASE_URL") {
            cfg.fleet_base_url = url.trim_end_matches('/').to_string();
        }
        if let Some(path) = lookup("AMR_FEED_PATH") {
            cfg.feed_path = PathBuf::from(path);
        }
        if let Some(path) = lookup("AMR_STATUS_PATH") {
            cfg.status_path = PathBuf::from(path);
        }
        if let Some(path) = lookup("AMR_FAULT_LOG_PATH") {
            cfg.fault_log_path = PathBuf::from(path);
        }
        if let Some(secs) = parse_var::<u64, _>(&lookup, "AMR_DISPATCH_INTERVAL_SECS")? {
            cfg.dispatch_interval = Duration::from_secs(secs.max(1));
        }
        if let Some(secs) = parse_var::<u64, _>(&lookup, "AMR_TRACK_INTERVAL_SECS")? {
            cfg.track_interval = Duration::from_secs(secs.max(1));
        }
        if let Some(secs) = parse_var::<u64, _>(&lookup, "AMR_HTTP_TIMEOUT_SECS")? {
            cfg.http_timeout = Duration::from_secs(secs.max(1));
        }
        if let Some(secs) = parse_var::<u32, _>(&lookup, "AMR_RELIEF_SECS")? {
            cfg.relief_window = TimeDelta::seconds(i64::from(secs));
        }
        if let Some(secs) = parse_var::<u32, _>(&lookup, "AMR_STALE_AFTER_SECS")? {
            cfg.stale_after = TimeDelta::seconds(i64::from(secs));
        }
        if let Some(raw) = lookup("AMR_STARTUP_PHASE") {
            cfg.startup_phase = match raw.trim() {
                "1" => Phase::One,
                "2" => Phase::Two,
                _ => return Err(ConfigError { var: "AMR_STARTUP_PHASE", value: raw }),
            };
        }
        if let Some(label) = lookup("AMR_BLOCK_LABEL") {
            cfg.block_label = label;
        }
        Ok(cfg)
    }
}

fn parse_var<T, F>(lookup: &F, var: &'static str) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    match lookup(var) {
        None => Ok(None),
        Some(value) => value.trim().parse::<T>().map(Some).map_err(|_| ConfigError { var, value }),
    }
}
