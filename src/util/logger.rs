use chrono::Utc;
use std::{
    fs::{File, OpenOptions},
    io::Write,
    path::Path,
    sync::{Mutex, OnceLock},
};

/// Append-only, human-readable fault log shared by the whole process.
///
/// Every `warn!` and `error!` invocation is mirrored into this file once it
/// has been initialized with [`FaultLog::init`]. Before that (and in tests)
/// the macros only print to the console.
pub struct FaultLog {
    file: Mutex<File>,
}

static FAULT_LOG: OnceLock<FaultLog> = OnceLock::new();

impl FaultLog {
    /// Opens (or creates) the fault log in append mode and installs it globally.
    ///
    /// # Arguments
    /// * `path` – Location of the fault log file.
    ///
    /// # Returns
    /// An `io::Error` if the file cannot be opened. Calling this twice keeps the first log.
    pub fn init<P: AsRef<Path>>(path: P) -> std::io::Result<()> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        let _ = FAULT_LOG.set(FaultLog { file: Mutex::new(file) });
        Ok(())
    }

    /// Appends one timestamped line to the fault log, if one is installed.
    ///
    /// Write failures are swallowed: the console line emitted by the calling
    /// macro is the only remaining channel at that point.
    pub fn record(level: &str, msg: &str) {
        let Some(log) = FAULT_LOG.get() else { return };
        let Ok(mut file) = log.file.lock() else { return };
        let line = format!("{} [{level}] {msg}\n", Utc::now().format("%Y-%m-%dT%H:%M:%SZ"));
        let _ = file.write_all(line.as_bytes());
    }
}

#[macro_export]
macro_rules! info {
    ($($arg:tt)*) => {
        println!("\x1b[32m[INFO] [{}]\x1b[0m {}", chrono::Utc::now().format("%H:%M:%S"), format!($($arg)*))
    };
}

#[macro_export]
macro_rules! log {
    ($($arg:tt)*) => {
        println!("\x1b[33m[LOG]  [{}]\x1b[0m {}", chrono::Utc::now().format("%H:%M:%S"), format!($($arg)*))
    };
}

#[macro_export]
macro_rules! warn {
    ($($arg:tt)*) => {{
        let msg = format!($($arg)*);
        println!("\x1b[35m[WARN] [{}]\x1b[0m {}", chrono::Utc::now().format("%H:%M:%S"), msg);
        $crate::util::logger::FaultLog::record("WARN", &msg);
    }};
}

#[macro_export]
macro_rules! error {
    ($($arg:tt)*) => {{
        let msg = format!($($arg)*);
        println!("\x1b[31m[ERROR][{}]\x1b[0m {}", chrono::Utc::now().format("%H:%M:%S"), msg);
        $crate::util::logger::FaultLog::record("ERROR", &msg);
    }};
}

#[macro_export]
macro_rules! fatal {
    ($($arg:tt)*) => {
        panic!("\x1b[1;31m[FATAL][{}]\x1b[0m {}", chrono::Utc::now().format("%H:%M:%S"), format!($($arg)*))
    };
}

#[macro_export]
macro_rules! event {
    ($($arg:tt)*) => {
        if std::env::var("LOG_AMR_EVENTS").is_ok() {
            println!("\x1b[36m[EVENT][{}]\x1b[0m {}", chrono::Utc::now().format("%H:%M:%S"), format!($($arg)*))
        }
    };
}
