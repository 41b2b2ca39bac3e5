mod config;
pub mod logger;

pub use config::DispatchConfig;
pub use logger::FaultLog;
