//! Mission records, their lifecycle and the durable status log.

mod mission_record;
mod mission_status;
mod repository;
mod status_store;


pub use mission_record::{MissionKey, MissionRecord};
pub use mission_status::MissionStatus;
pub use repository::MissionRepository;
pub use status_store::{StatusStore, StoreError};
