//! Mission selection and lifecycle: the candidate selector, the control
//! state and the engine running the dispatch and tracking loops.

mod block_progress;
mod candidate_selector;
mod control_state;
mod mission_dispatcher;
mod mission_engine;
mod status_tracker;


pub use block_progress::BlockProgress;
pub use candidate_selector::CandidateSelector;
pub use control_state::ControlState;
pub use mission_engine::MissionEngine;
