//! Static routing topology: slots, phases and the slot-to-slot route table.

mod phase;
mod slot_id;
mod topology_map;

#[cfg(test)]
mod tests;

pub use phase::Phase;
pub use slot_id::SlotId;
pub use topology_map::TopologyMap;
