//! Arrival feed: line parsing, whole-file reading and the pending view.

mod arrival_item;
mod feed_reader;
mod pending_store;

#[cfg(test)]
mod tests;

pub use arrival_item::ArrivalItem;
pub use feed_reader::FeedReader;
pub use pending_store::{PendingCandidate, PendingItemStore};
