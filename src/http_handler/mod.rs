//! Client side of the fleet-control API.

pub(crate) mod common;
mod fleet_gateway;
pub(crate) mod http_client;
pub(crate) mod http_request;
pub(crate) mod http_response;

#[cfg(test)]
mod tests;

pub use fleet_gateway::{FleetGateway, MissionOrder};
pub use http_response::task_blocks::TaskBlock;
