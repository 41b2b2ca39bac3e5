use super::{
    common::HTTPError,
    http_client::HTTPClient,
    http_request::{
        post_order_post::PostOrderRequest, request_common::send_json_request,
        task_blocks_post::TaskBlocksRequest,
    },
    http_response::task_blocks::TaskBlock,
};
use crate::event;
use crate::topology::SlotId;
use async_trait::async_trait;

/// A transport instruction as submitted to the fleet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissionOrder {
    pub label_ref: String,
    pub origin_slot: SlotId,
    pub destination_slot: SlotId,
}

/// The two operations the dispatcher needs from the fleet-control system.
#[async_trait]
pub trait FleetGateway: Send + Sync {
    /// Submits one mission. `Ok` means the fleet acknowledged it.
    async fn dispatch(&self, order: &MissionOrder) -> Result<(), HTTPError>;

    /// Fetches the block list of the fleet task filed under `task_record_id`.
    async fn query_blocks(&self, task_record_id: &str) -> Result<Vec<TaskBlock>, HTTPError>;
}

#[async_trait]
impl FleetGateway for HTTPClient {
    async fn dispatch(&self, order: &MissionOrder) -> Result<(), HTTPError> {
        let req = PostOrderRequest {
            label_ref: order.label_ref.clone(),
            to_slot: order.origin_slot.to_string(),
            final_slot: order.destination_slot.to_string(),
        };
        let resp = send_json_request(&req, self).await?;
        event!("postOrder accepted for {}: {}", order.label_ref, resp.body());
        Ok(())
    }

    async fn query_blocks(&self, task_record_id: &str) -> Result<Vec<TaskBlock>, HTTPError> {
        let req = TaskBlocksRequest { task_record_id: task_record_id.to_string() };
        Ok(send_json_request(&req, self).await?.into_blocks())
    }
}
