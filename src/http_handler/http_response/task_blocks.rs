use crate::http_handler::http_response::response_common::SerdeJSONBodyHTTPResponseType;

/// Response type for the /script-api/queryBlocksByTaskId endpoint.
#[derive(serde::Deserialize, Debug)]
pub(crate) struct TaskBlocksResponse {
    data: TaskBlocksData,
}

#[derive(serde::Deserialize, Debug)]
struct TaskBlocksData {
    #[serde(rename = "blockList", default)]
    block_list: Vec<TaskBlock>,
}

/// One work unit of a fleet task.
#[derive(serde::Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct TaskBlock {
    /// Free-text type tag of the block.
    #[serde(rename = "blockLabel", default)]
    block_label: String,
    /// Numeric status code reported by the fleet system.
    status: i64,
}

impl TaskBlock {
    #[cfg(test)]
    pub fn new(block_label: &str, status: i64) -> Self {
        Self { block_label: block_label.to_string(), status }
    }
    pub fn block_label(&self) -> &str { &self.block_label }
    pub fn status(&self) -> i64 { self.status }
}

impl TaskBlocksResponse {
    pub(crate) fn into_blocks(self) -> Vec<TaskBlock> { self.data.block_list }
}

impl SerdeJSONBodyHTTPResponseType for TaskBlocksResponse {}
