use super::task_blocks::TaskBlocksResponse;
use super::request_common::{HTTPRequestMethod, HTTPRequestType, JSONBodyHTTPRequestType};

/// Request type for the /script-api/queryBlocksByTaskId endpoint.
#[derive(serde::Serialize, Debug)]
pub(crate) struct TaskBlocksRequest {
    /// Task identifier, origin slot followed by the label.
    #[serde(rename = "taskRecordId")]
    pub(crate) task_record_id: String,
}

impl JSONBodyHTTPRequestType for TaskBlocksRequest {
    /// The type of the json body.
    type Body = TaskBlocksRequest;
    /// Returns the serializable object.
    fn body(&self) -> &Self::Body { self }
}

impl HTTPRequestType for TaskBlocksRequest {
    /// Type of the expected response.
    type Response = TaskBlocksResponse;
    /// `str` object representing the specific endpoint.
    fn endpoint(&self) -> &'static str { "/script-api/queryBlocksByTaskId" }
    /// The corresponding HTTP Request Method.
    fn request_method(&self) -> HTTPRequestMethod { HTTPRequestMethod::Post }
}
