use super::post_order::PostOrderResponse;
use super::request_common::{HTTPRequestMethod, HTTPRequestType, JSONBodyHTTPRequestType};

/// Request type for the /script-api/postOrder endpoint.
#[derive(serde::Serialize, Debug)]
pub(crate) struct PostOrderRequest {
    /// Label of the transported item.
    pub(crate) label_ref: String,
    /// Origin slot the robot picks up from.
    pub(crate) to_slot: String,
    /// Destination slot the robot drops off at.
    pub(crate) final_slot: String,
}

impl JSONBodyHTTPRequestType for PostOrderRequest {
    /// The type of the json body.
    type Body = PostOrderRequest;
    /// Returns the serializable object.
    fn body(&self) -> &Self::Body { self }
}

impl HTTPRequestType for PostOrderRequest {
    /// Type of the expected response.
    type Response = PostOrderResponse;
    /// `str` object representing the specific endpoint.
    fn endpoint(&self) -> &'static str { "/script-api/postOrder" }
    /// The corresponding HTTP Request Method.
    fn request_method(&self) -> HTTPRequestMethod { HTTPRequestMethod::Post }
}
