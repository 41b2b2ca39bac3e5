use super::response_common::{HTTPResponseType, ResponseError};

/// Response type for the /script-api/postOrder endpoint.
///
/// Only the status code matters; the body is kept for diagnostics.
#[derive(Debug)]
pub(crate) struct PostOrderResponse {
    body: String,
}

impl PostOrderResponse {
    pub(crate) fn body(&self) -> &str { &self.body }
}

impl HTTPResponseType for PostOrderResponse {
    fn is_accepted(status: reqwest::StatusCode) -> bool {
        status == reqwest::StatusCode::OK || status == reqwest::StatusCode::CREATED
    }

    fn parse_body(body: &[u8]) -> Result<Self, ResponseError> {
        Ok(Self { body: String::from_utf8_lossy(body).into_owned() })
    }
}
