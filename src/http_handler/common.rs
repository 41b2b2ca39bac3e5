use super::http_response::response_common::ResponseError;
use std::fmt;

/// Any failure while talking to the fleet-control API.
///
/// All variants except `ClientSetup` are transient: the caller leaves its
/// state untouched and the next tick retries.
#[derive(Debug)]
pub enum HTTPError {
    /// The HTTP client could not be constructed.
    ClientSetup(String),
    /// The request failed or the response was rejected.
    HTTPResponseError(ResponseError),
}

impl fmt::Display for HTTPError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HTTPError::ClientSetup(e) => write!(f, "cannot build HTTP client: {e}"),
            HTTPError::HTTPResponseError(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for HTTPError {}

impl From<ResponseError> for HTTPError {
    fn from(value: ResponseError) -> Self { HTTPError::HTTPResponseError(value) }
}

impl From<reqwest::Error> for HTTPError {
    fn from(value: reqwest::Error) -> Self { HTTPError::HTTPResponseError(value.into()) }
}
