use std::fmt;

/// Implemented by response types whose body is plain JSON.
pub(crate) trait SerdeJSONBodyHTTPResponseType {}

impl<T> HTTPResponseType for T
where
    T: SerdeJSONBodyHTTPResponseType,
    for<'de> T: serde::Deserialize<'de>,
{
    fn parse_body(body: &[u8]) -> Result<Self, ResponseError> {
        serde_json::from_slice(body).map_err(|e| ResponseError::Malformed(e.to_string()))
    }
}

pub(crate) trait HTTPResponseType: Sized {
    /// Whether a status code counts as success for this endpoint.
    fn is_accepted(status: reqwest::StatusCode) -> bool { status.is_success() }
    /// Parses the raw body of an accepted response.
    fn parse_body(body: &[u8]) -> Result<Self, ResponseError>;
}

/// Checks the status code of `response` and parses its body as `R`.
pub(crate) async fn read_response<R>(response: reqwest::Response) -> Result<R, ResponseError>
where R: HTTPResponseType {
    let status = response.status();
    if !R::is_accepted(status) {
        let body = response.text().await.unwrap_or_default();
        return Err(ResponseError::Rejected { status: status.as_u16(), body });
    }
    let body = response.bytes().await?;
    R::parse_body(&body)
}

#[derive(Debug)]
pub enum ResponseError {
    /// The server answered with a status the endpoint does not accept.
    Rejected { status: u16, body: String },
    /// The body could not be decoded.
    Malformed(String),
    /// The request did not complete within the client timeout.
    Timeout,
    NoConnection,
    Unknown(String),
}

impl fmt::Display for ResponseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResponseError::Rejected { status, body } => {
                write!(f, "rejected with status {status}: {}", body.trim())
            }
            ResponseError::Malformed(e) => write!(f, "malformed response body: {e}"),
            ResponseError::Timeout => write!(f, "request timed out"),
            ResponseError::NoConnection => write!(f, "no connection to fleet API"),
            ResponseError::Unknown(e) => write!(f, "request failed: {e}"),
        }
    }
}

impl std::error::Error for ResponseError {}
impl From<reqwest::Error> for ResponseError {
    fn from(value: reqwest::Error) -> Self {
        if value.is_timeout() {
            ResponseError::Timeout
        } else if value.is_connect() {
            ResponseError::NoConnection
        } else if value.is_decode() {
            ResponseError::Malformed(value.to_string())
        } else {
            ResponseError::Unknown(value.to_string())
        }
    }
}
