use super::super::{
    common::HTTPError,
    http_client::HTTPClient,
    http_response::response_common::{HTTPResponseType, read_response},
};

/// HTTP methods used against the fleet-control API.
#[derive(Debug, Clone, Copy)]
pub(crate) enum HTTPRequestMethod {
    Post,
}

pub(crate) trait HTTPRequestType {
    /// Type of the expected response.
    type Response: HTTPResponseType;
    /// `str` object representing the specific endpoint.
    fn endpoint(&self) -> &'static str;
    /// The corresponding HTTP Request Method.
    fn request_method(&self) -> HTTPRequestMethod;
    /// Header parameters sent with every request of this type.
    fn header_params(&self) -> reqwest::header::HeaderMap {
        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert(
            reqwest::header::CONTENT_TYPE,
            reqwest::header::HeaderValue::from_static("application/json"),
        );
        headers
    }
    /// Creates the request builder with url, method and headers set.
    fn get_request_base(&self, client: &HTTPClient) -> reqwest::RequestBuilder {
        let url = format!("{}{}", client.url(), self.endpoint());
        let builder = match self.request_method() {
            HTTPRequestMethod::Post => client.client().post(url),
        };
        builder.headers(self.header_params())
    }
}

pub(crate) trait JSONBodyHTTPRequestType: HTTPRequestType {
    /// The type of the json body.
    type Body: serde::Serialize;
    /// Returns the serializable object.
    fn body(&self) -> &Self::Body;
}

/// Sends a JSON body request and parses its response.
///
/// # Arguments
/// * `request` – The request object providing endpoint, method and body.
/// * `client` – The shared HTTP client.
///
/// # Returns
/// The parsed response or an [`HTTPError`] if the transport failed, the
/// status code was not accepted or the body could not be parsed.
pub(crate) async fn send_json_request<T>(request: &T, client: &HTTPClient) -> Result<T::Response, HTTPError>
where T: JSONBodyHTTPRequestType {
    let response = request.get_request_base(client).json(request.body()).send().await?;
    Ok(read_response::<T::Response>(response).await?)
}
