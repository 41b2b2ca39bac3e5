use super::common::HTTPError;
use std::time::Duration;

/// A simple wrapper around `reqwest::Client` used to manage HTTP requests
/// with a preconfigured base URL and default settings.
///
/// This client is used for making REST API calls to the fleet-control system.
/// Every request is bounded by the timeout given at construction.
#[derive(Debug)]
pub(crate) struct HTTPClient {
    /// The underlying `reqwest::Client` used to perform HTTP requests.
    client: reqwest::Client,
    /// Base URL for the API, prepended to all endpoint paths.
    base_url: String,
}

impl HTTPClient {
    /// Constructs a new `HTTPClient` with the given base URL.
    ///
    /// # Arguments
    /// * `base_url` – The root URL for all HTTP requests (e.g., `"http://localhost:8080"`).
    /// * `timeout` – Upper bound for a whole request, connect included.
    ///
    /// # Returns
    /// A configured `HTTPClient`, or an error if the TLS/connector backend cannot be set up.
    pub(crate) fn new(base_url: &str, timeout: Duration) -> Result<HTTPClient, HTTPError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .connect_timeout(timeout)
            .build()
            .map_err(|e| HTTPError::ClientSetup(e.to_string()))?;
        Ok(HTTPClient { client, base_url: base_url.trim_end_matches('/').to_string() })
    }

    /// Returns a reference to the internal `reqwest::Client`.
    pub(super) fn client(&self) -> &reqwest::Client { &self.client }
    /// Returns the base URL that the client was initialized with.
    pub(crate) fn url(&self) -> &str { self.base_url.as_str() }
}
