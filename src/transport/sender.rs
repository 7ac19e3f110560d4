//! Reqwest-backed sender driving the request/delivery cycle.

use std::time::Duration;

use futures_util::StreamExt;
use reqwest::Client;
use reqwest::header::{CONTENT_TYPE, RETRY_AFTER};
use tracing::{debug, info, instrument};

use super::constants::{CONNECT_TIMEOUT_SECS, READ_TIMEOUT_SECS};
use crate::request::{HttpRequest, RequestError};
use crate::response::NetworkResponse;
use crate::user_agent;

/// HTTP transport for sending multipart requests.
///
/// Designed to be created once and reused for multiple requests,
/// taking advantage of connection pooling. Cloning is cheap (the
/// underlying client is shared).
#[derive(Debug, Clone)]
pub struct RequestSender {
    client: Client,
}

impl Default for RequestSender {
    fn default() -> Self {
        Self::new()
    }
}

impl RequestSender {
    /// Creates a sender with default timeouts.
    ///
    /// Default configuration:
    /// - Connect timeout: 30 seconds
    /// - Read timeout: 2 minutes
    /// - Gzip decompression: enabled
    ///
    /// # Panics
    ///
    /// Panics if the HTTP client builder fails to build with the static
    /// configuration. This should never happen in practice.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn new() -> Self {
        Self::new_with_timeouts(CONNECT_TIMEOUT_SECS, READ_TIMEOUT_SECS)
    }

    /// Creates a sender with explicit timeout values.
    ///
    /// # Panics
    ///
    /// Panics if the HTTP client builder fails to build with the
    /// supplied timeout configuration.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn new_with_timeouts(connect_timeout_secs: u64, read_timeout_secs: u64) -> Self {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(connect_timeout_secs))
            .timeout(Duration::from_secs(read_timeout_secs))
            .gzip(true)
            .user_agent(user_agent::default_user_agent())
            .build()
            .expect("failed to build HTTP client with static configuration");
        Self { client }
    }

    /// Sends `request` and delivers the outcome through its hooks.
    ///
    /// Exactly one of the success/error hooks fires per sent request:
    /// - body build failure → error hook, nothing is sent
    /// - network error or timeout → error hook
    /// - non-2xx status → error hook (with any `Retry-After` value)
    /// - 2xx → the parse hook runs; its result reaches the success
    ///   hook, or a parse failure reaches the error hook
    ///
    /// A request whose outcome was already delivered drops any further
    /// delivery, so re-sending a completed request is a logged no-op.
    #[instrument(skip(self, request), fields(url = %request.url()))]
    pub async fn send<R: HttpRequest>(&self, request: &mut R) {
        match self.execute(request).await {
            Ok(response) => match request.parse_network_response(response) {
                Ok(parsed) => request.deliver_response(parsed),
                Err(source) => {
                    let url = request.url().as_str().to_string();
                    request.deliver_error(RequestError::parse(url, source));
                }
            },
            Err(error) => request.deliver_error(error),
        }
    }

    /// Builds and performs the HTTP exchange, returning the raw response.
    async fn execute<R: HttpRequest>(&self, request: &R) -> Result<NetworkResponse, RequestError> {
        let url = request.url().as_str();

        let body = request
            .body()
            .map_err(|source| RequestError::body(url, source))?;
        debug!(bytes = body.len(), "multipart body built");

        let mut builder = self
            .client
            .request(request.method().clone(), request.url().clone())
            .header(CONTENT_TYPE, request.body_content_type())
            .body(body);
        if let Some(headers) = request.headers() {
            for (name, value) in headers {
                builder = builder.header(name.as_str(), value.as_str());
            }
        }

        let response = builder.send().await.map_err(|e| {
            if e.is_timeout() {
                RequestError::timeout(url)
            } else {
                RequestError::network(url, e)
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            let retry_after = response
                .headers()
                .get(RETRY_AFTER)
                .and_then(|v| v.to_str().ok())
                .map(std::string::ToString::to_string);
            return Err(RequestError::http_status_with_retry_after(
                url,
                status.as_u16(),
                retry_after,
            ));
        }

        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.to_string(), v.to_string()))
            })
            .collect();

        let data = collect_body(response, url).await?;
        info!(status = status.as_u16(), bytes = data.len(), "response received");

        Ok(NetworkResponse {
            status: status.as_u16(),
            headers,
            data,
        })
    }
}

/// Collects the full response body by draining the chunk stream.
async fn collect_body(response: reqwest::Response, url: &str) -> Result<Vec<u8>, RequestError> {
    let mut stream = response.bytes_stream();
    let mut data = Vec::new();

    while let Some(chunk_result) = stream.next().await {
        let chunk = chunk_result.map_err(|e| RequestError::network(url, e))?;
        data.extend_from_slice(&chunk);
    }

    Ok(data)
}
