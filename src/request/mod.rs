//! Request adapter exposing multipart bodies to an HTTP transport.
//!
//! [`MultipartRequest`] wraps a [`MultipartBody`] together with a
//! method, URL, optional header overrides, and a pair of delivery
//! hooks, and implements the [`HttpRequest`] contract a transport
//! consumes. The transport owns queueing, retry, caching, and thread
//! choice; the adapter only answers the seven capability points below
//! and guarantees exactly-once delivery.
//!
//! # Example
//!
//! ```
//! use multipart_post::request::MultipartRequest;
//! use multipart_post::multipart::Part;
//!
//! let mut request = MultipartRequest::new(
//!     "https://example.com/upload",
//!     None,
//!     Box::new(|_response| {}),
//!     Box::new(|_error| {}),
//! )
//! .expect("valid URL");
//! request.add_part(Part::form("field1", "value1"));
//! ```

mod error;

pub use error::RequestError;

use std::collections::HashMap;

use reqwest::Method;
use tracing::{debug, warn};
use url::Url;

use crate::multipart::{BodyBuildError, MultipartBody, Part};
use crate::response::{NetworkResponse, ParseFailure, ParsedResponse, parse_cache_headers};

/// Success delivery hook, invoked with the parsed response.
pub type ResponseHook = Box<dyn FnOnce(ParsedResponse) + Send>;

/// Error delivery hook, invoked with the request error.
pub type ErrorHook = Box<dyn FnOnce(RequestError) + Send>;

/// Capability points a transport needs from a request.
///
/// Everything else about sending (queueing, retry, caching, thread
/// pool) belongs to the transport, not the request.
pub trait HttpRequest {
    /// HTTP method to send with.
    fn method(&self) -> &Method;

    /// Target URL.
    fn url(&self) -> &Url;

    /// Caller-supplied header overrides when present and non-empty.
    ///
    /// `None` defers to the transport's default header set.
    fn headers(&self) -> Option<&HashMap<String, String>>;

    /// Serialized request body.
    ///
    /// May be invoked multiple times per instance (e.g. on transport
    /// retry) and must be deterministic across invocations.
    ///
    /// # Errors
    ///
    /// Returns [`BodyBuildError`] when serialization fails; the
    /// transport must treat this as a request-construction failure and
    /// send nothing.
    fn body(&self) -> Result<Vec<u8>, BodyBuildError>;

    /// Value for the `Content-Type` header, matching the body framing.
    fn body_content_type(&self) -> String;

    /// Interprets a raw network response.
    ///
    /// # Errors
    ///
    /// Returns [`ParseFailure`] when response metadata cannot be
    /// interpreted; the failure is wrapped, never propagated raw.
    fn parse_network_response(
        &self,
        response: NetworkResponse,
    ) -> Result<ParsedResponse, ParseFailure>;

    /// Delivers the parsed response through the success hook.
    fn deliver_response(&mut self, response: ParsedResponse);

    /// Delivers a request error through the error hook.
    fn deliver_error(&mut self, error: RequestError);
}

/// A multipart/form-data request with callback-based delivery.
///
/// Constructed once per outgoing request: parts are accumulated with
/// [`add_part`](Self::add_part), then the transport pulls the body and
/// content type at send time and delivers the outcome through exactly
/// one of the two hooks. Adding parts after the request has been handed
/// to a transport for sending is undefined behavior.
pub struct MultipartRequest {
    method: Method,
    url: Url,
    headers: Option<HashMap<String, String>>,
    body: MultipartBody,
    on_response: Option<ResponseHook>,
    on_error: Option<ErrorHook>,
    delivered: bool,
}

impl MultipartRequest {
    /// Creates a POST request to `url`.
    ///
    /// `headers` overrides the transport's default header set when
    /// supplied non-empty. `on_response` and `on_error` receive the
    /// outcome; exactly one of them fires per sent request.
    ///
    /// # Errors
    ///
    /// Returns [`RequestError::InvalidUrl`] when `url` does not parse.
    pub fn new(
        url: &str,
        headers: Option<HashMap<String, String>>,
        on_response: ResponseHook,
        on_error: ErrorHook,
    ) -> Result<Self, RequestError> {
        Self::with_method(Method::POST, url, headers, on_response, on_error)
    }

    /// Creates a request with an explicit HTTP method.
    ///
    /// # Errors
    ///
    /// Returns [`RequestError::InvalidUrl`] when `url` does not parse.
    pub fn with_method(
        method: Method,
        url: &str,
        headers: Option<HashMap<String, String>>,
        on_response: ResponseHook,
        on_error: ErrorHook,
    ) -> Result<Self, RequestError> {
        let url = Url::parse(url).map_err(|_| RequestError::invalid_url(url))?;
        Ok(Self {
            method,
            url,
            headers,
            body: MultipartBody::new(),
            on_response: Some(on_response),
            on_error: Some(on_error),
            delivered: false,
        })
    }

    /// Adds a part to the request; insertion order is body order.
    ///
    /// An absent part (`None`) is a silent no-op, not an error.
    pub fn add_part(&mut self, part: impl Into<Option<Part>>) {
        self.body.add_part(part);
    }

    /// The underlying multipart body.
    #[must_use]
    pub fn multipart(&self) -> &MultipartBody {
        &self.body
    }

    /// Whether an outcome has already been delivered through a hook.
    #[must_use]
    pub fn is_delivered(&self) -> bool {
        self.delivered
    }
}

impl HttpRequest for MultipartRequest {
    fn method(&self) -> &Method {
        &self.method
    }

    fn url(&self) -> &Url {
        &self.url
    }

    fn headers(&self) -> Option<&HashMap<String, String>> {
        self.headers.as_ref().filter(|headers| !headers.is_empty())
    }

    fn body(&self) -> Result<Vec<u8>, BodyBuildError> {
        self.body.to_bytes()
    }

    fn body_content_type(&self) -> String {
        self.body.content_type()
    }

    fn parse_network_response(
        &self,
        response: NetworkResponse,
    ) -> Result<ParsedResponse, ParseFailure> {
        let cache = parse_cache_headers(&response)?;
        Ok(ParsedResponse { response, cache })
    }

    fn deliver_response(&mut self, response: ParsedResponse) {
        if self.delivered {
            warn!(url = %self.url, "response arrived after an outcome was already delivered, dropping");
            return;
        }
        self.delivered = true;
        if let Some(hook) = self.on_response.take() {
            debug!(url = %self.url, status = response.response.status, "delivering response");
            hook(response);
        }
    }

    fn deliver_error(&mut self, error: RequestError) {
        if self.delivered {
            warn!(url = %self.url, %error, "error arrived after an outcome was already delivered, dropping");
            return;
        }
        self.delivered = true;
        if let Some(hook) = self.on_error.take() {
            debug!(url = %self.url, %error, "delivering error");
            hook(error);
        }
    }
}
