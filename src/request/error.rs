//! Error types for request construction and delivery.
//!
//! Everything the error delivery hook can surface lives in one enum,
//! providing context-rich messages for debugging and user feedback.

use thiserror::Error;

use crate::multipart::BodyBuildError;
use crate::response::ParseFailure;

/// Errors delivered through a request's error hook.
#[derive(Debug, Error)]
pub enum RequestError {
    /// The provided URL is malformed or invalid.
    #[error("invalid URL: {url}")]
    InvalidUrl {
        /// The invalid URL string.
        url: String,
    },

    /// The multipart body failed to serialize; nothing was sent.
    #[error("failed to build multipart body for {url}: {source}")]
    Body {
        /// The URL the request was destined for.
        url: String,
        /// The underlying build error.
        #[source]
        source: BodyBuildError,
    },

    /// Network-level error (DNS resolution, connection refused, TLS errors, etc.)
    #[error("network error sending {url}: {source}")]
    Network {
        /// The URL that failed to send.
        url: String,
        /// The underlying network error.
        #[source]
        source: reqwest::Error,
    },

    /// Request timed out before a response arrived.
    #[error("timeout sending {url}")]
    Timeout {
        /// The URL that timed out.
        url: String,
    },

    /// HTTP error response (4xx client errors, 5xx server errors).
    #[error("HTTP {status} from {url}")]
    HttpStatus {
        /// The URL that returned an error status.
        url: String,
        /// The HTTP status code.
        status: u16,
        /// The Retry-After header value, if present (for 429 responses).
        retry_after: Option<String>,
    },

    /// Interpreting the raw response failed.
    #[error("failed to parse response from {url}: {source}")]
    Parse {
        /// The URL whose response failed to parse.
        url: String,
        /// The underlying parse failure.
        #[source]
        source: ParseFailure,
    },
}

impl RequestError {
    /// Creates an invalid URL error.
    pub fn invalid_url(url: impl Into<String>) -> Self {
        Self::InvalidUrl { url: url.into() }
    }

    /// Creates a body build error.
    pub fn body(url: impl Into<String>, source: BodyBuildError) -> Self {
        Self::Body {
            url: url.into(),
            source,
        }
    }

    /// Creates a network error from a reqwest error.
    pub fn network(url: impl Into<String>, source: reqwest::Error) -> Self {
        Self::Network {
            url: url.into(),
            source,
        }
    }

    /// Creates a timeout error.
    pub fn timeout(url: impl Into<String>) -> Self {
        Self::Timeout { url: url.into() }
    }

    /// Creates an HTTP status error with a Retry-After header value.
    pub fn http_status_with_retry_after(
        url: impl Into<String>,
        status: u16,
        retry_after: Option<String>,
    ) -> Self {
        Self::HttpStatus {
            url: url.into(),
            status,
            retry_after,
        }
    }

    /// Creates a response parse error.
    pub fn parse(url: impl Into<String>, source: ParseFailure) -> Self {
        Self::Parse {
            url: url.into(),
            source,
        }
    }
}

// Note on From trait implementations:
// We intentionally do NOT implement `From<reqwest::Error>` or
// `From<BodyBuildError>` because every variant requires the request URL
// for context, which the source errors don't carry. The helper
// constructors are the pattern here.
