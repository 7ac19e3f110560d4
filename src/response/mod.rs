//! Raw and parsed network response types.
//!
//! The transport hands back a [`NetworkResponse`] snapshot (status,
//! headers, body bytes); the request adapter pairs it with cache
//! metadata extracted by [`cache::parse_cache_headers`] to form a
//! [`ParsedResponse`]. No content decoding happens at this layer.

mod cache;
mod error;

pub use cache::{CacheMetadata, parse_cache_headers};
pub use error::ParseFailure;

use std::collections::HashMap;

/// Raw network response snapshot handed back by the transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkResponse {
    /// HTTP status code.
    pub status: u16,
    /// Response headers as received.
    pub headers: HashMap<String, String>,
    /// Raw response body bytes.
    pub data: Vec<u8>,
}

impl NetworkResponse {
    /// Looks up a header value by name, case-insensitively.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// A raw response paired with its cache metadata.
///
/// This is a byte-passthrough wrapper: the raw response is carried
/// unchanged, with no JSON/XML decoding attempted.
#[derive(Debug, Clone)]
pub struct ParsedResponse {
    /// The raw response, unchanged.
    pub response: NetworkResponse,
    /// Cache metadata; `None` when the response is not cacheable.
    pub cache: Option<CacheMetadata>,
}
