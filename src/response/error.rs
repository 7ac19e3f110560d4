//! Error types for response interpretation.

use std::num::ParseIntError;

use thiserror::Error;

/// Errors that can occur while interpreting cache metadata from a raw
/// response.
///
/// Parse failures wrap their underlying cause and are surfaced through
/// the request's error delivery hook; they are never propagated raw
/// across the transport boundary.
#[derive(Debug, Error)]
pub enum ParseFailure {
    /// A numeric `Cache-Control` directive failed to parse.
    #[error("malformed Cache-Control directive {directive:?}: {source}")]
    CacheControl {
        /// The directive token as received.
        directive: String,
        /// The underlying numeric parse error.
        #[source]
        source: ParseIntError,
    },
}

impl ParseFailure {
    /// Creates a cache-control parse failure for the offending directive.
    pub fn cache_control(directive: impl Into<String>, source: ParseIntError) -> Self {
        Self::CacheControl {
            directive: directive.into(),
            source,
        }
    }
}
