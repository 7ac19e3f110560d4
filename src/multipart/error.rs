//! Error types for multipart body serialization.

use thiserror::Error;

/// Errors that can occur while serializing a multipart body.
///
/// A failed build must never be mistaken for a valid empty body: the
/// builder returns this error instead of partial bytes, and the
/// transport converts it into error delivery without sending anything.
#[derive(Debug, Error)]
pub enum BodyBuildError {
    /// Writing to the in-memory body buffer failed.
    #[error("failed to write multipart body buffer: {source}")]
    Write {
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },
}

impl BodyBuildError {
    /// Creates a write error from an IO error.
    pub fn write(source: std::io::Error) -> Self {
        Self::Write { source }
    }
}
