//! Multipart/form-data body builder.
//!
//! Serializes an ordered part collection into the byte sequence an HTTP
//! server expects for a `multipart/form-data` post: a delimiter line per
//! part, a `Content-Disposition` header block, the raw payload bytes,
//! and a final closing delimiter.

use std::io::Write;

use tracing::debug;

use super::error::BodyBuildError;
use super::part::Part;

/// Delimiter prefix for multipart section lines.
const TWO_DASHES: &str = "--";

/// Line terminator used throughout multipart framing.
const CRLF: &str = "\r\n";

/// An ordered collection of parts plus the boundary that frames them.
///
/// The boundary is fixed at construction, so serialization is
/// deterministic: repeated [`to_bytes`](Self::to_bytes) calls on an
/// unmodified body yield byte-identical output. One `MultipartBody` is
/// intended per outgoing request.
///
/// The boundary token is random per instance. Uniqueness against part
/// content is best-effort: a payload that happens to contain the
/// boundary corrupts framing, which is a known theoretical hazard of
/// the format rather than a handled error.
#[derive(Debug, Clone)]
pub struct MultipartBody {
    boundary: String,
    parts: Vec<Part>,
}

impl MultipartBody {
    /// Creates an empty body with a freshly generated boundary.
    #[must_use]
    pub fn new() -> Self {
        Self::with_boundary(generate_boundary())
    }

    /// Creates an empty body with an explicit boundary token.
    ///
    /// Primarily useful for deterministic tests. The token must not
    /// appear inside any part's payload.
    #[must_use]
    pub fn with_boundary(boundary: impl Into<String>) -> Self {
        Self {
            boundary: boundary.into(),
            parts: Vec::new(),
        }
    }

    /// Appends a part; insertion order is serialization order.
    ///
    /// An absent part (`None`) is a silent no-op, not an error.
    pub fn add_part(&mut self, part: impl Into<Option<Part>>) {
        if let Some(part) = part.into() {
            self.parts.push(part);
        }
    }

    /// The boundary token framing this body.
    #[must_use]
    pub fn boundary(&self) -> &str {
        &self.boundary
    }

    /// The parts added so far, in insertion order.
    #[must_use]
    pub fn parts(&self) -> &[Part] {
        &self.parts
    }

    /// Value for the `Content-Type` header matching this body's framing.
    ///
    /// Exactly `multipart/form-data;boundary=<boundary>` — no space
    /// after the semicolon, boundary unquoted.
    #[must_use]
    pub fn content_type(&self) -> String {
        format!("multipart/form-data;boundary={}", self.boundary)
    }

    /// Serializes all parts, in insertion order, into the full body.
    ///
    /// Each part is emitted as a delimiter line, its header block, the
    /// raw payload bytes verbatim (no escaping or transfer encoding),
    /// and a trailing CRLF. The closing delimiter
    /// `--<boundary>--\r\n` follows the last part.
    ///
    /// # Errors
    ///
    /// Returns [`BodyBuildError`] if writing to the body buffer fails.
    /// No partial body is returned on failure.
    pub fn to_bytes(&self) -> Result<Vec<u8>, BodyBuildError> {
        let mut buf = Vec::new();

        for part in &self.parts {
            write!(buf, "{TWO_DASHES}{}{CRLF}", self.boundary).map_err(BodyBuildError::write)?;
            match part {
                Part::Form { name, .. } => {
                    write!(
                        buf,
                        "Content-Disposition: form-data; name=\"{name}\"{CRLF}{CRLF}"
                    )
                    .map_err(BodyBuildError::write)?;
                }
                Part::File {
                    name,
                    mime_type,
                    filename,
                    ..
                } => {
                    let filename = filename.as_deref().unwrap_or("");
                    write!(
                        buf,
                        "Content-Disposition: form-data; name=\"{name}\"; filename=\"{filename}\"{CRLF}"
                    )
                    .map_err(BodyBuildError::write)?;
                    write!(buf, "Content-type: {mime_type}{CRLF}{CRLF}")
                        .map_err(BodyBuildError::write)?;
                }
            }
            buf.write_all(part.data()).map_err(BodyBuildError::write)?;
            buf.write_all(CRLF.as_bytes()).map_err(BodyBuildError::write)?;
        }

        write!(buf, "{TWO_DASHES}{}{TWO_DASHES}{CRLF}", self.boundary)
            .map_err(BodyBuildError::write)?;

        debug!(
            parts = self.parts.len(),
            bytes = buf.len(),
            "serialized multipart body"
        );
        Ok(buf)
    }
}

impl Default for MultipartBody {
    fn default() -> Self {
        Self::new()
    }
}

/// Generates a random boundary token as 16 hex digits.
///
/// A random 64-bit value avoids the collision-with-clock-resolution
/// hazard of time-derived boundaries; uniqueness across concurrent
/// requests remains best-effort.
fn generate_boundary() -> String {
    format!("{:016x}", rand::random::<u64>())
}
