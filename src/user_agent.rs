//! Shared User-Agent string for transport traffic.

/// Default User-Agent for sent requests (identifies the library).
#[must_use]
pub(crate) fn default_user_agent() -> String {
    let version = env!("CARGO_PKG_VERSION");
    format!("multipart-post/{version}")
}
