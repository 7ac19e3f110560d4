//! Constants for the transport module (timeouts).

/// Default HTTP connect timeout (30 seconds).
pub const CONNECT_TIMEOUT_SECS: u64 = 30;

/// Default HTTP read timeout (2 minutes; bodies are fully buffered).
pub const READ_TIMEOUT_SECS: u64 = 120;
