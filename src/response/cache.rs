//! Cache metadata extraction from raw response headers.
//!
//! Interprets `Cache-Control`, `Expires`, `Date`, and `ETag` into
//! expiry points a caching layer can act on. `no-cache`/`no-store`
//! mark the response uncacheable; `max-age` (with optional
//! `stale-while-revalidate` and `must-revalidate`) takes precedence
//! over the `Expires`/`Date` fallback.

use std::time::{Duration, SystemTime};

use tracing::warn;

use super::NetworkResponse;
use super::error::ParseFailure;

/// Cache metadata extracted from a response's headers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheMetadata {
    /// `ETag` header value, verbatim.
    pub etag: Option<String>,
    /// Server `Date` header, when it parsed.
    pub server_date: Option<SystemTime>,
    /// Point after which the entry needs refreshing (may still be served).
    pub soft_expiry: SystemTime,
    /// Point after which the entry is fully expired.
    pub expiry: SystemTime,
}

/// Extracts cache metadata from a raw response.
///
/// Returns `Ok(None)` when the response is explicitly uncacheable
/// (`no-cache` / `no-store`). Responses without any freshness headers
/// yield metadata that is already expired rather than no metadata, so
/// callers can still use the `ETag` for validation.
///
/// Unparseable `Date`/`Expires` values are tolerated as absent,
/// matching the lenient handling of sloppy date headers in the wild.
///
/// # Errors
///
/// Returns [`ParseFailure`] when a numeric `Cache-Control` directive
/// (`max-age`, `stale-while-revalidate`) is malformed.
pub fn parse_cache_headers(
    response: &NetworkResponse,
) -> Result<Option<CacheMetadata>, ParseFailure> {
    let now = SystemTime::now();

    let server_date = response.header("Date").and_then(parse_http_date);

    let mut max_age: Option<u64> = None;
    let mut stale_while_revalidate: u64 = 0;
    let mut must_revalidate = false;
    let mut has_cache_control = false;

    if let Some(cache_control) = response.header("Cache-Control") {
        has_cache_control = true;
        for token in cache_control.split(',').map(str::trim) {
            if token == "no-cache" || token == "no-store" {
                return Ok(None);
            }
            if let Some(value) = token.strip_prefix("max-age=") {
                max_age = Some(
                    value
                        .parse()
                        .map_err(|source| ParseFailure::cache_control(token, source))?,
                );
            } else if let Some(value) = token.strip_prefix("stale-while-revalidate=") {
                stale_while_revalidate = value
                    .parse()
                    .map_err(|source| ParseFailure::cache_control(token, source))?;
            } else if token == "must-revalidate" || token == "proxy-revalidate" {
                must_revalidate = true;
            }
        }
    }

    let server_expires = response.header("Expires").and_then(parse_http_date);
    let etag = response.header("ETag").map(ToString::to_string);

    let (soft_expiry, expiry) = if has_cache_control {
        let soft = now + Duration::from_secs(max_age.unwrap_or(0));
        let hard = if must_revalidate {
            soft
        } else {
            soft + Duration::from_secs(stale_while_revalidate)
        };
        (soft, hard)
    } else if let (Some(date), Some(expires)) = (server_date, server_expires) {
        // Freshness lifetime is the server-side difference; a stale
        // Expires (before Date) yields an already-expired entry.
        let lifetime = expires.duration_since(date).unwrap_or(Duration::ZERO);
        (now + lifetime, now + lifetime)
    } else {
        (now, now)
    };

    Ok(Some(CacheMetadata {
        etag,
        server_date,
        soft_expiry,
        expiry,
    }))
}

fn parse_http_date(value: &str) -> Option<SystemTime> {
    match httpdate::parse_http_date(value) {
        Ok(time) => Some(time),
        Err(error) => {
            warn!(value, %error, "unparseable HTTP date header, treating as absent");
            None
        }
    }
}
