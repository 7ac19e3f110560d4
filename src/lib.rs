//! Multipart Request Library
//!
//! This library builds correctly-framed `multipart/form-data` HTTP request
//! bodies from an ordered collection of parts (plain form fields and file
//! attachments), and exposes them to an HTTP transport together with the
//! matching `Content-Type` header.
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//! - [`multipart`] - Part model and byte-exact body serialization
//! - [`request`] - Request adapter with response/error delivery hooks
//! - [`response`] - Raw response snapshot and cache-header interpretation
//! - [`transport`] - Reqwest-backed sender driving the request cycle
//!
//! # Example
//!
//! ```no_run
//! use multipart_post::{MultipartRequest, Part, RequestSender};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let mut request = MultipartRequest::new(
//!     "https://example.com/upload",
//!     None,
//!     Box::new(|response| println!("{} bytes", response.response.data.len())),
//!     Box::new(|error| eprintln!("upload failed: {error}")),
//! )?;
//! request.add_part(Part::form("caption", "holiday photo"));
//! request.add_part(Part::file("photo", "image/png", Some("beach.png"), vec![0x89, 0x50]));
//!
//! let sender = RequestSender::new();
//! sender.send(&mut request).await;
//! # Ok(())
//! # }
//! ```

// Clippy lints - strict for library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod multipart;
pub mod request;
pub mod response;
pub mod transport;

mod user_agent;

// Re-export commonly used types
pub use multipart::{BodyBuildError, MultipartBody, Part};
pub use request::{ErrorHook, HttpRequest, MultipartRequest, RequestError, ResponseHook};
pub use response::{CacheMetadata, NetworkResponse, ParseFailure, ParsedResponse};
pub use transport::RequestSender;
