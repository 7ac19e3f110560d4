//! Multipart/form-data body construction.
//!
//! This module provides the part model and the body builder that
//! serializes parts into the exact byte framing HTTP servers expect
//! for `multipart/form-data` posts.
//!
//! # Example
//!
//! ```
//! use multipart_post::multipart::{MultipartBody, Part};
//!
//! let mut body = MultipartBody::new();
//! body.add_part(Part::form("caption", "holiday photo"));
//! body.add_part(Part::file("photo", "image/png", Some("beach.png"), vec![0x89, 0x50]));
//!
//! let bytes = body.to_bytes().expect("body serializes");
//! assert!(bytes.starts_with(format!("--{}\r\n", body.boundary()).as_bytes()));
//! ```

mod body;
mod error;
mod part;

pub use body::MultipartBody;
pub use error::BodyBuildError;
pub use part::Part;
