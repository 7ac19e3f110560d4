//! HTTP transport for sending adapted requests.
//!
//! This module provides [`RequestSender`], a reqwest-backed transport
//! that drives the full request cycle: build the body, send it with the
//! matching content type, collect the raw response, run the request's
//! parse hook, and deliver the outcome through exactly one of the
//! request's hooks.
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
//!     Box::new(|response| println!("status {}", response.response.status)),
//!     Box::new(|error| eprintln!("{error}")),
//! )?;
//! request.add_part(Part::form("field1", "value1"));
//!
//! let sender = RequestSender::new();
//! sender.send(&mut request).await;
//! # Ok(())
//! # }
//! ```

mod constants;
mod sender;

pub use constants::{CONNECT_TIMEOUT_SECS, READ_TIMEOUT_SECS};
pub use sender::RequestSender;
