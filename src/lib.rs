//! Fetcher Core Library
//!
//! An HTTP request client with a strict redirect budget and streaming
//! downloads. A single call issues a request, follows redirects up to the
//! configured limit and returns either a captured [`Response`] or a
//! [`RequestError`].
//!
//! # Architecture
//!
//! - [`request`] - the client, its options, results and redirect policy
//!
//! # Example
//!
//! ```no_run
//! use fetcher_core::{HttpClient, RequestOptions};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = HttpClient::new();
//! let response = client
//!     .request("https://example.com/", RequestOptions::default().with_redirect_limit(3))
//!     .await?;
//! println!("HTTP {}", response.status);
//! # Ok(())
//! # }
//! ```

// Clippy lints - strict for library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod request;
#[cfg(test)]
pub(crate) mod test_support;
pub(crate) mod user_agent;

// Re-export commonly used types
pub use request::{
    ClientConfig, ErrorKind, HttpClient, Method, RequestError, RequestHeaders, RequestOptions,
    Response, TransportPreference,
};
