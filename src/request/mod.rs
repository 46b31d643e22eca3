//! HTTP request client with a strict redirect budget.
//!
//! # Features
//!
//! - Manual redirect following for 301/302/303/307 with an exact hop budget
//! - HEAD requests only follow redirects when a limit is set explicitly
//! - Request headers passed through as given (including empty values)
//! - Streaming downloads to a caller-chosen path or a unique temp file
//! - Per-request timeout covering header arrival and each body read
//! - Explicit [`TransportPreference`] per client instead of global switches
//!
//! # Example
//!
//! ```no_run
//! use fetcher_core::request::{HttpClient, RequestOptions};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = HttpClient::new();
//! let response = client
//!     .request("https://example.com/moved", RequestOptions::default().with_redirect_limit(0))
//!     .await?;
//! assert!(response.is_redirect());
//! # Ok(())
//! # }
//! ```

mod client;
mod config;
pub mod constants;
mod error;
mod filename;
mod options;
pub mod redirect;
mod response;

pub use client::HttpClient;
pub use config::{ClientConfig, TransportPreference};
pub use error::{ErrorKind, RequestError};
pub use options::{Method, ParseMethodError, RequestHeaders, RequestOptions};
pub use response::Response;
