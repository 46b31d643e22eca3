//! Defaults for request options and client configuration.

/// Redirects followed when the caller does not set a limit (non-HEAD methods).
pub const DEFAULT_REDIRECT_LIMIT: u32 = 5;

/// Per-request timeout in seconds, applied to header arrival and to each body read.
pub const DEFAULT_TIMEOUT_SECS: u64 = 5;

/// Default HTTP connect timeout (30 seconds).
pub const CONNECT_TIMEOUT_SECS: u64 = 30;

/// Status codes that trigger redirect handling.
pub const REDIRECT_STATUSES: [u16; 4] = [301, 302, 303, 307];

/// File name used for streamed downloads when the URL has no usable path segment.
pub const FALLBACK_DOWNLOAD_NAME: &str = "download.tmp";
