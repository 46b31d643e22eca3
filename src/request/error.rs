//! Error types for the request module.
//!
//! Every failure of a request call surfaces as a [`RequestError`] value.
//! Variants carry the URL or path they concern so messages are actionable
//! without extra context from the caller.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while issuing a request.
#[derive(Debug, Error)]
pub enum RequestError {
    /// The redirect chain needed more hops than the configured limit.
    #[error("too many redirects requesting {url} (limit {limit})")]
    RedirectLimitExceeded {
        /// The URL whose response asked for one redirect too many.
        url: String,
        /// The redirect limit in effect for the call.
        limit: u32,
    },

    /// Network-level error (DNS resolution, connection refused, reset, TLS errors).
    #[error("network error requesting {url}: {source}")]
    Network {
        /// The URL that failed.
        url: String,
        /// The underlying transport error.
        #[source]
        source: reqwest::Error,
    },

    /// No response headers or body bytes arrived within the configured timeout.
    #[error("timeout requesting {url}")]
    Timeout {
        /// The URL that timed out.
        url: String,
    },

    /// The provided URL is malformed, relative, or uses an unsupported scheme.
    #[error("invalid URL: {url}")]
    InvalidUrl {
        /// The invalid URL string.
        url: String,
    },

    /// The request timeout must be a positive duration.
    #[error("invalid timeout {timeout_ms}ms requesting {url}: must be positive")]
    InvalidTimeout {
        /// The URL of the rejected request.
        url: String,
        /// The rejected timeout in milliseconds.
        timeout_ms: u128,
    },

    /// A request header name or value is not valid on the wire.
    #[error("invalid request header: {name}")]
    InvalidHeader {
        /// The offending header name.
        name: String,
    },

    /// The same header name (ignoring case) was supplied twice.
    #[error("duplicate request header: {name}")]
    DuplicateHeader {
        /// The repeated header name.
        name: String,
    },

    /// File system error while writing a streamed download.
    #[error("IO error writing to {path}: {source}")]
    Io {
        /// The file path where the error occurred.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// A streamed download ended with a different size than the server advertised.
    #[error("incomplete download to {path}: expected {expected_bytes} bytes, got {actual_bytes}")]
    Incomplete {
        /// Download path (already removed when this error is returned).
        path: PathBuf,
        /// Size advertised by `Content-Length`.
        expected_bytes: u64,
        /// Bytes actually written.
        actual_bytes: u64,
    },
}

/// Coarse classification of a [`RequestError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Redirect budget exhausted.
    RedirectLimit,
    /// Connection, DNS, TLS or protocol failure, including truncated bodies.
    Network,
    /// No progress within the timeout window.
    Timeout,
    /// The caller supplied an unusable URL or header.
    InvalidInput,
    /// Local file system failure.
    Io,
}

impl RequestError {
    /// Creates a redirect-limit error.
    pub fn redirect_limit_exceeded(url: impl Into<String>, limit: u32) -> Self {
        Self::RedirectLimitExceeded {
            url: url.into(),
            limit,
        }
    }

    /// Creates a network error from a reqwest error.
    pub fn network(url: impl Into<String>, source: reqwest::Error) -> Self {
        Self::Network {
            url: url.into(),
            source,
        }
    }

    /// Maps a transport error, promoting reqwest timeouts to [`RequestError::Timeout`].
    pub fn from_transport(url: impl Into<String>, source: reqwest::Error) -> Self {
        if source.is_timeout() {
            Self::timeout(url)
        } else {
            Self::network(url, source)
        }
    }

    /// Creates a timeout error.
    pub fn timeout(url: impl Into<String>) -> Self {
        Self::Timeout { url: url.into() }
    }

    /// Creates an invalid URL error.
    pub fn invalid_url(url: impl Into<String>) -> Self {
        Self::InvalidUrl { url: url.into() }
    }

    /// Creates an invalid timeout error.
    pub fn invalid_timeout(url: impl Into<String>, timeout: std::time::Duration) -> Self {
        Self::InvalidTimeout {
            url: url.into(),
            timeout_ms: timeout.as_millis(),
        }
    }

    /// Creates an invalid header error.
    pub fn invalid_header(name: impl Into<String>) -> Self {
        Self::InvalidHeader { name: name.into() }
    }

    /// Creates a duplicate header error.
    pub fn duplicate_header(name: impl Into<String>) -> Self {
        Self::DuplicateHeader { name: name.into() }
    }

    /// Creates an IO error.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Creates a size mismatch error for a streamed download.
    pub fn incomplete(path: impl Into<PathBuf>, expected_bytes: u64, actual_bytes: u64) -> Self {
        Self::Incomplete {
            path: path.into(),
            expected_bytes,
            actual_bytes,
        }
    }

    /// Returns the coarse kind of this error.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::RedirectLimitExceeded { .. } => ErrorKind::RedirectLimit,
            Self::Network { .. } | Self::Incomplete { .. } => ErrorKind::Network,
            Self::Timeout { .. } => ErrorKind::Timeout,
            Self::InvalidUrl { .. }
            | Self::InvalidTimeout { .. }
            | Self::InvalidHeader { .. }
            | Self::DuplicateHeader { .. } => ErrorKind::InvalidInput,
            Self::Io { .. } => ErrorKind::Io,
        }
    }

    /// Returns true if the redirect budget was exhausted.
    #[must_use]
    pub fn is_redirect_limit(&self) -> bool {
        self.kind() == ErrorKind::RedirectLimit
    }

    /// Returns true if the request timed out.
    #[must_use]
    pub fn is_timeout(&self) -> bool {
        self.kind() == ErrorKind::Timeout
    }
}

// No `From<reqwest::Error>` or `From<std::io::Error>`: every variant needs
// the URL or path, which the source errors do not carry.
