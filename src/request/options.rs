//! Per-call request options: method, redirect budget, headers, timeout and
//! streaming destination.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use reqwest::header::{HeaderName, HeaderValue};
use serde::{Deserialize, Serialize};

use super::constants::{DEFAULT_REDIRECT_LIMIT, DEFAULT_TIMEOUT_SECS};
use super::error::RequestError;

/// HTTP request method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Method {
    #[default]
    Get,
    Head,
    Post,
    Put,
    Delete,
    Patch,
    Options,
}

impl Method {
    /// Returns the canonical upper-case token.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Head => "HEAD",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
            Self::Patch => "PATCH",
            Self::Options => "OPTIONS",
        }
    }

    pub(crate) fn to_reqwest(self) -> reqwest::Method {
        match self {
            Self::Get => reqwest::Method::GET,
            Self::Head => reqwest::Method::HEAD,
            Self::Post => reqwest::Method::POST,
            Self::Put => reqwest::Method::PUT,
            Self::Delete => reqwest::Method::DELETE,
            Self::Patch => reqwest::Method::PATCH,
            Self::Options => reqwest::Method::OPTIONS,
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown method token.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unsupported HTTP method: {0}")]
pub struct ParseMethodError(String);

impl FromStr for Method {
    type Err = ParseMethodError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "GET" => Ok(Self::Get),
            "HEAD" => Ok(Self::Head),
            "POST" => Ok(Self::Post),
            "PUT" => Ok(Self::Put),
            "DELETE" => Ok(Self::Delete),
            "PATCH" => Ok(Self::Patch),
            "OPTIONS" => Ok(Self::Options),
            _ => Err(ParseMethodError(s.to_string())),
        }
    }
}

/// Request headers with case-insensitive, duplicate-free names.
///
/// Insertion order is preserved on the wire. Values are sent as given,
/// including the empty string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestHeaders {
    entries: Vec<(HeaderName, HeaderValue)>,
}

impl RequestHeaders {
    /// Creates an empty header set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a header set from name/value pairs.
    ///
    /// # Errors
    ///
    /// Returns [`RequestError::InvalidHeader`] for a name or value that cannot
    /// be sent, or [`RequestError::DuplicateHeader`] when a name repeats.
    pub fn from_pairs<I, K, V>(pairs: I) -> Result<Self, RequestError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut headers = Self::new();
        for (name, value) in pairs {
            headers.insert(name.as_ref(), value.as_ref())?;
        }
        Ok(headers)
    }

    /// Adds a header.
    ///
    /// # Errors
    ///
    /// Returns [`RequestError::InvalidHeader`] for a name or value that cannot
    /// be sent, or [`RequestError::DuplicateHeader`] when the name (ignoring
    /// case) is already present.
    pub fn insert(&mut self, name: &str, value: &str) -> Result<(), RequestError> {
        let header_name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|_| RequestError::invalid_header(name))?;
        let header_value =
            HeaderValue::from_str(value).map_err(|_| RequestError::invalid_header(name))?;
        if self.contains(header_name.as_str()) {
            return Err(RequestError::duplicate_header(name));
        }
        self.entries.push((header_name, header_value));
        Ok(())
    }

    /// Returns true if a header with this name (ignoring case) is present.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.entries
            .iter()
            .any(|(existing, _)| existing.as_str().eq_ignore_ascii_case(name))
    }

    /// Looks up a header value by name, ignoring case.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(existing, _)| existing.as_str().eq_ignore_ascii_case(name))
            .and_then(|(_, value)| value.to_str().ok())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = (&HeaderName, &HeaderValue)> {
        self.entries.iter().map(|(name, value)| (name, value))
    }
}

/// Options for a single [`HttpClient::request`](super::HttpClient::request) call.
///
/// Builder methods consume and return the options:
///
/// ```
/// use fetcher_core::{Method, RequestOptions};
///
/// let options = RequestOptions::default()
///     .with_method(Method::Head)
///     .with_redirect_limit(5);
/// assert_eq!(options.effective_redirect_limit(), 5);
/// ```
#[derive(Debug, Clone)]
pub struct RequestOptions {
    /// Request method (default GET).
    pub method: Method,
    /// Explicit redirect limit; `None` selects the per-method default.
    pub redirect_limit: Option<u32>,
    /// Headers sent on every hop of the chain.
    pub headers: RequestHeaders,
    /// Maximum wait for response headers and between body chunks.
    pub timeout: Duration,
    /// Write the terminal response body to a file instead of memory.
    pub stream_to_file: bool,
    /// Streaming destination; a unique temp file is created when `None`.
    pub destination_path: Option<PathBuf>,
    /// Request body.
    pub body: Option<Vec<u8>>,
    /// Per-call User-Agent override.
    pub user_agent: Option<String>,
}

impl Default for RequestOptions {
    fn default() -> Self {
        Self {
            method: Method::Get,
            redirect_limit: None,
            headers: RequestHeaders::new(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            stream_to_file: false,
            destination_path: None,
            body: None,
            user_agent: None,
        }
    }
}

impl RequestOptions {
    /// Default options for a HEAD request.
    #[must_use]
    pub fn head() -> Self {
        Self::default().with_method(Method::Head)
    }

    #[must_use]
    pub fn with_method(mut self, method: Method) -> Self {
        self.method = method;
        self
    }

    /// Sets an explicit redirect limit. Zero returns redirect responses unfollowed.
    #[must_use]
    pub fn with_redirect_limit(mut self, limit: u32) -> Self {
        self.redirect_limit = Some(limit);
        self
    }

    #[must_use]
    pub fn with_headers(mut self, headers: RequestHeaders) -> Self {
        self.headers = headers;
        self
    }

    /// Adds one header.
    ///
    /// # Errors
    ///
    /// Same as [`RequestHeaders::insert`].
    pub fn with_header(mut self, name: &str, value: &str) -> Result<Self, RequestError> {
        self.headers.insert(name, value)?;
        Ok(self)
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Streams the body to a uniquely named temp file.
    #[must_use]
    pub fn with_stream_to_file(mut self, stream: bool) -> Self {
        self.stream_to_file = stream;
        self
    }

    /// Streams the body to `path`, creating or truncating it.
    #[must_use]
    pub fn with_destination(mut self, path: impl Into<PathBuf>) -> Self {
        self.stream_to_file = true;
        self.destination_path = Some(path.into());
        self
    }

    #[must_use]
    pub fn with_body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = Some(body.into());
        self
    }

    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Redirect limit applied to this call.
    ///
    /// An explicit limit always wins. Without one, HEAD requests get 0 (the
    /// redirect response is returned as-is) and every other method gets
    /// [`DEFAULT_REDIRECT_LIMIT`].
    #[must_use]
    pub fn effective_redirect_limit(&self) -> u32 {
        match (self.redirect_limit, self.method) {
            (Some(limit), _) => limit,
            (None, Method::Head) => 0,
            (None, _) => DEFAULT_REDIRECT_LIMIT,
        }
    }
}
