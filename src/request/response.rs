//! Captured result of a completed request.

use std::collections::BTreeMap;
use std::path::PathBuf;

use reqwest::header::HeaderMap;
use serde::Serialize;

use super::redirect::is_redirect_status;

/// Terminal response of a request, after any redirects were followed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Response {
    /// HTTP status code.
    pub status: u16,
    /// Response headers keyed by lowercased name; the first value of a repeated header wins.
    pub headers: BTreeMap<String, String>,
    /// Response body; empty when the body was streamed to a file.
    #[serde(skip)]
    pub body: Vec<u8>,
    /// Path of the streamed body, set only in streaming mode. The caller owns the file.
    pub file_path: Option<PathBuf>,
    /// URL that produced this response.
    pub final_url: String,
    /// Number of redirects followed to reach this response.
    pub redirects: u32,
}

impl Response {
    /// Looks up a response header, ignoring case.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }

    /// Parsed `Content-Length` header, when present and numeric.
    #[must_use]
    pub fn content_length(&self) -> Option<u64> {
        self.header("content-length")
            .and_then(|value| value.trim().parse().ok())
    }

    /// Returns true when this is an unfollowed redirect response.
    #[must_use]
    pub fn is_redirect(&self) -> bool {
        is_redirect_status(self.status)
    }

    /// Body decoded as UTF-8, replacing invalid sequences.
    #[must_use]
    pub fn body_text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// Lowercases header names and keeps the first value of repeated headers.
pub(crate) fn capture_headers(headers: &HeaderMap) -> BTreeMap<String, String> {
    let mut captured = BTreeMap::new();
    for (name, value) in headers {
        captured
            .entry(name.as_str().to_string())
            .or_insert_with(|| String::from_utf8_lossy(value.as_bytes()).into_owned());
    }
    captured
}
