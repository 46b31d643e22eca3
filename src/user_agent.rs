//! Default User-Agent string for outgoing requests.

/// Project URL for User-Agent identification (RFC 9308).
const PROJECT_UA_URL: &str = "https://github.com/fierce/fetcher";

/// Default User-Agent for requests (identifies the tool and version).
#[must_use]
pub(crate) fn default_user_agent() -> String {
    let version = env!("CARGO_PKG_VERSION");
    format!("fetcher/{version} (+{PROJECT_UA_URL})")
}
