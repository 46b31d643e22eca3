//! Client-level configuration fixed at construction time.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::constants::CONNECT_TIMEOUT_SECS;
use crate::user_agent;

/// Which HTTP protocol version the client may use.
///
/// Chosen per client instead of through process-wide switches, so clients
/// with different preferences can run side by side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TransportPreference {
    /// HTTP/1.1, upgrading to HTTP/2 when negotiated over TLS.
    #[default]
    Auto,
    /// HTTP/1.1 only.
    Http1Only,
    /// HTTP/2 without negotiation (for h2c servers).
    Http2PriorKnowledge,
}

/// Settings shared by every request a client issues.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Protocol version selection.
    pub transport: TransportPreference,
    /// TCP/TLS connect timeout.
    pub connect_timeout: Duration,
    /// User-Agent sent unless a request overrides it.
    pub user_agent: String,
    /// Transparently decode gzip bodies.
    pub decompress: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            transport: TransportPreference::Auto,
            connect_timeout: Duration::from_secs(CONNECT_TIMEOUT_SECS),
            user_agent: user_agent::default_user_agent(),
            decompress: true,
        }
    }
}

impl ClientConfig {
    #[must_use]
    pub fn with_transport(mut self, transport: TransportPreference) -> Self {
        self.transport = transport;
        self
    }

    #[must_use]
    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    #[must_use]
    pub fn with_decompress(mut self, decompress: bool) -> Self {
        self.decompress = decompress;
        self
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ClientConfig::default();
        assert_eq!(config.transport, TransportPreference::Auto);
        assert_eq!(config.connect_timeout, Duration::from_secs(30));
        assert!(config.user_agent.starts_with("fetcher/"));
        assert!(config.decompress);
    }

    #[test]
    fn test_transport_preference_serde_names() {
        let json = serde_json::to_string(&TransportPreference::Http1Only).unwrap();
        assert_eq!(json, "\"http1-only\"");
        let parsed: TransportPreference =
            serde_json::from_str("\"http2-prior-knowledge\"").unwrap();
        assert_eq!(parsed, TransportPreference::Http2PriorKnowledge);
    }
}
