//! Skips wiremock-backed unit tests where localhost sockets are unavailable.
//!
//! `tests/support/socket_guard.rs` carries the same rules for the
//! integration tests; change both together.

use std::net::TcpListener;

use wiremock::MockServer;

const REQUIRE_SOCKETS_VAR: &str = "FETCHER_REQUIRE_SOCKET_TESTS";

fn is_truthy(value: Option<&str>) -> bool {
    value.is_some_and(|value| {
        matches!(
            value.trim().to_ascii_lowercase().as_str(),
            "1" | "true" | "yes"
        )
    })
}

fn sockets_required() -> bool {
    is_truthy(std::env::var(REQUIRE_SOCKETS_VAR).ok().as_deref())
}

/// Starts a mock server, or returns `None` when the sandbox forbids binding.
///
/// # Panics
///
/// Panics instead of skipping when `FETCHER_REQUIRE_SOCKET_TESTS` is set.
pub(crate) async fn start_mock_server_or_skip() -> Option<MockServer> {
    if TcpListener::bind("127.0.0.1:0").is_ok() {
        return Some(MockServer::start().await);
    }

    assert!(
        !sockets_required(),
        "cannot bind a localhost socket and {REQUIRE_SOCKETS_VAR} is set"
    );
    eprintln!("[socket-bound-test] cannot bind a localhost socket; skipping");
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_flag_values() {
        assert!(is_truthy(Some("1")));
        assert!(is_truthy(Some("TRUE")));
        assert!(is_truthy(Some(" yes ")));
        assert!(!is_truthy(Some("0")));
        assert!(!is_truthy(Some("")));
        assert!(!is_truthy(None));
    }
}
