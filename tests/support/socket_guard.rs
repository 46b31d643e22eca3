//! Skips wiremock-backed integration tests where localhost sockets are
//! unavailable.
//!
//! `src/test_support/socket_guard.rs` carries the same rules for the unit
//! tests; change both together.

#![allow(dead_code)]

use std::net::TcpListener;

use wiremock::MockServer;

const REQUIRE_SOCKETS_VAR: &str = "FETCHER_REQUIRE_SOCKET_TESTS";

fn sockets_required() -> bool {
    std::env::var(REQUIRE_SOCKETS_VAR).ok().is_some_and(|value| {
        matches!(
            value.trim().to_ascii_lowercase().as_str(),
            "1" | "true" | "yes"
        )
    })
}

/// Starts a mock server, or returns `None` when the sandbox forbids binding.
pub async fn start_mock_server_or_skip() -> Option<MockServer> {
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
