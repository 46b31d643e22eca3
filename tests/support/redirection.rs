//! Local stand-in for the remote redirection test endpoint.
//!
//! Query parameters:
//! - `rt=N`: redirect N more times before answering 200
//! - `code=C`: redirect status to emit (default 302)
//! - `201-location`: answer 201 with a `Location` header; body `PASS`,
//!   or `FAIL` if the client follows the location
//! - `header-check`: answer 200 with one `name:value` line per request header

#![allow(dead_code)]

use wiremock::matchers::path;
use wiremock::{Mock, MockServer, Request, Respond, ResponseTemplate};

pub const SCRIPT_PATH: &str = "/redirection.php";

pub struct RedirectionScript;

impl Respond for RedirectionScript {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        let query: Vec<(String, String)> = request.url.query_pairs().into_owned().collect();
        let param = |key: &str| {
            query
                .iter()
                .find(|(k, _)| k == key)
                .map(|(_, v)| v.as_str())
        };

        if param("followed-201").is_some() {
            return ResponseTemplate::new(200).set_body_string("FAIL");
        }

        if param("201-location").is_some() {
            return ResponseTemplate::new(201)
                .insert_header("Location", format!("{SCRIPT_PATH}?followed-201=true"))
                .set_body_string("PASS");
        }

        if param("header-check").is_some() {
            let mut body = String::new();
            for (name, value) in &request.headers {
                body.push_str(name.as_str());
                body.push(':');
                body.push_str(value.to_str().unwrap_or_default());
                body.push('\n');
            }
            return ResponseTemplate::new(200).set_body_string(body);
        }

        let code: u16 = param("code").and_then(|c| c.parse().ok()).unwrap_or(302);
        let remaining: u32 = param("rt").and_then(|r| r.parse().ok()).unwrap_or(0);
        if remaining > 0 {
            return ResponseTemplate::new(code).insert_header(
                "Location",
                format!("{SCRIPT_PATH}?code={code}&rt={}", remaining - 1),
            );
        }

        ResponseTemplate::new(200).set_body_string("END")
    }
}

/// Mounts the redirection script on `server`.
pub async fn mount_redirection_script(server: &MockServer) {
    Mock::given(path(SCRIPT_PATH))
        .respond_with(RedirectionScript)
        .mount(server)
        .await;
}

/// URL of the script with the given query string.
#[must_use]
pub fn script_url(server: &MockServer, query: &str) -> String {
    format!("{}{SCRIPT_PATH}?{query}", server.uri())
}
