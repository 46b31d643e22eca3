//! CLI argument definitions using clap derive macros.

use std::path::PathBuf;

use clap::Parser;

use fetcher_core::request::constants::{CONNECT_TIMEOUT_SECS, DEFAULT_TIMEOUT_SECS};
use fetcher_core::{Method, TransportPreference};

/// Issue an HTTP request with a strict redirect budget.
///
/// Prints the status line and response headers, then the body (or the
/// path of the streamed download).
#[derive(Parser, Debug)]
#[command(name = "fetcher")]
#[command(author, version, about)]
pub struct Args {
    /// Absolute http(s) URL to request
    pub url: String,

    /// Request method
    #[arg(short = 'X', long, default_value = "GET")]
    pub method: Method,

    /// Maximum redirects to follow (default: 5, or 0 for HEAD)
    #[arg(short = 'r', long)]
    pub redirects: Option<u32>,

    /// Request header as 'Name: value' (repeatable)
    #[arg(short = 'H', long = "header", value_parser = parse_header_arg)]
    pub headers: Vec<(String, String)>,

    /// Request body
    #[arg(short = 'd', long)]
    pub data: Option<String>,

    /// Seconds to wait for headers and between body reads (1-3600)
    #[arg(
        long,
        env = "FETCHER_TIMEOUT",
        default_value_t = DEFAULT_TIMEOUT_SECS,
        value_parser = clap::value_parser!(u64).range(1..=3600)
    )]
    pub timeout: u64,

    /// Connect timeout in seconds (1-3600)
    #[arg(
        long,
        env = "FETCHER_CONNECT_TIMEOUT",
        default_value_t = CONNECT_TIMEOUT_SECS,
        value_parser = clap::value_parser!(u64).range(1..=3600)
    )]
    pub connect_timeout: u64,

    /// User-Agent to send instead of the default
    #[arg(long, env = "FETCHER_USER_AGENT")]
    pub user_agent: Option<String>,

    /// Stream the body to a unique temp file instead of stdout
    #[arg(long)]
    pub stream: bool,

    /// Stream the body to this path
    #[arg(short = 'o', long)]
    pub output: Option<PathBuf>,

    /// Use HTTP/1.1 only
    #[arg(long, conflicts_with = "http2_prior_knowledge")]
    pub http1_only: bool,

    /// Use HTTP/2 without negotiation
    #[arg(long)]
    pub http2_prior_knowledge: bool,

    /// Print response metadata as JSON instead of the raw response
    #[arg(long)]
    pub json: bool,

    /// Increase output verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress non-error log output
    #[arg(short, long)]
    pub quiet: bool,
}

impl Args {
    /// Transport selected by the protocol flags.
    #[must_use]
    pub fn transport(&self) -> TransportPreference {
        if self.http1_only {
            TransportPreference::Http1Only
        } else if self.http2_prior_knowledge {
            TransportPreference::Http2PriorKnowledge
        } else {
            TransportPreference::Auto
        }
    }
}

/// Parses `Name: value`. The value may be empty.
fn parse_header_arg(raw: &str) -> Result<(String, String), String> {
    let (name, value) = raw
        .split_once(':')
        .ok_or_else(|| format!("expected 'Name: value', got '{raw}'"))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(format!("missing header name in '{raw}'"));
    }
    Ok((name.to_string(), value.trim().to_string()))
}
