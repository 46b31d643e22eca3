//! CLI entry point for the fetcher tool.

use std::io::{self, Write};
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use fetcher_core::{ClientConfig, HttpClient, RequestHeaders, RequestOptions, Response};
use tracing::{debug, info};

mod cli;

use cli::Args;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments first (before tracing, so --help works without logs)
    let args = Args::parse();

    // Priority: RUST_LOG env var > quiet flag > verbose flag > default (info)
    let default_level = if args.quiet {
        "error"
    } else {
        match args.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    };

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));

    // Logs go to stderr; stdout carries the response.
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    debug!(?args, "CLI arguments parsed");

    let mut config = ClientConfig::default()
        .with_transport(args.transport())
        .with_connect_timeout(Duration::from_secs(args.connect_timeout));
    if let Some(user_agent) = &args.user_agent {
        config = config.with_user_agent(user_agent);
    }
    let client = HttpClient::try_with_config(&config).context("failed to build HTTP client")?;

    let options = build_options(&args)?;
    let response = client
        .request(&args.url, options)
        .await
        .with_context(|| format!("{} {} failed", args.method, args.url))?;

    info!(
        status = response.status,
        redirects = response.redirects,
        "request finished"
    );

    if args.json {
        println!("{}", serde_json::to_string_pretty(&response)?);
    } else {
        print_response(&response)?;
    }

    Ok(())
}

fn build_options(args: &Args) -> Result<RequestOptions> {
    let headers = RequestHeaders::from_pairs(
        args.headers
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str())),
    )?;

    let mut options = RequestOptions::default()
        .with_method(args.method)
        .with_headers(headers)
        .with_timeout(Duration::from_secs(args.timeout))
        .with_stream_to_file(args.stream);
    if let Some(limit) = args.redirects {
        options = options.with_redirect_limit(limit);
    }
    if let Some(path) = &args.output {
        options = options.with_destination(path);
    }
    if let Some(data) = &args.data {
        options = options.with_body(data.as_bytes());
    }
    Ok(options)
}

fn print_response(response: &Response) -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();

    writeln!(out, "HTTP {}", response.status)?;
    for (name, value) in &response.headers {
        writeln!(out, "{name}: {value}")?;
    }
    writeln!(out)?;

    if let Some(path) = &response.file_path {
        writeln!(out, "saved to {}", path.display())?;
    } else {
        out.write_all(&response.body)?;
    }
    out.flush()?;
    Ok(())
}
