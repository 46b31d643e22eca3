//! HTTP client wrapper that drives redirect chains itself.
//!
//! The underlying reqwest client never follows redirects. [`HttpClient`]
//! issues each hop, consults [`next_hop`] for the budget rules, and
//! captures the terminal response in memory or streams it to disk.

use std::path::{Path, PathBuf};
use std::time::Duration;

use futures_util::{Stream, StreamExt};
use reqwest::Client;
use reqwest::header::{CONTENT_LENGTH, LOCATION, USER_AGENT};
use tokio::fs::File;
use tokio::io::{AsyncWriteExt, BufWriter};
use tracing::{debug, info, instrument, warn};
use url::Url;

use super::config::{ClientConfig, TransportPreference};
use super::error::RequestError;
use super::filename::create_download_file;
use super::options::{Method, RequestOptions};
use super::redirect::{RedirectStep, method_after_redirect, next_hop};
use super::response::{Response, capture_headers};

/// HTTP client with a strict redirect budget and streaming downloads.
///
/// Create once and reuse: clones share one connection pool, and calls on
/// the same client are independent of each other.
///
/// # Example
///
/// ```no_run
/// use fetcher_core::{HttpClient, RequestOptions};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = HttpClient::new();
/// let response = client
///     .request(
///         "https://example.com/photo.jpg",
///         RequestOptions::default().with_stream_to_file(true),
///     )
///     .await?;
/// println!("saved to {:?}", response.file_path);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
}

impl Default for HttpClient {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpClient {
    /// Creates a client with the default [`ClientConfig`].
    ///
    /// # Panics
    ///
    /// Panics if the HTTP client builder fails with the static
    /// configuration. This should never happen in practice.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(ClientConfig::default())
    }

    /// Creates a client restricted to the given transport.
    ///
    /// # Panics
    ///
    /// Same as [`HttpClient::new`].
    #[must_use]
    pub fn with_transport(transport: TransportPreference) -> Self {
        Self::with_config(ClientConfig::default().with_transport(transport))
    }

    /// Creates a client from explicit configuration.
    ///
    /// # Panics
    ///
    /// Panics if the HTTP client builder rejects the configuration; use
    /// [`HttpClient::try_with_config`] to handle that case.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn with_config(config: ClientConfig) -> Self {
        Self::try_with_config(&config).expect("failed to build HTTP client from configuration")
    }

    /// Creates a client from explicit configuration.
    ///
    /// # Errors
    ///
    /// Returns the builder error if the TLS backend cannot be initialised.
    #[instrument(level = "debug", skip(config), fields(transport = ?config.transport))]
    pub fn try_with_config(config: &ClientConfig) -> Result<Self, reqwest::Error> {
        let client = build_client(config)?;
        Ok(Self { client })
    }

    /// Issues a request and follows redirects within the options' budget.
    ///
    /// The returned future completes once the terminal response has been
    /// fully read into memory or written to disk.
    ///
    /// # Errors
    ///
    /// Returns `RequestError` if:
    /// - the URL is not an absolute http(s) URL, or the timeout is zero
    /// - the redirect chain needs more hops than the limit allows
    /// - the connection fails or no progress is made within the timeout
    /// - a streamed download cannot be written or ends short of `Content-Length`
    #[instrument(skip(self, options), fields(url = %url, method = %options.method))]
    pub async fn request(
        &self,
        url: &str,
        options: RequestOptions,
    ) -> Result<Response, RequestError> {
        let mut current_url = parse_http_url(url)?;
        if options.timeout.is_zero() {
            return Err(RequestError::invalid_timeout(url, options.timeout));
        }

        let limit = options.effective_redirect_limit();
        let mut remaining = limit;
        let mut method = options.method;
        let mut body = options.body.clone();

        loop {
            let response = self
                .send(&current_url, method, body.as_deref(), &options)
                .await?;
            let status = response.status().as_u16();
            let location = response
                .headers()
                .get(LOCATION)
                .and_then(|value| value.to_str().ok())
                .map(str::to_string);

            match next_hop(status, location.is_some(), limit, remaining) {
                RedirectStep::Follow => {
                    let location = location.unwrap_or_default();
                    let next_url = resolve_location(&current_url, &location)?;
                    remaining -= 1;
                    method = method_after_redirect(status, method);
                    if status == 303 {
                        body = None;
                    }
                    debug!(
                        status,
                        from = %current_url,
                        to = %next_url,
                        remaining,
                        "following redirect"
                    );
                    current_url = next_url;
                }
                RedirectStep::LimitExceeded => {
                    warn!(status, url = %current_url, limit, "redirect limit exceeded");
                    return Err(RequestError::redirect_limit_exceeded(
                        current_url.as_str(),
                        limit,
                    ));
                }
                RedirectStep::Return => {
                    return capture_response(
                        response,
                        method,
                        &current_url,
                        limit - remaining,
                        &options,
                    )
                    .await;
                }
            }
        }
    }

    async fn send(
        &self,
        url: &Url,
        method: Method,
        body: Option<&[u8]>,
        options: &RequestOptions,
    ) -> Result<reqwest::Response, RequestError> {
        let mut request = self.client.request(method.to_reqwest(), url.clone());
        for (name, value) in options.headers.iter() {
            request = request.header(name.clone(), value.clone());
        }
        if let Some(user_agent) = &options.user_agent
            && !options.headers.contains(USER_AGENT.as_str())
        {
            request = request.header(USER_AGENT, user_agent.as_str());
        }
        if let Some(body) = body {
            request = request.body(body.to_vec());
        }

        match tokio::time::timeout(options.timeout, request.send()).await {
            Ok(result) => result.map_err(|e| RequestError::from_transport(url.as_str(), e)),
            Err(_) => Err(RequestError::timeout(url.as_str())),
        }
    }
}

/// Builds the caller-facing result from the terminal response.
async fn capture_response(
    response: reqwest::Response,
    method: Method,
    url: &Url,
    redirects: u32,
    options: &RequestOptions,
) -> Result<Response, RequestError> {
    let status = response.status().as_u16();
    let headers = capture_headers(response.headers());

    let (body, file_path) = if options.stream_to_file {
        let path = stream_response(response, method, url, options).await?;
        (Vec::new(), Some(path))
    } else {
        (read_body(response, url, options.timeout).await?, None)
    };

    debug!(status, redirects, bytes = body.len(), "request complete");
    Ok(Response {
        status,
        headers,
        body,
        file_path,
        final_url: url.to_string(),
        redirects,
    })
}

fn build_client(config: &ClientConfig) -> Result<Client, reqwest::Error> {
    let builder = Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .connect_timeout(config.connect_timeout)
        .gzip(config.decompress)
        .user_agent(config.user_agent.as_str());
    let builder = match config.transport {
        TransportPreference::Auto => builder,
        TransportPreference::Http1Only => builder.http1_only(),
        TransportPreference::Http2PriorKnowledge => builder.http2_prior_knowledge(),
    };
    builder.build()
}

fn parse_http_url(url: &str) -> Result<Url, RequestError> {
    let parsed = Url::parse(url).map_err(|_| RequestError::invalid_url(url))?;
    if matches!(parsed.scheme(), "http" | "https") && parsed.has_host() {
        Ok(parsed)
    } else {
        Err(RequestError::invalid_url(url))
    }
}

/// Resolves a `Location` value, absolute or relative, against the current URL.
fn resolve_location(current: &Url, location: &str) -> Result<Url, RequestError> {
    let resolved = current
        .join(location)
        .map_err(|_| RequestError::invalid_url(location))?;
    parse_http_url(resolved.as_str())
}

/// Advertised body size, or `None` when no body is expected on the wire.
fn expected_body_length(response: &reqwest::Response, method: Method) -> Option<u64> {
    if method == Method::Head || matches!(response.status().as_u16(), 204 | 304) {
        return None;
    }
    response
        .headers()
        .get(CONTENT_LENGTH)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse::<u64>().ok())
}

/// Waits for the next body chunk, failing when none arrives within `timeout`.
async fn next_chunk<S, B>(
    stream: &mut S,
    url: &Url,
    timeout: Duration,
) -> Result<Option<B>, RequestError>
where
    S: Stream<Item = Result<B, reqwest::Error>> + Unpin,
{
    match tokio::time::timeout(timeout, stream.next()).await {
        Err(_) => Err(RequestError::timeout(url.as_str())),
        Ok(None) => Ok(None),
        Ok(Some(Ok(chunk))) => Ok(Some(chunk)),
        Ok(Some(Err(e))) => Err(RequestError::from_transport(url.as_str(), e)),
    }
}

async fn read_body(
    response: reqwest::Response,
    url: &Url,
    timeout: Duration,
) -> Result<Vec<u8>, RequestError> {
    let mut stream = std::pin::pin!(response.bytes_stream());
    let mut body = Vec::new();
    while let Some(chunk) = next_chunk(&mut stream, url, timeout).await? {
        body.extend_from_slice(&chunk);
    }
    Ok(body)
}

/// Streams the response to its destination and verifies the written size.
///
/// The file is removed again on any failure, so a returned path always
/// names a complete download.
async fn stream_response(
    response: reqwest::Response,
    method: Method,
    url: &Url,
    options: &RequestOptions,
) -> Result<PathBuf, RequestError> {
    let (file, file_path) = match &options.destination_path {
        Some(path) => {
            let file = File::create(path)
                .await
                .map_err(|e| RequestError::io(path.clone(), e))?;
            (file, path.clone())
        }
        None => {
            let (file, path) = create_download_file(&std::env::temp_dir(), url)?;
            (File::from_std(file), path)
        }
    };
    debug!(path = %file_path.display(), "streaming response body to file");

    let expected = expected_body_length(&response, method);
    let bytes_written =
        match stream_to_file(file, response, url, &file_path, options.timeout).await {
            Ok(bytes) => bytes,
            Err(error) => {
                debug!(path = %file_path.display(), "cleaning up partial file after error");
                let _ = tokio::fs::remove_file(&file_path).await;
                return Err(error);
            }
        };

    if let Some(expected) = expected
        && expected != bytes_written
    {
        warn!(
            path = %file_path.display(),
            expected,
            actual = bytes_written,
            "streamed size does not match Content-Length"
        );
        let _ = tokio::fs::remove_file(&file_path).await;
        return Err(RequestError::incomplete(file_path, expected, bytes_written));
    }

    info!(path = %file_path.display(), bytes = bytes_written, "download complete");
    Ok(file_path)
}

/// Streams response body to file, returning bytes written.
async fn stream_to_file(
    file: File,
    response: reqwest::Response,
    url: &Url,
    file_path: &Path,
    timeout: Duration,
) -> Result<u64, RequestError> {
    let mut writer = BufWriter::new(file);
    let mut stream = std::pin::pin!(response.bytes_stream());
    let mut bytes_written: u64 = 0;

    while let Some(chunk) = next_chunk(&mut stream, url, timeout).await? {
        writer
            .write_all(&chunk)
            .await
            .map_err(|e| RequestError::io(file_path.to_path_buf(), e))?;
        bytes_written += chunk.len() as u64;
    }

    // Ensure all data is flushed to disk
    writer
        .flush()
        .await
        .map_err(|e| RequestError::io(file_path.to_path_buf(), e))?;

    Ok(bytes_written)
}
