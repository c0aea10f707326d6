//! HTTP fetcher implementation
//!
//! This module handles all page requests for the crawler, including:
//! - Building HTTP clients with proper user agent strings
//! - Retry with exponential backoff for transient failures
//! - Error classification (retryable vs terminal)
//! - Reading the body only for HTML responses

use crate::config::{CrawlerConfig, UserAgentConfig};
use crate::FetchError;
use reqwest::{header::CONTENT_TYPE, redirect::Policy, Client, Response, StatusCode};
use std::time::Duration;
use url::Url;

/// Upper bound on a single backoff sleep
const MAX_BACKOFF: Duration = Duration::from_secs(60);

/// Maximum redirect hops followed per request
const MAX_REDIRECTS: usize = 10;

/// How many attempts a fetch gets and how long to wait between them
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RetryPolicy {
    /// Total attempts, including the first
    pub max_attempts: u32,

    /// Backoff after failed attempt `n` is `backoff_base^n` seconds
    pub backoff_base: f64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            backoff_base: 2.0,
        }
    }
}

impl RetryPolicy {
    pub fn from_config(config: &CrawlerConfig) -> Self {
        Self {
            max_attempts: config.max_retries,
            backoff_base: config.backoff_base_secs,
        }
    }

    /// Delay before the attempt following failed attempt `attempt` (1-based)
    pub fn backoff(&self, attempt: u32) -> Duration {
        let exponent = i32::try_from(attempt).unwrap_or(i32::MAX);
        Duration::try_from_secs_f64(self.backoff_base.powi(exponent))
            .map_or(MAX_BACKOFF, |delay| delay.min(MAX_BACKOFF))
    }
}

/// A fetched page, body included only for HTML responses
#[derive(Debug, Clone)]
pub struct FetchedPage {
    /// Final URL after redirects
    pub final_url: Url,

    /// Content-Type header value (empty if absent)
    pub content_type: String,

    /// Page body; empty for non-HTML responses
    pub body: String,
}

impl FetchedPage {
    pub fn is_html(&self) -> bool {
        is_html(&self.content_type)
    }
}

/// Returns true if a Content-Type header denotes an HTML document
pub fn is_html(content_type: &str) -> bool {
    content_type.to_lowercase().contains("text/html")
}

/// Builds an HTTP client with proper configuration
///
/// # Arguments
///
/// * `config` - The user agent configuration
/// * `timeout` - Default per-request timeout
///
/// # Example
///
/// ```no_run
/// use site_harvest::config::UserAgentConfig;
/// use site_harvest::crawler::build_http_client;
/// use std::time::Duration;
///
/// let client = build_http_client(&UserAgentConfig::default(), Duration::from_secs(15)).unwrap();
/// ```
pub fn build_http_client(config: &UserAgentConfig, timeout: Duration) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.header_value())
        .timeout(timeout)
        .connect_timeout(Duration::from_secs(10))
        .redirect(Policy::limited(MAX_REDIRECTS))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Performs one GET with bounded retries
///
/// # Retry Logic
///
/// | Condition | Action |
/// |-----------|--------|
/// | 2xx / 3xx | Return the response |
/// | HTTP 429 | Retry after backoff |
/// | HTTP 5xx | Retry after backoff |
/// | Timeout / connection failure | Retry after backoff |
/// | Other 4xx | Immediate failure |
/// | Invalid request | Immediate failure |
///
/// The backoff sleep happens inside this call, so a caller holding a
/// concurrency permit keeps holding it while waiting.
///
/// # Returns
///
/// * `Ok(Response)` - Response with status and headers intact
/// * `Err(FetchError)` - Terminal failure, or the last failure once
///   `policy.max_attempts` attempts are used up
pub async fn fetch_with_retry(
    client: &Client,
    url: &str,
    policy: &RetryPolicy,
    timeout: Duration,
) -> Result<Response, FetchError> {
    let max_attempts = policy.max_attempts.max(1);
    let mut attempt = 1;

    loop {
        let error = match client.get(url).timeout(timeout).send().await {
            Ok(response) => {
                let status = response.status();
                if is_retryable_status(status) {
                    FetchError::Status {
                        url: url.to_string(),
                        status: status.as_u16(),
                    }
                } else if status.is_client_error() {
                    return Err(FetchError::Status {
                        url: url.to_string(),
                        status: status.as_u16(),
                    });
                } else {
                    return Ok(response);
                }
            }
            Err(e) if e.is_builder() => {
                return Err(FetchError::Transport {
                    url: url.to_string(),
                    source: e,
                });
            }
            Err(e) => FetchError::Transport {
                url: url.to_string(),
                source: e,
            },
        };

        if attempt >= max_attempts {
            tracing::warn!("Giving up on {} after {} attempts: {}", url, attempt, error);
            return Err(error);
        }

        let delay = policy.backoff(attempt);
        tracing::warn!(
            "Attempt {}/{} for {} failed ({}), retrying in {:?}",
            attempt,
            max_attempts,
            url,
            error,
            delay
        );
        tokio::time::sleep(delay).await;
        attempt += 1;
    }
}

/// Fetches a page with retries and reads its body if it is HTML
pub async fn fetch_page(
    client: &Client,
    url: &str,
    policy: &RetryPolicy,
    timeout: Duration,
) -> Result<FetchedPage, FetchError> {
    let response = fetch_with_retry(client, url, policy, timeout).await?;

    let final_url = response.url().clone();
    let content_type = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_string();

    if !is_html(&content_type) {
        tracing::debug!("{} is {}, not HTML; body skipped", url, content_type);
        return Ok(FetchedPage {
            final_url,
            content_type,
            body: String::new(),
        });
    }

    let body = response.text().await.map_err(|e| FetchError::Body {
        url: url.to_string(),
        source: e,
    })?;

    Ok(FetchedPage {
        final_url,
        content_type,
        body,
    })
}

fn is_retryable_status(status: StatusCode) -> bool {
    status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error()
}
