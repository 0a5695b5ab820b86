//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the crawler:
//! - Building the shared HTTP client
//! - The advisory HEAD probe that cheaply rejects non-HTML or oversized resources
//! - The full GET with bounded retry and exponential backoff
//! - Deadline observance along the whole fetch path
//!
//! Redirects are followed transparently by the client; the final URL after
//! redirects is what gets recorded as visited and used to resolve relative
//! links and images.

use reqwest::{Client, Response};
use std::time::Duration;
use tokio::time::{timeout_at, Instant};
use url::Url;

/// Declared lengths above this are skipped without fetching
pub const MAX_BODY_BYTES: u64 = 5_000_000;

/// Maximum number of retries after the first GET attempt
const MAX_RETRIES: u32 = 2;

/// Base delay for exponential backoff between attempts (1s, then 2s)
const BACKOFF_BASE: Duration = Duration::from_secs(1);

/// Result of a fetch operation
#[derive(Debug)]
pub enum FetchOutcome {
    /// Successfully fetched an HTML page
    Success {
        /// Decoded page body
        body: String,
        /// Final URL after redirects
        final_url: Url,
    },

    /// The resource is not worth processing (non-HTML, oversized, non-success
    /// status, deadline expiry, or exhausted transient retries)
    Skip {
        /// Why the resource was skipped
        reason: String,
    },

    /// Non-transient request failure
    Failed {
        /// Error description
        error: String,
    },
}

/// Builds the HTTP client shared by all workers
pub fn build_http_client() -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(concat!("namescout/", env!("CARGO_PKG_VERSION")))
        .timeout(Duration::from_secs(30))
        .connect_timeout(Duration::from_secs(10))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches a URL, honoring the run deadline
///
/// # Request Flow
///
/// 1. HEAD probe: a successful probe that declares a non-HTML media type or a
///    length above [`MAX_BODY_BYTES`] short-circuits to `Skip`. A failed probe
///    is ignored entirely; it is advisory, never a hard gate.
/// 2. GET with retry: up to 2 retries on transient failure (connect error or
///    request timeout), backoff doubling from 1s. Non-transient failures are
///    not retried.
/// 3. Non-success status or non-HTML content-type returns `Skip`.
/// 4. On success, returns the decoded body and the post-redirect URL.
///
/// Deadline expiry anywhere along this path returns `Skip`, not `Failed`.
pub async fn fetch_page(client: &Client, url: &Url, deadline: Instant) -> FetchOutcome {
    if let Some(reason) = probe(client, url, deadline).await {
        return FetchOutcome::Skip { reason };
    }

    let response = match get_with_retry(client, url, deadline).await {
        Ok(response) => response,
        Err(outcome) => return outcome,
    };

    let status = response.status();
    if !status.is_success() {
        return FetchOutcome::Skip {
            reason: format!("HTTP {}", status.as_u16()),
        };
    }

    let content_type = header_value(&response, "content-type").unwrap_or_default();
    if !content_type.contains("text/html") {
        return FetchOutcome::Skip {
            reason: format!("non-HTML content-type '{}'", content_type),
        };
    }

    let final_url = response.url().clone();

    match timeout_at(deadline, response.text()).await {
        Ok(Ok(body)) => FetchOutcome::Success { body, final_url },
        Ok(Err(e)) => FetchOutcome::Failed {
            error: format!("failed to read body: {}", e),
        },
        Err(_) => FetchOutcome::Skip {
            reason: "run deadline reached while reading body".to_string(),
        },
    }
}

/// Advisory HEAD probe; returns a skip reason only when the probe succeeds
/// and declares a non-HTML type or an oversized body. Any probe failure is
/// treated as "probe inconclusive".
async fn probe(client: &Client, url: &Url, deadline: Instant) -> Option<String> {
    let response = match timeout_at(deadline, client.head(url.clone()).send()).await {
        Ok(Ok(response)) => response,
        // Deadline or network error: proceed to the full GET, which applies
        // its own deadline check
        _ => return None,
    };

    if !response.status().is_success() {
        return None;
    }

    if let Some(content_type) = header_value(&response, "content-type") {
        if !content_type.contains("text/html") {
            return Some(format!("probe: non-HTML content-type '{}'", content_type));
        }
    }

    if let Some(length) = header_value(&response, "content-length")
        .and_then(|v| v.parse::<u64>().ok())
    {
        if length > MAX_BODY_BYTES {
            return Some(format!("probe: declared length {} exceeds cap", length));
        }
    }

    None
}

/// Performs the GET with bounded retry on transient failures
async fn get_with_retry(
    client: &Client,
    url: &Url,
    deadline: Instant,
) -> Result<Response, FetchOutcome> {
    let mut attempt = 0;

    loop {
        match timeout_at(deadline, client.get(url.clone()).send()).await {
            Ok(Ok(response)) => return Ok(response),

            Ok(Err(e)) if is_transient(&e) => {
                if attempt >= MAX_RETRIES {
                    return Err(FetchOutcome::Skip {
                        reason: format!("transient failure after {} retries: {}", MAX_RETRIES, e),
                    });
                }

                let backoff = BACKOFF_BASE * 2u32.pow(attempt);
                attempt += 1;
                tracing::debug!(
                    "Transient failure fetching {} (attempt {}), retrying in {:?}: {}",
                    url,
                    attempt,
                    backoff,
                    e
                );

                if timeout_at(deadline, tokio::time::sleep(backoff)).await.is_err() {
                    return Err(FetchOutcome::Skip {
                        reason: "run deadline reached during retry backoff".to_string(),
                    });
                }
            }

            Ok(Err(e)) => {
                return Err(FetchOutcome::Failed {
                    error: e.to_string(),
                })
            }

            Err(_) => {
                return Err(FetchOutcome::Skip {
                    reason: "run deadline reached during fetch".to_string(),
                })
            }
        }
    }
}

/// Connection errors and request-level timeouts are worth retrying;
/// everything else is not.
fn is_transient(e: &reqwest::Error) -> bool {
    e.is_timeout() || e.is_connect()
}

fn header_value(response: &Response, name: &str) -> Option<String> {
    response
        .headers()
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.to_string())
}
