//! Crawl coordinator - main crawl orchestration logic
//!
//! One `Crawler::run` invocation owns all mutable crawl state: the frontier,
//! the visited set, the accumulated findings, the in-flight worker count, and
//! the processed-page counter. Nothing is shared across runs.
//!
//! The run moves through four phases: the start URL is seeded into the
//! frontier; a fixed pool of workers pulls URLs, fetches, extracts, and feeds
//! discovered links back; when the frontier is exhausted with no worker in
//! flight, or the run deadline fires, the pool drains; the accumulated
//! findings and visited set are handed to the report boundary.

use crate::config::CrawlerConfig;
use crate::crawler::extractor::{extract_page, pair_findings};
use crate::crawler::fetcher::{build_http_client, fetch_page, FetchOutcome};
use crate::crawler::frontier::Frontier;
use crate::url::{admit, normalize_url};
use crate::{Finding, Result};
use reqwest::Client;
use std::collections::HashSet;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::task::JoinSet;
use tokio::time::Instant;
use url::Url;

/// Sleep between empty-frontier checks while other workers are in flight
const EMPTY_BACKOFF: Duration = Duration::from_millis(50);

/// Everything a finished run hands to the report boundary
#[derive(Debug, Default)]
pub struct CrawlOutcome {
    /// Raw findings in the order workers produced them
    pub findings: Vec<Finding>,

    /// Final (post-redirect) URLs successfully fetched and parsed
    pub visited: HashSet<String>,

    /// Number of pages successfully processed
    pub pages_processed: u64,
}

/// State shared by the workers of a single run
struct RunState {
    frontier: Frontier,
    findings: Mutex<Vec<Finding>>,
    visited: Mutex<HashSet<String>>,
    in_flight: AtomicUsize,
    processed: AtomicU64,
}

/// The crawl engine: a configured client plus the run loop
pub struct Crawler {
    config: CrawlerConfig,
    client: Client,
}

impl Crawler {
    /// Creates a crawler for the given configuration
    pub fn new(config: CrawlerConfig) -> Result<Self> {
        let client = build_http_client()?;
        Ok(Self { config, client })
    }

    /// Runs one complete crawl
    ///
    /// Returns an error only for a fatal configuration problem (a start URL
    /// that does not parse). Everything after seeding degrades gracefully:
    /// the run always completes with whatever findings and visited URLs were
    /// gathered before the frontier drained or the deadline fired.
    pub async fn run(&self) -> Result<CrawlOutcome> {
        // Seeding
        let start = normalize_url(&self.config.start_url)?;
        tracing::info!(
            "Starting crawl of {} (base host {}, subdomains: {}, {} workers, deadline {}s)",
            start,
            self.config.base_host,
            self.config.include_subdomains,
            self.config.concurrency,
            self.config.deadline_secs
        );

        let deadline = Instant::now() + Duration::from_secs(self.config.deadline_secs);
        let started = std::time::Instant::now();

        let state = Arc::new(RunState {
            frontier: Frontier::new(),
            findings: Mutex::new(Vec::new()),
            visited: Mutex::new(HashSet::new()),
            in_flight: AtomicUsize::new(0),
            processed: AtomicU64::new(0),
        });
        state.frontier.seed(start);

        // Running: fixed-size pool of long-lived workers
        let mut workers = JoinSet::new();
        for worker_id in 0..self.config.concurrency {
            let state = Arc::clone(&state);
            let client = self.client.clone();
            let base_host = self.config.base_host.clone();
            let include_subdomains = self.config.include_subdomains;

            workers.spawn(async move {
                worker_loop(worker_id, client, state, base_host, include_subdomains, deadline)
                    .await;
            });
        }

        // Draining: the deadline stops new work from starting, but in-flight
        // workers are always awaited; results they produced are kept
        while workers.join_next().await.is_some() {}

        // Done
        let findings = std::mem::take(&mut *state.findings.lock().unwrap());
        let visited = std::mem::take(&mut *state.visited.lock().unwrap());
        let pages_processed = state.processed.load(Ordering::SeqCst);

        let elapsed = started.elapsed();
        tracing::info!(
            "Crawl finished: {} pages, {} raw findings in {:.1}s ({:.2} pages/sec)",
            pages_processed,
            findings.len(),
            elapsed.as_secs_f64(),
            pages_processed as f64 / elapsed.as_secs_f64().max(0.001)
        );

        Ok(CrawlOutcome {
            findings,
            visited,
            pages_processed,
        })
    }
}

/// One worker of the pool
///
/// The in-flight counter is raised before dequeuing, so a worker holding a
/// URL is always visible to the others; a worker only exits when the deadline
/// has fired, or the frontier is empty with no other worker in flight.
async fn worker_loop(
    worker_id: u32,
    client: Client,
    state: Arc<RunState>,
    base_host: String,
    include_subdomains: bool,
    deadline: Instant,
) {
    loop {
        if Instant::now() >= deadline {
            tracing::debug!("Worker {} stopping: run deadline reached", worker_id);
            break;
        }

        state.in_flight.fetch_add(1, Ordering::SeqCst);

        match state.frontier.try_dequeue() {
            Some(url) => {
                if admit(&url, &base_host, include_subdomains) {
                    process_page(&client, &url, &state, &base_host, include_subdomains, deadline)
                        .await;
                } else {
                    tracing::debug!("Not admitted: {}", url);
                }
                state.in_flight.fetch_sub(1, Ordering::SeqCst);
            }
            None => {
                let others = state.in_flight.fetch_sub(1, Ordering::SeqCst) - 1;
                if others == 0 && state.frontier.is_empty() {
                    tracing::debug!("Worker {} stopping: frontier exhausted", worker_id);
                    break;
                }
                tokio::time::sleep(EMPTY_BACKOFF).await;
            }
        }
    }
}

/// Fetches and extracts a single page
///
/// Every failure here is per-page and non-fatal: skips and fetch errors are
/// recorded as debug events and the worker moves on. A page that fetched
/// successfully contributes its findings and visited entry atomically with
/// respect to other workers.
async fn process_page(
    client: &Client,
    url: &Url,
    state: &RunState,
    base_host: &str,
    include_subdomains: bool,
    deadline: Instant,
) {
    match fetch_page(client, url, deadline).await {
        FetchOutcome::Skip { reason } => {
            tracing::debug!("Skipped {}: {}", url, reason);
        }

        FetchOutcome::Failed { error } => {
            tracing::debug!("Fetch failed for {}: {}", url, error);
        }

        FetchOutcome::Success { body, final_url } => {
            let extracted = extract_page(&body, &final_url);
            let findings = pair_findings(&final_url, &extracted.names, &extracted.images);

            tracing::debug!(
                "Processed {}: {} names, {} candidate images, {} links, {} findings",
                final_url,
                extracted.names.len(),
                extracted.images.len(),
                extracted.links.len(),
                findings.len()
            );

            if !findings.is_empty() {
                state.findings.lock().unwrap().extend(findings);
            }
            state.visited.lock().unwrap().insert(final_url.to_string());

            let processed = state.processed.fetch_add(1, Ordering::SeqCst) + 1;
            if processed % 10 == 0 {
                tracing::info!(
                    "Progress: {} pages processed, {} in frontier",
                    processed,
                    state.frontier.len()
                );
            }

            for link in extracted.links {
                if admit(&link, base_host, include_subdomains) {
                    state.frontier.offer(link);
                }
            }
        }
    }
}
