//! Crawler module: the concurrent crawl engine
//!
//! This module contains the core crawling logic:
//! - The frontier queue with atomic dedup-and-enqueue
//! - HTTP fetching with an advisory probe and bounded retry
//! - HTML extraction heuristics for names, candidate photos, and links
//! - Coordination of a fixed pool of fetch workers

mod coordinator;
mod extractor;
mod fetcher;
mod frontier;

pub use coordinator::{CrawlOutcome, Crawler};
pub use extractor::{extract_page, pair_findings, ExtractedPage, ImageCandidate};
pub use fetcher::{build_http_client, fetch_page, FetchOutcome, MAX_BODY_BYTES};
pub use frontier::Frontier;
