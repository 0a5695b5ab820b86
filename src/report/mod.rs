//! Report output for crawl results
//!
//! This module persists raw findings, validated findings, and a
//! human-readable summary. CSV reports carry one finding per row; the
//! markdown summary holds the headline statistics of the run.

mod summary;
mod writer;

pub use summary::{format_markdown_summary, print_summary, write_markdown_summary, CrawlSummary};
pub use writer::write_findings_csv;
