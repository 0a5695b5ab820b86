//! Summary statistics for a finished run
//!
//! Produces the markdown summary file and the stdout statistics block.

use crate::crawler::CrawlOutcome;
use crate::{Finding, Result};
use chrono::Utc;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Headline statistics of one crawl run
#[derive(Debug, Clone)]
pub struct CrawlSummary {
    /// Distinct final URLs successfully fetched and parsed
    pub pages_visited: u64,

    /// Total raw findings before validation
    pub raw_findings: u64,

    /// Findings whose name passed validation
    pub validated_findings: u64,

    /// Validated findings carrying a non-empty image
    pub validated_with_image: u64,
}

impl CrawlSummary {
    /// Builds the summary from a crawl outcome and its validated subset
    pub fn from_results(outcome: &CrawlOutcome, validated: &[Finding]) -> Self {
        Self {
            pages_visited: outcome.visited.len() as u64,
            raw_findings: outcome.findings.len() as u64,
            validated_findings: validated.len() as u64,
            validated_with_image: validated.iter().filter(|f| f.has_image()).count() as u64,
        }
    }
}

/// Formats a crawl summary as markdown
pub fn format_markdown_summary(summary: &CrawlSummary) -> String {
    let mut md = String::new();

    md.push_str("# Namescout Crawl Summary\n\n");
    md.push_str(&format!(
        "Generated: {}\n\n",
        Utc::now().format("%Y-%m-%d %H:%M:%S UTC")
    ));

    md.push_str("## Statistics\n\n");
    md.push_str("| Metric | Count |\n");
    md.push_str("|--------|-------|\n");
    md.push_str(&format!("| Pages visited | {} |\n", summary.pages_visited));
    md.push_str(&format!("| Raw findings | {} |\n", summary.raw_findings));
    md.push_str(&format!(
        "| Validated findings | {} |\n",
        summary.validated_findings
    ));
    md.push_str(&format!(
        "| Validated with image | {} |\n",
        summary.validated_with_image
    ));

    md
}

/// Writes the markdown summary to a file
pub fn write_markdown_summary(summary: &CrawlSummary, path: &Path) -> Result<()> {
    let mut file = File::create(path)?;
    file.write_all(format_markdown_summary(summary).as_bytes())?;
    tracing::info!("Wrote summary to {}", path.display());
    Ok(())
}

/// Prints the summary statistics to stdout
pub fn print_summary(summary: &CrawlSummary) {
    println!("=== Crawl Summary ===\n");
    println!("  Pages visited:        {}", summary.pages_visited);
    println!("  Raw findings:         {}", summary.raw_findings);
    println!("  Validated findings:   {}", summary.validated_findings);
    println!("  Validated with image: {}", summary.validated_with_image);
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn finding(name: Option<&str>, image: Option<&str>, validated: bool) -> Finding {
        Finding {
            page_url: "https://hr.nl/team".to_string(),
            name: name.map(String::from),
            image_url: image.map(String::from),
            image_alt: None,
            name_validated: validated,
        }
    }

    #[test]
    fn test_summary_counts() {
        let outcome = CrawlOutcome {
            findings: vec![
                finding(Some("Jan Bakker"), Some("https://hr.nl/a.jpg"), false),
                finding(Some("Lorem Ipsum"), None, false),
                finding(None, Some("https://hr.nl/b.jpg"), false),
            ],
            visited: HashSet::from(["https://hr.nl/team".to_string()]),
            pages_processed: 1,
        };
        let validated = vec![finding(
            Some("Jan Bakker"),
            Some("https://hr.nl/a.jpg"),
            true,
        )];

        let summary = CrawlSummary::from_results(&outcome, &validated);

        assert_eq!(summary.pages_visited, 1);
        assert_eq!(summary.raw_findings, 3);
        assert_eq!(summary.validated_findings, 1);
        assert_eq!(summary.validated_with_image, 1);
    }

    #[test]
    fn test_markdown_contains_counts() {
        let summary = CrawlSummary {
            pages_visited: 12,
            raw_findings: 40,
            validated_findings: 7,
            validated_with_image: 3,
        };

        let md = format_markdown_summary(&summary);
        assert!(md.contains("# Namescout Crawl Summary"));
        assert!(md.contains("| Pages visited | 12 |"));
        assert!(md.contains("| Raw findings | 40 |"));
        assert!(md.contains("| Validated findings | 7 |"));
        assert!(md.contains("| Validated with image | 3 |"));
    }

    #[test]
    fn test_write_markdown_summary() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("summary.md");

        let summary = CrawlSummary {
            pages_visited: 1,
            raw_findings: 1,
            validated_findings: 0,
            validated_with_image: 0,
        };
        write_markdown_summary(&summary, &path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("# Namescout Crawl Summary"));
    }
}
