use serde::Deserialize;

/// Main configuration structure for namescout
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub crawler: CrawlerConfig,
    pub names: NamesConfig,
    pub output: OutputConfig,
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlerConfig {
    /// Absolute HTTP(S) URL the crawl starts from
    #[serde(rename = "start-url")]
    pub start_url: String,

    /// Host that admitted URLs must belong to (e.g. "hr.nl")
    #[serde(rename = "base-host")]
    pub base_host: String,

    /// Whether proper subdomains of the base host are also admitted
    #[serde(rename = "include-subdomains", default = "default_true")]
    pub include_subdomains: bool,

    /// Number of concurrent fetch workers
    #[serde(default = "default_concurrency")]
    pub concurrency: u32,

    /// Overall run deadline in seconds; the crawl drains when it fires
    #[serde(rename = "deadline-secs", default = "default_deadline")]
    pub deadline_secs: u64,
}

/// Reference name list configuration for the validator
#[derive(Debug, Clone, Deserialize)]
pub struct NamesConfig {
    /// Path to a newline-delimited list of first names
    #[serde(rename = "first-names-path")]
    pub first_names_path: String,

    /// Path to a newline-delimited list of last names
    #[serde(rename = "last-names-path")]
    pub last_names_path: String,
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Path of the raw findings CSV
    #[serde(rename = "raw-report-path")]
    pub raw_report_path: String,

    /// Path of the validated findings CSV
    #[serde(rename = "validated-report-path")]
    pub validated_report_path: String,

    /// Path of the markdown summary
    #[serde(rename = "summary-path")]
    pub summary_path: String,
}

fn default_true() -> bool {
    true
}

fn default_concurrency() -> u32 {
    8
}

fn default_deadline() -> u64 {
    300
}
