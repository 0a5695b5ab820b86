//! Namescout: a personal-data exposure crawler
//!
//! This crate crawls a web domain (and optionally its subdomains) breadth-first,
//! extracts candidate personal names and candidate personal photos from each page,
//! and filters the raw findings against reference first/last-name lists.

pub mod config;
pub mod crawler;
pub mod report;
pub mod url;
pub mod validator;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Main error type for namescout operations
#[derive(Debug, Error)]
pub enum ScoutError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("URL error: {0}")]
    UrlError(#[from] UrlError),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] ::url::ParseError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("Failed to load name reference list {path}: {source}")]
    NameList {
        path: String,
        source: std::io::Error,
    },

    #[error("Report error: {0}")]
    Report(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid start URL: {0}")]
    InvalidStartUrl(String),
}

/// URL-specific errors
#[derive(Debug, Error)]
pub enum UrlError {
    #[error("Failed to parse URL: {0}")]
    Parse(String),

    #[error("Invalid URL scheme: {0}")]
    InvalidScheme(String),

    #[error("Missing host in URL")]
    MissingHost,
}

/// Result type alias for namescout operations
pub type Result<T> = std::result::Result<T, ScoutError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for URL operations
pub type UrlResult<T> = std::result::Result<T, UrlError>;

/// One observed (candidate name, candidate image) association on a page.
///
/// Immutable once created. Several findings may share a source page, a name,
/// or an image; precision is recovered later by name validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Finding {
    /// Final (post-redirect) URL of the page the finding was observed on
    pub page_url: String,

    /// Candidate name text, if any name-shaped text was found
    pub name: Option<String>,

    /// Absolute URL of the candidate image, if any
    pub image_url: Option<String>,

    /// Alt text of the candidate image, if any
    pub image_alt: Option<String>,

    /// Set only by the name validator; always false at creation
    pub name_validated: bool,
}

impl Finding {
    /// Returns true when the finding carries a candidate image.
    pub fn has_image(&self) -> bool {
        self.image_url.is_some()
    }
}

// Re-export commonly used types
pub use crate::config::Config;
pub use crate::crawler::{CrawlOutcome, Crawler};
pub use crate::url::{admit, normalize_url};
pub use crate::validator::NameValidator;
