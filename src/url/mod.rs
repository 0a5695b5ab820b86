//! URL handling module for namescout
//!
//! This module provides URL normalization (the frontier dedup key form) and
//! the admission filter that decides, from a URL alone, whether it is
//! eligible to fetch.

mod admission;
mod normalize;

// Re-export main functions
pub use admission::{admit, has_skipped_extension, SKIP_EXTENSIONS};
pub use normalize::{normalize, normalize_url};
