//! Name validation against reference first/last-name lists
//!
//! The extraction heuristics over-generate by design; this module recovers
//! precision. A candidate name is valid when at least one of its whitespace
//! tokens appears, case-insensitively and by exact match, in either
//! reference set. No fuzzy or substring matching.

use crate::{Finding, ScoutError};
use std::collections::HashSet;
use std::path::Path;

/// Membership test backed by two reference name sets, loaded once
pub struct NameValidator {
    first_names: HashSet<String>,
    last_names: HashSet<String>,
}

impl NameValidator {
    /// Builds a validator from in-memory name lists (used by tests and
    /// callers that already hold the lists)
    pub fn new<I, J, S, T>(first_names: I, last_names: J) -> Self
    where
        I: IntoIterator<Item = S>,
        J: IntoIterator<Item = T>,
        S: AsRef<str>,
        T: AsRef<str>,
    {
        Self {
            first_names: normalize_set(first_names),
            last_names: normalize_set(last_names),
        }
    }

    /// Loads the reference sets from two newline-delimited files
    ///
    /// An unreadable file is a fatal configuration error; the caller should
    /// abort before any crawling begins.
    pub fn from_files(first_path: &Path, last_path: &Path) -> Result<Self, ScoutError> {
        let first = read_name_list(first_path)?;
        let last = read_name_list(last_path)?;
        tracing::info!(
            "Loaded {} first names and {} last names",
            first.len(),
            last.len()
        );
        Ok(Self::new(first, last))
    }

    /// Returns true when at least one token of the candidate matches either
    /// reference set
    pub fn is_valid(&self, candidate: &str) -> bool {
        candidate.split_whitespace().any(|token| {
            let token = token.to_lowercase();
            self.first_names.contains(&token) || self.last_names.contains(&token)
        })
    }

    /// Marks findings whose name passes validation; returns the validated
    /// subset with `name_validated` set
    pub fn validate_findings(&self, findings: &[Finding]) -> Vec<Finding> {
        findings
            .iter()
            .filter(|f| f.name.as_deref().is_some_and(|name| self.is_valid(name)))
            .map(|f| Finding {
                name_validated: true,
                ..f.clone()
            })
            .collect()
    }
}

fn normalize_set<I, S>(names: I) -> HashSet<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    names
        .into_iter()
        .map(|n| n.as_ref().trim().to_lowercase())
        .filter(|n| !n.is_empty())
        .collect()
}

fn read_name_list(path: &Path) -> Result<Vec<String>, ScoutError> {
    let content = std::fs::read_to_string(path).map_err(|source| ScoutError::NameList {
        path: path.display().to_string(),
        source,
    })?;
    Ok(content.lines().map(|l| l.to_string()).collect())
}
