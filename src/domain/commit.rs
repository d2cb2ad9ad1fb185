use chrono::{DateTime, Utc};

use crate::domain::diff::FilteredDiff;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Commit {
    pub sha: String,
    pub author_name: String,
    pub message: String,
    pub authored_at: Option<DateTime<Utc>>,
}

impl Commit {
    /// Case-insensitive exact match on the author display name.
    pub fn is_authored_by(&self, author: &str) -> bool {
        self.author_name.to_lowercase() == author.to_lowercase()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileChange {
    pub filename: String,
    pub patch: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitRecord {
    pub message: String,
    pub diffs: Vec<FilteredDiff>,
}

impl CommitRecord {
    pub fn new(message: impl Into<String>, diffs: Vec<FilteredDiff>) -> Self {
        Self {
            message: message.into(),
            diffs,
        }
    }
}

/// Flattens every diff block across records, record order first.
pub fn flatten_diffs(records: &[CommitRecord]) -> Vec<&FilteredDiff> {
    records.iter().flat_map(|record| record.diffs.iter()).collect()
}
