use std::fmt;

use crate::domain::commit::FileChange;

pub const DEFAULT_PATCH_CHAR_LIMIT: usize = 500;
pub const TRUNCATION_MARKER: &str = "...";
pub const DEFAULT_NOISE_SUFFIXES: &[&str] =
    &[".lock", ".md", ".txt", ".png", ".jpg", ".jpeg", ".svg"];
pub const DEFAULT_NOISE_FRAGMENTS: &[&str] = &["package-lock.json", "yarn.lock"];

/// One changed file that survived the noise filter, with its patch capped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilteredDiff {
    filename: String,
    patch: String,
}

impl FilteredDiff {
    pub fn from_parts(filename: impl Into<String>, patch: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            patch: patch.into(),
        }
    }

    #[cfg(test)]
    pub fn filename(&self) -> &str {
        &self.filename
    }

    #[cfg(test)]
    pub fn patch(&self) -> &str {
        &self.patch
    }
}

impl fmt::Display for FilteredDiff {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "File: {}\n{}", self.filename, self.patch)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffFilter {
    patch_char_limit: usize,
    noise_suffixes: Vec<String>,
    noise_fragments: Vec<String>,
}

impl Default for DiffFilter {
    fn default() -> Self {
        Self {
            patch_char_limit: DEFAULT_PATCH_CHAR_LIMIT,
            noise_suffixes: to_owned_list(DEFAULT_NOISE_SUFFIXES),
            noise_fragments: to_owned_list(DEFAULT_NOISE_FRAGMENTS),
        }
    }
}

impl DiffFilter {
    pub fn with_patch_char_limit(mut self, limit: usize) -> Self {
        self.patch_char_limit = limit;
        self
    }

    pub fn with_noise_suffixes(mut self, suffixes: Vec<String>) -> Self {
        self.noise_suffixes = suffixes;
        self
    }

    pub fn with_noise_fragments(mut self, fragments: Vec<String>) -> Self {
        self.noise_fragments = fragments;
        self
    }

    pub fn patch_char_limit(&self) -> usize {
        self.patch_char_limit
    }

    /// Matching is case-sensitive.
    pub fn is_noise(&self, filename: &str) -> bool {
        self.noise_suffixes
            .iter()
            .any(|suffix| filename.ends_with(suffix.as_str()))
            || self
                .noise_fragments
                .iter()
                .any(|fragment| filename.contains(fragment.as_str()))
    }

    /// Returns `None` for noise files and for files without a patch.
    pub fn apply(&self, change: &FileChange) -> Option<FilteredDiff> {
        if self.is_noise(&change.filename) {
            return None;
        }
        let patch = change.patch.as_deref().filter(|patch| !patch.is_empty())?;

        Some(FilteredDiff::from_parts(
            change.filename.clone(),
            truncate_patch(patch, self.patch_char_limit),
        ))
    }

    pub fn apply_all<'a, I>(&self, changes: I) -> Vec<FilteredDiff>
    where
        I: IntoIterator<Item = &'a FileChange>,
    {
        changes
            .into_iter()
            .filter_map(|change| self.apply(change))
            .collect()
    }
}

/// Keeps the first `limit` characters (not bytes) and marks the cut.
pub fn truncate_patch(patch: &str, limit: usize) -> String {
    match patch.char_indices().nth(limit) {
        Some((cut, _)) => format!("{}{TRUNCATION_MARKER}", &patch[..cut]),
        None => patch.to_string(),
    }
}

fn to_owned_list(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| value.to_string()).collect()
}
