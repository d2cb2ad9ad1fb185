use std::fmt;

use crate::error::{AppError, AppResult};

/// A hosted repository identified as `owner/repo`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositorySlug {
    owner: String,
    name: String,
}

impl RepositorySlug {
    pub fn parse(input: &str) -> AppResult<Self> {
        let trimmed = input.trim();
        let (owner, name) = trimmed.split_once('/').ok_or_else(|| {
            AppError::Input(format!("repository must look like owner/repo, got '{trimmed}'"))
        })?;

        let valid = |part: &str| !part.is_empty() && !part.contains(char::is_whitespace);
        if !valid(owner) || !valid(name) || name.contains('/') {
            return Err(AppError::Input(format!(
                "repository must look like owner/repo, got '{trimmed}'"
            )));
        }

        Ok(Self {
            owner: owner.to_string(),
            name: name.to_string(),
        })
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for RepositorySlug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}
