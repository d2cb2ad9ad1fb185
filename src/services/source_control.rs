use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::commit::{Commit, FileChange};
use crate::domain::repository::RepositorySlug;
use crate::error::AppResult;

/// Read access to a hosted repository's commit history.
///
/// Any failure is fatal to the run; implementations never skip a commit.
#[async_trait]
pub trait SourceControlService: Send + Sync {
    async fn list_commits(
        &self,
        repository: &RepositorySlug,
        since: DateTime<Utc>,
    ) -> AppResult<Vec<Commit>>;

    /// Files in API order.
    async fn commit_files(&self, repository: &RepositorySlug, sha: &str)
    -> AppResult<Vec<FileChange>>;
}
