use chrono::{DateTime, Utc};

use crate::context::AppContext;
use crate::domain::commit::{CommitRecord, flatten_diffs};
use crate::domain::diff::DiffFilter;
use crate::domain::prompt::build_prompt;
use crate::domain::repository::RepositorySlug;
use crate::domain::summary::SummaryOutcome;
use crate::domain::window::LookbackWindow;
use crate::error::AppResult;
use crate::services::{CompletionError, LanguageModelService, SourceControlService};

#[derive(Debug, Clone)]
pub struct StandupRequest {
    pub repository: RepositorySlug,
    pub author: String,
    pub window: LookbackWindow,
}

pub struct StandupOutcome {
    pub records: Vec<CommitRecord>,
    pub summary: SummaryOutcome,
}

pub async fn generate_standup(
    ctx: &AppContext,
    request: &StandupRequest,
) -> AppResult<StandupOutcome> {
    generate_standup_at(ctx, request, Utc::now()).await
}

/// Fetch, then summarize once over the complete record set.
pub async fn generate_standup_at(
    ctx: &AppContext,
    request: &StandupRequest,
    now: DateTime<Utc>,
) -> AppResult<StandupOutcome> {
    let records = fetch_commit_records(
        ctx.source_control.as_ref(),
        &ctx.config.diff_filter,
        request,
        now,
    )
    .await?;
    let summary = summarize(ctx.language_model.as_ref(), &records).await;

    Ok(StandupOutcome { records, summary })
}

/// One record per commit by the requested author, in API order.
///
/// A failed diff fetch aborts the whole run rather than dropping the commit.
pub async fn fetch_commit_records(
    source_control: &dyn SourceControlService,
    filter: &DiffFilter,
    request: &StandupRequest,
    now: DateTime<Utc>,
) -> AppResult<Vec<CommitRecord>> {
    let since = request.window.cutoff(now);
    let commits = source_control
        .list_commits(&request.repository, since)
        .await?;
    let total = commits.len();

    let mut records = Vec::new();
    for commit in commits
        .into_iter()
        .filter(|commit| commit.is_authored_by(&request.author))
    {
        let files = source_control
            .commit_files(&request.repository, &commit.sha)
            .await?;
        let diffs = filter.apply_all(&files);
        tracing::debug!(
            sha = %commit.sha,
            authored_at = ?commit.authored_at,
            files = files.len(),
            kept = diffs.len(),
            "filtered commit diffs"
        );
        records.push(CommitRecord::new(commit.message, diffs));
    }

    tracing::info!(
        repository = %request.repository,
        author = %request.author,
        days = request.window.as_days(),
        patch_limit = filter.patch_char_limit(),
        total,
        matched = records.len(),
        "collected commit records"
    );
    Ok(records)
}

pub async fn summarize(
    language_model: &dyn LanguageModelService,
    records: &[CommitRecord],
) -> SummaryOutcome {
    let diffs = flatten_diffs(records);
    if diffs.is_empty() {
        return SummaryOutcome::NoDiffs;
    }

    let prompt = build_prompt(diffs);
    match language_model.complete(&prompt).await {
        Ok(text) => SummaryOutcome::from_completion(&text),
        Err(err @ CompletionError::AccessDenied { .. }) => {
            SummaryOutcome::AccessDenied(err.to_string())
        }
        Err(err @ CompletionError::Status { .. }) => SummaryOutcome::ApiError(err.to_string()),
        Err(CompletionError::Other(detail)) => SummaryOutcome::Unexpected(detail),
    }
}
