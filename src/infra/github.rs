use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use reqwest::{
    Client, Response,
    header::{ACCEPT, AUTHORIZATION},
};
use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::domain::commit::{Commit, FileChange};
use crate::domain::repository::RepositorySlug;
use crate::error::{AppError, AppResult};
use crate::infra::http;
use crate::services::SourceControlService;

const GITHUB_ACCEPT: &str = "application/vnd.github+json";
const COMMITS_PER_PAGE: &str = "100";

pub struct GitHubClient {
    http: Client,
    base_url: String,
    token: String,
}

impl GitHubClient {
    pub fn new(
        base_url: impl Into<String>,
        token: impl Into<String>,
        timeout: Duration,
    ) -> AppResult<Self> {
        let http = http::builder(timeout).build().map_err(|err| {
            AppError::SourceControl(format!("failed to build HTTP client: {err}"))
        })?;
        Ok(Self {
            http,
            base_url: base_url.into(),
            token: token.into(),
        })
    }

    fn commits_endpoint(&self, repository: &RepositorySlug) -> String {
        format!(
            "{}/repos/{}/{}/commits",
            self.base_url.trim_end_matches('/'),
            repository.owner(),
            repository.name()
        )
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, &str)],
    ) -> AppResult<T> {
        let response = self
            .http
            .get(url)
            .query(query)
            .header(AUTHORIZATION, format!("Bearer {}", self.token))
            .header(ACCEPT, GITHUB_ACCEPT)
            .send()
            .await
            .map_err(|err| {
                if err.is_timeout() {
                    AppError::SourceControl(format!("GitHub request timed out: {url}"))
                } else {
                    AppError::SourceControl(format!("failed to call GitHub: {err}"))
                }
            })?;

        let response = Self::ensure_success(response).await?;
        response.json::<T>().await.map_err(|err| {
            AppError::SourceControl(format!("failed to parse GitHub response: {err}"))
        })
    }

    async fn ensure_success(response: Response) -> AppResult<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let url = response.url().to_string();
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "<unable to read response>".to_string());
        tracing::warn!(status = status.as_u16(), %url, "GitHub request failed");
        Err(AppError::SourceControl(format!(
            "GitHub responded with {status} for {url}: {body}"
        )))
    }
}

#[async_trait]
impl SourceControlService for GitHubClient {
    async fn list_commits(
        &self,
        repository: &RepositorySlug,
        since: DateTime<Utc>,
    ) -> AppResult<Vec<Commit>> {
        let since = since.to_rfc3339_opts(SecondsFormat::Secs, true);
        let url = self.commits_endpoint(repository);
        let payload: Vec<GitHubCommitSummary> = self
            .get_json(&url, &[("since", since.as_str()), ("per_page", COMMITS_PER_PAGE)])
            .await?;

        tracing::debug!(%repository, %since, count = payload.len(), "listed commits");
        Ok(payload.into_iter().map(Commit::from).collect())
    }

    async fn commit_files(
        &self,
        repository: &RepositorySlug,
        sha: &str,
    ) -> AppResult<Vec<FileChange>> {
        let url = format!("{}/{}", self.commits_endpoint(repository), sha);
        let payload: GitHubCommitDetail = self.get_json(&url, &[]).await?;

        tracing::debug!(%repository, sha, files = payload.files.len(), "fetched commit files");
        Ok(payload
            .files
            .into_iter()
            .map(|file| FileChange {
                filename: file.filename,
                patch: file.patch,
            })
            .collect())
    }
}

#[derive(Deserialize)]
struct GitHubCommitSummary {
    sha: String,
    commit: GitHubCommitBody,
}

#[derive(Deserialize)]
struct GitHubCommitBody {
    #[serde(default)]
    author: Option<GitHubActor>,
    #[serde(default)]
    message: String,
}

#[derive(Deserialize)]
struct GitHubActor {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    date: Option<DateTime<Utc>>,
}

impl From<GitHubCommitSummary> for Commit {
    fn from(summary: GitHubCommitSummary) -> Self {
        let (author_name, authored_at) = match summary.commit.author {
            Some(actor) => (actor.name.unwrap_or_default(), actor.date),
            None => (String::new(), None),
        };
        Commit {
            sha: summary.sha,
            author_name,
            message: summary.commit.message,
            authored_at,
        }
    }
}

#[derive(Deserialize)]
struct GitHubCommitDetail {
    #[serde(default)]
    files: Vec<GitHubFile>,
}

#[derive(Deserialize)]
struct GitHubFile {
    filename: String,
    #[serde(default)]
    patch: Option<String>,
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use mockito::Matcher;

    use super::*;

    fn client(server: &mockito::ServerGuard) -> GitHubClient {
        GitHubClient::new(server.url(), "ghp_test", Duration::from_secs(5)).unwrap()
    }

    fn repo() -> RepositorySlug {
        RepositorySlug::parse("acme/widgets").unwrap()
    }

    #[tokio::test]
    async fn lists_commits_since_cutoff() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/repos/acme/widgets/commits")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("since".into(), "2024-03-08T12:00:00Z".into()),
                Matcher::UrlEncoded("per_page".into(), "100".into()),
            ]))
            .match_header("authorization", "Bearer ghp_test")
            .match_header("accept", GITHUB_ACCEPT)
            .match_header("user-agent", Matcher::Regex("^standup/".into()))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"[
                    {"sha": "s1", "commit": {"author": {"name": "Bob", "date": "2024-03-09T08:00:00Z"}, "message": "Fix parser"}},
                    {"sha": "s2", "commit": {"author": null, "message": "Bot commit"}}
                ]"#,
            )
            .create_async()
            .await;

        let since = Utc.with_ymd_and_hms(2024, 3, 8, 12, 0, 0).unwrap();
        let commits = client(&server).list_commits(&repo(), since).await.unwrap();
        mock.assert_async().await;

        assert_eq!(commits.len(), 2);
        assert_eq!(commits[0].sha, "s1");
        assert_eq!(commits[0].author_name, "Bob");
        assert_eq!(commits[0].message, "Fix parser");
        assert_eq!(
            commits[0].authored_at,
            Some(Utc.with_ymd_and_hms(2024, 3, 9, 8, 0, 0).unwrap())
        );
        assert_eq!(commits[1].author_name, "");
    }

    #[tokio::test]
    async fn fetches_files_in_api_order() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/repos/acme/widgets/commits/s1")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"sha": "s1", "files": [
                    {"filename": "src/z.rs", "patch": "@@ -1 +1 @@\n-a\n+b"},
                    {"filename": "logo.png"}
                ]}"#,
            )
            .create_async()
            .await;

        let files = client(&server).commit_files(&repo(), "s1").await.unwrap();
        mock.assert_async().await;

        assert_eq!(
            files,
            vec![
                FileChange {
                    filename: "src/z.rs".to_string(),
                    patch: Some("@@ -1 +1 @@\n-a\n+b".to_string()),
                },
                FileChange {
                    filename: "logo.png".to_string(),
                    patch: None,
                },
            ]
        );
    }

    #[tokio::test]
    async fn non_success_status_is_fatal() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/repos/acme/widgets/commits")
            .match_query(Matcher::Any)
            .with_status(404)
            .with_body(r#"{"message": "Not Found"}"#)
            .create_async()
            .await;

        let err = client(&server)
            .list_commits(&repo(), Utc::now())
            .await
            .unwrap_err();
        match err {
            AppError::SourceControl(message) => {
                assert!(message.contains("404"), "{message}");
                assert!(message.contains("Not Found"), "{message}");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn malformed_payload_is_fatal() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/repos/acme/widgets/commits/s1")
            .with_status(200)
            .with_body("not json")
            .create_async()
            .await;

        let result = client(&server).commit_files(&repo(), "s1").await;
        assert!(matches!(result, Err(AppError::SourceControl(_))));
    }

    #[tokio::test]
    async fn hung_request_times_out_as_fatal_error() {
        let base_url = http::unresponsive_server().await;
        let client = GitHubClient::new(base_url, "ghp_test", Duration::from_millis(300)).unwrap();

        let err = client.list_commits(&repo(), Utc::now()).await.unwrap_err();
        match err {
            AppError::SourceControl(message) => {
                assert!(message.contains("timed out"), "{message}");
                assert!(message.contains("/repos/acme/widgets/commits"), "{message}");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
