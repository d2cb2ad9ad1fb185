use std::sync::Arc;

use crate::cmd::credentials;
use crate::cmd::input::prompt_line;
use crate::config::{AppConfig, StoredConfig, config_file_path};
use crate::context::AppContext;
use crate::domain::repository::RepositorySlug;
use crate::domain::window::LookbackWindow;
use crate::error::{AppError, AppResult};
use crate::infra::github::GitHubClient;
use crate::infra::groq::GroqClient;
use crate::workflow::standup::{StandupRequest, generate_standup};

const BANNER: &str = r"
  ___  _                  _
 / __|| |_  __ _  _ _   __| | _  _  _ __
 \__ \|  _|/ _` || ' \ / _` || || || '_ \
 |___/ \__|\__,_||_||_|\__,_| \_,_|| .__/
                                   |_|
";

pub fn print_banner() {
    println!("{BANNER}");
    println!("  Your commits, summarized for standup.\n");
}

pub async fn run() -> AppResult<()> {
    print_banner();

    let config_path = config_file_path()?;
    let stored = StoredConfig::load_from(&config_path)?;
    let mut config = AppConfig::load(&stored)?;

    let github_token = credentials::ensure(
        config.github_token.take(),
        &credentials::GITHUB_TOKEN,
        &config_path,
    )
    .await?;
    let groq_api_key = credentials::ensure(
        config.groq_api_key.take(),
        &credentials::GROQ_API_KEY,
        &config_path,
    )
    .await?;

    let author = prompt_line("👤 Enter your GitHub username: ").await?;
    if author.is_empty() {
        return Err(AppError::Input("GitHub username must not be empty".to_string()));
    }
    let repository = RepositorySlug::parse(
        &prompt_line("📦 Enter the repository (format: owner/repo): ").await?,
    )?;
    let window =
        LookbackWindow::parse(&prompt_line("📅 Enter number of days to look back (default=1): ").await?);

    let source_control = Arc::new(GitHubClient::new(
        config.github_api_url.clone(),
        github_token,
        config.request_timeout,
    )?);
    let language_model = Arc::new(GroqClient::new(
        config.groq_base_url.clone(),
        groq_api_key,
        config.groq_model.clone(),
        config.request_timeout,
    )?);
    let context = AppContext::new(config, source_control, language_model);

    println!("🚀 Fetching commits from GitHub...");
    let request = StandupRequest {
        repository,
        author,
        window,
    };
    let outcome = generate_standup(&context, &request).await?;

    if outcome.summary.is_failure() {
        tracing::warn!(commits = outcome.records.len(), "summarization failed");
    }

    println!("\n--- 📊 Auto Standup ---\n");
    println!("{}", outcome.summary);
    Ok(())
}
