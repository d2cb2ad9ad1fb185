use clap::{Args, Subcommand};

use crate::cmd::input::prompt_line;
use crate::config::{DEFAULT_GROQ_MODEL, StoredConfig, config_file_path};
use crate::domain::diff::DEFAULT_PATCH_CHAR_LIMIT;
use crate::error::{AppError, AppResult};

#[derive(Args, Debug, Clone)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand, Debug, Clone)]
pub enum ConfigCommand {
    /// Run the interactive configuration wizard.
    Init,
    /// Show the stored configuration (secrets masked).
    Show,
}

pub async fn run(command: ConfigCommand) -> AppResult<()> {
    match command {
        ConfigCommand::Init => run_init().await,
        ConfigCommand::Show => run_show(),
    }
}

async fn run_init() -> AppResult<()> {
    let path = config_file_path()?;
    let mut cfg = StoredConfig::load_from(&path)?;

    println!("Configuring standup.");
    println!("Press Enter to keep the current value, '-' to clear it.");
    println!("Secrets are stored in the local config file; protect your filesystem accordingly.");
    println!();

    apply_prompt("GitHub personal access token", &mut cfg.github_token, true).await?;
    apply_prompt("Groq API key", &mut cfg.groq_api_key, true).await?;
    apply_prompt("Groq model", &mut cfg.groq_model, false).await?;

    let mut limit = cfg.patch_char_limit.map(|limit| limit.to_string());
    apply_prompt("Patch character limit", &mut limit, false).await?;
    cfg.patch_char_limit = limit.as_deref().map(parse_limit).transpose()?;

    let mut suffixes = cfg.noise_suffixes.as_deref().map(join_list);
    apply_prompt("Ignored file suffixes (comma separated)", &mut suffixes, false).await?;
    cfg.noise_suffixes = suffixes.as_deref().map(split_list);

    let mut fragments = cfg.noise_fragments.as_deref().map(join_list);
    apply_prompt("Ignored path fragments (comma separated)", &mut fragments, false).await?;
    cfg.noise_fragments = fragments.as_deref().map(split_list);

    cfg.save_to(&path)?;
    println!("\nConfiguration saved to {}", path.display());
    Ok(())
}

fn run_show() -> AppResult<()> {
    let path = config_file_path()?;
    let cfg = StoredConfig::load_from(&path)?;

    println!("Configuration file: {}", path.display());
    println!("GitHub token: {}", mask_secret(&cfg.github_token));
    println!("Groq API key: {}", mask_secret(&cfg.groq_api_key));
    println!(
        "Groq model: {}",
        display_or(&cfg.groq_model, DEFAULT_GROQ_MODEL)
    );
    println!(
        "Patch character limit: {}",
        cfg.patch_char_limit.unwrap_or(DEFAULT_PATCH_CHAR_LIMIT)
    );
    println!(
        "Ignored file suffixes: {}",
        display_value(&cfg.noise_suffixes.as_deref().map(join_list))
    );
    println!(
        "Ignored path fragments: {}",
        display_value(&cfg.noise_fragments.as_deref().map(join_list))
    );

    Ok(())
}

async fn apply_prompt(field: &str, target: &mut Option<String>, secret: bool) -> AppResult<()> {
    let label = match (target.as_deref(), secret) {
        (Some(_), true) => format!("{field} [****] (Enter to keep, '-' to clear): "),
        (Some(value), false) => format!("{field} [{value}] (Enter to keep, '-' to clear): "),
        (None, _) => format!("{field} (Enter to skip): "),
    };

    match PromptAction::from_answer(&prompt_line(&label).await?) {
        PromptAction::Keep => {}
        PromptAction::Clear => *target = None,
        PromptAction::Set(value) => *target = Some(value),
    }
    Ok(())
}

fn parse_limit(raw: &str) -> AppResult<usize> {
    raw.trim()
        .parse::<usize>()
        .map_err(|err| AppError::Input(format!("invalid patch character limit '{raw}': {err}")))
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

fn join_list(items: &[String]) -> String {
    items.join(", ")
}

fn display_value(value: &Option<String>) -> String {
    value
        .as_deref()
        .filter(|v| !v.is_empty())
        .map(|v| v.to_string())
        .unwrap_or_else(|| "<default>".to_string())
}

fn display_or(value: &Option<String>, default: &str) -> String {
    value
        .as_deref()
        .filter(|v| !v.is_empty())
        .unwrap_or(default)
        .to_string()
}

fn mask_secret(value: &Option<String>) -> String {
    match value {
        Some(token) if token.chars().count() > 6 => {
            let chars = token.chars().collect::<Vec<_>>();
            let prefix = chars[..3].iter().collect::<String>();
            let suffix = chars[chars.len() - 3..].iter().collect::<String>();
            format!("{prefix}***{suffix}")
        }
        Some(token) if !token.is_empty() => "***".to_string(),
        _ => "<not set>".to_string(),
    }
}

#[derive(Debug, PartialEq, Eq)]
enum PromptAction {
    Keep,
    Clear,
    Set(String),
}

impl PromptAction {
    fn from_answer(answer: &str) -> Self {
        let trimmed = answer.trim();
        if trimmed.is_empty() {
            PromptAction::Keep
        } else if trimmed == "-" {
            PromptAction::Clear
        } else {
            PromptAction::Set(trimmed.to_string())
        }
    }
}
