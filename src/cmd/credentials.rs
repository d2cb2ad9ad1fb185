use std::path::Path;

use crate::cmd::input::prompt_line;
use crate::config::StoredConfig;
use crate::error::{AppError, AppResult};

/// Prompt wording and storage slot for one stored secret.
pub struct Credential {
    missing_notice: &'static str,
    prompt: &'static str,
    saved_notice: &'static str,
    slot: fn(&mut StoredConfig) -> &mut Option<String>,
}

pub const GITHUB_TOKEN: Credential = Credential {
    missing_notice: "🔑 No GitHub token found.",
    prompt: "👉 Enter your GitHub Personal Access Token (PAT): ",
    saved_notice: "✅ Token saved to",
    slot: github_token_slot,
};

pub const GROQ_API_KEY: Credential = Credential {
    missing_notice: "No Groq API Key found.",
    prompt: "👉 Enter your Groq API Key: ",
    saved_notice: "✅ Groq API Key saved to",
    slot: groq_api_key_slot,
};

fn github_token_slot(cfg: &mut StoredConfig) -> &mut Option<String> {
    &mut cfg.github_token
}

fn groq_api_key_slot(cfg: &mut StoredConfig) -> &mut Option<String> {
    &mut cfg.groq_api_key
}

/// Returns the resolved secret, or asks for it and persists the answer.
pub async fn ensure(
    resolved: Option<String>,
    credential: &Credential,
    config_path: &Path,
) -> AppResult<String> {
    if let Some(value) = resolved {
        return Ok(value);
    }

    println!("{}", credential.missing_notice);
    let value = prompt_line(credential.prompt).await?;
    if value.is_empty() {
        return Err(AppError::Input("a value is required to continue".to_string()));
    }

    persist(credential, &value, config_path)?;
    println!("{} {}", credential.saved_notice, config_path.display());
    Ok(value)
}

fn persist(credential: &Credential, value: &str, config_path: &Path) -> AppResult<()> {
    let mut stored = StoredConfig::load_from(config_path)?;
    *(credential.slot)(&mut stored) = Some(value.to_string());
    stored.save_to(config_path)?;
    tracing::debug!(path = %config_path.display(), "stored credential");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn resolved_value_is_returned_without_prompting() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        let token = ensure(Some("ghp_ready".to_string()), &GITHUB_TOKEN, &path)
            .await
            .unwrap();

        assert_eq!(token, "ghp_ready");
        assert!(!path.exists());
    }

    #[test]
    fn persisting_keeps_other_settings() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        StoredConfig {
            github_token: Some("ghp_old".to_string()),
            groq_model: Some("custom".to_string()),
            ..StoredConfig::default()
        }
        .save_to(&path)
        .unwrap();

        persist(&GROQ_API_KEY, "gsk_new", &path).unwrap();

        let stored = StoredConfig::load_from(&path).unwrap();
        assert_eq!(stored.github_token.as_deref(), Some("ghp_old"));
        assert_eq!(stored.groq_api_key.as_deref(), Some("gsk_new"));
        assert_eq!(stored.groq_model.as_deref(), Some("custom"));
    }

    #[test]
    fn persisting_creates_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("standup").join("config.json");

        persist(&GITHUB_TOKEN, "ghp_fresh", &path).unwrap();

        let stored = StoredConfig::load_from(&path).unwrap();
        assert_eq!(stored.github_token.as_deref(), Some("ghp_fresh"));
    }
}
