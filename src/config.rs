use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::domain::diff::DiffFilter;
use crate::error::{AppError, AppResult};

const APP_DIRECTORY_NAME: &str = "standup";
const CONFIG_FILE_NAME: &str = "config.json";

pub const DEFAULT_GITHUB_API_URL: &str = "https://api.github.com";
pub const DEFAULT_GROQ_BASE_URL: &str = "https://api.groq.com/openai/v1";
pub const DEFAULT_GROQ_MODEL: &str = "llama3-8b-8192";
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;

pub fn config_directory() -> AppResult<PathBuf> {
    dirs::config_dir()
        .map(|dir| dir.join(APP_DIRECTORY_NAME))
        .ok_or_else(|| {
            AppError::Configuration("unable to determine the user config directory".to_string())
        })
}

pub fn config_file_path() -> AppResult<PathBuf> {
    Ok(config_directory()?.join(CONFIG_FILE_NAME))
}

/// Settings persisted in the user's config file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredConfig {
    #[serde(rename = "GITHUB_TOKEN", default, skip_serializing_if = "Option::is_none")]
    pub github_token: Option<String>,
    #[serde(rename = "GROQ_API_KEY", default, skip_serializing_if = "Option::is_none")]
    pub groq_api_key: Option<String>,
    #[serde(rename = "GROQ_MODEL", default, skip_serializing_if = "Option::is_none")]
    pub groq_model: Option<String>,
    #[serde(
        rename = "PATCH_CHAR_LIMIT",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub patch_char_limit: Option<usize>,
    #[serde(rename = "NOISE_SUFFIXES", default, skip_serializing_if = "Option::is_none")]
    pub noise_suffixes: Option<Vec<String>>,
    #[serde(
        rename = "NOISE_FRAGMENTS",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub noise_fragments: Option<Vec<String>>,
}

impl StoredConfig {
    pub fn load_from(path: &Path) -> AppResult<Self> {
        match fs::read_to_string(path) {
            Ok(contents) if contents.trim().is_empty() => Ok(Self::default()),
            Ok(contents) => serde_json::from_str(&contents).map_err(|err| {
                AppError::Configuration(format!("invalid config file {}: {err}", path.display()))
            }),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(AppError::Io(err)),
        }
    }

    pub fn save_to(&self, path: &Path) -> AppResult<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_string_pretty(self)
            .map_err(|err| AppError::Configuration(format!("failed to write config: {err}")))?;
        fs::write(path, data)?;
        Ok(())
    }
}

/// Runtime configuration: stored settings with environment overrides applied.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub github_token: Option<String>,
    pub groq_api_key: Option<String>,
    pub github_api_url: String,
    pub groq_base_url: String,
    pub groq_model: String,
    pub request_timeout: Duration,
    pub diff_filter: DiffFilter,
}

impl AppConfig {
    pub fn load(stored: &StoredConfig) -> AppResult<Self> {
        Self::resolve(stored, |name| env::var(name).ok())
    }

    pub fn resolve<F>(stored: &StoredConfig, lookup: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let lookup = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        let request_timeout = match lookup("STANDUP_HTTP_TIMEOUT_SECS") {
            Some(raw) => raw.trim().parse::<u64>().map_err(|err| {
                AppError::Configuration(format!("invalid STANDUP_HTTP_TIMEOUT_SECS '{raw}': {err}"))
            })?,
            None => DEFAULT_HTTP_TIMEOUT_SECS,
        };

        let mut diff_filter = DiffFilter::default();
        if let Some(limit) = stored.patch_char_limit {
            diff_filter = diff_filter.with_patch_char_limit(limit);
        }
        if let Some(suffixes) = &stored.noise_suffixes {
            diff_filter = diff_filter.with_noise_suffixes(suffixes.clone());
        }
        if let Some(fragments) = &stored.noise_fragments {
            diff_filter = diff_filter.with_noise_fragments(fragments.clone());
        }

        Ok(Self {
            github_token: lookup("GITHUB_TOKEN").or_else(|| non_empty(&stored.github_token)),
            groq_api_key: lookup("GROQ_API_KEY").or_else(|| non_empty(&stored.groq_api_key)),
            github_api_url: lookup("STANDUP_GITHUB_API_URL")
                .unwrap_or_else(|| DEFAULT_GITHUB_API_URL.to_string()),
            groq_base_url: lookup("STANDUP_GROQ_BASE_URL")
                .unwrap_or_else(|| DEFAULT_GROQ_BASE_URL.to_string()),
            groq_model: lookup("STANDUP_GROQ_MODEL")
                .or_else(|| non_empty(&stored.groq_model))
                .unwrap_or_else(|| DEFAULT_GROQ_MODEL.to_string()),
            request_timeout: Duration::from_secs(request_timeout),
            diff_filter,
        })
    }
}

fn non_empty(value: &Option<String>) -> Option<String> {
    value.clone().filter(|v| !v.trim().is_empty())
}
