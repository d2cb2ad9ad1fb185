use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, header::AUTHORIZATION};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::infra::http;
use crate::services::{CompletionError, LanguageModelService};

pub const TEMPERATURE: f32 = 0.4;
pub const MAX_TOKENS: u32 = 500;

/// Chat-completion client for Groq's OpenAI-compatible endpoint.
pub struct GroqClient {
    http: Client,
    base_url: String,
    api_key: String,
    model: String,
}

impl GroqClient {
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        model: impl Into<String>,
        timeout: Duration,
    ) -> AppResult<Self> {
        let http = http::builder(timeout).build().map_err(|err| {
            AppError::LanguageModel(format!("failed to build HTTP client: {err}"))
        })?;
        Ok(Self {
            http,
            base_url: base_url.into(),
            api_key: api_key.into(),
            model: model.into(),
        })
    }

    fn completions_endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl LanguageModelService for GroqClient {
    async fn complete(&self, prompt: &str) -> Result<String, CompletionError> {
        let request = ChatRequest {
            model: &self.model,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
            temperature: TEMPERATURE,
            max_tokens: MAX_TOKENS,
        };

        tracing::debug!(model = %self.model, prompt_chars = prompt.len(), "requesting completion");
        let response = self
            .http
            .post(self.completions_endpoint())
            .header(AUTHORIZATION, format!("Bearer {}", self.api_key))
            .json(&request)
            .send()
            .await
            .map_err(|err| CompletionError::Other(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unable to read response>".to_string());
            tracing::warn!(status = status.as_u16(), "Groq request failed");
            return Err(classify_status(status, body));
        }

        let payload: ChatResponse = response
            .json()
            .await
            .map_err(|err| CompletionError::Other(format!("invalid completion payload: {err}")))?;

        payload
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| CompletionError::Other("completion contained no message text".to_string()))
    }
}

fn classify_status(status: StatusCode, body: String) -> CompletionError {
    let code = status.as_u16();
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
            CompletionError::AccessDenied { status: code, body }
        }
        _ => CompletionError::Status { status: code, body },
    }
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Deserialize)]
struct ChatChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}
