use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompletionError {
    #[error("Error code: {status} - {body}")]
    AccessDenied { status: u16, body: String },
    #[error("Error code: {status} - {body}")]
    Status { status: u16, body: String },
    #[error("{0}")]
    Other(String),
}

#[async_trait]
pub trait LanguageModelService: Send + Sync {
    /// Sends one user-role prompt and returns the first choice's text.
    async fn complete(&self, prompt: &str) -> Result<String, CompletionError>;
}
