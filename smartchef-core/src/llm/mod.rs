//! Text-generation provider abstraction.
//!
//! Two interchangeable hosted backends are supported, a Gemini-style
//! generative-text API and an OpenAI-compatible chat-completion gateway
//! (OpenRouter), plus a fake provider for tests. Exactly one provider is built
//! at startup from [`LlmConfig`] and shared by all request handlers.

mod config;
mod fake;
mod gemini;
mod openrouter;

pub use config::{ConfigError, LlmConfig, ProviderKind};
pub use fake::FakeProvider;
pub use gemini::GeminiProvider;
pub use openrouter::OpenRouterProvider;

use async_trait::async_trait;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

/// Error type for provider calls. Every variant is a request failure; none of
/// them carry usable model output.
#[derive(Debug, Error)]
pub enum LlmError {
    #[error("API request failed: {0}")]
    RequestFailed(String),

    #[error("API returned error: {status} - {message}")]
    ApiError { status: u16, message: String },

    #[error("Failed to parse response: {0}")]
    ParseError(String),

    #[error("Provider returned an empty reply")]
    EmptyReply,
}

/// A text-generation backend.
///
/// Implementations make exactly one outbound request per call and never retry.
#[async_trait]
pub trait LlmProvider: Send + Sync + fmt::Debug {
    /// Send a prompt and return the raw reply text.
    async fn generate(&self, prompt: &str) -> Result<String, LlmError>;

    /// Provider name (e.g., "gemini", "openrouter", "fake").
    fn provider_name(&self) -> &'static str;

    /// Model name as sent to the provider.
    fn model_name(&self) -> &str;
}

/// Build the configured provider.
pub fn create_provider(config: &LlmConfig) -> Arc<dyn LlmProvider> {
    match config.provider {
        ProviderKind::Gemini => Arc::new(GeminiProvider::new(config)),
        ProviderKind::OpenRouter => Arc::new(OpenRouterProvider::new(config)),
        ProviderKind::Fake => Arc::new(FakeProvider::default()),
    }
}

/// Reject replies that are missing or contain only whitespace.
fn non_empty(text: Option<String>) -> Result<String, LlmError> {
    match text {
        Some(text) if !text.trim().is_empty() => Ok(text),
        _ => Err(LlmError::EmptyReply),
    }
}

/// Shorten a response body for error messages and logs.
fn excerpt(body: &str) -> &str {
    let end = body
        .char_indices()
        .nth(500)
        .map(|(i, _)| i)
        .unwrap_or(body.len());
    &body[..end]
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_empty() {
        assert_eq!(non_empty(Some("hi".into())).unwrap(), "hi");
        assert!(matches!(non_empty(Some("  \n".into())), Err(LlmError::EmptyReply)));
        assert!(matches!(non_empty(None), Err(LlmError::EmptyReply)));
    }

    #[test]
    fn test_excerpt_respects_char_boundaries() {
        let body = "é".repeat(600);
        assert_eq!(excerpt(&body).chars().count(), 500);
        assert_eq!(excerpt("short"), "short");
    }

    #[test]
    fn test_create_fake_provider() {
        let config = LlmConfig::fake();
        let provider = create_provider(&config);
        assert_eq!(provider.provider_name(), "fake");
    }
}
