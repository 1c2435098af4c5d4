//! Provider configuration from environment variables.

use std::env;
use thiserror::Error;

pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.0-flash";
pub const DEFAULT_OPENROUTER_BASE_URL: &str = "https://openrouter.ai/api/v1";
pub const DEFAULT_OPENROUTER_MODEL: &str = "mistralai/mistral-small-3.2-24b-instruct:free";
pub const DEFAULT_TEMPERATURE: f32 = 0.6;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Unknown provider: {0} (expected gemini, openrouter or fake)")]
    UnknownProvider(String),

    #[error("Invalid value for {name}: {value}")]
    InvalidValue { name: String, value: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderKind {
    Gemini,
    OpenRouter,
    Fake,
}

impl ProviderKind {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "gemini" => Some(ProviderKind::Gemini),
            "openrouter" => Some(ProviderKind::OpenRouter),
            "fake" => Some(ProviderKind::Fake),
            _ => None,
        }
    }
}

/// Provider configuration.
#[derive(Debug, Clone)]
pub struct LlmConfig {
    pub provider: ProviderKind,
    pub api_key: String,
    pub model: String,
    pub base_url: String,
    pub temperature: f32,
}

impl LlmConfig {
    /// Load configuration from environment variables.
    ///
    /// - `SMARTCHEF_LLM_PROVIDER`: "gemini", "openrouter" or "fake" (default: "openrouter")
    /// - `SMARTCHEF_LLM_TEMPERATURE`: sampling temperature (default: 0.6)
    /// - `GEMINI_API_KEY`, `GEMINI_MODEL`, `GEMINI_BASE_URL`
    /// - `OPENROUTER_API_KEY`, `OPENROUTER_MODEL`, `OPENROUTER_BASE_URL`
    ///
    /// Only the selected provider's API key is required.
    pub fn from_env() -> Result<Self, ConfigError> {
        let provider_name =
            env::var("SMARTCHEF_LLM_PROVIDER").unwrap_or_else(|_| "openrouter".to_string());
        let provider = ProviderKind::from_str(&provider_name)
            .ok_or(ConfigError::UnknownProvider(provider_name))?;

        let temperature = match env::var("SMARTCHEF_LLM_TEMPERATURE") {
            Ok(value) => value.parse().map_err(|_| ConfigError::InvalidValue {
                name: "SMARTCHEF_LLM_TEMPERATURE".to_string(),
                value,
            })?,
            Err(_) => DEFAULT_TEMPERATURE,
        };

        let (key_var, model_var, base_var, default_model, default_base) = match provider {
            ProviderKind::Fake => return Ok(Self::fake()),
            ProviderKind::Gemini => (
                "GEMINI_API_KEY",
                "GEMINI_MODEL",
                "GEMINI_BASE_URL",
                DEFAULT_GEMINI_MODEL,
                DEFAULT_GEMINI_BASE_URL,
            ),
            ProviderKind::OpenRouter => (
                "OPENROUTER_API_KEY",
                "OPENROUTER_MODEL",
                "OPENROUTER_BASE_URL",
                DEFAULT_OPENROUTER_MODEL,
                DEFAULT_OPENROUTER_BASE_URL,
            ),
        };

        let api_key =
            env::var(key_var).map_err(|_| ConfigError::MissingEnvVar(key_var.to_string()))?;
        let model = env::var(model_var).unwrap_or_else(|_| default_model.to_string());
        let base_url = env::var(base_var).unwrap_or_else(|_| default_base.to_string());

        Ok(Self {
            provider,
            api_key,
            model,
            base_url,
            temperature,
        })
    }

    /// Configuration for the offline fake provider.
    pub fn fake() -> Self {
        Self {
            provider: ProviderKind::Fake,
            api_key: String::new(),
            model: "fake-model".to_string(),
            base_url: String::new(),
            temperature: DEFAULT_TEMPERATURE,
        }
    }
}
