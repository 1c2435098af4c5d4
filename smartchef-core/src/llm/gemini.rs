//! Gemini-style generative-text provider.

use super::{excerpt, non_empty, LlmConfig, LlmError, LlmProvider};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Hosted generative-text API provider.
#[derive(Debug)]
pub struct GeminiProvider {
    api_key: String,
    model: String,
    base_url: String,
    temperature: f32,
    client: reqwest::Client,
}

impl GeminiProvider {
    pub fn new(config: &LlmConfig) -> Self {
        Self {
            api_key: config.api_key.clone(),
            model: config.model.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            temperature: config.temperature,
            client: reqwest::Client::new(),
        }
    }

    fn endpoint(&self) -> String {
        format!("{}/models/{}:generateContent", self.base_url, self.model)
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest {
    contents: Vec<Content>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize, Deserialize, Default)]
struct Content {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text: Option<String>,
}

#[derive(Debug, Serialize)]
struct GenerationConfig {
    temperature: f32,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<Content>,
}

#[derive(Debug, Deserialize)]
struct GeminiApiError {
    message: String,
}

#[derive(Debug, Deserialize)]
struct GeminiErrorResponse {
    error: GeminiApiError,
}

/// Text of the first candidate, with all of its text parts concatenated.
fn reply_text(response: GenerateResponse) -> Option<String> {
    let content = response.candidates.into_iter().next()?.content?;
    let text: String = content.parts.into_iter().filter_map(|p| p.text).collect();
    Some(text)
}

#[async_trait]
impl LlmProvider for GeminiProvider {
    async fn generate(&self, prompt: &str) -> Result<String, LlmError> {
        let request = GenerateRequest {
            contents: vec![Content {
                role: Some("user".to_string()),
                parts: vec![Part {
                    text: Some(prompt.to_string()),
                }],
            }],
            generation_config: GenerationConfig {
                temperature: self.temperature,
            },
        };

        tracing::debug!(provider = "gemini", model = %self.model, "Calling generative-text API");

        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| LlmError::RequestFailed(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| LlmError::RequestFailed(e.to_string()))?;

        if !status.is_success() {
            let message = serde_json::from_str::<GeminiErrorResponse>(&body)
                .map(|r| r.error.message)
                .unwrap_or_else(|_| excerpt(&body).to_string());
            tracing::error!(status = status.as_u16(), %message, "Gemini API error");
            return Err(LlmError::ApiError {
                status: status.as_u16(),
                message,
            });
        }

        let response: GenerateResponse =
            serde_json::from_str(&body).map_err(|e| LlmError::ParseError(e.to_string()))?;

        non_empty(reply_text(response))
    }

    fn provider_name(&self) -> &'static str {
        "gemini"
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::{stub, ProviderKind};

    fn parse(body: &str) -> Option<String> {
        reply_text(serde_json::from_str(body).unwrap())
    }

    #[test]
    fn test_reply_text_joins_parts_of_first_candidate() {
        let body = r#"{
            "candidates": [
                {"content": {"role": "model", "parts": [{"text": "{\"title\":"}, {"text": " \"Soup\"}"}]}},
                {"content": {"parts": [{"text": "ignored"}]}}
            ]
        }"#;
        assert_eq!(parse(body).as_deref(), Some("{\"title\": \"Soup\"}"));
    }

    #[test]
    fn test_reply_text_missing_content() {
        assert_eq!(parse(r#"{"candidates": []}"#), None);
        assert_eq!(parse(r#"{}"#), None);
        assert_eq!(parse(r#"{"candidates": [{"finishReason": "SAFETY"}]}"#), None);
        assert_eq!(
            parse(r#"{"candidates": [{"content": {"parts": []}}]}"#).as_deref(),
            Some("")
        );
    }

    #[test]
    fn test_request_shape() {
        let request = GenerateRequest {
            contents: vec![Content {
                role: Some("user".to_string()),
                parts: vec![Part {
                    text: Some("hello".to_string()),
                }],
            }],
            generation_config: GenerationConfig { temperature: 0.5 },
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["contents"][0]["parts"][0]["text"], "hello");
        assert_eq!(json["generationConfig"]["temperature"], 0.5);
    }

    #[test]
    fn test_endpoint() {
        let config = LlmConfig {
            provider: ProviderKind::Gemini,
            api_key: "key".to_string(),
            model: "gemini-2.0-flash".to_string(),
            base_url: "https://example.test/v1beta/".to_string(),
            temperature: 0.6,
        };
        let provider = GeminiProvider::new(&config);
        assert_eq!(
            provider.endpoint(),
            "https://example.test/v1beta/models/gemini-2.0-flash:generateContent"
        );
    }

    fn provider_at(base_url: String) -> GeminiProvider {
        GeminiProvider::new(&LlmConfig {
            provider: ProviderKind::Gemini,
            api_key: "test-key".to_string(),
            model: "gemini-test".to_string(),
            base_url,
            temperature: 0.6,
        })
    }

    const PATH: &str = "/models/gemini-test:generateContent";
    const KEY: (&str, &str) = ("x-goog-api-key", "test-key");

    #[tokio::test]
    async fn test_generate_returns_reply_text() {
        let body = r#"{"candidates": [{"content": {"parts": [{"text": "{\"title\": \"Soup\"}"}]}}]}"#;
        let provider = provider_at(stub::serve(PATH, KEY, 200, body).await);
        assert_eq!(provider.generate("hi").await.unwrap(), r#"{"title": "Soup"}"#);
    }

    #[tokio::test]
    async fn test_generate_error_status() {
        let body = r#"{"error": {"code": 429, "message": "Resource has been exhausted"}}"#;
        let provider = provider_at(stub::serve(PATH, KEY, 429, body).await);
        match provider.generate("hi").await {
            Err(LlmError::ApiError { status, message }) => {
                assert_eq!(status, 429);
                assert_eq!(message, "Resource has been exhausted");
            }
            other => panic!("expected ApiError, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_generate_empty_text() {
        let body = r#"{"candidates": [{"content": {"parts": [{"text": ""}]}}]}"#;
        let provider = provider_at(stub::serve(PATH, KEY, 200, body).await);
        assert!(matches!(provider.generate("hi").await, Err(LlmError::EmptyReply)));
    }

    #[tokio::test]
    async fn test_generate_unreachable() {
        let provider = provider_at(stub::closed_port().await);
        assert!(matches!(provider.generate("hi").await, Err(LlmError::RequestFailed(_))));
    }
}
