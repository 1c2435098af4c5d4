//! Request-boundary errors.
//!
//! Every failure a handler can produce ends up here and is rendered as a JSON
//! body with a stable `error` field.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use smartchef_core::{GenerateError, InvalidInput};
use thiserror::Error;

use crate::api::{ErrorResponse, InvalidInputResponse, UnusableContentResponse};
use crate::store::StoreError;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Upstream returned unusable content: {reason}")]
    UpstreamUnusable { reason: String, raw_text: String },

    #[error("LLM request failed")]
    ProviderFailed,

    #[error("{0}")]
    NotFound(&'static str),

    #[error("{0}")]
    Conflict(&'static str),

    #[error("{0}")]
    Unauthorized(&'static str),

    #[error("{0}")]
    Internal(&'static str),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::InvalidInput(details) => (
                StatusCode::BAD_REQUEST,
                Json(InvalidInputResponse {
                    error: "Invalid input".to_string(),
                    details,
                }),
            )
                .into_response(),
            ApiError::UpstreamUnusable { reason, raw_text } => (
                StatusCode::BAD_GATEWAY,
                Json(UnusableContentResponse {
                    error: "AI returned unusable content".to_string(),
                    reason,
                    raw_text,
                }),
            )
                .into_response(),
            ApiError::ProviderFailed => simple(StatusCode::INTERNAL_SERVER_ERROR, "LLM request failed"),
            ApiError::NotFound(message) => simple(StatusCode::NOT_FOUND, message),
            ApiError::Conflict(message) => simple(StatusCode::CONFLICT, message),
            ApiError::Unauthorized(message) => simple(StatusCode::UNAUTHORIZED, message),
            ApiError::Internal(message) => simple(StatusCode::INTERNAL_SERVER_ERROR, message),
        }
    }
}

fn simple(status: StatusCode, message: &str) -> Response {
    (
        status,
        Json(ErrorResponse {
            error: message.to_string(),
        }),
    )
        .into_response()
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::InvalidInput(rejection.body_text())
    }
}

impl From<InvalidInput> for ApiError {
    fn from(e: InvalidInput) -> Self {
        ApiError::InvalidInput(e.to_string())
    }
}

impl From<GenerateError> for ApiError {
    fn from(e: GenerateError) -> Self {
        match e {
            // Already logged by the pipeline; clients only learn that the call failed.
            GenerateError::Provider(_) => ApiError::ProviderFailed,
            GenerateError::Unusable { reason, raw_text } => {
                ApiError::UpstreamUnusable { reason, raw_text }
            }
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::NotFound => ApiError::NotFound("User not found"),
            StoreError::Conflict => ApiError::Conflict("Email already registered"),
            StoreError::Database(message) => {
                tracing::error!("Store operation failed: {}", message);
                ApiError::Internal("Database error")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::into_parts;
    use smartchef_core::LlmError;

    #[tokio::test]
    async fn test_unusable_content_carries_raw_text() {
        let err = ApiError::from(GenerateError::Unusable {
            reason: "AI returned invalid JSON".to_string(),
            raw_text: "no json here".to_string(),
        });
        let (status, body) = into_parts(err).await;
        assert_eq!(status, 502);
        assert_eq!(body["error"], "AI returned unusable content");
        assert_eq!(body["reason"], "AI returned invalid JSON");
        assert_eq!(body["rawText"], "no json here");
    }

    #[tokio::test]
    async fn test_provider_failure_hides_details() {
        let err = ApiError::from(GenerateError::Provider(LlmError::ApiError {
            status: 401,
            message: "bad key sk-123".to_string(),
        }));
        let (status, body) = into_parts(err).await;
        assert_eq!(status, 500);
        assert_eq!(body, serde_json::json!({"error": "LLM request failed"}));
    }

    #[tokio::test]
    async fn test_invalid_input() {
        let err = ApiError::from(InvalidInput::DaysOutOfRange { got: 15, max: 14 });
        let (status, body) = into_parts(err).await;
        assert_eq!(status, 400);
        assert_eq!(body["error"], "Invalid input");
        assert_eq!(body["details"], "days must be between 1 and 14, got 15");
    }

    #[tokio::test]
    async fn test_store_errors() {
        let (status, _) = into_parts(ApiError::from(StoreError::NotFound)).await;
        assert_eq!(status, 404);
        let (status, _) = into_parts(ApiError::from(StoreError::Conflict)).await;
        assert_eq!(status, 409);
        let (status, body) =
            into_parts(ApiError::from(StoreError::Database("boom".to_string()))).await;
        assert_eq!(status, 500);
        assert_eq!(body["error"], "Database error");
    }
}
