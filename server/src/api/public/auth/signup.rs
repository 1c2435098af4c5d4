use super::{canonical_email, AuthResponse, UserSummary};
use crate::api::{ErrorResponse, InvalidInputResponse};
use crate::auth::{hash_password, issue_session};
use crate::error::ApiError;
use crate::store::NewAccount;
use crate::AppState;
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use utoipa::ToSchema;

const MIN_PASSWORD_LEN: usize = 6;

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct SignupRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

impl SignupRequest {
    fn check(&self) -> Result<(), ApiError> {
        if self.name.trim().is_empty() {
            return Err(ApiError::InvalidInput("name must not be empty".to_string()));
        }
        let email = self.email.trim();
        if email.is_empty() || !email.contains('@') {
            return Err(ApiError::InvalidInput("email is not valid".to_string()));
        }
        if self.password.chars().count() < MIN_PASSWORD_LEN {
            return Err(ApiError::InvalidInput(format!(
                "password must be at least {} characters",
                MIN_PASSWORD_LEN
            )));
        }
        Ok(())
    }
}

#[utoipa::path(
    post,
    path = "/api/auth/signup",
    tag = "auth",
    request_body(content = SignupRequest, example = json!({"name": "Ada", "email": "ada@example.com", "password": "password"})),
    responses(
        (status = 201, description = "Account created", body = AuthResponse),
        (status = 400, description = "Invalid request", body = InvalidInputResponse),
        (status = 409, description = "Email already registered", body = ErrorResponse)
    )
)]
pub async fn signup(
    State(state): State<AppState>,
    payload: Result<Json<SignupRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(req) = payload?;
    req.check()?;

    let password_hash = hash_password(&req.password).map_err(|e| {
        tracing::error!("Failed to hash password: {}", e);
        ApiError::Internal("Failed to hash password")
    })?;

    let account = state
        .store
        .create_account(NewAccount {
            name: req.name.trim().to_string(),
            email: canonical_email(&req.email),
            password_hash,
        })
        .await?;

    let token = issue_session(state.store.as_ref(), account.id, state.session_ttl).await?;
    tracing::info!(user_id = %account.id, "Account created");

    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            token,
            user: UserSummary::from(&account),
        }),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{into_parts, state_with};
    use smartchef_core::FakeProvider;
    use std::sync::Arc;

    fn request(name: &str, email: &str, password: &str) -> Result<Json<SignupRequest>, JsonRejection> {
        Ok(Json(SignupRequest {
            name: name.to_string(),
            email: email.to_string(),
            password: password.to_string(),
        }))
    }

    #[tokio::test]
    async fn test_signup_issues_token() {
        let state = state_with(Arc::new(FakeProvider::new()));
        let (status, body) = into_parts(
            signup(State(state.clone()), request(" Ada ", " Ada@Example.COM ", "secret1")).await,
        )
        .await;

        assert_eq!(status, 201);
        assert_eq!(body["user"]["name"], "Ada");
        assert_eq!(body["user"]["email"], "ada@example.com");
        assert_eq!(body["token"].as_str().unwrap().len(), 64);
        assert!(body["user"].get("passwordHash").is_none());
    }

    #[tokio::test]
    async fn test_duplicate_email_conflicts() {
        let state = state_with(Arc::new(FakeProvider::new()));
        let (status, _) =
            into_parts(signup(State(state.clone()), request("A", "a@example.com", "secret1")).await)
                .await;
        assert_eq!(status, 201);

        let (status, body) =
            into_parts(signup(State(state), request("B", "A@example.com", "secret2")).await).await;
        assert_eq!(status, 409);
        assert_eq!(body["error"], "Email already registered");
    }

    #[tokio::test]
    async fn test_rejects_bad_fields() {
        let state = state_with(Arc::new(FakeProvider::new()));
        for (name, email, password) in [
            ("", "a@example.com", "secret1"),
            ("A", "not-an-email", "secret1"),
            ("A", "a@example.com", "abc"),
        ] {
            let (status, body) =
                into_parts(signup(State(state.clone()), request(name, email, password)).await)
                    .await;
            assert_eq!(status, 400);
            assert_eq!(body["error"], "Invalid input");
        }
    }
}
