use super::{canonical_email, AuthResponse, UserSummary};
use crate::api::ErrorResponse;
use crate::auth::{issue_session, verify_password};
use crate::error::ApiError;
use crate::AppState;
use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde::Deserialize;
use utoipa::ToSchema;

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[utoipa::path(
    post,
    path = "/api/auth/login",
    tag = "auth",
    request_body(content = LoginRequest, example = json!({"email": "ada@example.com", "password": "password"})),
    responses(
        (status = 200, description = "Login successful", body = AuthResponse),
        (status = 401, description = "Invalid credentials", body = ErrorResponse)
    )
)]
pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<AuthResponse>, ApiError> {
    let Json(req) = payload?;

    let account = state
        .store
        .find_account_by_email(&canonical_email(&req.email))
        .await?
        .ok_or(ApiError::Unauthorized("Invalid credentials"))?;

    if !verify_password(&req.password, &account.password_hash) {
        return Err(ApiError::Unauthorized("Invalid credentials"));
    }

    let token = issue_session(state.store.as_ref(), account.id, state.session_ttl).await?;

    Ok(Json(AuthResponse {
        token,
        user: UserSummary::from(&account),
    }))
}
