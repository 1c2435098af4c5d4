use super::ProfileResponse;
use crate::api::{ErrorResponse, InvalidInputResponse};
use crate::auth::AuthUser;
use crate::error::ApiError;
use crate::AppState;
use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde::Deserialize;
use utoipa::ToSchema;

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct UpdatePreferencesRequest {
    /// Replaces the stored list. Blank entries are dropped.
    pub preferences: Vec<String>,
}

#[utoipa::path(
    put,
    path = "/api/users/me/preferences",
    tag = "users",
    request_body(content = UpdatePreferencesRequest, example = json!({"preferences": ["vegetarian", "no nuts"]})),
    responses(
        (status = 200, description = "Updated profile", body = ProfileResponse),
        (status = 400, description = "Invalid request", body = InvalidInputResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn update_preferences(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    payload: Result<Json<UpdatePreferencesRequest>, JsonRejection>,
) -> Result<Json<ProfileResponse>, ApiError> {
    let Json(req) = payload?;
    let preferences = req
        .preferences
        .iter()
        .map(|p| p.trim())
        .filter(|p| !p.is_empty())
        .map(str::to_string)
        .collect();

    let account = state.store.set_preferences(user.id, preferences).await?;
    Ok(Json(ProfileResponse::from(account)))
}
