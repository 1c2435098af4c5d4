use super::SavedRecipesResponse;
use crate::api::ErrorResponse;
use crate::auth::AuthUser;
use crate::error::ApiError;
use crate::AppState;
use axum::{extract::State, Json};

#[utoipa::path(
    get,
    path = "/api/recipes/saved",
    tag = "recipes",
    responses(
        (status = 200, description = "Saved recipes", body = SavedRecipesResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn list_saved_recipes(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
) -> Result<Json<SavedRecipesResponse>, ApiError> {
    let saved_recipes = state.store.saved_recipes(user.id).await?;
    Ok(Json(SavedRecipesResponse { saved_recipes }))
}
