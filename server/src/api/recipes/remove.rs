use super::SavedRecipesResponse;
use crate::api::ErrorResponse;
use crate::auth::AuthUser;
use crate::error::ApiError;
use crate::AppState;
use axum::{
    extract::{Path, State},
    Json,
};
use uuid::Uuid;

#[utoipa::path(
    delete,
    path = "/api/recipes/remove/{recipe_id}",
    tag = "recipes",
    params(
        ("recipe_id" = String, Path, description = "Saved recipe ID")
    ),
    responses(
        (status = 200, description = "Remaining saved recipes; unknown ids leave the list unchanged", body = SavedRecipesResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn remove_recipe(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Path(recipe_id): Path<String>,
) -> Result<Json<SavedRecipesResponse>, ApiError> {
    let saved_recipes = match Uuid::parse_str(&recipe_id) {
        Ok(recipe_id) => state.store.remove_recipe(user.id, recipe_id).await?,
        Err(_) => state.store.saved_recipes(user.id).await?,
    };
    Ok(Json(SavedRecipesResponse { saved_recipes }))
}
