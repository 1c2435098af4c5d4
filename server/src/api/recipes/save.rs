use super::SavedRecipesResponse;
use crate::api::{ErrorResponse, InvalidInputResponse};
use crate::auth::AuthUser;
use crate::error::ApiError;
use crate::store::RecipeBody;
use crate::AppState;
use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde::Deserialize;
use smartchef_core::{normalize_ingredients, HealthBenefits};
use utoipa::ToSchema;

/// A recipe as returned by `POST /api/smart-recipe`, possibly edited by the user.
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SaveRecipeRequest {
    pub title: String,
    #[serde(default)]
    pub used_ingredients: Vec<String>,
    #[serde(default)]
    pub optional_ingredients: Vec<String>,
    #[serde(default)]
    pub health_benefits: Option<HealthBenefits>,
    #[serde(default)]
    pub cooking_steps: Vec<String>,
    pub estimated_time: Option<f64>,
    pub servings: Option<f64>,
    pub notes: Option<String>,
}

impl TryFrom<SaveRecipeRequest> for RecipeBody {
    type Error = ApiError;

    fn try_from(req: SaveRecipeRequest) -> Result<Self, Self::Error> {
        let title = req.title.trim();
        if title.is_empty() {
            return Err(ApiError::InvalidInput("title must not be empty".to_string()));
        }

        Ok(RecipeBody {
            title: title.to_string(),
            used_ingredients: normalize_ingredients(&req.used_ingredients),
            optional_ingredients: normalize_ingredients(&req.optional_ingredients),
            health_benefits: req.health_benefits.unwrap_or_default().into_list(),
            cooking_steps: req.cooking_steps,
            estimated_time: req.estimated_time,
            servings: req.servings,
            notes: req.notes,
        })
    }
}

#[utoipa::path(
    post,
    path = "/api/recipes/save",
    tag = "recipes",
    request_body = SaveRecipeRequest,
    responses(
        (status = 200, description = "Recipe saved; full collection returned", body = SavedRecipesResponse),
        (status = 400, description = "Invalid recipe", body = InvalidInputResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn save_recipe(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    payload: Result<Json<SaveRecipeRequest>, JsonRejection>,
) -> Result<Json<SavedRecipesResponse>, ApiError> {
    let Json(req) = payload?;
    let recipe = RecipeBody::try_from(req)?;

    let saved_recipes = state.store.add_recipe(user.id, recipe).await?;
    tracing::info!(user_id = %user.id, count = saved_recipes.len(), "Saved recipe");

    Ok(Json(SavedRecipesResponse { saved_recipes }))
}
