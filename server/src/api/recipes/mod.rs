pub mod list;
pub mod remove;
pub mod save;

use crate::AppState;
use axum::routing::{delete, get, post};
use axum::Router;
use serde::Serialize;
use utoipa::{OpenApi, ToSchema};

use crate::store::{RecipeBody, SavedRecipe};

/// The caller's saved recipes, oldest first.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SavedRecipesResponse {
    pub saved_recipes: Vec<SavedRecipe>,
}

/// Returns the router for /api/recipes endpoints (mounted at /api/recipes)
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/save", post(save::save_recipe))
        .route("/saved", get(list::list_saved_recipes))
        .route("/remove/{recipe_id}", delete(remove::remove_recipe))
}

#[derive(OpenApi)]
#[openapi(
    paths(save::save_recipe, list::list_saved_recipes, remove::remove_recipe),
    components(schemas(
        SavedRecipesResponse,
        SavedRecipe,
        RecipeBody,
        save::SaveRecipeRequest,
    ))
)]
pub struct ApiDoc;
