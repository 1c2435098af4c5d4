pub mod generate;

use crate::AppState;
use axum::routing::post;
use axum::Router;
use utoipa::OpenApi;

/// Recipe generation is public; nothing is persisted.
pub fn router() -> Router<AppState> {
    Router::new().route("/api/smart-recipe", post(generate::smart_recipe))
}

#[derive(OpenApi)]
#[openapi(
    paths(generate::smart_recipe),
    components(schemas(
        generate::SmartRecipeRequest,
        generate::SmartRecipePrefs,
        smartchef_core::GeneratedRecipe,
        smartchef_core::HealthBenefits,
        smartchef_core::Diet,
    ))
)]
pub struct ApiDoc;
