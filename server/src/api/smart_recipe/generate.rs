use crate::api::{ErrorResponse, InvalidInputResponse, UnusableContentResponse};
use crate::error::ApiError;
use crate::AppState;
use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde::Deserialize;
use smartchef_core::{generate_smart_recipe, Diet, GeneratedRecipe, SmartRecipeParams};
use utoipa::ToSchema;

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SmartRecipePrefs {
    pub diet: Option<Diet>,
    /// Upper bound on cooking time in minutes (1-240).
    #[serde(default, deserialize_with = "crate::api::whole_number::optional")]
    pub max_time: Option<i64>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct SmartRecipeRequest {
    /// 1-20 ingredient names.
    pub ingredients: Vec<String>,
    #[serde(default)]
    pub prefs: Option<SmartRecipePrefs>,
}

#[utoipa::path(
    post,
    path = "/api/smart-recipe",
    tag = "generate",
    request_body(content = SmartRecipeRequest, example = json!({"ingredients": ["chicken", "rice"], "prefs": {"diet": "none", "maxTime": 30}})),
    responses(
        (status = 200, description = "Generated recipe", body = GeneratedRecipe),
        (status = 400, description = "Invalid input", body = InvalidInputResponse),
        (status = 500, description = "Provider request failed", body = ErrorResponse),
        (status = 502, description = "Provider returned unusable content", body = UnusableContentResponse)
    )
)]
pub async fn smart_recipe(
    State(state): State<AppState>,
    payload: Result<Json<SmartRecipeRequest>, JsonRejection>,
) -> Result<Json<GeneratedRecipe>, ApiError> {
    let Json(req) = payload?;
    let prefs = req.prefs.unwrap_or_default();
    let params =
        SmartRecipeParams::new(req.ingredients, prefs.diet.unwrap_or_default(), prefs.max_time)?;

    let recipe = generate_smart_recipe(state.provider.as_ref(), &params).await?;
    tracing::info!(title = %recipe.title, "Generated recipe");

    Ok(Json(recipe))
}
