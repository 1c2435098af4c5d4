use super::SavedMealPlansResponse;
use crate::api::{ErrorResponse, InvalidInputResponse};
use crate::auth::AuthUser;
use crate::error::ApiError;
use crate::AppState;
use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde::Deserialize;
use smartchef_core::{validate_meal_plan, Diet, MealPlanDay};
use utoipa::ToSchema;

#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SaveMealPlanRequest {
    /// A plan as returned by `POST /api/meal-plan`.
    #[schema(value_type = Vec<MealPlanDay>)]
    pub meal_plan: serde_json::Value,
    pub diet: Option<Diet>,
}

#[utoipa::path(
    post,
    path = "/api/meal-plan/save",
    tag = "meal_plan",
    request_body = SaveMealPlanRequest,
    responses(
        (status = 200, description = "Plan saved; full collection returned", body = SavedMealPlansResponse),
        (status = 400, description = "Invalid meal plan", body = InvalidInputResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn save_meal_plan(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    payload: Result<Json<SaveMealPlanRequest>, JsonRejection>,
) -> Result<Json<SavedMealPlansResponse>, ApiError> {
    let Json(req) = payload?;
    let plan = validate_meal_plan(&req.meal_plan)
        .into_result()
        .map_err(ApiError::InvalidInput)?;

    let saved_meal_plans = state
        .store
        .add_meal_plan(user.id, plan, req.diet.unwrap_or_default())
        .await?;
    tracing::info!(user_id = %user.id, "Saved meal plan");

    Ok(Json(SavedMealPlansResponse { saved_meal_plans }))
}
