use crate::api::{ErrorResponse, InvalidInputResponse, UnusableContentResponse};
use crate::auth::AuthUser;
use crate::error::ApiError;
use crate::AppState;
use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde::{Deserialize, Serialize};
use smartchef_core::{Diet, MealPlanDay, MealPlanParams};
use utoipa::ToSchema;

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct MealPlanRequest {
    /// Number of days to plan (1-14).
    #[serde(deserialize_with = "crate::api::whole_number::required")]
    pub days: i64,
    pub diet: Option<Diet>,
    /// Daily calorie target.
    pub calories: Option<f64>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MealPlanResponse {
    pub meal_plan: Vec<MealPlanDay>,
}

#[utoipa::path(
    post,
    path = "/api/meal-plan",
    tag = "meal_plan",
    request_body(content = MealPlanRequest, example = json!({"days": 3, "diet": "vegan", "calories": 2000})),
    responses(
        (status = 200, description = "Generated meal plan", body = MealPlanResponse),
        (status = 400, description = "Invalid input", body = InvalidInputResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 500, description = "Provider request failed", body = ErrorResponse),
        (status = 502, description = "Provider returned unusable content", body = UnusableContentResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn generate_meal_plan(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    payload: Result<Json<MealPlanRequest>, JsonRejection>,
) -> Result<Json<MealPlanResponse>, ApiError> {
    let Json(req) = payload?;
    let params = MealPlanParams::new(req.days, req.diet.unwrap_or_default(), req.calories)?;

    let meal_plan = smartchef_core::generate_meal_plan(state.provider.as_ref(), &params).await?;
    tracing::info!(user_id = %user.id, days = meal_plan.len(), "Generated meal plan");

    Ok(Json(MealPlanResponse { meal_plan }))
}
