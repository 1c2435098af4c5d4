use super::SavedMealPlansResponse;
use crate::api::ErrorResponse;
use crate::auth::AuthUser;
use crate::error::ApiError;
use crate::AppState;
use axum::{extract::State, Json};

#[utoipa::path(
    get,
    path = "/api/meal-plan",
    tag = "meal_plan",
    responses(
        (status = 200, description = "Saved meal plans", body = SavedMealPlansResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn list_meal_plans(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
) -> Result<Json<SavedMealPlansResponse>, ApiError> {
    let saved_meal_plans = state.store.saved_meal_plans(user.id).await?;
    Ok(Json(SavedMealPlansResponse { saved_meal_plans }))
}
