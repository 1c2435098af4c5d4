use super::SavedMealPlansResponse;
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
    path = "/api/meal-plan/{plan_id}",
    tag = "meal_plan",
    params(
        ("plan_id" = String, Path, description = "Saved meal plan ID")
    ),
    responses(
        (status = 200, description = "Remaining saved meal plans", body = SavedMealPlansResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn delete_meal_plan(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Path(plan_id): Path<String>,
) -> Result<Json<SavedMealPlansResponse>, ApiError> {
    // An id that can never match is treated like any other absent plan.
    let saved_meal_plans = match Uuid::parse_str(&plan_id) {
        Ok(plan_id) => state.store.remove_meal_plan(user.id, plan_id).await?,
        Err(_) => state.store.saved_meal_plans(user.id).await?,
    };
    Ok(Json(SavedMealPlansResponse { saved_meal_plans }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{account, into_parts, state_with};
    use smartchef_core::{Diet, FakeProvider};
    use std::sync::Arc;

    #[tokio::test]
    async fn test_delete_removes_only_that_plan() {
        let state = state_with(Arc::new(FakeProvider::new()));
        let user = account(&state, "a@example.com").await;
        state.store.add_meal_plan(user.id, vec![], Diet::Veg).await.unwrap();
        let plans = state.store.add_meal_plan(user.id, vec![], Diet::Keto).await.unwrap();

        let (status, body) = into_parts(
            delete_meal_plan(AuthUser(user), State(state), Path(plans[0].id.to_string())).await,
        )
        .await;
        assert_eq!(status, 200);
        let remaining = body["savedMealPlans"].as_array().unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0]["diet"], "keto");
    }

    #[tokio::test]
    async fn test_absent_or_malformed_id_is_noop() {
        let state = state_with(Arc::new(FakeProvider::new()));
        let user = account(&state, "a@example.com").await;
        state.store.add_meal_plan(user.id, vec![], Diet::Veg).await.unwrap();

        for id in [Uuid::new_v4().to_string(), "not-a-uuid".to_string()] {
            let (status, body) = into_parts(
                delete_meal_plan(AuthUser(user.clone()), State(state.clone()), Path(id)).await,
            )
            .await;
            assert_eq!(status, 200);
            assert_eq!(body["savedMealPlans"].as_array().unwrap().len(), 1);
        }
    }
}
