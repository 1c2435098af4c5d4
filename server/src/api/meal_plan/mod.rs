pub mod delete;
pub mod generate;
pub mod list;
pub mod save;

use crate::AppState;
use axum::routing::{delete, get, post};
use axum::Router;
use serde::Serialize;
use utoipa::{OpenApi, ToSchema};

use crate::store::SavedMealPlan;

/// The caller's saved meal plans, oldest first.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SavedMealPlansResponse {
    pub saved_meal_plans: Vec<SavedMealPlan>,
}

/// Returns the router for /api/meal-plan endpoints (mounted at /api/meal-plan)
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(list::list_meal_plans).post(generate::generate_meal_plan),
        )
        .route("/save", post(save::save_meal_plan))
        .route("/{plan_id}", delete(delete::delete_meal_plan))
}

#[derive(OpenApi)]
#[openapi(
    paths(
        generate::generate_meal_plan,
        list::list_meal_plans,
        save::save_meal_plan,
        delete::delete_meal_plan
    ),
    components(schemas(
        SavedMealPlansResponse,
        SavedMealPlan,
        generate::MealPlanRequest,
        generate::MealPlanResponse,
        save::SaveMealPlanRequest,
        smartchef_core::MealPlanDay,
        smartchef_core::Meal,
    ))
)]
pub struct ApiDoc;
