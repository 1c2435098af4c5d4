pub mod me;
pub mod preferences;

use crate::store::Account;
use crate::AppState;
use axum::routing::{get, put};
use axum::Router;
use serde::Serialize;
use utoipa::{OpenApi, ToSchema};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ProfileResponse {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub preferences: Vec<String>,
}

impl From<Account> for ProfileResponse {
    fn from(account: Account) -> Self {
        ProfileResponse {
            id: account.id,
            name: account.name,
            email: account.email,
            preferences: account.preferences,
        }
    }
}

/// Returns the router for /api/users endpoints (mounted at /api/users)
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/me", get(me::get_me))
        .route("/me/preferences", put(preferences::update_preferences))
}

#[derive(OpenApi)]
#[openapi(
    paths(me::get_me, preferences::update_preferences),
    components(schemas(ProfileResponse, preferences::UpdatePreferencesRequest))
)]
pub struct ApiDoc;
