//! Account and saved-collection persistence.
//!
//! Handlers only see the [`UserStore`] trait. `PgStore` keeps everything in
//! PostgreSQL; `MemoryStore` keeps it in process for development and tests.
//! Every saved recipe or meal plan belongs to exactly one account.

mod memory;
mod postgres;

pub use memory::MemoryStore;
pub use postgres::PgStore;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use smartchef_core::{Diet, MealPlanDay};
use std::fmt;
use thiserror::Error;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum StoreError {
    /// The referenced account does not exist (or was deleted).
    #[error("account not found")]
    NotFound,

    /// An account with the same email already exists.
    #[error("email already registered")]
    Conflict,

    #[error("database error: {0}")]
    Database(String),
}

#[derive(Clone)]
pub struct Account {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub preferences: Vec<String>,
    pub created_at: DateTime<Utc>,
}

impl fmt::Debug for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Account")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("email", &self.email)
            .field("preferences", &self.preferences)
            .finish_non_exhaustive()
    }
}

pub struct NewAccount {
    pub name: String,
    /// Already trimmed and lower-cased.
    pub email: String,
    pub password_hash: String,
}

/// The recipe content a user chose to keep.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RecipeBody {
    pub title: String,
    #[serde(default)]
    pub used_ingredients: Vec<String>,
    #[serde(default)]
    pub optional_ingredients: Vec<String>,
    #[serde(default)]
    pub health_benefits: Vec<String>,
    #[serde(default)]
    pub cooking_steps: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_time: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub servings: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SavedRecipe {
    pub id: Uuid,
    #[serde(flatten)]
    pub recipe: RecipeBody,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SavedMealPlan {
    pub id: Uuid,
    pub plan: Vec<MealPlanDay>,
    pub diet: Diet,
    pub created_at: DateTime<Utc>,
}

#[async_trait]
pub trait UserStore: Send + Sync {
    /// Fails with [`StoreError::Conflict`] when the email is taken.
    async fn create_account(&self, account: NewAccount) -> Result<Account, StoreError>;

    async fn find_account_by_email(&self, email: &str) -> Result<Option<Account>, StoreError>;

    async fn create_session(
        &self,
        user_id: Uuid,
        token_hash: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<(), StoreError>;

    /// The account owning an unexpired session.
    async fn find_account_by_session(&self, token_hash: &str)
        -> Result<Option<Account>, StoreError>;

    async fn set_preferences(
        &self,
        user_id: Uuid,
        preferences: Vec<String>,
    ) -> Result<Account, StoreError>;

    /// Append a recipe and return the full collection, oldest first.
    async fn add_recipe(
        &self,
        user_id: Uuid,
        recipe: RecipeBody,
    ) -> Result<Vec<SavedRecipe>, StoreError>;

    async fn saved_recipes(&self, user_id: Uuid) -> Result<Vec<SavedRecipe>, StoreError>;

    /// Remove a recipe if present. Removing an absent recipe is not an error.
    async fn remove_recipe(
        &self,
        user_id: Uuid,
        recipe_id: Uuid,
    ) -> Result<Vec<SavedRecipe>, StoreError>;

    async fn add_meal_plan(
        &self,
        user_id: Uuid,
        plan: Vec<MealPlanDay>,
        diet: Diet,
    ) -> Result<Vec<SavedMealPlan>, StoreError>;

    async fn saved_meal_plans(&self, user_id: Uuid) -> Result<Vec<SavedMealPlan>, StoreError>;

    /// Remove a meal plan if present. Removing an absent plan is not an error.
    async fn remove_meal_plan(
        &self,
        user_id: Uuid,
        plan_id: Uuid,
    ) -> Result<Vec<SavedMealPlan>, StoreError>;
}
