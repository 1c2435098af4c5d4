use chrono::{DateTime, Utc};
use diesel::prelude::*;
use smartchef_core::Diet;
use uuid::Uuid;

use crate::store::{Account, SavedMealPlan, SavedRecipe, StoreError};

#[derive(Queryable, Selectable, Debug)]
#[diesel(table_name = crate::schema::users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct UserRow {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub preferences: Vec<String>,
    pub created_at: DateTime<Utc>,
}

impl From<UserRow> for Account {
    fn from(row: UserRow) -> Self {
        Account {
            id: row.id,
            name: row.name,
            email: row.email,
            password_hash: row.password_hash,
            preferences: row.preferences,
            created_at: row.created_at,
        }
    }
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::users)]
pub struct NewUserRow<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub password_hash: &'a str,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::sessions)]
pub struct NewSessionRow<'a> {
    pub user_id: Uuid,
    pub token_hash: &'a str,
    pub expires_at: DateTime<Utc>,
}

#[derive(Queryable, Selectable, Debug)]
#[diesel(table_name = crate::schema::saved_recipes)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct SavedRecipeRow {
    pub id: Uuid,
    pub recipe: serde_json::Value,
    pub created_at: DateTime<Utc>,
}

impl TryFrom<SavedRecipeRow> for SavedRecipe {
    type Error = StoreError;

    fn try_from(row: SavedRecipeRow) -> Result<Self, Self::Error> {
        let recipe = serde_json::from_value(row.recipe).map_err(|e| {
            StoreError::Database(format!("saved recipe {} is corrupt: {}", row.id, e))
        })?;
        Ok(SavedRecipe {
            id: row.id,
            recipe,
            created_at: row.created_at,
        })
    }
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::saved_recipes)]
pub struct NewSavedRecipeRow {
    pub user_id: Uuid,
    pub recipe: serde_json::Value,
}

#[derive(Queryable, Selectable, Debug)]
#[diesel(table_name = crate::schema::saved_meal_plans)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct SavedMealPlanRow {
    pub id: Uuid,
    pub plan: serde_json::Value,
    pub diet: String,
    pub created_at: DateTime<Utc>,
}

impl TryFrom<SavedMealPlanRow> for SavedMealPlan {
    type Error = StoreError;

    fn try_from(row: SavedMealPlanRow) -> Result<Self, Self::Error> {
        let plan = serde_json::from_value(row.plan).map_err(|e| {
            StoreError::Database(format!("saved meal plan {} is corrupt: {}", row.id, e))
        })?;
        let diet = Diet::from_str(&row.diet).ok_or_else(|| {
            StoreError::Database(format!(
                "saved meal plan {} has unknown diet {:?}",
                row.id, row.diet
            ))
        })?;
        Ok(SavedMealPlan {
            id: row.id,
            plan,
            diet,
            created_at: row.created_at,
        })
    }
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::saved_meal_plans)]
pub struct NewSavedMealPlanRow<'a> {
    pub user_id: Uuid,
    pub plan: serde_json::Value,
    pub diet: &'a str,
}
