use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use smartchef_core::{Diet, MealPlanDay};
use uuid::Uuid;

use super::{
    Account, NewAccount, RecipeBody, SavedMealPlan, SavedRecipe, StoreError, UserStore,
};
use crate::db::DbPool;
use crate::models::{
    NewSavedMealPlanRow, NewSavedRecipeRow, NewSessionRow, NewUserRow, SavedMealPlanRow,
    SavedRecipeRow, UserRow,
};
use crate::schema::{saved_meal_plans, saved_recipes, sessions, users};

impl From<DieselError> for StoreError {
    fn from(err: DieselError) -> Self {
        match err {
            DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                StoreError::Conflict
            }
            other => StoreError::Database(other.to_string()),
        }
    }
}

fn ensure_user(conn: &mut PgConnection, user_id: Uuid) -> Result<(), StoreError> {
    let exists: i64 = users::table
        .filter(users::id.eq(user_id))
        .filter(users::deleted_at.is_null())
        .count()
        .get_result(conn)?;
    if exists == 0 {
        return Err(StoreError::NotFound);
    }
    Ok(())
}

fn load_recipes(conn: &mut PgConnection, user_id: Uuid) -> Result<Vec<SavedRecipe>, StoreError> {
    saved_recipes::table
        .filter(saved_recipes::user_id.eq(user_id))
        .filter(saved_recipes::deleted_at.is_null())
        .order(saved_recipes::created_at.asc())
        .select(SavedRecipeRow::as_select())
        .load::<SavedRecipeRow>(conn)?
        .into_iter()
        .map(SavedRecipe::try_from)
        .collect()
}

fn load_meal_plans(
    conn: &mut PgConnection,
    user_id: Uuid,
) -> Result<Vec<SavedMealPlan>, StoreError> {
    saved_meal_plans::table
        .filter(saved_meal_plans::user_id.eq(user_id))
        .filter(saved_meal_plans::deleted_at.is_null())
        .order(saved_meal_plans::created_at.asc())
        .select(SavedMealPlanRow::as_select())
        .load::<SavedMealPlanRow>(conn)?
        .into_iter()
        .map(SavedMealPlan::try_from)
        .collect()
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<serde_json::Value, StoreError> {
    serde_json::to_value(value).map_err(|e| StoreError::Database(e.to_string()))
}

/// PostgreSQL-backed store. Deletes are soft (`deleted_at`).
#[derive(Clone)]
pub struct PgStore {
    pool: DbPool,
}

impl PgStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Run blocking diesel work on the blocking thread pool.
    async fn with_conn<T, F>(&self, f: F) -> Result<T, StoreError>
    where
        T: Send + 'static,
        F: FnOnce(&mut PgConnection) -> Result<T, StoreError> + Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut conn = pool.get().map_err(|e| {
                tracing::error!("Failed to get database connection: {}", e);
                StoreError::Database(e.to_string())
            })?;
            f(&mut conn)
        })
        .await
        .map_err(|e| StoreError::Database(e.to_string()))?
    }
}

#[async_trait]
impl UserStore for PgStore {
    async fn create_account(&self, account: NewAccount) -> Result<Account, StoreError> {
        self.with_conn(move |conn| {
            let row: UserRow = diesel::insert_into(users::table)
                .values(&NewUserRow {
                    name: &account.name,
                    email: &account.email,
                    password_hash: &account.password_hash,
                })
                .returning(UserRow::as_returning())
                .get_result(conn)?;
            Ok(row.into())
        })
        .await
    }

    async fn find_account_by_email(&self, email: &str) -> Result<Option<Account>, StoreError> {
        let email = email.to_string();
        self.with_conn(move |conn| {
            let row = users::table
                .filter(users::email.eq(&email))
                .filter(users::deleted_at.is_null())
                .select(UserRow::as_select())
                .first(conn)
                .optional()?;
            Ok(row.map(Account::from))
        })
        .await
    }

    async fn create_session(
        &self,
        user_id: Uuid,
        token_hash: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<(), StoreError> {
        let token_hash = token_hash.to_string();
        self.with_conn(move |conn| {
            ensure_user(conn, user_id)?;
            diesel::delete(sessions::table.filter(sessions::expires_at.le(Utc::now())))
                .execute(conn)?;
            diesel::insert_into(sessions::table)
                .values(&NewSessionRow {
                    user_id,
                    token_hash: &token_hash,
                    expires_at,
                })
                .execute(conn)?;
            Ok(())
        })
        .await
    }

    async fn find_account_by_session(
        &self,
        token_hash: &str,
    ) -> Result<Option<Account>, StoreError> {
        let token_hash = token_hash.to_string();
        self.with_conn(move |conn| {
            let row = sessions::table
                .inner_join(users::table)
                .filter(sessions::token_hash.eq(&token_hash))
                .filter(sessions::expires_at.gt(Utc::now()))
                .filter(users::deleted_at.is_null())
                .select(UserRow::as_select())
                .first(conn)
                .optional()?;
            Ok(row.map(Account::from))
        })
        .await
    }

    async fn set_preferences(
        &self,
        user_id: Uuid,
        preferences: Vec<String>,
    ) -> Result<Account, StoreError> {
        self.with_conn(move |conn| {
            let row = diesel::update(
                users::table
                    .filter(users::id.eq(user_id))
                    .filter(users::deleted_at.is_null()),
            )
            .set((
                users::preferences.eq(preferences),
                users::updated_at.eq(Utc::now()),
            ))
            .returning(UserRow::as_returning())
            .get_result(conn)
            .optional()?;
            row.map(Account::from).ok_or(StoreError::NotFound)
        })
        .await
    }

    async fn add_recipe(
        &self,
        user_id: Uuid,
        recipe: RecipeBody,
    ) -> Result<Vec<SavedRecipe>, StoreError> {
        let recipe = to_json(&recipe)?;
        self.with_conn(move |conn| {
            ensure_user(conn, user_id)?;
            diesel::insert_into(saved_recipes::table)
                .values(&NewSavedRecipeRow { user_id, recipe })
                .execute(conn)?;
            load_recipes(conn, user_id)
        })
        .await
    }

    async fn saved_recipes(&self, user_id: Uuid) -> Result<Vec<SavedRecipe>, StoreError> {
        self.with_conn(move |conn| {
            ensure_user(conn, user_id)?;
            load_recipes(conn, user_id)
        })
        .await
    }

    async fn remove_recipe(
        &self,
        user_id: Uuid,
        recipe_id: Uuid,
    ) -> Result<Vec<SavedRecipe>, StoreError> {
        self.with_conn(move |conn| {
            ensure_user(conn, user_id)?;
            diesel::update(
                saved_recipes::table
                    .filter(saved_recipes::id.eq(recipe_id))
                    .filter(saved_recipes::user_id.eq(user_id))
                    .filter(saved_recipes::deleted_at.is_null()),
            )
            .set(saved_recipes::deleted_at.eq(Some(Utc::now())))
            .execute(conn)?;
            load_recipes(conn, user_id)
        })
        .await
    }

    async fn add_meal_plan(
        &self,
        user_id: Uuid,
        plan: Vec<MealPlanDay>,
        diet: Diet,
    ) -> Result<Vec<SavedMealPlan>, StoreError> {
        let plan = to_json(&plan)?;
        self.with_conn(move |conn| {
            ensure_user(conn, user_id)?;
            diesel::insert_into(saved_meal_plans::table)
                .values(&NewSavedMealPlanRow {
                    user_id,
                    plan,
                    diet: diet.as_str(),
                })
                .execute(conn)?;
            load_meal_plans(conn, user_id)
        })
        .await
    }

    async fn saved_meal_plans(&self, user_id: Uuid) -> Result<Vec<SavedMealPlan>, StoreError> {
        self.with_conn(move |conn| {
            ensure_user(conn, user_id)?;
            load_meal_plans(conn, user_id)
        })
        .await
    }

    async fn remove_meal_plan(
        &self,
        user_id: Uuid,
        plan_id: Uuid,
    ) -> Result<Vec<SavedMealPlan>, StoreError> {
        self.with_conn(move |conn| {
            ensure_user(conn, user_id)?;
            diesel::update(
                saved_meal_plans::table
                    .filter(saved_meal_plans::id.eq(plan_id))
                    .filter(saved_meal_plans::user_id.eq(user_id))
                    .filter(saved_meal_plans::deleted_at.is_null()),
            )
            .set(saved_meal_plans::deleted_at.eq(Some(Utc::now())))
            .execute(conn)?;
            load_meal_plans(conn, user_id)
        })
        .await
    }
}
