use async_trait::async_trait;
use chrono::{DateTime, Utc};
use smartchef_core::{Diet, MealPlanDay};
use std::collections::HashMap;
use tokio::sync::Mutex;
use uuid::Uuid;

use super::{
    Account, NewAccount, RecipeBody, SavedMealPlan, SavedRecipe, StoreError, UserStore,
};

#[derive(Default)]
struct StoreData {
    accounts: HashMap<Uuid, Account>,
    /// token_hash -> (user_id, expires_at)
    sessions: HashMap<String, (Uuid, DateTime<Utc>)>,
    recipes: HashMap<Uuid, Vec<SavedRecipe>>,
    meal_plans: HashMap<Uuid, Vec<SavedMealPlan>>,
}

impl StoreData {
    fn ensure_account(&self, user_id: Uuid) -> Result<(), StoreError> {
        if self.accounts.contains_key(&user_id) {
            Ok(())
        } else {
            Err(StoreError::NotFound)
        }
    }
}

/// In-memory store (useful for development and testing). Nothing survives a restart.
#[derive(Default)]
pub struct MemoryStore {
    data: Mutex<StoreData>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn create_account(&self, account: NewAccount) -> Result<Account, StoreError> {
        let mut data = self.data.lock().await;

        if data.accounts.values().any(|a| a.email == account.email) {
            return Err(StoreError::Conflict);
        }

        let account = Account {
            id: Uuid::new_v4(),
            name: account.name,
            email: account.email,
            password_hash: account.password_hash,
            preferences: Vec::new(),
            created_at: Utc::now(),
        };
        data.accounts.insert(account.id, account.clone());
        Ok(account)
    }

    async fn find_account_by_email(&self, email: &str) -> Result<Option<Account>, StoreError> {
        let data = self.data.lock().await;
        Ok(data.accounts.values().find(|a| a.email == email).cloned())
    }

    async fn create_session(
        &self,
        user_id: Uuid,
        token_hash: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<(), StoreError> {
        let mut data = self.data.lock().await;
        data.ensure_account(user_id)?;

        let now = Utc::now();
        data.sessions.retain(|_, (_, expires_at)| *expires_at > now);
        data.sessions
            .insert(token_hash.to_string(), (user_id, expires_at));
        Ok(())
    }

    async fn find_account_by_session(
        &self,
        token_hash: &str,
    ) -> Result<Option<Account>, StoreError> {
        let data = self.data.lock().await;
        let account = data
            .sessions
            .get(token_hash)
            .filter(|(_, expires_at)| *expires_at > Utc::now())
            .and_then(|(user_id, _)| data.accounts.get(user_id))
            .cloned();
        Ok(account)
    }

    async fn set_preferences(
        &self,
        user_id: Uuid,
        preferences: Vec<String>,
    ) -> Result<Account, StoreError> {
        let mut data = self.data.lock().await;
        let account = data
            .accounts
            .get_mut(&user_id)
            .ok_or(StoreError::NotFound)?;
        account.preferences = preferences;
        Ok(account.clone())
    }

    async fn add_recipe(
        &self,
        user_id: Uuid,
        recipe: RecipeBody,
    ) -> Result<Vec<SavedRecipe>, StoreError> {
        let mut data = self.data.lock().await;
        data.ensure_account(user_id)?;

        let recipes = data.recipes.entry(user_id).or_default();
        recipes.push(SavedRecipe {
            id: Uuid::new_v4(),
            recipe,
            created_at: Utc::now(),
        });
        Ok(recipes.clone())
    }

    async fn saved_recipes(&self, user_id: Uuid) -> Result<Vec<SavedRecipe>, StoreError> {
        let data = self.data.lock().await;
        data.ensure_account(user_id)?;
        Ok(data.recipes.get(&user_id).cloned().unwrap_or_default())
    }

    async fn remove_recipe(
        &self,
        user_id: Uuid,
        recipe_id: Uuid,
    ) -> Result<Vec<SavedRecipe>, StoreError> {
        let mut data = self.data.lock().await;
        data.ensure_account(user_id)?;

        let recipes = data.recipes.entry(user_id).or_default();
        recipes.retain(|r| r.id != recipe_id);
        Ok(recipes.clone())
    }

    async fn add_meal_plan(
        &self,
        user_id: Uuid,
        plan: Vec<MealPlanDay>,
        diet: Diet,
    ) -> Result<Vec<SavedMealPlan>, StoreError> {
        let mut data = self.data.lock().await;
        data.ensure_account(user_id)?;

        let plans = data.meal_plans.entry(user_id).or_default();
        plans.push(SavedMealPlan {
            id: Uuid::new_v4(),
            plan,
            diet,
            created_at: Utc::now(),
        });
        Ok(plans.clone())
    }

    async fn saved_meal_plans(&self, user_id: Uuid) -> Result<Vec<SavedMealPlan>, StoreError> {
        let data = self.data.lock().await;
        data.ensure_account(user_id)?;
        Ok(data.meal_plans.get(&user_id).cloned().unwrap_or_default())
    }

    async fn remove_meal_plan(
        &self,
        user_id: Uuid,
        plan_id: Uuid,
    ) -> Result<Vec<SavedMealPlan>, StoreError> {
        let mut data = self.data.lock().await;
        data.ensure_account(user_id)?;

        let plans = data.meal_plans.entry(user_id).or_default();
        plans.retain(|p| p.id != plan_id);
        Ok(plans.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn new_account(email: &str) -> NewAccount {
        NewAccount {
            name: "Cook".to_string(),
            email: email.to_string(),
            password_hash: "hash".to_string(),
        }
    }

    fn recipe(title: &str) -> RecipeBody {
        RecipeBody {
            title: title.to_string(),
            used_ingredients: vec![],
            optional_ingredients: vec![],
            health_benefits: vec![],
            cooking_steps: vec!["cook".to_string()],
            estimated_time: Some(20.0),
            servings: None,
            notes: None,
        }
    }

    #[tokio::test]
    async fn test_duplicate_email_conflicts() {
        let store = MemoryStore::new();
        store.create_account(new_account("a@example.com")).await.unwrap();
        assert_eq!(
            store.create_account(new_account("a@example.com")).await.unwrap_err(),
            StoreError::Conflict
        );
    }

    #[tokio::test]
    async fn test_sessions_expire() {
        let store = MemoryStore::new();
        let account = store.create_account(new_account("a@example.com")).await.unwrap();

        store
            .create_session(account.id, "live", Utc::now() + Duration::days(1))
            .await
            .unwrap();
        store
            .create_session(account.id, "stale", Utc::now() - Duration::seconds(1))
            .await
            .unwrap();

        let found = store.find_account_by_session("live").await.unwrap();
        assert_eq!(found.map(|a| a.id), Some(account.id));
        assert!(store.find_account_by_session("stale").await.unwrap().is_none());
        assert!(store.find_account_by_session("unknown").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_new_session_prunes_expired_ones() {
        let store = MemoryStore::new();
        let account = store.create_account(new_account("a@example.com")).await.unwrap();

        store
            .create_session(account.id, "stale", Utc::now() - Duration::seconds(1))
            .await
            .unwrap();
        store
            .create_session(account.id, "live", Utc::now() + Duration::days(1))
            .await
            .unwrap();

        let data = store.data.lock().await;
        assert_eq!(data.sessions.len(), 1);
        assert!(data.sessions.contains_key("live"));
    }

    #[tokio::test]
    async fn test_recipes_are_owned_per_account() {
        let store = MemoryStore::new();
        let alice = store.create_account(new_account("alice@example.com")).await.unwrap();
        let bob = store.create_account(new_account("bob@example.com")).await.unwrap();

        store.add_recipe(alice.id, recipe("Soup")).await.unwrap();
        let saved = store.add_recipe(alice.id, recipe("Stew")).await.unwrap();
        assert_eq!(saved.len(), 2);
        assert_eq!(saved[0].recipe.title, "Soup");

        assert!(store.saved_recipes(bob.id).await.unwrap().is_empty());

        // Bob cannot remove Alice's recipe.
        store.remove_recipe(bob.id, saved[0].id).await.unwrap();
        assert_eq!(store.saved_recipes(alice.id).await.unwrap().len(), 2);

        let remaining = store.remove_recipe(alice.id, saved[0].id).await.unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].recipe.title, "Stew");
    }

    #[tokio::test]
    async fn test_unknown_account_is_not_found() {
        let store = MemoryStore::new();
        assert_eq!(
            store.saved_recipes(Uuid::new_v4()).await.unwrap_err(),
            StoreError::NotFound
        );
        assert_eq!(
            store
                .add_meal_plan(Uuid::new_v4(), vec![], Diet::None)
                .await
                .unwrap_err(),
            StoreError::NotFound
        );
    }

    #[tokio::test]
    async fn test_meal_plans_round_trip() {
        let store = MemoryStore::new();
        let account = store.create_account(new_account("a@example.com")).await.unwrap();

        let plans = store
            .add_meal_plan(account.id, vec![], Diet::Keto)
            .await
            .unwrap();
        assert_eq!(plans.len(), 1);
        assert_eq!(plans[0].diet, Diet::Keto);

        let plans = store.remove_meal_plan(account.id, plans[0].id).await.unwrap();
        assert!(plans.is_empty());
    }
}
