//! Fake provider for tests and offline development.
//!
//! Replies are chosen by checking whether the prompt contains a registered
//! substring, so tests run without network access.

use super::{LlmError, LlmProvider};
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::RwLock;

/// A fake text-generation provider.
///
/// Patterns are checked in registration order, case-insensitively. If none
/// matches, the default reply is returned, or an error when there is none.
#[derive(Debug)]
pub struct FakeProvider {
    replies: RwLock<Vec<(String, Reply)>>,
    default_reply: Option<Reply>,
    calls: AtomicUsize,
}

#[derive(Debug, Clone)]
enum Reply {
    Text(String),
    Failure(u16),
}

impl Default for FakeProvider {
    /// Offline defaults: a small valid recipe for recipe prompts and a one-day
    /// plan for meal-plan prompts.
    fn default() -> Self {
        Self::new()
            .with_reply(
                "meal plan",
                r#"[{"day": 1, "meals": [{"name": "Vegetable omelette", "ingredients": ["eggs", "spinach"], "instructions": "Whisk the eggs and cook with the spinach.", "calories": 420}]}]"#,
            )
            .with_default_reply(
                r#"{"title": "Simple Stir Fry", "usedIngredients": [], "optionalIngredients": ["oil", "salt"], "healthBenefits": "Balanced and quick.", "cookingSteps": ["Chop everything.", "Stir fry for 10 minutes."], "estimatedTime": 15, "servings": 2, "notes": "Generated offline."}"#,
            )
    }
}

impl FakeProvider {
    /// Create a FakeProvider with no registered replies.
    pub fn new() -> Self {
        Self {
            replies: RwLock::new(Vec::new()),
            default_reply: None,
            calls: AtomicUsize::new(0),
        }
    }

    /// Reply with `reply` whenever the prompt contains `prompt_contains`.
    pub fn with_reply(self, prompt_contains: &str, reply: &str) -> Self {
        self.add_reply(prompt_contains, reply);
        self
    }

    /// Fail with an API error of the given status whenever the prompt contains `prompt_contains`.
    pub fn with_failure(self, prompt_contains: &str, status: u16) -> Self {
        self.push(prompt_contains, Reply::Failure(status));
        self
    }

    pub fn add_reply(&self, prompt_contains: &str, reply: &str) {
        self.push(prompt_contains, Reply::Text(reply.to_string()));
    }

    /// Set the reply used when no pattern matches.
    pub fn with_default_reply(mut self, reply: &str) -> Self {
        self.default_reply = Some(Reply::Text(reply.to_string()));
        self
    }

    /// Number of `generate` calls made so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::Relaxed)
    }

    fn push(&self, prompt_contains: &str, reply: Reply) {
        self.replies
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push((prompt_contains.to_lowercase(), reply));
    }
}

#[async_trait]
impl LlmProvider for FakeProvider {
    async fn generate(&self, prompt: &str) -> Result<String, LlmError> {
        self.calls.fetch_add(1, Ordering::Relaxed);

        let matched = {
            let replies = self
                .replies
                .read()
                .unwrap_or_else(|poisoned| poisoned.into_inner());
            let prompt_lower = prompt.to_lowercase();
            replies
                .iter()
                .find(|(pattern, _)| prompt_lower.contains(pattern.as_str()))
                .map(|(_, reply)| reply.clone())
        };

        match matched.or_else(|| self.default_reply.clone()) {
            Some(Reply::Text(text)) => Ok(text),
            Some(Reply::Failure(status)) => Err(LlmError::ApiError {
                status,
                message: "FakeProvider: configured failure".to_string(),
            }),
            None => Err(LlmError::RequestFailed(format!(
                "FakeProvider: No reply configured for prompt (first 100 chars): {}",
                prompt.chars().take(100).collect::<String>()
            ))),
        }
    }

    fn provider_name(&self) -> &'static str {
        "fake"
    }

    fn model_name(&self) -> &str {
        "fake-model"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_fake_provider_matching() {
        let provider = FakeProvider::new().with_reply("hello", "world");
        let result = provider.generate("Say hello to the user").await.unwrap();
        assert_eq!(result, "world");
        assert_eq!(provider.calls(), 1);
    }

    #[tokio::test]
    async fn test_fake_provider_case_insensitive() {
        let provider = FakeProvider::new().with_reply("HELLO", "world");
        let result = provider.generate("hello there").await.unwrap();
        assert_eq!(result, "world");
    }

    #[tokio::test]
    async fn test_fake_provider_no_match() {
        let provider = FakeProvider::new();
        let result = provider.generate("random prompt").await;
        assert!(matches!(result, Err(LlmError::RequestFailed(_))));
    }

    #[tokio::test]
    async fn test_fake_provider_failure() {
        let provider = FakeProvider::new().with_failure("recipe", 503);
        let result = provider.generate("a recipe please").await;
        assert!(matches!(result, Err(LlmError::ApiError { status: 503, .. })));
    }

    #[tokio::test]
    async fn test_default_replies() {
        let provider = FakeProvider::default();

        let plan = provider.generate("Generate a 3-day meal plan.").await.unwrap();
        assert!(plan.contains("Vegetable omelette"));

        let recipe = provider.generate("Ingredients: egg").await.unwrap();
        assert!(recipe.contains("Simple Stir Fry"));
    }
}
