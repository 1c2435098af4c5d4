//! Generation pipeline: prompt, provider call, extraction, validation and
//! normalization for recipes and meal plans.

use thiserror::Error;

use crate::extract::{extract_json, Extraction};
use crate::llm::{LlmError, LlmProvider};
use crate::normalize::normalize_recipe;
use crate::prompts::{
    render_meal_plan_prompt, render_smart_recipe_prompt, MEAL_PLAN_PROMPT_NAME,
    SMART_RECIPE_PROMPT_NAME,
};
use crate::types::{GeneratedRecipe, MealPlanDay, MealPlanParams, SmartRecipeParams};
use crate::validate::{validate_meal_plan, validate_recipe, Validation};

#[derive(Debug, Error)]
pub enum GenerateError {
    /// The provider could not be reached or did not answer with any text.
    #[error("provider request failed: {0}")]
    Provider(#[from] LlmError),

    /// The provider answered, but the reply is not usable. `raw_text` is the
    /// reply exactly as received.
    #[error("upstream returned unusable content: {reason}")]
    Unusable { reason: String, raw_text: String },
}

/// Generate one recipe from the given ingredients.
pub async fn generate_smart_recipe(
    provider: &dyn LlmProvider,
    params: &SmartRecipeParams,
) -> Result<GeneratedRecipe, GenerateError> {
    let prompt = render_smart_recipe_prompt(params);
    let raw_text = call(provider, SMART_RECIPE_PROMPT_NAME, &prompt).await?;

    let recipe = parse_reply(SMART_RECIPE_PROMPT_NAME, raw_text, validate_recipe)?;
    Ok(normalize_recipe(recipe))
}

/// Generate a meal plan with one entry per requested day.
pub async fn generate_meal_plan(
    provider: &dyn LlmProvider,
    params: &MealPlanParams,
) -> Result<Vec<MealPlanDay>, GenerateError> {
    let prompt = render_meal_plan_prompt(params);
    let raw_text = call(provider, MEAL_PLAN_PROMPT_NAME, &prompt).await?;

    let plan = parse_reply(MEAL_PLAN_PROMPT_NAME, raw_text, validate_meal_plan)?;
    if plan.len() != params.days() as usize {
        tracing::warn!(
            requested = params.days(),
            returned = plan.len(),
            "Meal plan day count differs from request"
        );
    }
    Ok(plan)
}

async fn call(
    provider: &dyn LlmProvider,
    prompt_name: &str,
    prompt: &str,
) -> Result<String, LlmError> {
    tracing::debug!(
        prompt_name,
        provider = provider.provider_name(),
        model = provider.model_name(),
        "Requesting generation"
    );

    provider.generate(prompt).await.map_err(|e| {
        tracing::error!(
            prompt_name,
            provider = provider.provider_name(),
            error = %e,
            "Provider request failed"
        );
        e
    })
}

fn parse_reply<T>(
    prompt_name: &str,
    raw_text: String,
    validate: impl FnOnce(&serde_json::Value) -> Validation<T>,
) -> Result<T, GenerateError> {
    let reason = match extract_json(&raw_text) {
        Extraction::Extracted(value) => match validate(&value) {
            Validation::Valid(parsed) => return Ok(parsed),
            Validation::Invalid(reason) => format!("AI JSON missing required fields: {}", reason),
        },
        Extraction::NoMatch => "AI returned invalid JSON".to_string(),
    };

    tracing::warn!(prompt_name, %reason, "Unusable provider reply");
    Err(GenerateError::Unusable { reason, raw_text })
}
