pub mod extract;
pub mod generate;
pub mod llm;
pub mod normalize;
pub mod prompts;
pub mod types;
pub mod validate;

pub use extract::{extract_json, Extraction};
pub use generate::{generate_meal_plan, generate_smart_recipe, GenerateError};
pub use llm::{create_provider, FakeProvider, LlmConfig, LlmError, LlmProvider};
pub use normalize::{normalize_ingredients, normalize_recipe};
pub use types::{
    Diet, GeneratedRecipe, HealthBenefits, InvalidInput, Meal, MealPlanDay, MealPlanParams,
    SmartRecipeParams,
};
pub use validate::{validate_meal_plan, validate_recipe, Validation};
