//! Prompt for generating one recipe from a list of ingredients.

use crate::types::SmartRecipeParams;

/// Prompt name used in logs.
pub const SMART_RECIPE_PROMPT_NAME: &str = "smart_recipe";

/// Render the smart-recipe prompt.
pub fn render_smart_recipe_prompt(params: &SmartRecipeParams) -> String {
    let mut constraints = vec![
        format!("Ingredients: {}", params.ingredients().join(", ")),
        format!("Diet: {}", params.diet()),
    ];
    if let Some(max_time) = params.max_time() {
        constraints.push(format!("MaxTime: {} minutes", max_time));
    }

    format!(
        r#"You are a professional chef and nutrition coach.
Use ONLY the provided ingredients as core items. Optional pantry items like oil, salt, pepper and basic spices are okay.
Optimize for health (balanced macros, low ultra-processed foods, sensible sodium) and taste.

{constraints}

Return a single best recipe. cookingSteps is an array of short steps.
estimatedTime is a number (minutes). servings is an integer (e.g. 2).

Respond with ONLY a JSON object, no other text, with this structure:
{{
  "title": string,
  "usedIngredients": string[],
  "optionalIngredients": string[],
  "healthBenefits": string,
  "cookingSteps": string[],
  "estimatedTime": number,
  "servings": number,
  "notes": string
}}"#,
        constraints = constraints.join("\n")
    )
}
