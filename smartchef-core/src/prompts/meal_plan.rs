//! Prompt for generating a multi-day meal plan.

use crate::types::MealPlanParams;

/// Prompt name used in logs.
pub const MEAL_PLAN_PROMPT_NAME: &str = "meal_plan";

/// Render the meal-plan prompt.
pub fn render_meal_plan_prompt(params: &MealPlanParams) -> String {
    let mut constraints = vec![
        format!("Generate a {}-day meal plan.", params.days()),
        format!("Diet: {}.", params.diet()),
    ];
    if let Some(calories) = params.calories() {
        constraints.push(format!("Calories per day: {}", calories));
    }

    format!(
        r#"You are a professional nutritionist and chef.
{constraints}

Respond with ONLY a JSON array, no other text, with one entry per day in this format:
[{{
  "day": 1,
  "meals": [{{
    "name": string,
    "ingredients": [string],
    "instructions": string,
    "calories": number (optional)
  }}]
}}]"#,
        constraints = constraints.join("\n")
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Diet;

    #[test]
    fn test_render_prompt() {
        let params = MealPlanParams::new(3, Diet::Vegan, Some(1800.0)).unwrap();
        let prompt = render_meal_plan_prompt(&params);

        assert!(prompt.contains("professional nutritionist"));
        assert!(prompt.contains("Generate a 3-day meal plan."));
        assert!(prompt.contains("Diet: vegan."));
        assert!(prompt.contains("Calories per day: 1800"));
        assert!(prompt.contains("ONLY a JSON array"));
    }

    #[test]
    fn test_omits_missing_calories() {
        let params = MealPlanParams::new(7, Diet::None, None).unwrap();
        let prompt = render_meal_plan_prompt(&params);
        assert!(!prompt.contains("Calories"));
        assert!(prompt.contains("Diet: none."));
    }
}
