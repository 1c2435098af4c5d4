//! Shape checks for extracted model output.
//!
//! A recipe needs a non-empty `title`, a non-empty `cookingSteps` array and a
//! numeric `estimatedTime`; everything else is optional. Meal plans are checked
//! day by day and meal by meal, and any malformed entry rejects the whole plan.

use serde_json::{Map, Value};

use crate::types::{GeneratedRecipe, HealthBenefits, Meal, MealPlanDay};

/// Outcome of a validator: the typed value, or why it was rejected.
#[derive(Debug, Clone, PartialEq)]
pub enum Validation<T> {
    Valid(T),
    Invalid(String),
}

impl<T> Validation<T> {
    pub fn into_result(self) -> Result<T, String> {
        match self {
            Validation::Valid(value) => Ok(value),
            Validation::Invalid(reason) => Err(reason),
        }
    }
}

macro_rules! reject {
    ($($arg:tt)*) => {
        return Validation::Invalid(format!($($arg)*))
    };
}

/// Validate a single-recipe response.
pub fn validate_recipe(value: &Value) -> Validation<GeneratedRecipe> {
    let Some(obj) = value.as_object() else {
        reject!("expected a JSON object, got {}", kind(value));
    };

    let title = match obj.get("title").and_then(Value::as_str) {
        Some(title) if !title.trim().is_empty() => title.to_string(),
        _ => reject!("missing required field: title"),
    };

    let cooking_steps = match obj.get("cookingSteps").and_then(Value::as_array) {
        Some(steps) if !steps.is_empty() => steps.iter().map(coerce_string).collect(),
        Some(_) => reject!("cookingSteps must not be empty"),
        None => reject!("missing required field: cookingSteps"),
    };

    let Some(estimated_time) = obj.get("estimatedTime").and_then(Value::as_f64) else {
        reject!("missing required field: estimatedTime");
    };

    Validation::Valid(GeneratedRecipe {
        title,
        used_ingredients: string_list(obj, "usedIngredients"),
        optional_ingredients: string_list(obj, "optionalIngredients"),
        health_benefits: health_benefits(obj.get("healthBenefits")),
        cooking_steps,
        estimated_time,
        servings: obj.get("servings").and_then(Value::as_f64),
        notes: obj.get("notes").and_then(Value::as_str).map(str::to_string),
    })
}

/// Validate a meal-plan response.
pub fn validate_meal_plan(value: &Value) -> Validation<Vec<MealPlanDay>> {
    let Some(days) = value.as_array() else {
        reject!("expected a JSON array of days, got {}", kind(value));
    };
    if days.is_empty() {
        reject!("meal plan has no days");
    }

    let mut plan = Vec::with_capacity(days.len());
    for (index, day) in days.iter().enumerate() {
        match validate_day(day) {
            Ok(day) => plan.push(day),
            Err(reason) => reject!("day entry {}: {}", index, reason),
        }
    }

    Validation::Valid(plan)
}

fn validate_day(value: &Value) -> Result<MealPlanDay, String> {
    let obj = value
        .as_object()
        .ok_or_else(|| format!("expected an object, got {}", kind(value)))?;

    let day = obj
        .get("day")
        .and_then(Value::as_u64)
        .filter(|day| *day >= 1)
        .and_then(|day| u32::try_from(day).ok())
        .ok_or("day must be an integer >= 1")?;

    let meals = obj
        .get("meals")
        .and_then(Value::as_array)
        .ok_or("missing meals array")?;
    if meals.is_empty() {
        return Err("meals must not be empty".to_string());
    }

    let meals = meals
        .iter()
        .enumerate()
        .map(|(index, meal)| validate_meal(meal).map_err(|e| format!("meal {}: {}", index, e)))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(MealPlanDay { day, meals })
}

fn validate_meal(value: &Value) -> Result<Meal, String> {
    let obj = value
        .as_object()
        .ok_or_else(|| format!("expected an object, got {}", kind(value)))?;

    let name = obj
        .get("name")
        .and_then(Value::as_str)
        .filter(|name| !name.trim().is_empty())
        .ok_or("missing name")?;

    let ingredients = obj
        .get("ingredients")
        .and_then(Value::as_array)
        .ok_or("missing ingredients array")?;

    let instructions = obj
        .get("instructions")
        .and_then(Value::as_str)
        .ok_or("missing instructions")?;

    let calories = match obj.get("calories") {
        None | Some(Value::Null) => None,
        Some(calories) => Some(calories.as_f64().ok_or("calories must be a number")?),
    };

    Ok(Meal {
        name: name.to_string(),
        ingredients: ingredients.iter().map(coerce_string).collect(),
        instructions: instructions.to_string(),
        calories,
    })
}

/// A string field that should hold a list. A lone string counts as one entry;
/// anything else is treated as absent.
fn string_list(obj: &Map<String, Value>, key: &str) -> Vec<String> {
    match obj.get(key) {
        Some(Value::Array(items)) => items.iter().map(coerce_string).collect(),
        Some(Value::String(item)) => vec![item.clone()],
        _ => Vec::new(),
    }
}

fn health_benefits(value: Option<&Value>) -> HealthBenefits {
    match value {
        Some(Value::String(text)) => HealthBenefits::Text(text.clone()),
        Some(Value::Array(items)) => HealthBenefits::List(items.iter().map(coerce_string).collect()),
        _ => HealthBenefits::default(),
    }
}

fn coerce_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_rejects_title_only() {
        assert!(matches!(
            validate_recipe(&json!({"title": "Soup"})),
            Validation::Invalid(_)
        ));
    }

    #[test]
    fn test_accepts_minimal_recipe() {
        let recipe = validate_recipe(&json!({
            "title": "Soup",
            "cookingSteps": ["boil"],
            "estimatedTime": 10
        }))
        .into_result()
        .unwrap();

        assert_eq!(recipe.title, "Soup");
        assert_eq!(recipe.cooking_steps, vec!["boil"]);
        assert_eq!(recipe.estimated_time, 10.0);
        assert!(recipe.used_ingredients.is_empty());
        assert!(recipe.optional_ingredients.is_empty());
        assert_eq!(recipe.servings, None);
        assert_eq!(recipe.notes, None);
    }

    #[test]
    fn test_rejects_wrong_types() {
        let cases = [
            json!([{"title": "Soup"}]),
            json!({"title": 3, "cookingSteps": ["boil"], "estimatedTime": 10}),
            json!({"title": "", "cookingSteps": ["boil"], "estimatedTime": 10}),
            json!({"title": "Soup", "cookingSteps": "boil", "estimatedTime": 10}),
            json!({"title": "Soup", "cookingSteps": [], "estimatedTime": 10}),
            json!({"title": "Soup", "cookingSteps": ["boil"], "estimatedTime": "10 minutes"}),
        ];
        for case in cases {
            assert!(
                matches!(validate_recipe(&case), Validation::Invalid(_)),
                "accepted {}",
                case
            );
        }
    }

    #[test]
    fn test_keeps_optional_fields() {
        let recipe = validate_recipe(&json!({
            "title": "Chicken Rice",
            "usedIngredients": ["Chicken", "rice", 3],
            "optionalIngredients": "Soy Sauce",
            "healthBenefits": ["protein", "fiber"],
            "cookingSteps": ["1. Cook rice", {"step": 2}],
            "estimatedTime": 25.5,
            "servings": 2,
            "notes": "Leftovers keep for 2 days"
        }))
        .into_result()
        .unwrap();

        assert_eq!(recipe.used_ingredients, vec!["Chicken", "rice", "3"]);
        assert_eq!(recipe.optional_ingredients, vec!["Soy Sauce"]);
        assert_eq!(
            recipe.health_benefits,
            HealthBenefits::List(vec!["protein".into(), "fiber".into()])
        );
        assert_eq!(recipe.cooking_steps[1], r#"{"step":2}"#);
        assert_eq!(recipe.servings, Some(2.0));
        assert_eq!(recipe.notes.as_deref(), Some("Leftovers keep for 2 days"));
    }

    #[test]
    fn test_health_benefits_as_text() {
        let recipe = validate_recipe(&json!({
            "title": "Salad",
            "healthBenefits": "Rich in vitamins",
            "cookingSteps": ["toss"],
            "estimatedTime": 5
        }))
        .into_result()
        .unwrap();
        assert_eq!(
            recipe.health_benefits,
            HealthBenefits::Text("Rich in vitamins".into())
        );
    }

    fn sample_plan() -> Value {
        json!([
            {
                "day": 1,
                "meals": [
                    {"name": "Oats", "ingredients": ["oats", "milk"], "instructions": "Soak overnight", "calories": 350},
                    {"name": "Lentil soup", "ingredients": ["lentils"], "instructions": "Simmer"}
                ]
            },
            {
                "day": 2,
                "meals": [
                    {"name": "Omelette", "ingredients": ["eggs"], "instructions": "Whisk and fry", "calories": null}
                ]
            }
        ])
    }

    #[test]
    fn test_accepts_meal_plan() {
        let plan = validate_meal_plan(&sample_plan()).into_result().unwrap();
        assert_eq!(plan.len(), 2);
        assert_eq!(plan[0].day, 1);
        assert_eq!(plan[0].meals[0].calories, Some(350.0));
        assert_eq!(plan[0].meals[1].calories, None);
        assert_eq!(plan[1].meals[0].name, "Omelette");
        assert_eq!(plan[1].meals[0].calories, None);
    }

    #[test]
    fn test_rejects_empty_or_non_array_plan() {
        assert!(matches!(validate_meal_plan(&json!([])), Validation::Invalid(_)));
        assert!(matches!(
            validate_meal_plan(&json!({"day": 1, "meals": []})),
            Validation::Invalid(_)
        ));
    }

    #[test]
    fn test_rejects_malformed_days_and_meals() {
        let cases = [
            json!([{"meals": [{"name": "A", "ingredients": [], "instructions": "x"}]}]),
            json!([{"day": 0, "meals": [{"name": "A", "ingredients": [], "instructions": "x"}]}]),
            json!([{"day": 1, "meals": []}]),
            json!([{"day": 1, "meals": [{"ingredients": [], "instructions": "x"}]}]),
            json!([{"day": 1, "meals": [{"name": "A", "instructions": "x"}]}]),
            json!([{"day": 1, "meals": [{"name": "A", "ingredients": []}]}]),
            json!([{"day": 1, "meals": [{"name": "A", "ingredients": [], "instructions": "x", "calories": "lots"}]}]),
            json!(["day one"]),
        ];
        for case in cases {
            assert!(
                matches!(validate_meal_plan(&case), Validation::Invalid(_)),
                "accepted {}",
                case
            );
        }
    }

    #[test]
    fn test_invalid_reason_names_the_entry() {
        let mut plan = sample_plan();
        plan[1]["meals"][0]["name"] = json!("");
        match validate_meal_plan(&plan) {
            Validation::Invalid(reason) => {
                assert!(reason.contains("day entry 1"), "{}", reason);
                assert!(reason.contains("meal 0"), "{}", reason);
            }
            Validation::Valid(_) => panic!("expected rejection"),
        }
    }
}
