use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use utoipa::ToSchema;

/// Maximum number of ingredients accepted for a smart recipe.
pub const MAX_INGREDIENTS: usize = 20;

/// Upper bound for the optional cooking time constraint, in minutes.
pub const MAX_TIME_MINUTES: i64 = 240;

/// Longest meal plan that can be requested.
pub const MAX_PLAN_DAYS: i64 = 14;

/// Dietary preference passed through to the prompts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Diet {
    #[default]
    None,
    Veg,
    Vegan,
    Keto,
    Paleo,
}

impl Diet {
    pub const ALL: &'static [Diet] = &[Diet::None, Diet::Veg, Diet::Vegan, Diet::Keto, Diet::Paleo];

    pub fn as_str(&self) -> &'static str {
        match self {
            Diet::None => "none",
            Diet::Veg => "veg",
            Diet::Vegan => "vegan",
            Diet::Keto => "keto",
            Diet::Paleo => "paleo",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "none" => Some(Diet::None),
            "veg" => Some(Diet::Veg),
            "vegan" => Some(Diet::Vegan),
            "keto" => Some(Diet::Keto),
            "paleo" => Some(Diet::Paleo),
            _ => None,
        }
    }
}

impl fmt::Display for Diet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Rejected request parameters. Raised before any prompt is built.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InvalidInput {
    #[error("at least one ingredient is required")]
    NoIngredients,

    #[error("at most {max} ingredients are allowed, got {got}")]
    TooManyIngredients { got: usize, max: usize },

    #[error("ingredient at position {0} is empty")]
    EmptyIngredient(usize),

    #[error("maxTime must be between 1 and {max} minutes, got {got}")]
    MaxTimeOutOfRange { got: i64, max: i64 },

    #[error("days must be between 1 and {max}, got {got}")]
    DaysOutOfRange { got: i64, max: i64 },

    #[error("calories must be a positive number")]
    NonPositiveCalories,
}

/// Validated parameters for a single generated recipe.
#[derive(Debug, Clone, PartialEq)]
pub struct SmartRecipeParams {
    ingredients: Vec<String>,
    diet: Diet,
    max_time: Option<u32>,
}

impl SmartRecipeParams {
    /// Ingredients are trimmed before the range and emptiness checks.
    pub fn new(
        ingredients: Vec<String>,
        diet: Diet,
        max_time: Option<i64>,
    ) -> Result<Self, InvalidInput> {
        if ingredients.is_empty() {
            return Err(InvalidInput::NoIngredients);
        }
        if ingredients.len() > MAX_INGREDIENTS {
            return Err(InvalidInput::TooManyIngredients {
                got: ingredients.len(),
                max: MAX_INGREDIENTS,
            });
        }

        let mut trimmed = Vec::with_capacity(ingredients.len());
        for (index, ingredient) in ingredients.iter().enumerate() {
            let ingredient = ingredient.trim();
            if ingredient.is_empty() {
                return Err(InvalidInput::EmptyIngredient(index));
            }
            trimmed.push(ingredient.to_string());
        }

        let max_time = match max_time {
            Some(minutes) if (1..=MAX_TIME_MINUTES).contains(&minutes) => Some(minutes as u32),
            Some(minutes) => {
                return Err(InvalidInput::MaxTimeOutOfRange {
                    got: minutes,
                    max: MAX_TIME_MINUTES,
                })
            }
            None => None,
        };

        Ok(Self {
            ingredients: trimmed,
            diet,
            max_time,
        })
    }

    pub fn ingredients(&self) -> &[String] {
        &self.ingredients
    }

    pub fn diet(&self) -> Diet {
        self.diet
    }

    pub fn max_time(&self) -> Option<u32> {
        self.max_time
    }
}

/// Validated parameters for a multi-day meal plan.
#[derive(Debug, Clone, PartialEq)]
pub struct MealPlanParams {
    days: u32,
    diet: Diet,
    calories: Option<f64>,
}

impl MealPlanParams {
    pub fn new(days: i64, diet: Diet, calories: Option<f64>) -> Result<Self, InvalidInput> {
        if !(1..=MAX_PLAN_DAYS).contains(&days) {
            return Err(InvalidInput::DaysOutOfRange {
                got: days,
                max: MAX_PLAN_DAYS,
            });
        }
        if let Some(calories) = calories {
            if !calories.is_finite() || calories <= 0.0 {
                return Err(InvalidInput::NonPositiveCalories);
            }
        }

        Ok(Self {
            days: days as u32,
            diet,
            calories,
        })
    }

    pub fn days(&self) -> u32 {
        self.days
    }

    pub fn diet(&self) -> Diet {
        self.diet
    }

    pub fn calories(&self) -> Option<f64> {
        self.calories
    }
}

/// Health benefits come back either as prose or as a list depending on the provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(untagged)]
pub enum HealthBenefits {
    Text(String),
    List(Vec<String>),
}

impl Default for HealthBenefits {
    fn default() -> Self {
        HealthBenefits::List(Vec::new())
    }
}

impl HealthBenefits {
    /// Flatten into the list form used for storage. Blank prose becomes an empty list.
    pub fn into_list(self) -> Vec<String> {
        match self {
            HealthBenefits::Text(text) if text.trim().is_empty() => Vec::new(),
            HealthBenefits::Text(text) => vec![text],
            HealthBenefits::List(items) => items,
        }
    }
}

/// A recipe produced by the model, after validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedRecipe {
    pub title: String,
    #[serde(default)]
    pub used_ingredients: Vec<String>,
    #[serde(default)]
    pub optional_ingredients: Vec<String>,
    #[serde(default)]
    pub health_benefits: HealthBenefits,
    pub cooking_steps: Vec<String>,
    /// Minutes.
    pub estimated_time: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub servings: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Meal {
    pub name: String,
    pub ingredients: Vec<String>,
    pub instructions: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub calories: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct MealPlanDay {
    pub day: u32,
    pub meals: Vec<Meal>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_diet_round_trips_through_labels() {
        for diet in Diet::ALL {
            assert_eq!(Diet::from_str(diet.as_str()), Some(*diet));
        }
        assert_eq!(Diet::from_str("carnivore"), None);
        assert_eq!(Diet::default(), Diet::None);
    }

    #[test]
    fn test_diet_deserializes_lowercase() {
        let diet: Diet = serde_json::from_str("\"keto\"").unwrap();
        assert_eq!(diet, Diet::Keto);
        assert!(serde_json::from_str::<Diet>("\"Keto\"").is_err());
    }

    #[test]
    fn test_smart_recipe_params_trim_ingredients() {
        let params =
            SmartRecipeParams::new(strings(&[" chicken ", "rice"]), Diet::None, None).unwrap();
        assert_eq!(params.ingredients(), &strings(&["chicken", "rice"])[..]);
        assert_eq!(params.max_time(), None);
    }

    #[test]
    fn test_smart_recipe_params_reject_bad_ingredients() {
        assert_eq!(
            SmartRecipeParams::new(vec![], Diet::None, None),
            Err(InvalidInput::NoIngredients)
        );
        assert_eq!(
            SmartRecipeParams::new(strings(&["egg", "  "]), Diet::None, None),
            Err(InvalidInput::EmptyIngredient(1))
        );

        let too_many: Vec<String> = (0..21).map(|i| format!("item{}", i)).collect();
        assert_eq!(
            SmartRecipeParams::new(too_many, Diet::None, None),
            Err(InvalidInput::TooManyIngredients { got: 21, max: 20 })
        );

        let twenty: Vec<String> = (0..20).map(|i| format!("item{}", i)).collect();
        assert!(SmartRecipeParams::new(twenty, Diet::None, None).is_ok());
    }

    #[test]
    fn test_smart_recipe_params_max_time_range() {
        assert!(SmartRecipeParams::new(strings(&["egg"]), Diet::Veg, Some(240)).is_ok());
        assert_eq!(
            SmartRecipeParams::new(strings(&["egg"]), Diet::Veg, Some(241)),
            Err(InvalidInput::MaxTimeOutOfRange { got: 241, max: 240 })
        );
        assert!(SmartRecipeParams::new(strings(&["egg"]), Diet::Veg, Some(0)).is_err());
    }

    #[test]
    fn test_meal_plan_params_ranges() {
        assert!(MealPlanParams::new(1, Diet::None, None).is_ok());
        assert!(MealPlanParams::new(14, Diet::Paleo, Some(2000.0)).is_ok());
        assert_eq!(
            MealPlanParams::new(15, Diet::None, None),
            Err(InvalidInput::DaysOutOfRange { got: 15, max: 14 })
        );
        assert!(MealPlanParams::new(0, Diet::None, None).is_err());
        assert_eq!(
            MealPlanParams::new(3, Diet::None, Some(0.0)),
            Err(InvalidInput::NonPositiveCalories)
        );
        assert_eq!(
            MealPlanParams::new(3, Diet::None, Some(f64::NAN)),
            Err(InvalidInput::NonPositiveCalories)
        );
    }

    #[test]
    fn test_health_benefits_into_list() {
        assert_eq!(
            HealthBenefits::Text("High protein".to_string()).into_list(),
            vec!["High protein".to_string()]
        );
        assert!(HealthBenefits::Text("  ".to_string()).into_list().is_empty());
        assert_eq!(
            HealthBenefits::List(strings(&["a", "b"])).into_list(),
            strings(&["a", "b"])
        );
    }

    #[test]
    fn test_generated_recipe_uses_camel_case() {
        let recipe = GeneratedRecipe {
            title: "Soup".to_string(),
            used_ingredients: strings(&["leek"]),
            optional_ingredients: vec![],
            health_benefits: HealthBenefits::default(),
            cooking_steps: strings(&["boil"]),
            estimated_time: 10.0,
            servings: None,
            notes: None,
        };
        let json = serde_json::to_value(&recipe).unwrap();
        assert_eq!(json["usedIngredients"][0], "leek");
        assert_eq!(json["cookingSteps"][0], "boil");
        assert_eq!(json["estimatedTime"], 10.0);
        assert!(json.get("servings").is_none());
    }
}
