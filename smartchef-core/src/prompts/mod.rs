//! Prompt templates.
//!
//! Every template is a pure function of already-validated parameters. Optional
//! constraints are left out entirely when absent.

pub mod meal_plan;
pub mod smart_recipe;

pub use meal_plan::{render_meal_plan_prompt, MEAL_PLAN_PROMPT_NAME};
pub use smart_recipe::{render_smart_recipe_prompt, SMART_RECIPE_PROMPT_NAME};
