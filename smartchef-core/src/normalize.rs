//! Canonical ingredient lists for storage and display.

use std::collections::HashSet;

use crate::types::GeneratedRecipe;

/// Lower-case, trim and de-duplicate ingredient names.
///
/// Blank entries are dropped. The first occurrence of each name keeps its
/// position, but callers must treat the result as a set. Applying the function
/// to its own output returns the same list.
pub fn normalize_ingredients<I, S>(items: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut seen = HashSet::new();
    items
        .into_iter()
        .map(|item| item.as_ref().trim().to_lowercase())
        .filter(|item| !item.is_empty())
        .filter(|item| seen.insert(item.clone()))
        .collect()
}

/// Normalize both ingredient lists of a recipe independently.
pub fn normalize_recipe(mut recipe: GeneratedRecipe) -> GeneratedRecipe {
    recipe.used_ingredients = normalize_ingredients(&recipe.used_ingredients);
    recipe.optional_ingredients = normalize_ingredients(&recipe.optional_ingredients);
    recipe
}
