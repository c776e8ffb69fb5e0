use super::model::{CuisineCategory, Difficulty, MealType, Recipe};

/// Category filter with an explicit "all" sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(CuisineCategory),
}

/// Transient query object; never persisted.
#[derive(Debug, Clone, Default)]
pub struct FilterOptions {
    pub search: String,
    pub cuisine_category: CategoryFilter,
    pub cuisine: Vec<String>,
    pub meal_type: Vec<MealType>,
    pub difficulty: Vec<Difficulty>,
}

/// Stable predicate filter over the catalog: all five criteria must hold,
/// each non-empty set being a disjunction over its selected values.
/// Preserves the input order.
pub fn apply(recipes: &[Recipe], filters: &FilterOptions) -> Vec<Recipe> {
    recipes
        .iter()
        .filter(|r| matches(r, filters))
        .cloned()
        .collect()
}

fn matches(recipe: &Recipe, filters: &FilterOptions) -> bool {
    let search = filters.search.trim().to_lowercase();
    if !search.is_empty() {
        let name_hit = recipe.name.to_lowercase().contains(&search);
        let ingredient_hit = recipe
            .ingredients
            .iter()
            .any(|ing| ing.to_lowercase().contains(&search));
        if !name_hit && !ingredient_hit {
            return false;
        }
    }

    if let CategoryFilter::Only(category) = filters.cuisine_category {
        if recipe.cuisine_category != category {
            return false;
        }
    }

    if !filters.cuisine.is_empty() && !filters.cuisine.contains(&recipe.cuisine) {
        return false;
    }

    if !filters.meal_type.is_empty() && !filters.meal_type.contains(&recipe.meal_type) {
        return false;
    }

    if !filters.difficulty.is_empty() && !filters.difficulty.contains(&recipe.difficulty) {
        return false;
    }

    true
}
