use serde::Deserialize;

use super::filter::{CategoryFilter, FilterOptions};
use crate::error::AppError;

/// Query-string form of [`FilterOptions`]; set-valued filters arrive
/// comma-separated.
#[derive(Debug, Default, Deserialize)]
pub struct CatalogQuery {
    #[serde(default)]
    pub search: Option<String>,
    #[serde(default)]
    pub cuisine_category: Option<String>,
    #[serde(default)]
    pub cuisine: Option<String>,
    #[serde(default)]
    pub meal_type: Option<String>,
    #[serde(default)]
    pub difficulty: Option<String>,
}

impl CatalogQuery {
    pub fn into_filters(self) -> Result<FilterOptions, AppError> {
        let cuisine_category = match self.cuisine_category.as_deref() {
            None | Some("") | Some("all") => CategoryFilter::All,
            Some(raw) => CategoryFilter::Only(raw.parse().map_err(AppError::Validation)?),
        };

        let meal_type = split_set(self.meal_type)
            .iter()
            .map(|v| v.parse().map_err(AppError::Validation))
            .collect::<Result<Vec<_>, _>>()?;
        let difficulty = split_set(self.difficulty)
            .iter()
            .map(|v| v.parse().map_err(AppError::Validation))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(FilterOptions {
            search: self.search.unwrap_or_default(),
            cuisine_category,
            cuisine: split_set(self.cuisine),
            meal_type,
            difficulty,
        })
    }
}

fn split_set(raw: Option<String>) -> Vec<String> {
    raw.map(|s| {
        s.split(',')
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(str::to_string)
            .collect()
    })
    .unwrap_or_default()
}

#[cfg(test)]
mod dto_tests {
    use super::*;
    use crate::catalog::model::{CuisineCategory, Difficulty, MealType};

    #[test]
    fn test_query_parses_into_filters() {
        let query = CatalogQuery {
            search: Some("دجاج".into()),
            cuisine_category: Some("arab".into()),
            cuisine: Some("مصر, السعودية".into()),
            meal_type: Some("lunch,dinner".into()),
            difficulty: Some("easy".into()),
        };

        let filters = query.into_filters().unwrap();
        assert_eq!(filters.search, "دجاج");
        assert_eq!(
            filters.cuisine_category,
            CategoryFilter::Only(CuisineCategory::Arab)
        );
        assert_eq!(filters.cuisine, vec!["مصر", "السعودية"]);
        assert_eq!(filters.meal_type, vec![MealType::Lunch, MealType::Dinner]);
        assert_eq!(filters.difficulty, vec![Difficulty::Easy]);
    }

    #[test]
    fn test_all_sentinel_and_empty_sets() {
        let filters = CatalogQuery {
            cuisine_category: Some("all".into()),
            ..Default::default()
        }
        .into_filters()
        .unwrap();

        assert_eq!(filters.cuisine_category, CategoryFilter::All);
        assert!(filters.cuisine.is_empty());
        assert!(filters.meal_type.is_empty());
        assert!(filters.difficulty.is_empty());
    }

    #[test]
    fn test_unknown_values_are_rejected() {
        let result = CatalogQuery {
            meal_type: Some("brunch".into()),
            ..Default::default()
        }
        .into_filters();
        assert!(matches!(result, Err(AppError::Validation(_))));
    }
}
