use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::repo::Review;
use crate::storage::{keys, Store};

pub const MIN_RATING: u8 = 1;
pub const MAX_RATING: u8 = 5;

/// Aggregate statistics derived from a recipe's reviews. Stored alongside the
/// reviews themselves and fully recomputed after every review create/delete.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeRating {
    pub recipe_id: Uuid,
    pub average_rating: f64,
    pub total_reviews: u32,
    pub rating_distribution: BTreeMap<u8, u32>,
}

impl RecipeRating {
    /// Display state for a recipe with no reviews. Indistinguishable from an
    /// absent entry by contract.
    pub fn zero(recipe_id: Uuid) -> Self {
        Self {
            recipe_id,
            average_rating: 0.0,
            total_reviews: 0,
            rating_distribution: empty_distribution(),
        }
    }
}

fn empty_distribution() -> BTreeMap<u8, u32> {
    (MIN_RATING..=MAX_RATING).map(|star| (star, 0)).collect()
}

/// Recomputes the aggregate from scratch. Returns `None` when the recipe has
/// no reviews, meaning the stored entry must be removed rather than zeroed.
/// Ratings outside 1..=5 are rejected at review creation, never here.
pub fn recompute(recipe_id: Uuid, all_reviews: &[Review]) -> Option<RecipeRating> {
    let mut distribution = empty_distribution();
    let mut total = 0u32;
    let mut sum = 0u64;

    for review in all_reviews.iter().filter(|r| r.recipe_id == recipe_id) {
        *distribution.entry(review.rating).or_insert(0) += 1;
        total += 1;
        sum += u64::from(review.rating);
    }

    if total == 0 {
        return None;
    }

    Some(RecipeRating {
        recipe_id,
        average_rating: sum as f64 / f64::from(total),
        total_reviews: total,
        rating_distribution: distribution,
    })
}

/// Persists the recomputed aggregate for one recipe. Callers must hold the
/// store mutation guard so the review change and this recompute form a single
/// logical step.
pub async fn apply_review_change(
    store: &Store,
    recipe_id: Uuid,
    all_reviews: &[Review],
) -> anyhow::Result<()> {
    let mut ratings: HashMap<Uuid, RecipeRating> = store.get_or_default(keys::RATINGS).await?;
    match recompute(recipe_id, all_reviews) {
        Some(rating) => {
            ratings.insert(recipe_id, rating);
        }
        None => {
            ratings.remove(&recipe_id);
        }
    }
    store.put(keys::RATINGS, &ratings).await
}

pub async fn get(store: &Store, recipe_id: Uuid) -> anyhow::Result<Option<RecipeRating>> {
    let ratings: HashMap<Uuid, RecipeRating> = store.get_or_default(keys::RATINGS).await?;
    Ok(ratings.get(&recipe_id).cloned())
}

#[cfg(test)]
mod rating_tests {
    use super::*;
    use time::OffsetDateTime;

    fn review(recipe_id: Uuid, user: u128, rating: u8) -> Review {
        Review {
            id: Uuid::new_v4(),
            recipe_id,
            user_id: Uuid::from_u128(user),
            user_name: format!("مستخدم {user}"),
            user_avatar: None,
            rating,
            comment: "لذيذة جداً".into(),
            created_at: OffsetDateTime::UNIX_EPOCH,
            likes: 0,
            liked_by: Vec::new(),
        }
    }

    #[test]
    fn test_recompute_worked_example() {
        let recipe_id = Uuid::from_u128(1);
        let mut reviews = vec![
            review(recipe_id, 1, 5),
            review(recipe_id, 2, 5),
            review(recipe_id, 3, 4),
        ];

        let rating = recompute(recipe_id, &reviews).unwrap();
        assert_eq!(rating.total_reviews, 3);
        assert!((rating.average_rating - 14.0 / 3.0).abs() < 1e-9);
        assert_eq!(rating.rating_distribution[&5], 2);
        assert_eq!(rating.rating_distribution[&4], 1);
        assert_eq!(rating.rating_distribution[&3], 0);
        assert_eq!(rating.rating_distribution[&2], 0);
        assert_eq!(rating.rating_distribution[&1], 0);

        // Drop the 4-star review.
        reviews.retain(|r| r.rating != 4);
        let rating = recompute(recipe_id, &reviews).unwrap();
        assert_eq!(rating.total_reviews, 2);
        assert_eq!(rating.average_rating, 5.0);
        assert_eq!(rating.rating_distribution[&5], 2);
        assert_eq!(rating.rating_distribution[&4], 0);

        // Drop everything.
        assert!(recompute(recipe_id, &[]).is_none());
    }

    #[test]
    fn test_distribution_sums_to_total() {
        let recipe_id = Uuid::from_u128(2);
        let other = Uuid::from_u128(3);
        let reviews = vec![
            review(recipe_id, 1, 1),
            review(recipe_id, 2, 3),
            review(recipe_id, 3, 3),
            review(recipe_id, 4, 5),
            review(other, 5, 2),
        ];

        let rating = recompute(recipe_id, &reviews).unwrap();
        let sum: u32 = rating.rating_distribution.values().sum();
        assert_eq!(sum, rating.total_reviews);
        assert_eq!(rating.total_reviews, 4);
        assert!((rating.average_rating - 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_zero_state_has_full_distribution() {
        let zero = RecipeRating::zero(Uuid::from_u128(4));
        assert_eq!(zero.rating_distribution.len(), 5);
        assert!(zero.rating_distribution.values().all(|&c| c == 0));
    }
}
