use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use super::rating::{self, MAX_RATING, MIN_RATING};
use crate::auth::provider::User;
use crate::error::AppError;
use crate::storage::{keys, Store};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub id: Uuid,
    pub recipe_id: Uuid,
    pub user_id: Uuid,
    pub user_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_avatar: Option<String>,
    pub rating: u8,
    pub comment: String,
    #[serde(with = "time::serde::timestamp")]
    pub created_at: OffsetDateTime,
    pub likes: u32,
    pub liked_by: Vec<Uuid>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortOrder {
    #[default]
    Newest,
    Oldest,
    Highest,
    Lowest,
    MostLiked,
}

/// Stable sort, so reviews that compare equal keep insertion order.
pub fn sort(reviews: &mut [Review], order: SortOrder) {
    match order {
        SortOrder::Newest => reviews.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
        SortOrder::Oldest => reviews.sort_by(|a, b| a.created_at.cmp(&b.created_at)),
        SortOrder::Highest => reviews.sort_by(|a, b| b.rating.cmp(&a.rating)),
        SortOrder::Lowest => reviews.sort_by(|a, b| a.rating.cmp(&b.rating)),
        SortOrder::MostLiked => reviews.sort_by(|a, b| b.likes.cmp(&a.likes)),
    }
}

pub async fn list_for_recipe(
    store: &Store,
    recipe_id: Uuid,
    order: SortOrder,
) -> anyhow::Result<Vec<Review>> {
    let all: Vec<Review> = store.get_or_default(keys::REVIEWS).await?;
    let mut reviews: Vec<Review> = all.into_iter().filter(|r| r.recipe_id == recipe_id).collect();
    sort(&mut reviews, order);
    Ok(reviews)
}

pub async fn create(
    store: &Store,
    recipe_id: Uuid,
    user: &User,
    rating_value: u8,
    comment: &str,
) -> Result<Review, AppError> {
    if !(MIN_RATING..=MAX_RATING).contains(&rating_value) {
        return Err(AppError::validation("rating must be between 1 and 5"));
    }
    let comment = comment.trim();
    if comment.is_empty() {
        return Err(AppError::validation("comment must not be empty"));
    }

    let _guard = store.begin_mutation().await;
    let mut reviews: Vec<Review> = store.get_or_default(keys::REVIEWS).await?;
    if reviews
        .iter()
        .any(|r| r.recipe_id == recipe_id && r.user_id == user.id)
    {
        return Err(AppError::validation("you have already reviewed this recipe"));
    }

    let review = Review {
        id: Uuid::new_v4(),
        recipe_id,
        user_id: user.id,
        user_name: user.name.clone(),
        user_avatar: Some(user.avatar.clone()).filter(|a| !a.is_empty()),
        rating: rating_value,
        comment: comment.to_string(),
        created_at: OffsetDateTime::now_utc(),
        likes: 0,
        liked_by: Vec::new(),
    };
    reviews.push(review.clone());

    store.put(keys::REVIEWS, &reviews).await?;
    rating::apply_review_change(store, recipe_id, &reviews).await?;
    Ok(review)
}

/// Idempotent: deleting an already-gone review succeeds. Only the owner may
/// delete a review that still exists.
pub async fn delete(store: &Store, review_id: Uuid, requester: Uuid) -> Result<(), AppError> {
    let _guard = store.begin_mutation().await;
    let mut reviews: Vec<Review> = store.get_or_default(keys::REVIEWS).await?;
    let Some(pos) = reviews.iter().position(|r| r.id == review_id) else {
        return Ok(());
    };
    if reviews[pos].user_id != requester {
        return Err(AppError::permission("only the review owner can delete it"));
    }

    let removed = reviews.remove(pos);
    store.put(keys::REVIEWS, &reviews).await?;
    rating::apply_review_change(store, removed.recipe_id, &reviews).await?;
    Ok(())
}

/// Likes never touch the rating aggregate.
pub async fn toggle_like(
    store: &Store,
    review_id: Uuid,
    user_id: Uuid,
) -> Result<Review, AppError> {
    let _guard = store.begin_mutation().await;
    let mut reviews: Vec<Review> = store.get_or_default(keys::REVIEWS).await?;
    let review = reviews
        .iter_mut()
        .find(|r| r.id == review_id)
        .ok_or_else(|| AppError::not_found("review not found"))?;

    if let Some(pos) = review.liked_by.iter().position(|id| *id == user_id) {
        review.liked_by.remove(pos);
        review.likes -= 1;
    } else {
        review.liked_by.push(user_id);
        review.likes += 1;
    }
    let updated = review.clone();

    store.put(keys::REVIEWS, &reviews).await?;
    Ok(updated)
}

#[cfg(test)]
mod repo_tests {
    use super::*;
    use crate::state::AppState;
    use time::Duration;

    fn user(n: u128) -> User {
        User {
            id: Uuid::from_u128(n),
            email: format!("u{n}@example.com"),
            name: format!("مستخدم {n}"),
            avatar: format!("https://api.dicebear.com/7.x/avataaars/svg?seed={n}"),
            bio: None,
            created_at: OffsetDateTime::UNIX_EPOCH,
        }
    }

    #[tokio::test]
    async fn test_create_validates_input() {
        let state = AppState::fake();
        let recipe_id = Uuid::from_u128(10);

        let err = create(&state.store, recipe_id, &user(1), 0, "جيدة").await;
        assert!(matches!(err, Err(AppError::Validation(_))));
        let err = create(&state.store, recipe_id, &user(1), 6, "جيدة").await;
        assert!(matches!(err, Err(AppError::Validation(_))));
        let err = create(&state.store, recipe_id, &user(1), 4, "   ").await;
        assert!(matches!(err, Err(AppError::Validation(_))));

        // Nothing was stored and no aggregate was produced.
        let reviews: Vec<Review> = state.store.get_or_default(keys::REVIEWS).await.unwrap();
        assert!(reviews.is_empty());
        assert!(rating::get(&state.store, recipe_id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_create_rejects_second_review_by_same_user() {
        let state = AppState::fake();
        let recipe_id = Uuid::from_u128(10);

        create(&state.store, recipe_id, &user(1), 5, "ممتازة").await.unwrap();
        let err = create(&state.store, recipe_id, &user(1), 3, "غيرت رأيي").await;
        assert!(matches!(err, Err(AppError::Validation(_))));

        // Same user may still review a different recipe.
        create(&state.store, Uuid::from_u128(11), &user(1), 3, "مقبولة")
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_create_and_delete_keep_aggregate_in_sync() {
        let state = AppState::fake();
        let recipe_id = Uuid::from_u128(10);

        create(&state.store, recipe_id, &user(1), 5, "ممتازة").await.unwrap();
        create(&state.store, recipe_id, &user(2), 5, "رائعة").await.unwrap();
        let four_star = create(&state.store, recipe_id, &user(3), 4, "جيدة جداً")
            .await
            .unwrap();

        let agg = rating::get(&state.store, recipe_id).await.unwrap().unwrap();
        assert_eq!(agg.total_reviews, 3);
        assert!((agg.average_rating - 14.0 / 3.0).abs() < 1e-9);
        let sum: u32 = agg.rating_distribution.values().sum();
        assert_eq!(sum, agg.total_reviews);

        delete(&state.store, four_star.id, four_star.user_id)
            .await
            .unwrap();
        let agg = rating::get(&state.store, recipe_id).await.unwrap().unwrap();
        assert_eq!(agg.total_reviews, 2);
        assert_eq!(agg.average_rating, 5.0);

        for r in list_for_recipe(&state.store, recipe_id, SortOrder::Newest)
            .await
            .unwrap()
        {
            delete(&state.store, r.id, r.user_id).await.unwrap();
        }
        // Entry is removed entirely, not zeroed.
        assert!(rating::get(&state.store, recipe_id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_delete_is_idempotent_and_owner_only() {
        let state = AppState::fake();
        let recipe_id = Uuid::from_u128(10);
        let review = create(&state.store, recipe_id, &user(1), 4, "جيدة").await.unwrap();

        let err = delete(&state.store, review.id, user(2).id).await;
        assert!(matches!(err, Err(AppError::Permission(_))));

        delete(&state.store, review.id, review.user_id).await.unwrap();
        // Second delete of the same id is a no-op.
        delete(&state.store, review.id, user(2).id).await.unwrap();
    }

    #[tokio::test]
    async fn test_toggle_like_is_an_involution() {
        let state = AppState::fake();
        let recipe_id = Uuid::from_u128(10);
        let review = create(&state.store, recipe_id, &user(1), 5, "ممتازة").await.unwrap();
        let liker = user(2).id;

        let liked = toggle_like(&state.store, review.id, liker).await.unwrap();
        assert_eq!(liked.likes, 1);
        assert_eq!(liked.liked_by, vec![liker]);
        assert_eq!(liked.likes as usize, liked.liked_by.len());

        let unliked = toggle_like(&state.store, review.id, liker).await.unwrap();
        assert_eq!(unliked.likes, 0);
        assert!(unliked.liked_by.is_empty());

        // The aggregate never saw any of this.
        let agg = rating::get(&state.store, recipe_id).await.unwrap().unwrap();
        assert_eq!(agg.total_reviews, 1);
        assert_eq!(agg.average_rating, 5.0);

        let err = toggle_like(&state.store, Uuid::new_v4(), liker).await;
        assert!(matches!(err, Err(AppError::NotFound(_))));
    }

    #[test]
    fn test_sort_orders_are_stable() {
        let base = OffsetDateTime::UNIX_EPOCH;
        let mk = |n: u128, rating: u8, likes: u32, at: OffsetDateTime| Review {
            id: Uuid::from_u128(n),
            recipe_id: Uuid::from_u128(10),
            user_id: Uuid::from_u128(n),
            user_name: format!("مستخدم {n}"),
            user_avatar: None,
            rating,
            comment: "تعليق".into(),
            created_at: at,
            likes,
            liked_by: Vec::new(),
        };

        let reviews = vec![
            mk(1, 3, 2, base),
            mk(2, 5, 0, base + Duration::seconds(10)),
            mk(3, 5, 2, base + Duration::seconds(20)),
            mk(4, 1, 7, base + Duration::seconds(20)),
        ];

        let ids = |rs: &[Review]| rs.iter().map(|r| r.id.as_u128()).collect::<Vec<_>>();

        let mut newest = reviews.clone();
        sort(&mut newest, SortOrder::Newest);
        // 3 and 4 tie on created_at; insertion order is kept.
        assert_eq!(ids(&newest), vec![3, 4, 2, 1]);

        let mut oldest = reviews.clone();
        sort(&mut oldest, SortOrder::Oldest);
        assert_eq!(ids(&oldest), vec![1, 2, 3, 4]);

        let mut highest = reviews.clone();
        sort(&mut highest, SortOrder::Highest);
        assert_eq!(ids(&highest), vec![2, 3, 1, 4]);

        let mut lowest = reviews.clone();
        sort(&mut lowest, SortOrder::Lowest);
        assert_eq!(ids(&lowest), vec![4, 1, 2, 3]);

        let mut most_liked = reviews.clone();
        sort(&mut most_liked, SortOrder::MostLiked);
        assert_eq!(ids(&most_liked), vec![4, 1, 3, 2]);
    }
}
