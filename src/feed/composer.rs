use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::catalog::model::Recipe;
use crate::photos::repo::UserRecipePhoto;
use crate::reviews::repo::Review;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityKind {
    Review,
    Photo,
}

/// One entry of the community feed. Derived and ephemeral: recomputed from
/// reviews, photos and the catalog on every request, never stored.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    pub id: Uuid,
    #[serde(rename = "type")]
    pub kind: ActivityKind,
    pub user_id: Uuid,
    pub user_name: String,
    pub user_avatar: String,
    pub recipe_id: Uuid,
    pub recipe_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
    #[serde(with = "time::serde::timestamp")]
    pub created_at: OffsetDateTime,
}

/// Pure merge of reviews and photos into one newest-first stream. Items whose
/// recipe no longer resolves are dropped so the feed never shows dangling
/// references.
pub fn compose(
    reviews: &[Review],
    photos: &[UserRecipePhoto],
    recipes: &[Recipe],
) -> Vec<Activity> {
    let by_id: HashMap<Uuid, &Recipe> = recipes.iter().map(|r| (r.id, r)).collect();
    let mut activities = Vec::with_capacity(reviews.len() + photos.len());

    for review in reviews {
        let Some(recipe) = by_id.get(&review.recipe_id) else {
            continue;
        };
        activities.push(Activity {
            id: review.id,
            kind: ActivityKind::Review,
            user_id: review.user_id,
            user_name: review.user_name.clone(),
            user_avatar: review.user_avatar.clone().unwrap_or_default(),
            recipe_id: review.recipe_id,
            recipe_name: recipe.name.clone(),
            content: Some(review.comment.clone()),
            rating: Some(review.rating),
            photo_url: None,
            created_at: review.created_at,
        });
    }

    for photo in photos {
        let Some(recipe) = by_id.get(&photo.recipe_id) else {
            continue;
        };
        activities.push(Activity {
            id: photo.id,
            kind: ActivityKind::Photo,
            user_id: photo.user_id,
            user_name: photo.user_name.clone(),
            user_avatar: photo.user_avatar.clone().unwrap_or_default(),
            recipe_id: photo.recipe_id,
            recipe_name: recipe.name.clone(),
            content: photo.caption.clone(),
            rating: None,
            photo_url: Some(photo.photo_data_url.clone()),
            created_at: photo.created_at,
        });
    }

    activities.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    activities
}
