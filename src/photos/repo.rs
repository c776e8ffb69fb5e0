use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::auth::provider::User;
use crate::error::AppError;
use crate::storage::{keys, Store};

pub const MAX_CAPTION_CHARS: usize = 300;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecipePhoto {
    pub id: Uuid,
    pub recipe_id: Uuid,
    pub user_id: Uuid,
    pub user_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_avatar: Option<String>,
    pub photo_data_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
    #[serde(with = "time::serde::timestamp")]
    pub created_at: OffsetDateTime,
    pub likes: u32,
    pub liked_by: Vec<Uuid>,
}

/// `photo_data_url` must already be validated (see `services::ingest_image`).
pub async fn upload(
    store: &Store,
    recipe_id: Uuid,
    user: &User,
    photo_data_url: String,
    caption: Option<String>,
) -> Result<UserRecipePhoto, AppError> {
    let caption = caption
        .map(|c| c.trim().to_string())
        .filter(|c| !c.is_empty());
    if let Some(caption) = &caption {
        if caption.chars().count() > MAX_CAPTION_CHARS {
            return Err(AppError::validation(
                "caption must be at most 300 characters",
            ));
        }
    }

    let photo = UserRecipePhoto {
        id: Uuid::new_v4(),
        recipe_id,
        user_id: user.id,
        user_name: user.name.clone(),
        user_avatar: Some(user.avatar.clone()).filter(|a| !a.is_empty()),
        photo_data_url,
        caption,
        created_at: OffsetDateTime::now_utc(),
        likes: 0,
        liked_by: Vec::new(),
    };

    let _guard = store.begin_mutation().await;
    let mut photos: Vec<UserRecipePhoto> = store.get_or_default(keys::PHOTOS).await?;
    photos.push(photo.clone());
    store.put(keys::PHOTOS, &photos).await?;
    Ok(photo)
}

pub async fn toggle_like(
    store: &Store,
    photo_id: Uuid,
    user_id: Uuid,
) -> Result<UserRecipePhoto, AppError> {
    let _guard = store.begin_mutation().await;
    let mut photos: Vec<UserRecipePhoto> = store.get_or_default(keys::PHOTOS).await?;
    let photo = photos
        .iter_mut()
        .find(|p| p.id == photo_id)
        .ok_or_else(|| AppError::not_found("photo not found"))?;

    if let Some(pos) = photo.liked_by.iter().position(|id| *id == user_id) {
        photo.liked_by.remove(pos);
        photo.likes -= 1;
    } else {
        photo.liked_by.push(user_id);
        photo.likes += 1;
    }
    let updated = photo.clone();

    store.put(keys::PHOTOS, &photos).await?;
    Ok(updated)
}

/// Owner-only; deleting an already-gone photo is a no-op.
pub async fn delete(store: &Store, photo_id: Uuid, requester: Uuid) -> Result<(), AppError> {
    let _guard = store.begin_mutation().await;
    let mut photos: Vec<UserRecipePhoto> = store.get_or_default(keys::PHOTOS).await?;
    let Some(pos) = photos.iter().position(|p| p.id == photo_id) else {
        return Ok(());
    };
    if photos[pos].user_id != requester {
        return Err(AppError::permission("only the photo owner can delete it"));
    }

    photos.remove(pos);
    store.put(keys::PHOTOS, &photos).await?;
    Ok(())
}

pub async fn find(store: &Store, photo_id: Uuid) -> anyhow::Result<Option<UserRecipePhoto>> {
    let photos: Vec<UserRecipePhoto> = store.get_or_default(keys::PHOTOS).await?;
    Ok(photos.into_iter().find(|p| p.id == photo_id))
}

/// Newest first.
pub async fn list_by_recipe(
    store: &Store,
    recipe_id: Uuid,
) -> anyhow::Result<Vec<UserRecipePhoto>> {
    let all: Vec<UserRecipePhoto> = store.get_or_default(keys::PHOTOS).await?;
    let mut photos: Vec<UserRecipePhoto> =
        all.into_iter().filter(|p| p.recipe_id == recipe_id).collect();
    photos.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    Ok(photos)
}
