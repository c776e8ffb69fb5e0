use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use super::reactions::{self, ReactionMap};
use crate::auth::provider::User;
use crate::error::AppError;
use crate::storage::{keys, Store};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhotoComment {
    pub id: Uuid,
    pub photo_id: Uuid,
    pub user_id: Uuid,
    pub user_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_avatar: Option<String>,
    pub comment: String,
    #[serde(with = "time::serde::timestamp")]
    pub created_at: OffsetDateTime,
    #[serde(default)]
    pub reactions: ReactionMap,
}

pub async fn create(
    store: &Store,
    photo_id: Uuid,
    user: &User,
    text: &str,
) -> Result<PhotoComment, AppError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(AppError::validation("comment must not be empty"));
    }

    let comment = PhotoComment {
        id: Uuid::new_v4(),
        photo_id,
        user_id: user.id,
        user_name: user.name.clone(),
        user_avatar: Some(user.avatar.clone()).filter(|a| !a.is_empty()),
        comment: text.to_string(),
        created_at: OffsetDateTime::now_utc(),
        reactions: ReactionMap::new(),
    };

    let _guard = store.begin_mutation().await;
    let mut comments: Vec<PhotoComment> = store.get_or_default(keys::PHOTO_COMMENTS).await?;
    comments.push(comment.clone());
    store.put(keys::PHOTO_COMMENTS, &comments).await?;
    Ok(comment)
}

/// Owner-only; deleting an already-gone comment is a no-op.
pub async fn delete(store: &Store, comment_id: Uuid, requester: Uuid) -> Result<(), AppError> {
    let _guard = store.begin_mutation().await;
    let mut comments: Vec<PhotoComment> = store.get_or_default(keys::PHOTO_COMMENTS).await?;
    let Some(pos) = comments.iter().position(|c| c.id == comment_id) else {
        return Ok(());
    };
    if comments[pos].user_id != requester {
        return Err(AppError::permission("only the comment owner can delete it"));
    }

    comments.remove(pos);
    store.put(keys::PHOTO_COMMENTS, &comments).await?;
    Ok(())
}

/// Oldest first, the order a comment thread reads in.
pub async fn list_by_photo(store: &Store, photo_id: Uuid) -> anyhow::Result<Vec<PhotoComment>> {
    let all: Vec<PhotoComment> = store.get_or_default(keys::PHOTO_COMMENTS).await?;
    let mut comments: Vec<PhotoComment> =
        all.into_iter().filter(|c| c.photo_id == photo_id).collect();
    comments.sort_by(|a, b| a.created_at.cmp(&b.created_at));
    Ok(comments)
}

pub async fn toggle_reaction(
    store: &Store,
    comment_id: Uuid,
    emoji: &str,
    user_id: Uuid,
) -> Result<PhotoComment, AppError> {
    let emoji = emoji.trim();
    if emoji.is_empty() {
        return Err(AppError::validation("emoji must not be empty"));
    }

    let _guard = store.begin_mutation().await;
    let mut comments: Vec<PhotoComment> = store.get_or_default(keys::PHOTO_COMMENTS).await?;
    let comment = comments
        .iter_mut()
        .find(|c| c.id == comment_id)
        .ok_or_else(|| AppError::not_found("comment not found"))?;

    reactions::toggle(&mut comment.reactions, emoji, user_id);
    let updated = comment.clone();

    store.put(keys::PHOTO_COMMENTS, &comments).await?;
    Ok(updated)
}

#[cfg(test)]
mod repo_tests {
    use super::*;
    use crate::state::AppState;

    fn user(n: u128) -> User {
        User {
            id: Uuid::from_u128(n),
            email: format!("u{n}@example.com"),
            name: format!("مستخدم {n}"),
            avatar: String::new(),
            bio: None,
            created_at: OffsetDateTime::UNIX_EPOCH,
        }
    }

    #[tokio::test]
    async fn test_create_validates_and_lists_oldest_first() {
        let state = AppState::fake();
        let photo_id = Uuid::from_u128(20);

        let err = create(&state.store, photo_id, &user(1), "   ").await;
        assert!(matches!(err, Err(AppError::Validation(_))));

        let first = create(&state.store, photo_id, &user(1), " شكل رائع ").await.unwrap();
        assert_eq!(first.comment, "شكل رائع");
        let second = create(&state.store, photo_id, &user(2), "تجربة موفقة").await.unwrap();
        create(&state.store, Uuid::from_u128(21), &user(1), "صورة أخرى")
            .await
            .unwrap();

        let comments = list_by_photo(&state.store, photo_id).await.unwrap();
        assert_eq!(comments.len(), 2);
        assert_eq!(comments[0].id, first.id);
        assert_eq!(comments[1].id, second.id);
    }

    #[tokio::test]
    async fn test_delete_is_owner_only_and_idempotent() {
        let state = AppState::fake();
        let comment = create(&state.store, Uuid::from_u128(20), &user(1), "تعليق")
            .await
            .unwrap();

        let err = delete(&state.store, comment.id, user(2).id).await;
        assert!(matches!(err, Err(AppError::Permission(_))));

        delete(&state.store, comment.id, comment.user_id).await.unwrap();
        delete(&state.store, comment.id, user(2).id).await.unwrap();
    }

    #[tokio::test]
    async fn test_toggle_reaction_roundtrip_persists() {
        let state = AppState::fake();
        let comment = create(&state.store, Uuid::from_u128(20), &user(1), "تعليق")
            .await
            .unwrap();
        let reactor = user(2).id;

        let updated = toggle_reaction(&state.store, comment.id, "❤️", reactor)
            .await
            .unwrap();
        assert_eq!(updated.reactions["❤️"], vec![reactor]);

        let updated = toggle_reaction(&state.store, comment.id, "❤️", reactor)
            .await
            .unwrap();
        assert!(updated.reactions.is_empty());

        let stored = list_by_photo(&state.store, comment.photo_id).await.unwrap();
        assert!(stored[0].reactions.is_empty());

        let err = toggle_reaction(&state.store, comment.id, "  ", reactor).await;
        assert!(matches!(err, Err(AppError::Validation(_))));
        let err = toggle_reaction(&state.store, Uuid::new_v4(), "❤️", reactor).await;
        assert!(matches!(err, Err(AppError::NotFound(_))));
    }
}
