use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get, post},
    Json, Router,
};
use tracing::{info, instrument};
use uuid::Uuid;

use super::{
    dto::{CreateCommentRequest, ReactionResponse, ToggleReactionRequest},
    reactions,
    repo::{self, PhotoComment},
};
use crate::{auth::extractors::CurrentUser, error::AppError, photos, state::AppState};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route(
            "/photos/:id/comments",
            get(list_comments).post(create_comment),
        )
        .route("/comments/:id", delete(delete_comment))
        .route("/comments/:id/reactions", post(toggle_reaction))
}

#[instrument(skip(state))]
pub async fn list_comments(
    State(state): State<AppState>,
    Path(photo_id): Path<Uuid>,
) -> Result<Json<Vec<PhotoComment>>, AppError> {
    let comments = repo::list_by_photo(&state.store, photo_id).await?;
    Ok(Json(comments))
}

#[instrument(skip(state, user, body))]
pub async fn create_comment(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(photo_id): Path<Uuid>,
    Json(body): Json<CreateCommentRequest>,
) -> Result<(StatusCode, Json<PhotoComment>), AppError> {
    if photos::repo::find(&state.store, photo_id).await?.is_none() {
        return Err(AppError::not_found("photo not found"));
    }

    let comment = repo::create(&state.store, photo_id, &user, &body.comment).await?;
    info!(comment_id = %comment.id, %photo_id, "comment created");
    Ok((StatusCode::CREATED, Json(comment)))
}

#[instrument(skip(state, user))]
pub async fn delete_comment(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(comment_id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    repo::delete(&state.store, comment_id, user.id).await?;
    info!(%comment_id, "comment deleted");
    Ok(StatusCode::NO_CONTENT)
}

#[instrument(skip(state, user, body))]
pub async fn toggle_reaction(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(comment_id): Path<Uuid>,
    Json(body): Json<ToggleReactionRequest>,
) -> Result<Json<ReactionResponse>, AppError> {
    let comment = repo::toggle_reaction(&state.store, comment_id, &body.emoji, user.id).await?;
    let reacted = reactions::has_reacted(&comment.reactions, user.id, Some(body.emoji.trim()));
    let total_reactions = reactions::count(&comment.reactions, None);
    Ok(Json(ReactionResponse {
        comment,
        reacted,
        total_reactions,
    }))
}
