use axum::{
    extract::{DefaultBodyLimit, Path, State},
    http::StatusCode,
    routing::{delete, get, post},
    Json, Router,
};
use tracing::{info, instrument};
use uuid::Uuid;

use super::{
    dto::UploadPhotoRequest,
    repo::{self, UserRecipePhoto},
    services,
};
use crate::{auth::extractors::CurrentUser, catalog, error::AppError, state::AppState};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route(
            "/recipes/:id/photos",
            get(list_photos).post(upload_photo),
        )
        .route("/photos/:id/like", post(like_photo))
        .route("/photos/:id", delete(delete_photo))
        // A 5 MiB image grows by ~4/3 as base64 plus JSON framing.
        .layer(DefaultBodyLimit::max(8 * 1024 * 1024))
}

#[instrument(skip(state))]
pub async fn list_photos(
    State(state): State<AppState>,
    Path(recipe_id): Path<Uuid>,
) -> Result<Json<Vec<UserRecipePhoto>>, AppError> {
    let photos = repo::list_by_recipe(&state.store, recipe_id).await?;
    Ok(Json(photos))
}

#[instrument(skip(state, user, body))]
pub async fn upload_photo(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(recipe_id): Path<Uuid>,
    Json(body): Json<UploadPhotoRequest>,
) -> Result<(StatusCode, Json<UserRecipePhoto>), AppError> {
    if catalog::repo::find(&state.store, recipe_id).await?.is_none() {
        return Err(AppError::not_found("recipe not found"));
    }

    let data_url = services::ingest_image(&body.content_type, &body.image_b64)?;
    let photo = repo::upload(&state.store, recipe_id, &user, data_url, body.caption).await?;
    info!(photo_id = %photo.id, %recipe_id, "photo uploaded");
    Ok((StatusCode::CREATED, Json(photo)))
}

#[instrument(skip(state, user))]
pub async fn like_photo(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(photo_id): Path<Uuid>,
) -> Result<Json<UserRecipePhoto>, AppError> {
    let photo = repo::toggle_like(&state.store, photo_id, user.id).await?;
    Ok(Json(photo))
}

#[instrument(skip(state, user))]
pub async fn delete_photo(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(photo_id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    repo::delete(&state.store, photo_id, user.id).await?;
    info!(%photo_id, "photo deleted");
    Ok(StatusCode::NO_CONTENT)
}
