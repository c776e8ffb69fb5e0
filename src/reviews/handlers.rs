use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{delete, get, post},
    Json, Router,
};
use tracing::{info, instrument};
use uuid::Uuid;

use super::{
    dto::{CreateReviewRequest, ReviewListQuery},
    rating::{self, RecipeRating},
    repo::{self, Review},
};
use crate::{auth::extractors::CurrentUser, catalog, error::AppError, state::AppState};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route(
            "/recipes/:id/reviews",
            get(list_reviews).post(create_review),
        )
        .route("/recipes/:id/rating", get(get_rating))
        .route("/reviews/:id", delete(delete_review))
        .route("/reviews/:id/like", post(like_review))
}

#[instrument(skip(state))]
pub async fn list_reviews(
    State(state): State<AppState>,
    Path(recipe_id): Path<Uuid>,
    Query(query): Query<ReviewListQuery>,
) -> Result<Json<Vec<Review>>, AppError> {
    let reviews = repo::list_for_recipe(&state.store, recipe_id, query.sort).await?;
    Ok(Json(reviews))
}

#[instrument(skip(state))]
pub async fn get_rating(
    State(state): State<AppState>,
    Path(recipe_id): Path<Uuid>,
) -> Result<Json<RecipeRating>, AppError> {
    // Absent entry and zero reviews are the same display case.
    let rating = rating::get(&state.store, recipe_id)
        .await?
        .unwrap_or_else(|| RecipeRating::zero(recipe_id));
    Ok(Json(rating))
}

#[instrument(skip(state, user, body))]
pub async fn create_review(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(recipe_id): Path<Uuid>,
    Json(body): Json<CreateReviewRequest>,
) -> Result<(StatusCode, Json<Review>), AppError> {
    if catalog::repo::find(&state.store, recipe_id).await?.is_none() {
        return Err(AppError::not_found("recipe not found"));
    }

    let review = repo::create(&state.store, recipe_id, &user, body.rating, &body.comment).await?;
    info!(review_id = %review.id, %recipe_id, "review created");
    Ok((StatusCode::CREATED, Json(review)))
}

#[instrument(skip(state, user))]
pub async fn delete_review(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(review_id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    repo::delete(&state.store, review_id, user.id).await?;
    info!(%review_id, "review deleted");
    Ok(StatusCode::NO_CONTENT)
}

#[instrument(skip(state, user))]
pub async fn like_review(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(review_id): Path<Uuid>,
) -> Result<Json<Review>, AppError> {
    let review = repo::toggle_like(&state.store, review_id, user.id).await?;
    Ok(Json(review))
}
