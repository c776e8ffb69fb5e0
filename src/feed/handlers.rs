use axum::{extract::State, routing::get, Json, Router};
use tracing::instrument;

use super::composer::{self, Activity};
use crate::{error::AppError, state::AppState, storage::keys};

pub fn routes() -> Router<AppState> {
    Router::new().route("/feed", get(get_feed))
}

#[instrument(skip(state))]
pub async fn get_feed(State(state): State<AppState>) -> Result<Json<Vec<Activity>>, AppError> {
    let reviews: Vec<crate::reviews::repo::Review> =
        state.store.get_or_default(keys::REVIEWS).await?;
    let photos: Vec<crate::photos::repo::UserRecipePhoto> =
        state.store.get_or_default(keys::PHOTOS).await?;
    let recipes: Vec<crate::catalog::model::Recipe> =
        state.store.get_or_default(keys::RECIPES).await?;
    Ok(Json(composer::compose(&reviews, &photos, &recipes)))
}
