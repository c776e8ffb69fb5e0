use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use tracing::instrument;
use uuid::Uuid;

use super::{dto::CatalogQuery, filter, model::Recipe, repo};
use crate::{error::AppError, state::AppState};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/recipes", get(list_recipes))
        .route("/recipes/:id", get(get_recipe))
}

#[instrument(skip(state))]
pub async fn list_recipes(
    State(state): State<AppState>,
    Query(query): Query<CatalogQuery>,
) -> Result<Json<Vec<Recipe>>, AppError> {
    let filters = query.into_filters()?;
    let recipes = repo::list(&state.store).await?;
    Ok(Json(filter::apply(&recipes, &filters)))
}

#[instrument(skip(state))]
pub async fn get_recipe(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Recipe>, AppError> {
    let recipe = repo::find(&state.store, id)
        .await?
        .ok_or_else(|| AppError::not_found("recipe not found"))?;
    Ok(Json(recipe))
}
