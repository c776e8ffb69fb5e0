use uuid::Uuid;

use super::model::Recipe;
use super::seed;
use crate::storage::{keys, Store};

pub async fn list(store: &Store) -> anyhow::Result<Vec<Recipe>> {
    store.get_or_default(keys::RECIPES).await
}

pub async fn find(store: &Store, id: Uuid) -> anyhow::Result<Option<Recipe>> {
    let recipes = list(store).await?;
    Ok(recipes.into_iter().find(|r| r.id == id))
}

/// Populates the catalog on first startup. Returns how many recipes were
/// seeded (0 when the catalog already has entries).
pub async fn seed_if_empty(store: &Store) -> anyhow::Result<usize> {
    let _guard = store.begin_mutation().await;
    let existing: Vec<Recipe> = store.get_or_default(keys::RECIPES).await?;
    if !existing.is_empty() {
        return Ok(0);
    }

    let recipes = seed::sample_recipes();
    store.put(keys::RECIPES, &recipes).await?;
    Ok(recipes.len())
}
