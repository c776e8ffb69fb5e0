use async_trait::async_trait;
use axum::{extract::FromRequestParts, http::request::Parts};

use super::provider::User;
use crate::{error::AppError, state::AppState, storage::keys};

/// Loads the session user from the store, rejecting when nobody is logged in.
pub struct CurrentUser(pub User);

#[async_trait]
impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(
        _parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user: Option<User> = state.store.get(keys::CURRENT_USER).await?;
        user.map(CurrentUser).ok_or(AppError::AuthRequired)
    }
}
