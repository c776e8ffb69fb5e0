use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use tracing::{info, instrument};

use super::{extractors::CurrentUser, provider::User};
use crate::{error::AppError, state::AppState, storage::keys};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/auth/login", post(login))
        .route("/auth/logout", post(logout))
        .route("/me", get(get_me))
}

#[instrument(skip(state))]
pub async fn login(State(state): State<AppState>) -> Result<Json<User>, AppError> {
    let user = state.identity.login().await?;
    state.store.put(keys::CURRENT_USER, &user).await?;
    info!(user_id = %user.id, "user logged in");
    Ok(Json(user))
}

#[instrument(skip(state))]
pub async fn logout(State(state): State<AppState>) -> Result<StatusCode, AppError> {
    state.store.remove(keys::CURRENT_USER).await?;
    info!("session cleared");
    Ok(StatusCode::NO_CONTENT)
}

#[instrument(skip_all)]
pub async fn get_me(CurrentUser(user): CurrentUser) -> Json<User> {
    Json(user)
}

#[cfg(test)]
mod session_tests {
    use super::*;
    use crate::state::AppState;

    #[tokio::test]
    async fn test_login_stores_session_and_logout_clears_it() {
        let state = AppState::fake();

        let Json(user) = login(State(state.clone())).await.unwrap();
        let stored: Option<User> = state.store.get(keys::CURRENT_USER).await.unwrap();
        assert_eq!(stored.unwrap().id, user.id);

        // Logout is idempotent.
        assert_eq!(
            logout(State(state.clone())).await.unwrap(),
            StatusCode::NO_CONTENT
        );
        assert_eq!(
            logout(State(state.clone())).await.unwrap(),
            StatusCode::NO_CONTENT
        );
        let stored: Option<User> = state.store.get(keys::CURRENT_USER).await.unwrap();
        assert!(stored.is_none());
    }

    #[tokio::test]
    async fn test_fixed_provider_is_deterministic() {
        let state = AppState::fake();
        let Json(first) = login(State(state.clone())).await.unwrap();
        let Json(second) = login(State(state)).await.unwrap();
        assert_eq!(first.id, second.id);
        assert_eq!(first.email, second.email);
    }
}
