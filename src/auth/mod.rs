pub mod extractors;
pub mod handlers;
pub mod provider;

use crate::state::AppState;
use axum::Router;

pub fn router() -> Router<AppState> {
    handlers::routes()
}
