use axum::{
    routing::{get, post},
    Router,
};

use super::handlers;
use super::AppState;

/// `POST /webhook` delivers to the default target, `POST /webhook/:group`
/// to the group's target.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route("/webhook", post(handlers::receive_default))
        .route("/webhook/:group", post(handlers::receive_group))
        .with_state(state)
}
