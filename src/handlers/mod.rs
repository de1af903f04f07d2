pub mod health;
pub mod interpret;

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health::health))
        .route("/api/interpret", post(interpret::interpret_result))
        .route("/api/query", post(interpret::query))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
