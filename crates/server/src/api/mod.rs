mod schedule;
mod tours;

use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

pub async fn health() -> &'static str {
    "ok"
}

pub fn router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health))
        .route("/tours/schedule", post(schedule::schedule))
        .route("/tours", get(tours::list).post(tours::save))
        .route("/tours/{id}", get(tours::get).delete(tours::delete))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
