//! API route definitions

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::{handlers, state::AppState};

/// Create the application router
pub fn create_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(handlers::health))
        .route("/", get(handlers::index))
        .route("/score", post(handlers::score))
        .route("/model/info", get(handlers::model_info))
        .route("/demo", get(handlers::demo))
        .with_state(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
