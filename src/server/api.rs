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

use super::{error::ServerError, handlers, state::AppState};

async fn handle_404() -> ServerError {
    ServerError::NotFound("Not found. Use GET / for status or POST /predict.".to_string())
}

async fn handle_405() -> ServerError {
    ServerError::MethodNotAllowed(
        "Method not allowed. GET / and POST /predict are supported.".to_string(),
    )
}

/// Create the main application router
pub fn create_router(state: Arc<AppState>) -> Router {
    // Wide-open CORS so a separately hosted frontend can call the API
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(handlers::root))
        .route("/predict", post(handlers::predict))
        .fallback(handle_404)
        .method_not_allowed_fallback(handle_405)
        .with_state(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
