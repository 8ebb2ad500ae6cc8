use crate::AppState;
use axum::{
    Router,
    routing::{get, post},
};

pub fn create_router() -> Router<AppState> {
    Router::new()
        .route("/", get(crate::api::handlers::health::welcome))
        .route("/process", post(crate::api::handlers::process::process))
        .route("/health", get(crate::api::handlers::health::health))
        .route("/flow/plot", get(crate::api::handlers::flow::plot))
}
