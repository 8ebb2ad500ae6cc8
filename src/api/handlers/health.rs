use crate::types::HealthResponse;
use axum::Json;

/// Service health check
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse)
    ),
    tag = "health"
)]
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        framework: env!("CARGO_PKG_NAME").to_string(),
    })
}

/// Welcome message at the root
#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "Welcome message", body = String)
    ),
    tag = "health"
)]
pub async fn welcome() -> &'static str {
    "NovaPay Concierge is running. POST /process to talk to the assistant."
}
