use crate::flow::OrchestrationFlow;
use axum::Json;
use std::path::Path;

const PLOT_PATH: &str = "orchestration_flow.dot";

/// Export the flow stage graph as a Graphviz DOT file
#[utoipa::path(
    get,
    path = "/flow/plot",
    responses(
        (status = 200, description = "Plot written, confirmation message", body = String)
    ),
    tag = "flow"
)]
pub async fn plot() -> Json<serde_json::Value> {
    match OrchestrationFlow::plot(Path::new(PLOT_PATH)) {
        Ok(()) => Json(serde_json::json!({
            "message": format!("Flow plot written to {}", PLOT_PATH)
        })),
        Err(e) => {
            tracing::error!(error = %e, "failed to write flow plot");
            Json(serde_json::json!({
                "message": format!("Failed to write flow plot: {}", e)
            }))
        }
    }
}
