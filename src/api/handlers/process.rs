use crate::{
    AppState,
    flow::OrchestrationFlow,
    types::{MessageRequest, MessageResponse},
};
use axum::{Json, extract::State};
use std::time::Instant;

/// The reply returned when the flow itself fails. The endpoint contract is
/// always HTTP 200 with a usable message; internal errors are logged, never
/// surfaced.
pub const FALLBACK_RESPONSE: &str =
    "I'm sorry, something went wrong while processing your message. \
     Please try again in a moment.";

/// Process a customer message through the agent flow
#[utoipa::path(
    post,
    path = "/process",
    request_body = MessageRequest,
    responses(
        (status = 200, description = "Final reply, or a fallback message on internal failure", body = MessageResponse)
    ),
    tag = "process"
)]
pub async fn process(
    State(state): State<AppState>,
    Json(payload): Json<MessageRequest>,
) -> Json<MessageResponse> {
    let started = Instant::now();

    let client = match state.llm_factory.create_default().await {
        Ok(client) => client,
        Err(e) => {
            tracing::error!(error = %e, "failed to create LLM client");
            return Json(MessageResponse {
                response: FALLBACK_RESPONSE.to_string(),
                processing_time: started.elapsed().as_secs_f64(),
            });
        }
    };

    let flow = OrchestrationFlow::new(std::sync::Arc::from(client), state.tool_registry.clone());
    match flow.run(&payload.message, &payload.user_id, Vec::new()).await {
        Ok(run) => Json(MessageResponse {
            response: run.final_response,
            processing_time: run.processing_time,
        }),
        Err(e) => {
            tracing::error!(error = %e, user_id = %payload.user_id, "flow failed");
            Json(MessageResponse {
                response: FALLBACK_RESPONSE.to_string(),
                processing_time: started.elapsed().as_secs_f64(),
            })
        }
    }
}
