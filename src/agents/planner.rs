//! Planner: the manager agent that turns a customer message into an ordered
//! list of delegations.
//!
//! Unlike the specialized agents, planner failures propagate: a run cannot
//! proceed without a plan, and the API boundary owns the fallback.

use crate::agents::catalog::render_catalog;
use crate::llm::LLMClient;
use crate::types::{AppError, Message, PlannedStep, PlannedSteps, Result};
use std::sync::Arc;

pub struct PlannerAgent {
    client: Arc<dyn LLMClient>,
}

/// Prompt template; pure so tests can assert the rendered contract.
pub fn build_planner_prompt(message: &str, history: &str) -> String {
    format!(
        "You are the planning manager for NovaPay customer support. Decide \
         which specialist teams handle this message and in what order.\n\n\
         ## Teams\n\n{catalog}\
         ## Rules\n\
         - Each team has a cost: use as few steps as possible, and only the \
           teams the message actually needs.\n\
         - A simple greeting or small talk needs exactly one GENERAL step.\n\
         - Phrase each task as a self-contained instruction to that team.\n\n\
         ## Conversation so far\n{history}\n\n\
         ## Customer message\n{message}\n\n\
         Respond with only valid JSON in this schema:\n\
         {{\"steps\": [{{\"agent\": \"KNOWLEDGE\", \"agent_task\": \"...\"}}]}}",
        catalog = render_catalog(),
    )
}

/// Parse the planner's JSON output, tolerating markdown code fences.
pub fn parse_plan(raw: &str) -> Result<Vec<PlannedStep>> {
    let trimmed = strip_code_fences(raw);

    if let Ok(plan) = serde_json::from_str::<PlannedSteps>(trimmed) {
        return Ok(plan.steps);
    }
    // Some models emit the bare array instead of the wrapping object.
    serde_json::from_str::<Vec<PlannedStep>>(trimmed)
        .map_err(|e| AppError::Llm(format!("Failed to parse plan: {}", e)))
}

fn strip_code_fences(raw: &str) -> &str {
    let trimmed = raw.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    // Drop an optional language tag on the fence line.
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    rest.trim_start_matches(['\r', '\n'])
        .strip_suffix("```")
        .unwrap_or(rest)
        .trim()
}

impl PlannerAgent {
    pub fn new(client: Arc<dyn LLMClient>) -> Self {
        Self { client }
    }

    /// Produce the ordered delegation plan for one customer message.
    pub async fn plan(&self, message: &str, history: &[Message]) -> Result<Vec<PlannedStep>> {
        let rendered_history = if history.is_empty() {
            "(none)".to_string()
        } else {
            history
                .iter()
                .map(|m| format!("{:?}: {}", m.role, m.content))
                .collect::<Vec<_>>()
                .join("\n")
        };

        let prompt = build_planner_prompt(message, &rendered_history);
        let response = self.client.generate(&prompt).await?;
        let steps = parse_plan(&response)?;

        tracing::debug!(steps = steps.len(), "plan produced");
        Ok(steps)
    }
}
