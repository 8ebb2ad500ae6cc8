//! General agent: greetings, refusals, and the final customer-facing voice.

use crate::agents::{Agent, GUARDRAIL_INSTRUCTIONS, degraded_reply};
use crate::llm::LLMClient;
use crate::types::{AgentId, Message, Result};
use async_trait::async_trait;
use std::sync::Arc;

pub struct GeneralAgent {
    client: Arc<dyn LLMClient>,
}

pub fn build_general_prompt(task: &str) -> String {
    format!(
        "You are the general assistant for NovaPay, a payments company. You \
         handle greetings, small talk, polite refusals, and anything outside \
         the specialist teams' scope. You carry no tools.\n\n\
         Task: {task}\n\n\
         Instructions:\n\
         - Be warm, brief, and helpful.\n\
         - For out-of-scope requests, say what you can help with instead.\n\n\
         {GUARDRAIL_INSTRUCTIONS}"
    )
}

/// System prompt for the synthesis pass: turn raw step output into one
/// customer-ready reply.
pub fn build_synthesis_system_prompt() -> String {
    format!(
        "You are the voice of NovaPay customer support. Rewrite the draft \
         material into one final reply to the customer.\n\n\
         Instructions:\n\
         - Answer in the customer's language.\n\
         - One coherent reply; do not mention teams, steps, or tools.\n\
         - Keep the facts exactly as given; do not invent new ones.\n\n\
         {GUARDRAIL_INSTRUCTIONS}"
    )
}

impl GeneralAgent {
    pub fn new(client: Arc<dyn LLMClient>) -> Self {
        Self { client }
    }

    /// Synthesis pass over the merged step results. The conversation so far
    /// is replayed as chat turns so the final reply stays consistent with
    /// what was already said.
    pub async fn synthesize(
        &self,
        message: &str,
        history: &[Message],
        material: &str,
    ) -> Result<String> {
        let mut turns: Vec<(String, String)> = Vec::with_capacity(history.len() + 2);
        turns.push(("system".to_string(), build_synthesis_system_prompt()));
        for entry in history {
            turns.push((entry.role.as_str().to_string(), entry.content.clone()));
        }
        turns.push((
            "user".to_string(),
            format!(
                "Customer message: {message}\n\nDraft material:\n{material}\n\nFinal reply:"
            ),
        ));
        self.client.generate_with_history(&turns).await
    }
}

#[async_trait]
impl Agent for GeneralAgent {
    async fn execute(&self, task: &str) -> String {
        match self.client.generate(&build_general_prompt(task)).await {
            Ok(text) => text,
            Err(e) => {
                tracing::error!(error = %e, "general agent failed");
                degraded_reply()
            }
        }
    }

    fn id(&self) -> AgentId {
        AgentId::General
    }
}
