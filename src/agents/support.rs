//! Support agent: account diagnostics.

use crate::agents::{Agent, GUARDRAIL_INSTRUCTIONS, catalog, degraded_reply};
use crate::llm::{LLMClient, ToolCoordinator};
use crate::tools::ToolRegistry;
use crate::types::AgentId;
use async_trait::async_trait;
use std::sync::Arc;

pub struct SupportAgent {
    coordinator: ToolCoordinator,
    registry: Arc<ToolRegistry>,
}

pub fn build_support_prompt(task: &str) -> String {
    format!(
        "You are the customer support specialist for NovaPay, a payments \
         company. You diagnose account problems using the available tools.\n\n\
         Task: {task}\n\n\
         Instructions:\n\
         - Check the relevant data before answering: user_info for profile, \
           account_status for restrictions, transaction_history for recent \
           activity.\n\
         - Open a ticket with create_ticket when the issue needs follow-up \
           you cannot complete now, and tell the customer the ticket id.\n\
         - Be concrete about what you found and what happens next.\n\n\
         {GUARDRAIL_INSTRUCTIONS}"
    )
}

impl SupportAgent {
    pub fn new(client: Arc<dyn LLMClient>, registry: Arc<ToolRegistry>) -> Self {
        Self {
            coordinator: ToolCoordinator::with_defaults(client, registry.clone()),
            registry,
        }
    }
}

#[async_trait]
impl Agent for SupportAgent {
    async fn execute(&self, task: &str) -> String {
        let tools = self
            .registry
            .get_filtered_tool_definitions(catalog::agent_profile(AgentId::Support).tools);
        let prompt = build_support_prompt(task);

        match self.coordinator.run(&prompt, &tools).await {
            Ok(result) => result.content,
            Err(e) => {
                tracing::error!(error = %e, "support agent failed");
                degraded_reply()
            }
        }
    }

    fn id(&self) -> AgentId {
        AgentId::Support
    }
}
