//! Escalation agent: hand-off to a human with a Slack notification.

use crate::agents::{Agent, GUARDRAIL_INSTRUCTIONS, catalog, degraded_reply};
use crate::llm::{LLMClient, ToolCoordinator};
use crate::tools::ToolRegistry;
use crate::types::AgentId;
use async_trait::async_trait;
use std::sync::Arc;

pub struct EscalationAgent {
    coordinator: ToolCoordinator,
    registry: Arc<ToolRegistry>,
}

pub fn build_escalation_prompt(task: &str) -> String {
    format!(
        "You are the escalation specialist for NovaPay customer support. You \
         hand unresolved or sensitive cases to the human team.\n\n\
         Task: {task}\n\n\
         Instructions:\n\
         - Assess a priority for the case: low, medium, or high. High is for \
           blocked money movement or suspected fraud.\n\
         - Notify the human team with slack_notify, including the priority \
           and a one-paragraph case summary.\n\
         - Tell the customer a human will take over, and roughly when to \
           expect contact.\n\n\
         {GUARDRAIL_INSTRUCTIONS}"
    )
}

impl EscalationAgent {
    pub fn new(client: Arc<dyn LLMClient>, registry: Arc<ToolRegistry>) -> Self {
        Self {
            coordinator: ToolCoordinator::with_defaults(client, registry.clone()),
            registry,
        }
    }
}

#[async_trait]
impl Agent for EscalationAgent {
    async fn execute(&self, task: &str) -> String {
        let tools = self
            .registry
            .get_filtered_tool_definitions(catalog::agent_profile(AgentId::Escalation).tools);
        let prompt = build_escalation_prompt(task);

        match self.coordinator.run(&prompt, &tools).await {
            Ok(result) => result.content,
            Err(e) => {
                tracing::error!(error = %e, "escalation agent failed");
                degraded_reply()
            }
        }
    }

    fn id(&self) -> AgentId {
        AgentId::Escalation
    }
}
