//! Knowledge agent: product and fee questions.

use crate::agents::{Agent, GUARDRAIL_INSTRUCTIONS, catalog, degraded_reply};
use crate::llm::{LLMClient, ToolCoordinator};
use crate::tools::ToolRegistry;
use crate::types::AgentId;
use async_trait::async_trait;
use std::sync::Arc;

pub struct KnowledgeAgent {
    coordinator: ToolCoordinator,
    registry: Arc<ToolRegistry>,
}

/// Prompt template. Pure so tests can assert on the rendered contract.
pub fn build_knowledge_prompt(task: &str) -> String {
    format!(
        "You are the knowledge specialist for NovaPay, a payments company \
         (card readers, instant transfers, digital accounts, payment links).\n\n\
         Task: {task}\n\n\
         Instructions:\n\
         - Prefer the knowledge_search tool; use web_search only when the \
           knowledge base has nothing.\n\
         - Cite where each fact came from: \"NovaPay knowledge base\" for \
           internal documentation, the URL for web results.\n\
         - End with a confidence estimate: high, medium, or low.\n\
         - If you cannot find an answer, say so plainly.\n\n\
         {GUARDRAIL_INSTRUCTIONS}"
    )
}

impl KnowledgeAgent {
    pub fn new(client: Arc<dyn LLMClient>, registry: Arc<ToolRegistry>) -> Self {
        Self {
            coordinator: ToolCoordinator::with_defaults(client, registry.clone()),
            registry,
        }
    }
}

#[async_trait]
impl Agent for KnowledgeAgent {
    async fn execute(&self, task: &str) -> String {
        let tools = self
            .registry
            .get_filtered_tool_definitions(catalog::agent_profile(AgentId::Knowledge).tools);
        let prompt = build_knowledge_prompt(task);

        match self.coordinator.run(&prompt, &tools).await {
            Ok(result) => result.content,
            Err(e) => {
                tracing::error!(error = %e, "knowledge agent failed");
                degraded_reply()
            }
        }
    }

    fn id(&self) -> AgentId {
        AgentId::Knowledge
    }
}
