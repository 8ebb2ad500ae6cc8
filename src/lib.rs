//! Concierge: an agentic customer-support server.
//!
//! A planning manager agent turns each customer message into an ordered list
//! of delegations to specialized agents (knowledge lookup, support
//! diagnostics, general conversation, human escalation), executes them
//! sequentially with tool support, and merges the results into one reply.
//! Content guardrails wrap the whole pipeline: an inbound blocklist for
//! extraction attempts and outbound redaction of secret-shaped output.
//!
//! # Architecture
//!
//! - [`flow`] — the per-request orchestration state machine
//! - [`agents`] — the planner and the four specialized agents
//! - [`tools`] — the tool registry and the agents' tools
//! - [`llm`] — provider abstraction (OpenAI, Ollama) and tool-calling loop
//! - [`guardrails`] — inbound blocklist and outbound redaction
//! - [`api`] — the axum HTTP surface

pub mod agents;
pub mod api;
pub mod flow;
pub mod guardrails;
pub mod llm;
pub mod tools;
pub mod types;
pub mod utils;

use crate::llm::{LLMClientFactory, LLMClientFactoryTrait};
use crate::tools::ToolRegistry;
use crate::tools::slack::SlackNotifyTool;
use crate::types::Result;
use crate::utils::Config;
use std::sync::Arc;

/// Shared application state. Everything here is read-only or internally
/// synchronized; per-request state lives in [`flow::RunState`].
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub llm_factory: Arc<dyn LLMClientFactoryTrait>,
    pub tool_registry: Arc<ToolRegistry>,
}

impl AppState {
    pub fn new(config: Config) -> Result<Self> {
        let provider = config.llm_provider()?;
        let slack = SlackNotifyTool::new(
            config.slack.webhook_url.clone(),
            config.slack.channel.clone(),
        );

        Ok(Self {
            config: Arc::new(config),
            llm_factory: Arc::new(LLMClientFactory::new(provider)),
            tool_registry: Arc::new(ToolRegistry::with_default_tools(slack)),
        })
    }
}
