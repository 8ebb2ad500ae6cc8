//! Multi-turn tool-calling loop on top of any [`LLMClient`].
//!
//! The coordinator sends a prompt plus tool definitions to the model,
//! executes any requested tools (sequentially, each under a timeout), folds
//! the results back into the prompt, and repeats until the model answers in
//! plain text or the iteration cap is hit. Tool failures never abort the
//! loop; they are recorded and shown to the model as error text.

use crate::llm::client::LLMClient;
use crate::tools::registry::ToolRegistry;
use crate::types::{Result, ToolCall, ToolDefinition};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::time::timeout;

/// Configuration for the tool-calling loop.
#[derive(Debug, Clone)]
pub struct ToolCallingConfig {
    /// Maximum number of LLM round-trips (not tool calls) before stopping.
    pub max_iterations: usize,

    /// Timeout for an individual tool execution.
    pub tool_timeout: Duration,
}

impl Default for ToolCallingConfig {
    fn default() -> Self {
        Self {
            max_iterations: 5,
            tool_timeout: Duration::from_secs(30),
        }
    }
}

/// Record of a single tool call execution.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolCallRecord {
    /// Identifier assigned by the model.
    pub id: String,
    /// Name of the tool that was called.
    pub name: String,
    /// Arguments passed to the tool.
    pub arguments: serde_json::Value,
    /// Result returned by the tool (or error object).
    pub result: serde_json::Value,
    /// Whether the tool execution succeeded.
    pub success: bool,
    /// Execution time in milliseconds.
    pub duration_ms: u64,
    /// Error message if the tool failed.
    pub error: Option<String>,
}

/// Why a tool coordination session ended.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum FinishReason {
    /// Model produced a plain-text answer.
    Stop,
    /// Hit the iteration cap.
    MaxIterations,
    /// Model requested a tool that is not registered.
    UnknownTool(String),
}

/// Result of a complete tool coordination session.
#[derive(Debug, Clone)]
pub struct CoordinatorResult {
    /// Final text response from the model.
    pub content: String,
    /// All tool calls made during the session.
    pub tool_calls: Vec<ToolCallRecord>,
    /// Number of LLM round-trips performed.
    pub iterations: usize,
    /// Why the session ended.
    pub finish_reason: FinishReason,
}

/// Provider-agnostic driver for the tool-calling loop.
///
/// Tool calls within one round are executed sequentially; nothing an agent
/// does here benefits from parallel tools, and sequential execution keeps
/// the transcript ordering deterministic.
pub struct ToolCoordinator {
    client: Arc<dyn LLMClient>,
    registry: Arc<ToolRegistry>,
    config: ToolCallingConfig,
}

impl ToolCoordinator {
    pub fn new(
        client: Arc<dyn LLMClient>,
        registry: Arc<ToolRegistry>,
        config: ToolCallingConfig,
    ) -> Self {
        Self {
            client,
            registry,
            config,
        }
    }

    pub fn with_defaults(client: Arc<dyn LLMClient>, registry: Arc<ToolRegistry>) -> Self {
        Self::new(client, registry, ToolCallingConfig::default())
    }

    /// Run the tool-calling loop for one prompt against the given tool set.
    ///
    /// Each round sends the accumulated transcript (original prompt plus any
    /// tool results so far) with the tool definitions. The loop ends when the
    /// model stops requesting tools, requests an unknown tool, or the
    /// iteration cap is reached.
    pub async fn run(
        &self,
        prompt: &str,
        tools: &[ToolDefinition],
    ) -> Result<CoordinatorResult> {
        let mut transcript = prompt.to_string();
        let mut all_tool_calls: Vec<ToolCallRecord> = Vec::new();
        let mut last_content = String::new();

        for iteration in 0..self.config.max_iterations {
            let response = self.client.generate_with_tools(&transcript, tools).await?;
            last_content = response.content.clone();

            if response.tool_calls.is_empty() {
                return Ok(CoordinatorResult {
                    content: response.content,
                    tool_calls: all_tool_calls,
                    iterations: iteration + 1,
                    finish_reason: FinishReason::Stop,
                });
            }

            for tool_call in &response.tool_calls {
                if !self.registry.has_tool(&tool_call.name) {
                    tracing::warn!(tool = %tool_call.name, "model requested unregistered tool");
                    return Ok(CoordinatorResult {
                        content: response.content,
                        tool_calls: all_tool_calls,
                        iterations: iteration + 1,
                        finish_reason: FinishReason::UnknownTool(tool_call.name.clone()),
                    });
                }
            }

            transcript.push_str("\n\nTool results:");
            for call in &response.tool_calls {
                let record = self.execute_single_tool(call).await;
                transcript.push_str(&format!(
                    "\n- {}({}) -> {}",
                    record.name, record.arguments, record.result
                ));
                all_tool_calls.push(record);
            }
            transcript.push_str(
                "\n\nUse the tool results above to continue. \
                 If you have enough information, give your final answer in plain text.",
            );
        }

        Ok(CoordinatorResult {
            content: last_content,
            tool_calls: all_tool_calls,
            iterations: self.config.max_iterations,
            finish_reason: FinishReason::MaxIterations,
        })
    }

    /// Execute a single tool call under the configured timeout.
    ///
    /// Never returns an error: failures and timeouts become error records so
    /// the loop (and the model) can see what went wrong.
    async fn execute_single_tool(&self, call: &ToolCall) -> ToolCallRecord {
        let start = Instant::now();

        let result = timeout(
            self.config.tool_timeout,
            self.registry.execute(&call.name, call.arguments.clone()),
        )
        .await;

        let duration_ms = start.elapsed().as_millis() as u64;

        match result {
            Ok(Ok(value)) => ToolCallRecord {
                id: call.id.clone(),
                name: call.name.clone(),
                arguments: call.arguments.clone(),
                result: value,
                success: true,
                duration_ms,
                error: None,
            },
            Ok(Err(e)) => ToolCallRecord {
                id: call.id.clone(),
                name: call.name.clone(),
                arguments: call.arguments.clone(),
                result: serde_json::json!({"error": e.to_string()}),
                success: false,
                duration_ms,
                error: Some(e.to_string()),
            },
            Err(_) => ToolCallRecord {
                id: call.id.clone(),
                name: call.name.clone(),
                arguments: call.arguments.clone(),
                result: serde_json::json!({"error": "Tool execution timed out"}),
                success: false,
                duration_ms,
                error: Some("Tool execution timed out".to_string()),
            },
        }
    }

    pub fn config(&self) -> &ToolCallingConfig {
        &self.config
    }
}
