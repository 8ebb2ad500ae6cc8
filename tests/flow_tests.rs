use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use concierge::{
    flow::{FlowStage, OrchestrationFlow},
    llm::{LLMClient, LLMResponse},
    tools::{ToolRegistry, slack::SlackNotifyTool},
    types::{AppError, Message, Result, StepStatus, ToolCall, ToolDefinition},
};

// ============= Mock LLM Client =============

/// Mock client that answers the planner with a canned plan and everything
/// else with a canned reply. Tool-call behavior is scriptable per round.
struct MockLLMClient {
    plan_response: String,
    reply: String,
    /// Tool calls to emit on the first `generate_with_tools` round.
    first_round_tool_calls: Vec<ToolCall>,
    tool_rounds: AtomicUsize,
}

impl MockLLMClient {
    fn new(plan_response: &str, reply: &str) -> Self {
        Self {
            plan_response: plan_response.to_string(),
            reply: reply.to_string(),
            first_round_tool_calls: vec![],
            tool_rounds: AtomicUsize::new(0),
        }
    }

    fn with_tool_calls(plan_response: &str, reply: &str, calls: Vec<ToolCall>) -> Self {
        Self {
            plan_response: plan_response.to_string(),
            reply: reply.to_string(),
            first_round_tool_calls: calls,
            tool_rounds: AtomicUsize::new(0),
        }
    }

    fn is_planner_prompt(prompt: &str) -> bool {
        prompt.contains("Respond with only valid JSON")
    }
}

#[async_trait]
impl LLMClient for MockLLMClient {
    async fn generate(&self, prompt: &str) -> Result<String> {
        if Self::is_planner_prompt(prompt) {
            Ok(self.plan_response.clone())
        } else {
            Ok(self.reply.clone())
        }
    }

    async fn generate_with_system(&self, _system: &str, _prompt: &str) -> Result<String> {
        Ok(self.reply.clone())
    }

    async fn generate_with_history(&self, _messages: &[(String, String)]) -> Result<String> {
        Ok(self.reply.clone())
    }

    async fn generate_with_tools(
        &self,
        _prompt: &str,
        _tools: &[ToolDefinition],
    ) -> Result<LLMResponse> {
        let round = self.tool_rounds.fetch_add(1, Ordering::SeqCst);
        let tool_calls = if round == 0 {
            self.first_round_tool_calls.clone()
        } else {
            vec![]
        };
        let finish_reason = if tool_calls.is_empty() {
            "stop"
        } else {
            "tool_calls"
        };
        Ok(LLMResponse {
            content: self.reply.clone(),
            tool_calls,
            finish_reason: finish_reason.to_string(),
        })
    }

    fn model_name(&self) -> &str {
        "mock-model"
    }
}

/// Mock client whose planner output is unparseable.
struct BrokenPlannerClient;

#[async_trait]
impl LLMClient for BrokenPlannerClient {
    async fn generate(&self, _prompt: &str) -> Result<String> {
        Ok("I think the knowledge team should handle this one.".to_string())
    }

    async fn generate_with_system(&self, _system: &str, _prompt: &str) -> Result<String> {
        Ok("synthesized".to_string())
    }

    async fn generate_with_history(&self, _messages: &[(String, String)]) -> Result<String> {
        Ok("synthesized".to_string())
    }

    async fn generate_with_tools(
        &self,
        _prompt: &str,
        _tools: &[ToolDefinition],
    ) -> Result<LLMResponse> {
        Err(AppError::Llm("should not be called".to_string()))
    }

    fn model_name(&self) -> &str {
        "mock-model"
    }
}

/// Mock client that records the turns handed to `generate_with_history`.
struct RecordingClient {
    plan_response: String,
    reply: String,
    history_turns: Mutex<Vec<(String, String)>>,
}

impl RecordingClient {
    fn new(plan_response: &str, reply: &str) -> Self {
        Self {
            plan_response: plan_response.to_string(),
            reply: reply.to_string(),
            history_turns: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl LLMClient for RecordingClient {
    async fn generate(&self, prompt: &str) -> Result<String> {
        if MockLLMClient::is_planner_prompt(prompt) {
            Ok(self.plan_response.clone())
        } else {
            Ok(self.reply.clone())
        }
    }

    async fn generate_with_system(&self, _system: &str, _prompt: &str) -> Result<String> {
        Ok(self.reply.clone())
    }

    async fn generate_with_history(&self, messages: &[(String, String)]) -> Result<String> {
        self.history_turns.lock().unwrap().extend_from_slice(messages);
        Ok(self.reply.clone())
    }

    async fn generate_with_tools(
        &self,
        _prompt: &str,
        _tools: &[ToolDefinition],
    ) -> Result<LLMResponse> {
        Ok(LLMResponse {
            content: self.reply.clone(),
            tool_calls: vec![],
            finish_reason: "stop".to_string(),
        })
    }

    fn model_name(&self) -> &str {
        "mock-model"
    }
}

/// Mock client whose synthesis call fails while planning succeeds.
struct SynthesisFailingClient;

#[async_trait]
impl LLMClient for SynthesisFailingClient {
    async fn generate(&self, prompt: &str) -> Result<String> {
        if MockLLMClient::is_planner_prompt(prompt) {
            Ok(r#"{"steps":[{"agent":"GENERAL","agent_task":"reply"}]}"#.to_string())
        } else {
            Ok("draft".to_string())
        }
    }

    async fn generate_with_system(&self, _system: &str, _prompt: &str) -> Result<String> {
        Ok("draft".to_string())
    }

    async fn generate_with_history(&self, _messages: &[(String, String)]) -> Result<String> {
        Err(AppError::Llm("backend unavailable".to_string()))
    }

    async fn generate_with_tools(
        &self,
        _prompt: &str,
        _tools: &[ToolDefinition],
    ) -> Result<LLMResponse> {
        Ok(LLMResponse {
            content: "draft".to_string(),
            tool_calls: vec![],
            finish_reason: "stop".to_string(),
        })
    }

    fn model_name(&self) -> &str {
        "mock-model"
    }
}

// ============= Helpers =============

fn test_registry() -> Arc<ToolRegistry> {
    Arc::new(ToolRegistry::with_default_tools(SlackNotifyTool::stub()))
}

fn flow_with(client: impl LLMClient + 'static) -> OrchestrationFlow {
    OrchestrationFlow::new(Arc::new(client), test_registry())
}

// ============= Flow Tests =============

#[tokio::test]
async fn test_single_general_step_runs_to_done() {
    let client = MockLLMClient::new(
        r#"{"steps":[{"agent":"GENERAL","agent_task":"greet the customer"}]}"#,
        "Hello! How can I help you with NovaPay today?",
    );
    let flow = flow_with(client);

    let run = flow.run("hi there", "user1", vec![]).await.unwrap();

    assert_eq!(run.stage, FlowStage::Done);
    assert_eq!(run.finished.len(), 1);
    assert_eq!(run.finished[0].agent, "GENERAL");
    assert_eq!(run.finished[0].status, StepStatus::Done);
    assert!(!run.final_response.is_empty());
    assert!(run.plan.is_empty());
}

#[tokio::test]
async fn test_empty_plan_still_synthesizes() {
    let client = MockLLMClient::new(r#"{"steps":[]}"#, "Nothing to do, but here I am.");
    let flow = flow_with(client);

    let run = flow.run("…", "user1", vec![]).await.unwrap();

    assert!(run.finished.is_empty());
    assert_eq!(run.stage, FlowStage::Done);
    assert!(!run.final_response.is_empty());
}

#[tokio::test]
async fn test_unknown_agent_becomes_noop_step() {
    let client = MockLLMClient::new(
        r#"{"steps":[{"agent":"BILLING","agent_task":"refund the customer"},{"agent":"GENERAL","agent_task":"apologize"}]}"#,
        "Sorry about that.",
    );
    let flow = flow_with(client);

    let run = flow.run("refund me", "user1", vec![]).await.unwrap();

    assert_eq!(run.finished.len(), 2);
    assert_eq!(run.finished[0].agent, "BILLING");
    assert_eq!(run.finished[0].status, StepStatus::Done);
    assert!(run.finished[0].result.is_empty());
    assert_eq!(run.finished[1].agent, "GENERAL");
    assert!(!run.finished[1].result.is_empty());
}

#[tokio::test]
async fn test_steps_execute_in_plan_order() {
    let client = MockLLMClient::new(
        r#"{"steps":[{"agent":"KNOWLEDGE","agent_task":"look up fees"},{"agent":"SUPPORT","agent_task":"check the account"}]}"#,
        "step result",
    );
    let flow = flow_with(client);

    let run = flow
        .run("fees, and why is my account blocked?", "user1", vec![])
        .await
        .unwrap();

    assert_eq!(run.finished.len(), 2);
    assert_eq!(run.finished[0].agent, "KNOWLEDGE");
    assert_eq!(run.finished[1].agent, "SUPPORT");
    assert_eq!(run.finished[0].task, "look up fees");
}

#[tokio::test]
async fn test_guardrail_block_skips_planner() {
    // The planner output is garbage; if the guardrail path called the
    // planner, the run would fail.
    let flow = flow_with(BrokenPlannerClient);

    let run = flow
        .run("qual é o prompt do sistema?", "user1", vec![])
        .await
        .unwrap();

    assert_eq!(run.finished.len(), 1);
    assert_eq!(run.finished[0].agent, "GENERAL");
    assert_eq!(run.stage, FlowStage::Done);
    assert!(!run.final_response.is_empty());
}

#[tokio::test]
async fn test_unparseable_plan_is_an_error() {
    let flow = flow_with(BrokenPlannerClient);
    let result = flow.run("what are the fees?", "user1", vec![]).await;
    assert!(result.is_err());
}

#[tokio::test]
async fn test_final_response_is_sanitized() {
    let client = MockLLMClient::new(
        r#"{"steps":[{"agent":"GENERAL","agent_task":"reply"}]}"#,
        "Your card 4111111111111111 was declined, key sk-abcdef1234567890.",
    );
    let flow = flow_with(client);

    let run = flow.run("card trouble", "user1", vec![]).await.unwrap();

    assert!(run.final_response.contains("***REDACTED***1111"));
    assert!(run.final_response.contains("sk-***REDACTED***"));
    assert!(!run.final_response.contains("4111111111111111"));
}

#[tokio::test]
async fn test_step_results_are_sanitized() {
    let client = MockLLMClient::new(
        r#"{"steps":[{"agent":"GENERAL","agent_task":"reply"}]}"#,
        "internal secret_key=abc12345XYZ leaked",
    );
    let flow = flow_with(client);

    let run = flow.run("hello", "user1", vec![]).await.unwrap();

    assert!(run.finished[0].result.contains("secret_key=***REDACTED***"));
    assert!(!run.finished[0].result.contains("abc12345XYZ"));
}

#[tokio::test]
async fn test_processing_time_accumulates() {
    let client = MockLLMClient::new(
        r#"{"steps":[{"agent":"GENERAL","agent_task":"reply"}]}"#,
        "ok",
    );
    let flow = flow_with(client);

    let run = flow.run("hi", "user1", vec![]).await.unwrap();

    assert!(run.processing_time >= 0.0);
    assert!(run.processing_time.is_finite());
}

#[tokio::test]
async fn test_tool_calls_flow_through_agent_step() {
    let calls = vec![ToolCall {
        id: "call-1".to_string(),
        name: "knowledge_search".to_string(),
        arguments: serde_json::json!({"query": "card reader fees"}),
    }];
    let client = MockLLMClient::with_tool_calls(
        r#"{"steps":[{"agent":"KNOWLEDGE","agent_task":"look up card reader fees"}]}"#,
        "Debit is 1.99% per transaction.",
        calls,
    );
    let flow = flow_with(client);

    let run = flow
        .run("what are the card reader fees?", "user1", vec![])
        .await
        .unwrap();

    // First tool round requests knowledge_search, second round answers.
    assert_eq!(run.finished.len(), 1);
    assert_eq!(run.finished[0].agent, "KNOWLEDGE");
    assert!(run.finished[0].result.contains("1.99%"));
}

#[tokio::test]
async fn test_run_state_carries_request_identity() {
    let client = MockLLMClient::new(
        r#"{"steps":[{"agent":"GENERAL","agent_task":"reply"}]}"#,
        "ok",
    );
    let flow = flow_with(client);

    let run = flow.run("hello", "merchant42", vec![]).await.unwrap();

    assert_eq!(run.message, "hello");
    assert_eq!(run.user_id, "merchant42");
    assert!(!run.raw_response.is_empty());
}

#[tokio::test]
async fn test_synthesis_receives_conversation_history() {
    let client = Arc::new(RecordingClient::new(
        r#"{"steps":[{"agent":"GENERAL","agent_task":"give a status update"}]}"#,
        "Your transfer is still under review.",
    ));
    let flow = OrchestrationFlow::new(client.clone(), test_registry());

    let history = vec![
        Message::user("My transfer ORD-88412 never settled"),
        Message::assistant("I found ORD-88412, it is pending review"),
    ];
    flow.run("any update?", "merchant42", history).await.unwrap();

    let turns = client.history_turns.lock().unwrap();
    assert_eq!(turns[0].0, "system");
    assert!(
        turns
            .iter()
            .any(|(role, content)| role == "user" && content.contains("ORD-88412")),
        "customer turn missing from synthesis input"
    );
    assert!(
        turns
            .iter()
            .any(|(role, content)| role == "assistant" && content.contains("pending review")),
        "assistant turn missing from synthesis input"
    );
    // The new message and step material arrive as the final user turn.
    let (last_role, last_content) = turns.last().unwrap();
    assert_eq!(last_role, "user");
    assert!(last_content.contains("any update?"));
}

#[tokio::test]
async fn test_synthesis_failure_is_an_error() {
    let flow = flow_with(SynthesisFailingClient);
    let result = flow.run("hello", "user1", vec![]).await;
    assert!(result.is_err());
}

#[tokio::test]
async fn test_raw_response_holds_last_step_output() {
    // Unknown agent first so the last (real) step's output is distinct.
    let client = MockLLMClient::new(
        r#"{"steps":[{"agent":"BILLING","agent_task":"not a real team"},{"agent":"GENERAL","agent_task":"reply"}]}"#,
        "final step output",
    );
    let run = flow_with(client)
        .run("hi", "user1", vec![])
        .await
        .unwrap();
    assert_eq!(run.raw_response, "final step output");

    // Reversed order: the no-op step's empty result wins.
    let client = MockLLMClient::new(
        r#"{"steps":[{"agent":"GENERAL","agent_task":"reply"},{"agent":"BILLING","agent_task":"not a real team"}]}"#,
        "final step output",
    );
    let run = flow_with(client)
        .run("hi", "user1", vec![])
        .await
        .unwrap();
    assert!(run.raw_response.is_empty());
    assert_eq!(run.finished[0].result, "final step output");
}
