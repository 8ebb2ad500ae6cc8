//! The orchestration flow: plan, execute, synthesize.
//!
//! One [`RunState`] per request, owned exclusively by the flow driver for
//! the duration of the run. The driver walks a fixed stage graph:
//!
//! ```text
//! Init -> Planning -> Executing -> Synthesizing -> Done
//!           (skipped on guardrail block)  ^___|  (one loop per plan step)
//! ```
//!
//! Every string that is stored or returned passes through
//! [`guardrails::sanitize_output`] first.

use crate::agents::{self, PlannerAgent, general::GeneralAgent};
use crate::guardrails;
use crate::llm::LLMClient;
use crate::tools::ToolRegistry;
use crate::types::{
    AgentId, FinishedStep, Message, PlannedStep, Result, StepStatus,
};
use chrono::{DateTime, Utc};
use std::collections::VecDeque;
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;
use uuid::Uuid;

/// Where a run currently is in the stage graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowStage {
    Init,
    Planning,
    Executing,
    Synthesizing,
    Done,
}

impl FlowStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            FlowStage::Init => "Init",
            FlowStage::Planning => "Planning",
            FlowStage::Executing => "Executing",
            FlowStage::Synthesizing => "Synthesizing",
            FlowStage::Done => "Done",
        }
    }
}

/// All state for one run. Created fresh per request; never shared.
#[derive(Debug)]
pub struct RunState {
    pub run_id: Uuid,
    pub stage: FlowStage,
    pub message: String,
    pub user_id: String,
    pub conversation_history: Vec<Message>,
    /// Remaining plan; steps are popped from the front as they execute.
    pub plan: VecDeque<PlannedStep>,
    /// Append-only record of executed steps.
    pub finished: Vec<FinishedStep>,
    /// The last executed step's sanitized output; overwritten each step.
    pub raw_response: String,
    /// The customer-facing reply.
    pub final_response: String,
    /// Seconds spent in planning, execution, and synthesis. Monotonically
    /// accumulated; never reset within a run.
    pub processing_time: f64,
    pub timestamp: DateTime<Utc>,
}

impl RunState {
    fn new(message: &str, user_id: &str, history: Vec<Message>) -> Self {
        Self {
            run_id: Uuid::new_v4(),
            stage: FlowStage::Init,
            message: message.to_string(),
            user_id: user_id.to_string(),
            conversation_history: history,
            plan: VecDeque::new(),
            finished: Vec::new(),
            raw_response: String::new(),
            final_response: String::new(),
            processing_time: 0.0,
            timestamp: Utc::now(),
        }
    }
}

/// Drives one customer message through planning, step execution, and the
/// synthesis pass.
pub struct OrchestrationFlow {
    client: Arc<dyn LLMClient>,
    registry: Arc<ToolRegistry>,
    planner: PlannerAgent,
    general: GeneralAgent,
}

impl OrchestrationFlow {
    pub fn new(client: Arc<dyn LLMClient>, registry: Arc<ToolRegistry>) -> Self {
        Self {
            planner: PlannerAgent::new(client.clone()),
            general: GeneralAgent::new(client.clone()),
            client,
            registry,
        }
    }

    /// Run one message end to end.
    ///
    /// Errors only on planner or synthesis failure; step-level problems
    /// degrade inside the run. The caller owns the fallback reply.
    pub async fn run(
        &self,
        message: &str,
        user_id: &str,
        history: Vec<Message>,
    ) -> Result<RunState> {
        let mut state = RunState::new(message, user_id, history);
        tracing::info!(run_id = %state.run_id, user_id, "run started");

        let check = guardrails::check_inbound(message);
        if check.allowed {
            state.stage = FlowStage::Planning;
            let started = Instant::now();
            let steps = self.planner.plan(message, &state.conversation_history).await?;
            state.processing_time += started.elapsed().as_secs_f64();
            state.plan = steps.into();
        } else {
            // Guardrail block: one refusal step through General, no planner.
            let reason = check.reason.unwrap_or_default();
            tracing::warn!(run_id = %state.run_id, reason, "message blocked by guardrails");
            state.plan.push_back(PlannedStep::new(
                AgentId::General,
                format!(
                    "The customer's message was declined by content policy \
                     ({reason}). Politely refuse to share internal details and \
                     offer to help with NovaPay products instead."
                ),
            ));
        }

        state.stage = FlowStage::Executing;
        while let Some(step) = state.plan.pop_front() {
            let started = Instant::now();
            let record = self.execute_step(&state, &step).await;
            state.processing_time += started.elapsed().as_secs_f64();
            state.raw_response = record.result.clone();
            state.finished.push(record);
        }

        state.stage = FlowStage::Synthesizing;
        let material = state
            .finished
            .iter()
            .map(|s| format!("[{}] {}", s.agent, s.result))
            .collect::<Vec<_>>()
            .join("\n\n");

        let started = Instant::now();
        let synthesized = self
            .general
            .synthesize(&state.message, &state.conversation_history, &material)
            .await;
        state.processing_time += started.elapsed().as_secs_f64();
        let synthesized = synthesized?;
        state.final_response = guardrails::sanitize_output(&synthesized);

        state.stage = FlowStage::Done;
        tracing::info!(
            run_id = %state.run_id,
            steps = state.finished.len(),
            processing_time = state.processing_time,
            "run finished"
        );
        Ok(state)
    }

    /// Execute one planned step, timing it into a [`FinishedStep`].
    ///
    /// A step naming an unknown agent is a planner contract violation; it is
    /// recorded as an empty no-op and the run continues.
    async fn execute_step(&self, state: &RunState, step: &PlannedStep) -> FinishedStep {
        let Some(agent_id) = AgentId::parse(&step.agent) else {
            tracing::warn!(
                run_id = %state.run_id,
                agent = %step.agent,
                "plan step names unknown agent, skipping"
            );
            return FinishedStep {
                agent: step.agent.clone(),
                task: step.agent_task.clone(),
                status: StepStatus::Done,
                result: String::new(),
            };
        };

        let agent = agents::build_agent(agent_id, self.client.clone(), self.registry.clone());
        let task = format!(
            "{}\n\nContext: user_id={}",
            step.agent_task, state.user_id
        );

        let started = Instant::now();
        let result = agent.execute(&task).await;
        let elapsed = started.elapsed().as_secs_f64();
        tracing::debug!(run_id = %state.run_id, agent = %agent_id, elapsed, "step executed");

        FinishedStep {
            agent: agent_id.as_str().to_string(),
            task: step.agent_task.clone(),
            status: StepStatus::Done,
            result: guardrails::sanitize_output(&result),
        }
    }

    /// Render the stage graph as Graphviz DOT.
    pub fn render_plot() -> String {
        let mut dot = String::from("digraph orchestration_flow {\n    rankdir=LR;\n");
        for stage in [
            FlowStage::Init,
            FlowStage::Planning,
            FlowStage::Executing,
            FlowStage::Synthesizing,
            FlowStage::Done,
        ] {
            dot.push_str(&format!("    {} [shape=box];\n", stage.as_str()));
        }
        dot.push_str("    Init -> Planning;\n");
        dot.push_str("    Init -> Executing [label=\"guardrail block\"];\n");
        dot.push_str("    Planning -> Executing;\n");
        dot.push_str("    Executing -> Executing [label=\"next step\"];\n");
        dot.push_str("    Executing -> Synthesizing;\n");
        dot.push_str("    Synthesizing -> Done;\n");
        dot.push_str("}\n");
        dot
    }

    /// Write the stage graph to a DOT file.
    pub fn plot(path: &Path) -> std::io::Result<()> {
        std::fs::write(path, Self::render_plot())
    }
}
