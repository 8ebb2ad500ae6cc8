use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

// ============= API Request/Response Types =============

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MessageRequest {
    pub message: String,
    pub user_id: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub response: String,
    pub processing_time: f64,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub framework: String,
}

// ============= Agent Types =============

/// The closed set of specialized agents the planner can dispatch to.
///
/// Any planned step naming an agent outside this set is a planner contract
/// violation; the flow resolves it through [`AgentId::parse`] and treats the
/// `None` arm as a no-op step.
#[derive(Debug, Serialize, Deserialize, ToSchema, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum AgentId {
    Knowledge,
    Support,
    General,
    Escalation,
}

impl AgentId {
    /// All agent identifiers, in catalog order.
    pub const ALL: [AgentId; 4] = [
        AgentId::Knowledge,
        AgentId::Support,
        AgentId::General,
        AgentId::Escalation,
    ];

    /// Resolve a planner-emitted agent name. Case-insensitive; returns
    /// `None` for anything outside the closed enumeration.
    pub fn parse(name: &str) -> Option<AgentId> {
        match name.trim().to_uppercase().as_str() {
            "KNOWLEDGE" => Some(AgentId::Knowledge),
            "SUPPORT" => Some(AgentId::Support),
            "GENERAL" => Some(AgentId::General),
            "ESCALATION" => Some(AgentId::Escalation),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AgentId::Knowledge => "KNOWLEDGE",
            AgentId::Support => "SUPPORT",
            AgentId::General => "GENERAL",
            AgentId::Escalation => "ESCALATION",
        }
    }
}

impl std::fmt::Display for AgentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub role: MessageRole,
    pub content: String,
    pub timestamp: DateTime<Utc>,
}

impl Message {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: content.into(),
            timestamp: Utc::now(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::Assistant,
            content: content.into(),
            timestamp: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    System,
    User,
    Assistant,
}

impl MessageRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            MessageRole::System => "system",
            MessageRole::User => "user",
            MessageRole::Assistant => "assistant",
        }
    }
}

// ============= Plan Types =============

/// A single step as emitted by the planner.
///
/// The `agent` field stays a string here: it is untrusted LLM output and is
/// only narrowed to [`AgentId`] when the flow resolves the step.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PlannedStep {
    pub agent: String,
    pub agent_task: String,
}

impl PlannedStep {
    pub fn new(agent: AgentId, task: impl Into<String>) -> Self {
        Self {
            agent: agent.as_str().to_string(),
            agent_task: task.into(),
        }
    }
}

/// Structured planner output: zero or more ordered steps.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct PlannedSteps {
    pub steps: Vec<PlannedStep>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum StepStatus {
    Done,
    Failed,
}

/// Append-only record of a completed plan step.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct FinishedStep {
    pub agent: String,
    pub task: String,
    pub status: StepStatus,
    pub result: String,
}

// ============= Tool Types =============

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ToolDefinition {
    pub name: String,
    pub description: String,
    pub parameters: serde_json::Value,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ToolCall {
    pub id: String,
    pub name: String,
    pub arguments: serde_json::Value,
}

// ============= Error Types =============

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("LLM error: {0}")]
    Llm(String),

    #[error("Tool error: {0}")]
    Tool(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            AppError::Llm(msg) => (axum::http::StatusCode::INTERNAL_SERVER_ERROR, msg),
            AppError::Tool(msg) => (axum::http::StatusCode::INTERNAL_SERVER_ERROR, msg),
            AppError::InvalidInput(msg) => (axum::http::StatusCode::BAD_REQUEST, msg),
            AppError::Configuration(msg) => (axum::http::StatusCode::INTERNAL_SERVER_ERROR, msg),
            AppError::Internal(msg) => (axum::http::StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        let body = serde_json::json!({
            "error": message
        });

        (status, axum::Json(body)).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
