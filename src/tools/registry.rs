use crate::types::{Result, ToolDefinition};
use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;

#[async_trait]
pub trait Tool: Send + Sync {
    fn name(&self) -> &str;
    fn description(&self) -> &str;
    fn parameters_schema(&self) -> Value;
    async fn execute(&self, args: Value) -> Result<Value>;
}

pub struct ToolRegistry {
    tools: HashMap<String, Arc<dyn Tool>>,
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self {
            tools: HashMap::new(),
        }
    }

    /// Create a registry with the full support tool set: knowledge base and
    /// web search for the knowledge side, account/ticket stubs for support,
    /// and Slack notification for escalation.
    pub fn with_default_tools(slack: crate::tools::slack::SlackNotifyTool) -> Self {
        let mut registry = Self::new();

        registry.register(Arc::new(crate::tools::knowledge::KnowledgeSearchTool::new()));
        registry.register(Arc::new(crate::tools::search::WebSearchTool::new()));
        registry.register(Arc::new(crate::tools::support::UserInfoTool));
        registry.register(Arc::new(crate::tools::support::AccountStatusTool));
        registry.register(Arc::new(crate::tools::support::TransactionHistoryTool));
        registry.register(Arc::new(crate::tools::support::CreateTicketTool));
        registry.register(Arc::new(slack));

        registry
    }

    pub fn register(&mut self, tool: Arc<dyn Tool>) {
        self.tools.insert(tool.name().to_string(), tool);
    }

    pub fn get_tool_definitions(&self) -> Vec<ToolDefinition> {
        self.tools
            .values()
            .map(|tool| ToolDefinition {
                name: tool.name().to_string(),
                description: tool.description().to_string(),
                parameters: tool.parameters_schema(),
            })
            .collect()
    }

    /// Definitions for a named subset, in the order given. Each agent variant
    /// exposes only its own tools to the model.
    pub fn get_filtered_tool_definitions(&self, names: &[&str]) -> Vec<ToolDefinition> {
        names
            .iter()
            .filter_map(|name| self.tools.get(*name))
            .map(|tool| ToolDefinition {
                name: tool.name().to_string(),
                description: tool.description().to_string(),
                parameters: tool.parameters_schema(),
            })
            .collect()
    }

    pub async fn execute(&self, name: &str, args: Value) -> Result<Value> {
        if let Some(tool) = self.tools.get(name) {
            tool.execute(args).await
        } else {
            Err(crate::types::AppError::Tool(format!(
                "Tool not found: {}",
                name
            )))
        }
    }

    /// Get a list of all registered tool names
    pub fn tool_names(&self) -> Vec<String> {
        self.tools.keys().cloned().collect()
    }

    /// Check if a tool is registered
    pub fn has_tool(&self, name: &str) -> bool {
        self.tools.contains_key(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::slack::SlackNotifyTool;

    #[test]
    fn test_registry_creation() {
        let registry = ToolRegistry::new();
        assert_eq!(registry.tool_names().len(), 0);
    }

    #[test]
    fn test_registry_with_default_tools() {
        let registry = ToolRegistry::with_default_tools(SlackNotifyTool::stub());
        assert!(registry.has_tool("knowledge_search"));
        assert!(registry.has_tool("web_search"));
        assert!(registry.has_tool("user_info"));
        assert!(registry.has_tool("account_status"));
        assert!(registry.has_tool("transaction_history"));
        assert!(registry.has_tool("create_ticket"));
        assert!(registry.has_tool("slack_notify"));
    }

    #[test]
    fn test_get_tool_definitions() {
        let registry = ToolRegistry::with_default_tools(SlackNotifyTool::stub());
        let definitions = registry.get_tool_definitions();

        assert_eq!(definitions.len(), 7);
        for def in &definitions {
            assert!(!def.name.is_empty());
            assert!(!def.description.is_empty());
            assert!(def.parameters.is_object());
        }
    }

    #[test]
    fn test_filtered_definitions_preserve_order() {
        let registry = ToolRegistry::with_default_tools(SlackNotifyTool::stub());
        let defs = registry.get_filtered_tool_definitions(&["web_search", "knowledge_search"]);

        assert_eq!(defs.len(), 2);
        assert_eq!(defs[0].name, "web_search");
        assert_eq!(defs[1].name, "knowledge_search");
    }

    #[test]
    fn test_filtered_definitions_skip_unknown() {
        let registry = ToolRegistry::with_default_tools(SlackNotifyTool::stub());
        let defs = registry.get_filtered_tool_definitions(&["no_such_tool", "user_info"]);

        assert_eq!(defs.len(), 1);
        assert_eq!(defs[0].name, "user_info");
    }

    #[tokio::test]
    async fn test_nonexistent_tool() {
        let registry = ToolRegistry::with_default_tools(SlackNotifyTool::stub());

        let result = registry
            .execute("nonexistent_tool", serde_json::json!({}))
            .await;
        assert!(result.is_err());
    }
}
