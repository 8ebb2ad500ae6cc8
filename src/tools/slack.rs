//! Slack escalation notification.
//!
//! Posts to an incoming-webhook URL when one is configured; otherwise acts
//! as a stub that confirms the notification without sending anything, so the
//! escalation agent works in local development.

use crate::tools::registry::Tool;
use crate::types::Result;
use async_trait::async_trait;
use serde_json::{Value, json};

pub struct SlackNotifyTool {
    webhook_url: Option<String>,
    default_channel: String,
    client: reqwest::Client,
}

impl SlackNotifyTool {
    pub fn new(webhook_url: Option<String>, default_channel: String) -> Self {
        Self {
            webhook_url,
            default_channel,
            client: reqwest::Client::new(),
        }
    }

    /// Unconfigured variant for tests and local development.
    pub fn stub() -> Self {
        Self::new(None, "#support-escalations".to_string())
    }
}

#[async_trait]
impl Tool for SlackNotifyTool {
    fn name(&self) -> &str {
        "slack_notify"
    }

    fn description(&self) -> &str {
        "Notify the human support team on Slack about an escalated case"
    }

    fn parameters_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "message": {
                    "type": "string",
                    "description": "The escalation summary to post"
                },
                "channel": {
                    "type": "string",
                    "description": "Optional channel override"
                }
            },
            "required": ["message"]
        })
    }

    async fn execute(&self, args: Value) -> Result<Value> {
        let message = args
            .get("message")
            .and_then(|v| v.as_str())
            .unwrap_or_default();
        let channel = args
            .get("channel")
            .and_then(|v| v.as_str())
            .unwrap_or(&self.default_channel)
            .to_string();

        let Some(webhook_url) = &self.webhook_url else {
            tracing::info!(channel, "slack webhook not configured, stubbing notification");
            return Ok(json!({
                "status": "stubbed",
                "channel": channel,
                "detail": "Slack webhook not configured; notification recorded locally"
            }));
        };

        let payload = json!({
            "channel": channel,
            "text": message,
        });

        match self.client.post(webhook_url).json(&payload).send().await {
            Ok(response) if response.status().is_success() => Ok(json!({
                "status": "sent",
                "channel": channel
            })),
            Ok(response) => Ok(json!({
                "status": "failed",
                "channel": channel,
                "detail": format!("Slack returned HTTP {}", response.status())
            })),
            Err(e) => {
                tracing::warn!(error = %e, "slack notification failed");
                Ok(json!({
                    "status": "failed",
                    "channel": channel,
                    "detail": format!("Slack request error: {}", e)
                }))
            }
        }
    }
}
