//! Support diagnostics tools.
//!
//! Deterministic stubs standing in for the account-service integrations: the
//! shapes are real, the data is canned. Each tool takes a `user_id` so the
//! model threads identity through the conversation.

use crate::tools::registry::Tool;
use crate::types::Result;
use async_trait::async_trait;
use serde_json::{Value, json};

fn user_id_from(args: &Value) -> String {
    args.get("user_id")
        .and_then(|v| v.as_str())
        .unwrap_or("unknown")
        .to_string()
}

pub struct UserInfoTool;

#[async_trait]
impl Tool for UserInfoTool {
    fn name(&self) -> &str {
        "user_info"
    }

    fn description(&self) -> &str {
        "Look up profile information for a NovaPay user"
    }

    fn parameters_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "user_id": {
                    "type": "string",
                    "description": "The user identifier"
                }
            },
            "required": ["user_id"]
        })
    }

    async fn execute(&self, args: Value) -> Result<Value> {
        let user_id = user_id_from(&args);
        Ok(json!({
            "user_id": user_id,
            "name": "Client",
            "segment": "merchant",
            "products": ["card_reader", "digital_account"],
            "member_since": "2023-04-12"
        }))
    }
}

pub struct AccountStatusTool;

#[async_trait]
impl Tool for AccountStatusTool {
    fn name(&self) -> &str {
        "account_status"
    }

    fn description(&self) -> &str {
        "Check the account status and any active restrictions for a user"
    }

    fn parameters_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "user_id": {
                    "type": "string",
                    "description": "The user identifier"
                }
            },
            "required": ["user_id"]
        })
    }

    async fn execute(&self, args: Value) -> Result<Value> {
        let user_id = user_id_from(&args);
        Ok(json!({
            "user_id": user_id,
            "status": "active",
            "restrictions": [],
            "balance_available": true
        }))
    }
}

pub struct TransactionHistoryTool;

#[async_trait]
impl Tool for TransactionHistoryTool {
    fn name(&self) -> &str {
        "transaction_history"
    }

    fn description(&self) -> &str {
        "Fetch the most recent transactions for a user"
    }

    fn parameters_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "user_id": {
                    "type": "string",
                    "description": "The user identifier"
                },
                "limit": {
                    "type": "integer",
                    "description": "Maximum number of transactions to return (default: 5)",
                    "default": 5
                }
            },
            "required": ["user_id"]
        })
    }

    async fn execute(&self, args: Value) -> Result<Value> {
        let user_id = user_id_from(&args);
        let limit = args
            .get("limit")
            .and_then(|v| v.as_u64())
            .map(|n| n as usize)
            .unwrap_or(5);

        let sample = [
            json!({"type": "card_sale", "amount": 150.00, "status": "settled"}),
            json!({"type": "instant_transfer", "amount": 89.90, "status": "completed"}),
            json!({"type": "card_sale", "amount": 42.50, "status": "settled"}),
            json!({"type": "payment_link", "amount": 310.00, "status": "pending"}),
            json!({"type": "bill_payment", "amount": 129.99, "status": "completed"}),
        ];

        Ok(json!({
            "user_id": user_id,
            "transactions": sample.iter().take(limit).collect::<Vec<_>>()
        }))
    }
}

pub struct CreateTicketTool;

#[async_trait]
impl Tool for CreateTicketTool {
    fn name(&self) -> &str {
        "create_ticket"
    }

    fn description(&self) -> &str {
        "Open a support ticket for an issue that needs follow-up"
    }

    fn parameters_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "user_id": {
                    "type": "string",
                    "description": "The user identifier"
                },
                "issue": {
                    "type": "string",
                    "description": "A short description of the issue"
                }
            },
            "required": ["user_id", "issue"]
        })
    }

    async fn execute(&self, args: Value) -> Result<Value> {
        let user_id = user_id_from(&args);
        let issue = args
            .get("issue")
            .and_then(|v| v.as_str())
            .unwrap_or_default();
        let ticket_id = format!("TCK-{}", &uuid::Uuid::new_v4().simple().to_string()[..8]);

        tracing::info!(user_id, ticket_id, "support ticket created");

        Ok(json!({
            "ticket_id": ticket_id,
            "user_id": user_id,
            "issue": issue,
            "status": "open"
        }))
    }
}
