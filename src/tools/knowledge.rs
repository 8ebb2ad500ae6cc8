//! In-memory knowledge base lookup.
//!
//! A small static corpus of NovaPay product documentation, scored by term
//! overlap. The backend is deliberately swappable behind the [`Tool`]
//! interface; ranking quality is not the point here.

use crate::tools::registry::Tool;
use crate::types::Result;
use async_trait::async_trait;
use serde_json::{Value, json};

struct KbEntry {
    title: &'static str,
    content: &'static str,
}

const KNOWLEDGE_BASE: &[KbEntry] = &[
    KbEntry {
        title: "Card reader fees",
        content: "NovaPay card readers charge 1.99% per debit transaction and \
                  3.49% per credit transaction paid in full. Installment credit \
                  payments add 2.5% per installment. There is no monthly rental \
                  fee for the reader itself.",
    },
    KbEntry {
        title: "Instant transfers",
        content: "Instant transfers between NovaPay accounts are free and settle \
                  in seconds, 24/7. Transfers to external banks are free up to 10 \
                  per month, then cost a flat fee per transfer.",
    },
    KbEntry {
        title: "Payment links",
        content: "Payment links let merchants charge customers without a card \
                  reader. Share the link by any channel; the customer pays by \
                  card or account balance. Fees match the card reader credit \
                  rates.",
    },
    KbEntry {
        title: "Digital account",
        content: "The NovaPay digital account has no opening or maintenance fee. \
                  It includes a virtual card, bill payments, and automatic \
                  settlement of card reader sales on the next business day.",
    },
    KbEntry {
        title: "Card machine setup",
        content: "To activate a NovaPay card reader, charge it fully, turn it on, \
                  and sign in with your NovaPay account in the reader menu. The \
                  reader updates itself on first connection over Wi-Fi or its \
                  built-in SIM.",
    },
];

/// Scored lookup over the static product documentation.
pub struct KnowledgeSearchTool;

impl KnowledgeSearchTool {
    pub fn new() -> Self {
        Self
    }

    /// Term-overlap score: how many distinct query terms appear in the entry.
    fn score(entry: &KbEntry, terms: &[String]) -> usize {
        let haystack = format!("{} {}", entry.title, entry.content).to_lowercase();
        terms.iter().filter(|t| haystack.contains(t.as_str())).count()
    }
}

impl Default for KnowledgeSearchTool {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Tool for KnowledgeSearchTool {
    fn name(&self) -> &str {
        "knowledge_search"
    }

    fn description(&self) -> &str {
        "Search the NovaPay knowledge base for product and fee information"
    }

    fn parameters_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "query": {
                    "type": "string",
                    "description": "The search query"
                }
            },
            "required": ["query"]
        })
    }

    async fn execute(&self, args: Value) -> Result<Value> {
        let query = args
            .get("query")
            .and_then(|v| v.as_str())
            .unwrap_or_default();

        let terms: Vec<String> = query
            .to_lowercase()
            .split_whitespace()
            .filter(|t| t.len() > 2)
            .map(str::to_string)
            .collect();

        let mut scored: Vec<(usize, &KbEntry)> = KNOWLEDGE_BASE
            .iter()
            .map(|entry| (Self::score(entry, &terms), entry))
            .filter(|(score, _)| *score > 0)
            .collect();
        scored.sort_by(|a, b| b.0.cmp(&a.0));

        if scored.is_empty() {
            return Ok(json!({
                "query": query,
                "results": [],
                "note": "No results found in the NovaPay knowledge base"
            }));
        }

        let results: Vec<Value> = scored
            .iter()
            .take(3)
            .map(|(_, entry)| {
                json!({
                    "title": entry.title,
                    "content": entry.content,
                    "source": "NovaPay knowledge base"
                })
            })
            .collect();

        Ok(json!({
            "query": query,
            "results": results,
            "count": results.len()
        }))
    }
}
