//! Static agent catalog.
//!
//! One profile per [`AgentId`], describing what the agent is for and which
//! tools it actually carries. The rendered form is embedded verbatim in the
//! planner prompt, so the planner can only delegate to capabilities that
//! exist. Pure and deterministic; iteration follows [`AgentId::ALL`].

use crate::types::AgentId;

/// What one specialized agent offers.
#[derive(Debug, Clone, Copy)]
pub struct AgentProfile {
    pub id: AgentId,
    pub title: &'static str,
    pub capabilities: &'static str,
    pub tools: &'static [&'static str],
}

const PROFILES: [AgentProfile; 4] = [
    AgentProfile {
        id: AgentId::Knowledge,
        title: "Knowledge team",
        capabilities: "Answers questions about NovaPay products, fees, card \
                       readers, transfers, and payment links using the \
                       knowledge base, falling back to web search.",
        tools: &["knowledge_search", "web_search"],
    },
    AgentProfile {
        id: AgentId::Support,
        title: "Support team",
        capabilities: "Diagnoses account issues: profile lookup, account \
                       status and restrictions, recent transactions, and \
                       opening follow-up tickets.",
        tools: &["user_info", "account_status", "transaction_history", "create_ticket"],
    },
    AgentProfile {
        id: AgentId::General,
        title: "General team",
        capabilities: "Handles greetings, small talk, out-of-scope questions, \
                       and polite refusals. Also writes the final customer \
                       reply.",
        tools: &[],
    },
    AgentProfile {
        id: AgentId::Escalation,
        title: "Escalation team",
        capabilities: "Hands frustrated customers or unresolved cases to a \
                       human, with a priority assessment and a Slack \
                       notification to the support channel.",
        tools: &["slack_notify"],
    },
];

/// Look up the profile for an agent. Total over `AgentId`.
pub fn agent_profile(id: AgentId) -> &'static AgentProfile {
    // PROFILES is kept in AgentId::ALL order.
    &PROFILES[AgentId::ALL
        .iter()
        .position(|a| *a == id)
        .unwrap_or_default()]
}

/// Render the catalog as the markdown teams block for the planner prompt.
pub fn render_catalog() -> String {
    let mut out = String::new();
    for profile in &PROFILES {
        out.push_str(&format!(
            "### {} ({})\n{}\nTools: {}\n\n",
            profile.title,
            profile.id,
            profile.capabilities,
            if profile.tools.is_empty() {
                "none".to_string()
            } else {
                profile.tools.join(", ")
            }
        ));
    }
    out
}
