//! The agents a fresh registry starts with.

use chrono::Utc;

use warden_contracts::{
    agent::{Agent, AgentId, AgentRole},
    capability::Capability,
};

fn agent(
    id: &str,
    name: &str,
    description: &str,
    role: AgentRole,
    capabilities: [Capability; 3],
) -> Agent {
    let now = Utc::now();
    Agent {
        id: AgentId::new(id),
        name: name.to_string(),
        description: description.to_string(),
        role,
        capabilities: capabilities.into_iter().collect(),
        is_active: true,
        created_by: "admin-id".to_string(),
        created_at: now,
        updated_at: now,
    }
}

pub fn seed_agents() -> Vec<Agent> {
    vec![
        agent(
            "ai-assistant-1",
            "Document Assistant",
            "Helps with document organization and basic tasks",
            AgentRole::Assistant,
            [
                Capability::ReadDocuments,
                Capability::SuggestEdits,
                Capability::SummarizeContent,
            ],
        ),
        agent(
            "ai-editor-1",
            "Content Editor",
            "AI that can edit and improve document content",
            AgentRole::Editor,
            [
                Capability::ReadDocuments,
                Capability::EditDocuments,
                Capability::GenerateContent,
            ],
        ),
        agent(
            "ai-analyzer-1",
            "Document Analyzer",
            "Analyzes document content and provides insights",
            AgentRole::Analyzer,
            [
                Capability::ReadDocuments,
                Capability::AnalyzeContent,
                Capability::SummarizeContent,
            ],
        ),
    ]
}
