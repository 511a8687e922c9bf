//! Agent identity and descriptor types.
//!
//! An agent is an AI actor that requests actions against resources. Agents
//! are owned by the registry and change only through explicit update calls.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::capability::CapabilitySet;

/// Stable, human-readable identifier for an agent.
///
/// Example: AgentId("ai-editor-1")
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AgentId(pub String);

impl AgentId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Generate a fresh id of the form `ai-<role>-<8 hex chars>`.
    pub fn generate(role: AgentRole) -> Self {
        let suffix = uuid::Uuid::new_v4().simple().to_string();
        Self(format!("ai-{}-{}", role.as_str(), &suffix[..8]))
    }
}

impl fmt::Display for AgentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The coarse role an agent plays. Used for id generation and display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgentRole {
    Assistant,
    Analyzer,
    Editor,
    Admin,
}

impl AgentRole {
    pub fn as_str(self) -> &'static str {
        match self {
            AgentRole::Assistant => "assistant",
            AgentRole::Analyzer => "analyzer",
            AgentRole::Editor => "editor",
            AgentRole::Admin => "admin",
        }
    }
}

/// A registered AI agent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Agent {
    pub id: AgentId,
    pub name: String,
    pub description: String,
    pub role: AgentRole,
    pub capabilities: CapabilitySet,
    /// Inactive agents are denied every permission check. Their history is kept.
    pub is_active: bool,
    /// User id of the administrator who registered the agent.
    pub created_by: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Everything the caller supplies when registering a new agent.
///
/// The registry assigns the id and both timestamps.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentDescriptor {
    pub name: String,
    pub description: String,
    pub role: AgentRole,
    pub capabilities: CapabilitySet,
    pub is_active: bool,
    pub created_by: String,
}
