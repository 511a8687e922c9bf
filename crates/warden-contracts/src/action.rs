//! AI action records and their metadata.
//!
//! An `Action` is the persisted record of one agent's attempted operation.
//! Records are created only for permitted requests, change only through the
//! lifecycle transitions, and are never deleted.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::agent::AgentId;

/// Unique identifier for an action record, e.g. `action-1a2b3c4d`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ActionId(pub String);

impl ActionId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generate a fresh id of the form `action-<8 hex chars>`.
    pub fn generate() -> Self {
        let suffix = uuid::Uuid::new_v4().simple().to_string();
        Self(format!("action-{}", &suffix[..8]))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ActionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Lifecycle state of an action.
///
/// ```text
/// pending ──approve──▶ approved ──finalize──▶ completed
///    │ └──complete (auto path)──────────────▶ completed
///    ├──reject──▶ rejected
///    └──fail────▶ failed   (also from approved)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionStatus {
    Pending,
    Approved,
    Rejected,
    Completed,
    Failed,
}

impl ActionStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            ActionStatus::Pending => "pending",
            ActionStatus::Approved => "approved",
            ActionStatus::Rejected => "rejected",
            ActionStatus::Completed => "completed",
            ActionStatus::Failed => "failed",
        }
    }

    /// Rejected, completed and failed records never change again.
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            ActionStatus::Rejected | ActionStatus::Completed | ActionStatus::Failed
        )
    }
}

impl fmt::Display for ActionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A proposed replacement for a document's title and body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentChanges {
    pub title: String,
    pub content: String,
}

/// What the content generator produced for one action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedContent {
    pub result: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub changes: Option<DocumentChanges>,
}

/// The known shapes of action metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ActionMetadata {
    /// Only the caller's reason is known (generation has not produced anything yet).
    Reason { reason: Option<String> },

    /// The generator produced output; `changes` is set for document improvements.
    Generated {
        reason: Option<String>,
        result: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        changes: Option<DocumentChanges>,
    },

    /// Generation failed or timed out after the action was created.
    Error { reason: Option<String>, error: String },
}

impl ActionMetadata {
    pub fn reason(&self) -> Option<&str> {
        match self {
            ActionMetadata::Reason { reason }
            | ActionMetadata::Generated { reason, .. }
            | ActionMetadata::Error { reason, .. } => reason.as_deref(),
        }
    }

    /// The generated result text, if generation succeeded.
    pub fn generated_result(&self) -> Option<&str> {
        match self {
            ActionMetadata::Generated { result, .. } => Some(result.as_str()),
            _ => None,
        }
    }

    pub fn changes(&self) -> Option<&DocumentChanges> {
        match self {
            ActionMetadata::Generated { changes, .. } => changes.as_ref(),
            _ => None,
        }
    }

    /// The captured failure message of a `failed` action.
    pub fn error(&self) -> Option<&str> {
        match self {
            ActionMetadata::Error { error, .. } => Some(error.as_str()),
            _ => None,
        }
    }

    /// Keep the caller's reason and attach generator output.
    pub fn with_generated(&self, content: GeneratedContent) -> Self {
        ActionMetadata::Generated {
            reason: self.reason().map(str::to_string),
            result: content.result,
            changes: content.changes,
        }
    }

    /// Keep the caller's reason and record an error message.
    pub fn with_error(&self, error: impl Into<String>) -> Self {
        ActionMetadata::Error {
            reason: self.reason().map(str::to_string),
            error: error.into(),
        }
    }
}

/// A persisted record of one agent's attempted operation and its outcome.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Action {
    pub id: ActionId,
    pub agent_id: AgentId,
    /// Free-form tag, e.g. "summarize_document".
    pub action_type: String,
    pub resource_type: String,
    pub resource_id: String,
    pub status: ActionStatus,
    /// The evaluator's approval requirement when the record was created.
    pub requires_approval: bool,
    pub requested_at: DateTime<Utc>,
    /// Set only when the record reaches `completed` or `failed`.
    pub completed_at: Option<DateTime<Utc>>,
    /// Always equal to `agent_id`.
    pub requested_by: AgentId,
    pub approved_by: Option<String>,
    pub rejected_by: Option<String>,
    pub metadata: ActionMetadata,
    pub result: Option<String>,
}

/// One status change of an action, as written to the audit trail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionRecord {
    pub action_id: ActionId,
    pub agent_id: AgentId,
    /// `None` for the creation of the record.
    pub from: Option<ActionStatus>,
    pub to: ActionStatus,
    /// Human user id for approve/reject; absent for automatic transitions.
    pub actor: Option<String>,
    /// Free text, e.g. the captured error for a failure.
    pub note: Option<String>,
    pub timestamp: DateTime<Utc>,
}
