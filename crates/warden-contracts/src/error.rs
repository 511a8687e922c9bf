//! Runtime error types for the warden permission runtime.
//!
//! Permission denials are not errors: they are returned as `Decision` data.
//! Everything here is a failure the caller has to handle.

use thiserror::Error;

use crate::action::ActionStatus;

/// The unified error type for the warden crates.
#[derive(Debug, Error)]
pub enum WardenError {
    /// A mutating call named an agent the registry does not know.
    #[error("agent '{agent_id}' not found")]
    AgentNotFound { agent_id: String },

    /// A transition named an action the store does not know.
    #[error("action '{action_id}' not found")]
    ActionNotFound { action_id: String },

    /// The requested transition is not legal from the action's current state.
    #[error("action '{action_id}' cannot be {attempted} while {from}")]
    InvalidTransition {
        action_id: String,
        from: ActionStatus,
        attempted: String,
    },

    /// The content-generation collaborator returned an error.
    #[error("content generation failed: {reason}")]
    GenerationFailed { reason: String },

    /// The content-generation collaborator did not answer in time.
    #[error("content generation timed out after {millis}ms")]
    GenerationTimedOut { millis: u64 },

    /// The human reviewer may not approve or reject this action.
    #[error("user '{user_id}' with role '{role}' may not review this action")]
    ApproverNotAuthorized { user_id: String, role: String },

    /// A required configuration value is missing or invalid.
    #[error("configuration error: {reason}")]
    ConfigError { reason: String },

    /// A repository could not read or write its state.
    #[error("storage error: {reason}")]
    StorageError { reason: String },

    /// The audit sink could not persist a transition record.
    ///
    /// Treated as fatal for the transition: it is not committed.
    #[error("audit write failed: {reason}")]
    AuditWriteFailed { reason: String },
}

impl WardenError {
    /// True for the upstream generation failures that end in a `failed` record.
    pub fn is_generation_failure(&self) -> bool {
        matches!(
            self,
            WardenError::GenerationFailed { .. } | WardenError::GenerationTimedOut { .. }
        )
    }
}

/// Convenience alias used throughout the warden crates.
pub type WardenResult<T> = Result<T, WardenError>;
