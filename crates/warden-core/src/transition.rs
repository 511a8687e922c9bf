//! Action state machine.
//!
//! Each function checks the current status, mutates the record in place and
//! returns the `TransitionRecord` to append to the audit trail. On an illegal
//! transition the record is not touched and `InvalidTransition` is returned.
//!
//! | from     | op       | to        | sets                                |
//! |----------|----------|-----------|-------------------------------------|
//! | pending  | approve  | approved  | `approved_by`                       |
//! | approved | finalize | completed | `completed_at`, `result`            |
//! | pending  | reject   | rejected  | `rejected_by`                       |
//! | pending  | complete | completed | `completed_at`, `result` (auto path)|
//! | pending, approved | fail | failed | `completed_at`, error metadata  |

use chrono::{DateTime, Utc};

use warden_contracts::{
    action::{Action, ActionStatus, GeneratedContent, TransitionRecord},
    error::{WardenError, WardenResult},
};

fn invalid(action: &Action, attempted: &str) -> WardenError {
    WardenError::InvalidTransition {
        action_id: action.id.to_string(),
        from: action.status,
        attempted: attempted.to_string(),
    }
}

fn record(
    action: &Action,
    from: ActionStatus,
    actor: Option<&str>,
    note: Option<String>,
    now: DateTime<Utc>,
) -> TransitionRecord {
    TransitionRecord {
        action_id: action.id.clone(),
        agent_id: action.agent_id.clone(),
        from: Some(from),
        to: action.status,
        actor: actor.map(str::to_string),
        note,
        timestamp: now,
    }
}

/// The audit entry for a freshly created record.
pub fn created(action: &Action) -> TransitionRecord {
    TransitionRecord {
        action_id: action.id.clone(),
        agent_id: action.agent_id.clone(),
        from: None,
        to: action.status,
        actor: None,
        note: Some(format!(
            "{} on {} '{}'",
            action.action_type, action.resource_type, action.resource_id
        )),
        timestamp: action.requested_at,
    }
}

/// pending → approved. Does not set `completed_at`.
pub fn approve(action: &mut Action, user_id: &str, now: DateTime<Utc>) -> WardenResult<TransitionRecord> {
    if action.status != ActionStatus::Pending {
        return Err(invalid(action, "approved"));
    }
    action.status = ActionStatus::Approved;
    action.approved_by = Some(user_id.to_string());
    Ok(record(action, ActionStatus::Pending, Some(user_id), None, now))
}

/// approved → completed.
pub fn finalize(
    action: &mut Action,
    result: Option<String>,
    now: DateTime<Utc>,
) -> WardenResult<TransitionRecord> {
    if action.status != ActionStatus::Approved {
        return Err(invalid(action, "finalized"));
    }
    action.status = ActionStatus::Completed;
    action.completed_at = Some(now);
    action.result = result;
    Ok(record(action, ActionStatus::Approved, None, None, now))
}

/// pending → rejected. Terminal.
pub fn reject(action: &mut Action, user_id: &str, now: DateTime<Utc>) -> WardenResult<TransitionRecord> {
    if action.status != ActionStatus::Pending {
        return Err(invalid(action, "rejected"));
    }
    action.status = ActionStatus::Rejected;
    action.rejected_by = Some(user_id.to_string());
    Ok(record(action, ActionStatus::Pending, Some(user_id), None, now))
}

/// pending → completed without a human actor.
///
/// Only legal for records created without an approval requirement; an
/// approval-path record reaches `completed` only through `approved`.
pub fn complete(
    action: &mut Action,
    result: Option<String>,
    now: DateTime<Utc>,
) -> WardenResult<TransitionRecord> {
    if action.status != ActionStatus::Pending {
        return Err(invalid(action, "completed"));
    }
    if action.requires_approval {
        return Err(invalid(action, "completed without approval"));
    }
    action.status = ActionStatus::Completed;
    action.completed_at = Some(now);
    action.result = result;
    Ok(record(action, ActionStatus::Pending, None, None, now))
}

/// pending|approved → failed, capturing `error` in the metadata. Terminal.
pub fn fail(action: &mut Action, error: &str, now: DateTime<Utc>) -> WardenResult<TransitionRecord> {
    if action.status.is_terminal() {
        return Err(invalid(action, "failed"));
    }
    let from = action.status;
    action.status = ActionStatus::Failed;
    action.completed_at = Some(now);
    action.metadata = action.metadata.with_error(error);
    Ok(record(action, from, None, Some(error.to_string()), now))
}

/// Attach generator output to a record still awaiting review.
///
/// Not a status change, so nothing is audited.
pub fn attach_output(action: &mut Action, content: GeneratedContent) -> WardenResult<()> {
    if action.status != ActionStatus::Pending {
        return Err(invalid(action, "annotated with generated output"));
    }
    action.metadata = action.metadata.with_generated(content);
    Ok(())
}

// ── Tests ────────────────────────────────────────────────────────────────────
