//! Scenario 1: Supervised Edit
//!
//! Document 1 ("Getting Started Guide") is `suggest_only` with approval
//! required, and only the `admin` role is listed as a reviewer.
//!
//! Sub-case A: the Content Editor agent asks to improve the document. The
//! generated rewrite is held on a pending record. A user with the `editor`
//! role is refused as reviewer; an admin approves, which executes the action
//! in one step. A second approval is rejected as an invalid transition.
//!
//! Sub-case B: the Document Assistant suggests an update through its
//! `suggest_edits` capability. The admin rejects it, and a later attempt to
//! approve the rejected record fails.

use std::sync::Arc;

use warden_contracts::{action::Action, error::WardenResult};
use warden_core::{traits::ContentGenerator, RequestOutcome};

use crate::runtime::{print_audit_summary, print_outcome, print_trail, DocumentRuntime};

const DOCUMENT_ID: &str = "1";
const ADMIN_USER: &str = "admin-id";
const EDITOR_USER: &str = "editor-id";

pub async fn run_scenario(generator: Arc<dyn ContentGenerator>) -> WardenResult<()> {
    println!("=== Scenario 1: Supervised Edit ===");
    println!();

    let runtime = DocumentRuntime::reference(generator)?;

    // ── Sub-case A: improve, refused reviewer, approve ───────────────────────
    {
        println!("  Sub-case A: Content Editor improves a suggest_only document");
        println!("  Agent: ai-editor-1 [read_documents, edit_documents, generate_content]");
        println!("  Document: 1 (suggest_only, approval required, reviewers: admin)");
        println!();

        let outcome = runtime
            .request("ai-editor-1", "improve_document", DOCUMENT_ID, "Tighten the introduction")
            .await?;
        print_outcome(&outcome);

        let Some(action) = pending(&outcome) else {
            println!("  UNEXPECTED: improve_document was not held for review");
            return Ok(());
        };

        if let Some(changes) = action.metadata.changes() {
            println!("  Proposed title:         {}", changes.title);
        }

        match runtime
            .lifecycle
            .approve_action_as(&action.id, EDITOR_USER, "editor")
        {
            Err(e) => println!("  Editor review:          REFUSED ({e})"),
            Ok(_) => println!("  UNEXPECTED: editor was allowed to approve"),
        }

        let approved = runtime
            .lifecycle
            .approve_action_as(&action.id, ADMIN_USER, "admin")?;
        println!(
            "  Admin review:           APPROVED, record now [{}] (approved_by = {})",
            approved.status,
            approved.approved_by.as_deref().unwrap_or("-")
        );

        match runtime.lifecycle.approve_action(&action.id, ADMIN_USER) {
            Err(e) => println!("  Second approval:        {e}"),
            Ok(_) => println!("  UNEXPECTED: action approved twice"),
        }

        println!("  Audit trail for {}:", action.id);
        print_trail(&runtime.audit, &action.id)?;
        println!("  RESULT: Completed after review (expected)");
        println!();
    }

    // ── Sub-case B: suggestion rejected ──────────────────────────────────────
    {
        println!("  Sub-case B: Document Assistant suggests an update, admin rejects");
        println!("  Agent: ai-assistant-1 [read_documents, suggest_edits, summarize_content]");
        println!();

        let outcome = runtime
            .request("ai-assistant-1", "update", DOCUMENT_ID, "Fix outdated setup steps")
            .await?;
        print_outcome(&outcome);

        let Some(action) = pending(&outcome) else {
            println!("  UNEXPECTED: update was not held for review");
            return Ok(());
        };

        let rejected = runtime
            .lifecycle
            .reject_action_as(&action.id, ADMIN_USER, "admin")?;
        println!(
            "  Admin review:           REJECTED, record now [{}] (result: {})",
            rejected.status,
            rejected.result.as_deref().unwrap_or("none")
        );

        match runtime.lifecycle.approve_action(&action.id, ADMIN_USER) {
            Err(e) => println!("  Late approval:          {e}"),
            Ok(_) => println!("  UNEXPECTED: rejected action was approved"),
        }

        println!("  RESULT: Rejected, nothing executed (expected)");
        println!();
    }

    let pending_left = runtime.lifecycle.list_pending_actions()?.len();
    println!("  Pending actions left:   {pending_left}");
    print_audit_summary(&runtime.audit);
    println!();
    println!("  Scenario 1 complete.");
    println!();

    Ok(())
}

fn pending(outcome: &RequestOutcome) -> Option<&Action> {
    match outcome {
        RequestOutcome::Pending { action, .. } => Some(action),
        _ => None,
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use warden_contracts::{action::ActionStatus, error::WardenError};

    use crate::runtime::offline_generator;

    async fn pending_improvement(runtime: &DocumentRuntime) -> Action {
        let outcome = runtime
            .request("ai-editor-1", "improve_document", DOCUMENT_ID, "test")
            .await
            .unwrap();
        pending(&outcome).cloned().expect("improve_document should be pending")
    }

    #[tokio::test]
    async fn scenario_runs_to_completion() {
        run_scenario(offline_generator()).await.unwrap();
    }

    #[tokio::test]
    async fn improvement_is_held_with_proposed_changes() {
        let runtime = DocumentRuntime::offline().unwrap();
        let action = pending_improvement(&runtime).await;

        assert_eq!(action.status, ActionStatus::Pending);
        assert!(action.requires_approval);
        assert!(action.result.is_none());
        let changes = action.metadata.changes().unwrap();
        assert_eq!(changes.title, "Improved: Getting Started Guide");
    }

    #[tokio::test]
    async fn editor_role_is_not_a_listed_reviewer() {
        let runtime = DocumentRuntime::offline().unwrap();
        let action = pending_improvement(&runtime).await;

        let err = runtime
            .lifecycle
            .approve_action_as(&action.id, EDITOR_USER, "editor")
            .unwrap_err();
        assert!(matches!(err, WardenError::ApproverNotAuthorized { .. }));

        let stored = runtime.lifecycle.get_action(&action.id).unwrap().unwrap();
        assert_eq!(stored.status, ActionStatus::Pending);
    }

    #[tokio::test]
    async fn admin_approval_completes_with_generated_result() {
        let runtime = DocumentRuntime::offline().unwrap();
        let action = pending_improvement(&runtime).await;

        let done = runtime
            .lifecycle
            .approve_action_as(&action.id, ADMIN_USER, "admin")
            .unwrap();
        assert_eq!(done.status, ActionStatus::Completed);
        assert_eq!(done.approved_by.as_deref(), Some(ADMIN_USER));
        assert!(done.completed_at.is_some());
        assert_eq!(done.result.as_deref(), action.metadata.generated_result());

        // created, approved, completed
        assert_eq!(runtime.audit.events_for(&action.id).unwrap().len(), 3);
        assert!(runtime.audit.verify_integrity());
    }

    #[tokio::test]
    async fn rejected_suggestion_cannot_be_approved_later() {
        let runtime = DocumentRuntime::offline().unwrap();
        let outcome = runtime
            .request("ai-assistant-1", "update", DOCUMENT_ID, "test")
            .await
            .unwrap();
        let action = pending(&outcome).cloned().unwrap();

        let rejected = runtime
            .lifecycle
            .reject_action_as(&action.id, ADMIN_USER, "admin")
            .unwrap();
        assert_eq!(rejected.status, ActionStatus::Rejected);
        assert!(rejected.result.is_none());

        let err = runtime
            .lifecycle
            .approve_action(&action.id, ADMIN_USER)
            .unwrap_err();
        assert!(matches!(err, WardenError::InvalidTransition { .. }));
    }
}
