//! Scenario 3: Denials
//!
//! Every refusal path of the evaluator, driven through the full request
//! pipeline. A denied request is answered with its reason and leaves no
//! action record and no audit event behind.
//!
//! Checks run in a fixed order (agent, setting, capability, level), so each
//! sub-case below fails at exactly one of them.

use std::sync::Arc;

use warden_contracts::{agent::AgentId, error::WardenResult};
use warden_core::{
    traits::{AgentRepository, ContentGenerator},
    RequestOutcome,
};

use crate::runtime::{print_audit_summary, print_outcome, DocumentRuntime};

/// (label, agent, action, document)
const CASES: [(&str, &str, &str, &str); 4] = [
    ("unregistered agent", "ai-ghost-9", "read", "3"),
    ("agent lacks the capability", "ai-assistant-1", "delete", "2"),
    ("level forbids the action", "ai-editor-1", "update", "3"),
    ("action outside the vocabulary", "ai-editor-1", "publish", "2"),
];

pub async fn run_scenario(generator: Arc<dyn ContentGenerator>) -> WardenResult<()> {
    println!("=== Scenario 3: Denials ===");
    println!();

    let runtime = DocumentRuntime::reference(generator)?;

    for (label, agent, action, document) in CASES {
        println!("  Case: {label}");
        println!("  {agent} -> {action} on document {document}");
        let outcome = runtime.request(agent, action, document, "denial walkthrough").await?;
        print_outcome(&outcome);
        report(&outcome);
        println!();
    }

    // ── Deactivated agent ────────────────────────────────────────────────────
    println!("  Case: deactivated agent");
    let analyzer = AgentId::new("ai-analyzer-1");
    let toggled = runtime.registry.toggle_active(&analyzer)?;
    println!("  ai-analyzer-1 is_active = {}", toggled.is_active);
    let outcome = runtime
        .request("ai-analyzer-1", "summarize_document", "3", "denial walkthrough")
        .await?;
    print_outcome(&outcome);
    report(&outcome);

    runtime.registry.toggle_active(&analyzer)?;
    let decision = runtime
        .lifecycle
        .evaluate(&analyzer, "summarize_document", "document", Some("3"));
    println!(
        "  After reactivation:     {}",
        if decision.permitted { "PERMITTED" } else { "DENIED" }
    );
    println!();

    let records = runtime.lifecycle.list_actions()?.len();
    println!("  Action records:         {records}");
    print_audit_summary(&runtime.audit);
    println!();
    println!("  Scenario 3 complete.");
    println!();

    Ok(())
}

fn report(outcome: &RequestOutcome) {
    match outcome {
        RequestOutcome::Declined { .. } => println!("  RESULT: Denied, no record (expected)"),
        other => println!("  UNEXPECTED: {}", other.message()),
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use warden_contracts::permission::{DenialReason, PermissionLevel};

    use crate::runtime::offline_generator;

    use warden_contracts::permission::Decision;

    async fn denial_of(runtime: &DocumentRuntime, agent: &str, action: &str, doc: &str) -> Decision {
        match runtime.request(agent, action, doc, "test").await.unwrap() {
            RequestOutcome::Declined { decision, .. } => {
                assert!(!decision.permitted);
                decision
            }
            other => panic!("expected Declined, got {other:?}"),
        }
    }

    /// Denials decided before a level applies use the uniform no-access shape.
    fn assert_uniform(decision: &Decision) {
        assert!(decision.requires_approval);
        assert_eq!(decision.permission_level, PermissionLevel::NoAccess);
    }

    #[tokio::test]
    async fn scenario_runs_to_completion() {
        run_scenario(offline_generator()).await.unwrap();
    }

    #[tokio::test]
    async fn each_case_fails_at_its_own_check() {
        let runtime = DocumentRuntime::offline().unwrap();

        let unknown = denial_of(&runtime, "ai-ghost-9", "read", "3").await;
        assert_uniform(&unknown);
        assert!(matches!(unknown.denial, Some(DenialReason::UnknownAgent { .. })));

        let missing = denial_of(&runtime, "ai-assistant-1", "delete", "2").await;
        assert_uniform(&missing);
        assert!(matches!(missing.denial, Some(DenialReason::MissingCapability { .. })));

        let unlisted = denial_of(&runtime, "ai-editor-1", "publish", "2").await;
        assert_uniform(&unlisted);
        assert!(matches!(unlisted.denial, Some(DenialReason::UnknownAction { .. })));

        assert!(runtime.lifecycle.list_actions().unwrap().is_empty());
        assert!(runtime.audit.is_empty());
    }

    #[tokio::test]
    async fn level_denial_reports_resolved_setting() {
        let runtime = DocumentRuntime::offline().unwrap();

        let forbidden = denial_of(&runtime, "ai-editor-1", "update", "3").await;
        assert_eq!(forbidden.permission_level, PermissionLevel::ReadOnly);
        assert!(!forbidden.requires_approval);
        assert!(matches!(
            forbidden.denial,
            Some(DenialReason::LevelForbids { level: PermissionLevel::ReadOnly, .. })
        ));
        assert!(runtime.lifecycle.list_actions().unwrap().is_empty());
    }

    #[tokio::test]
    async fn deactivation_is_reversible() {
        let runtime = DocumentRuntime::offline().unwrap();
        let analyzer = AgentId::new("ai-analyzer-1");

        runtime.registry.toggle_active(&analyzer).unwrap();
        let inactive = denial_of(&runtime, "ai-analyzer-1", "summarize_document", "3").await;
        assert_uniform(&inactive);
        assert!(matches!(inactive.denial, Some(DenialReason::AgentInactive { .. })));

        runtime.registry.toggle_active(&analyzer).unwrap();
        let outcome = runtime
            .request("ai-analyzer-1", "summarize_document", "3", "test")
            .await
            .unwrap();
        assert!(matches!(outcome, RequestOutcome::Completed { .. }));
    }
}
