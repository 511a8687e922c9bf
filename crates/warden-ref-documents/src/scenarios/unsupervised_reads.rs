//! Scenario 2: Unsupervised Reads
//!
//! Actions that the resolved setting permits without approval complete in a
//! single request: the record goes pending → completed and carries the
//! generated result.
//!
//! Sub-case A: document 3 has no setting of its own, so the `read_only`
//! default applies. Reads, analyses and summaries never need review there.
//! Sub-case B: document 2 is `full_access` without approval, so even a
//! mutating update from the Content Editor completes immediately.

use std::sync::Arc;

use warden_contracts::error::WardenResult;
use warden_core::{traits::ContentGenerator, RequestOutcome};

use crate::runtime::{print_audit_summary, print_outcome, DocumentRuntime};

pub async fn run_scenario(generator: Arc<dyn ContentGenerator>) -> WardenResult<()> {
    println!("=== Scenario 2: Unsupervised Reads ===");
    println!();

    let runtime = DocumentRuntime::reference(generator)?;

    // ── Sub-case A: default read_only document ───────────────────────────────
    println!("  Sub-case A: read-class actions on document 3 (default read_only)");
    println!();

    let read_class = [
        ("ai-assistant-1", "read", "Open the user manual"),
        ("ai-analyzer-1", "analyze_document", "Classify the manual"),
        ("ai-analyzer-1", "summarize_document", "Summary for the release notes"),
    ];
    for (agent, action, reason) in read_class {
        println!("  {agent} -> {action}");
        let outcome = runtime.request(agent, action, "3", reason).await?;
        print_outcome(&outcome);
        report(&outcome);
        println!();
    }

    // ── Sub-case B: full_access document ─────────────────────────────────────
    println!("  Sub-case B: update on document 2 (full_access, no approval)");
    println!("  ai-editor-1 -> update");
    let outcome = runtime
        .request("ai-editor-1", "update", "2", "Refresh password rotation rules")
        .await?;
    print_outcome(&outcome);
    report(&outcome);
    println!();

    let actions = runtime.lifecycle.list_actions()?;
    let pending = runtime.lifecycle.list_pending_actions()?;
    println!(
        "  Action records:         {} total, {} awaiting review",
        actions.len(),
        pending.len()
    );
    print_audit_summary(&runtime.audit);
    println!();
    println!("  Scenario 2 complete.");
    println!();

    Ok(())
}

fn report(outcome: &RequestOutcome) {
    match outcome {
        RequestOutcome::Completed { .. } => println!("  RESULT: Completed without review (expected)"),
        other => println!("  UNEXPECTED: {}", other.message()),
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
