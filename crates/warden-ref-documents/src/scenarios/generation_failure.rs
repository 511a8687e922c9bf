//! Scenario 4: Generation Failure
//!
//! The content generator is an untrusted collaborator. A permitted request
//! whose generation errors or outlives the configured timeout still leaves a
//! record: it moves pending → failed with the error in its metadata, and no
//! result is stored.
//!
//! The runtime here is configured with a one-second generation timeout.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use warden_contracts::{
    action::GeneratedContent,
    error::{WardenError, WardenResult},
};
use warden_core::{traits::ContentGenerator, RequestOutcome};
use warden_policy::WardenConfig;

use crate::runtime::{print_audit_summary, print_outcome, print_trail, DocumentRuntime, REFERENCE_CONFIG};

/// Answers every call with an upstream error.
pub struct UnavailableGenerator;

#[async_trait]
impl ContentGenerator for UnavailableGenerator {
    async fn generate(
        &self,
        _action_type: &str,
        _title: &str,
        _content: &str,
    ) -> WardenResult<GeneratedContent> {
        Err(WardenError::GenerationFailed {
            reason: "upstream returned HTTP 503".to_string(),
        })
    }
}

/// Never answers within any reasonable timeout.
pub struct StalledGenerator;

#[async_trait]
impl ContentGenerator for StalledGenerator {
    async fn generate(
        &self,
        _action_type: &str,
        _title: &str,
        _content: &str,
    ) -> WardenResult<GeneratedContent> {
        tokio::time::sleep(Duration::from_secs(3600)).await;
        Err(WardenError::GenerationFailed {
            reason: "stalled generator woke up".to_string(),
        })
    }
}

fn runtime_with(generator: Arc<dyn ContentGenerator>) -> WardenResult<DocumentRuntime> {
    let mut config = WardenConfig::from_toml_str(REFERENCE_CONFIG)?;
    config.runtime.generation_timeout_secs = 1;
    DocumentRuntime::new(&config, generator)
}

pub async fn run_scenario() -> WardenResult<()> {
    println!("=== Scenario 4: Generation Failure ===");
    println!();

    let cases: [(&str, Arc<dyn ContentGenerator>); 2] = [
        ("Sub-case A: generator returns an error", Arc::new(UnavailableGenerator)),
        ("Sub-case B: generator stalls past the 1s timeout", Arc::new(StalledGenerator)),
    ];

    for (label, generator) in cases {
        let runtime = runtime_with(generator)?;

        println!("  {label}");
        println!("  ai-analyzer-1 -> summarize_document on document 3");
        let outcome = runtime
            .request("ai-analyzer-1", "summarize_document", "3", "Weekly digest")
            .await?;
        print_outcome(&outcome);

        match &outcome {
            RequestOutcome::Failed { action, .. } => {
                println!(
                    "  Stored error:           {}",
                    action.metadata.error().unwrap_or("none")
                );
                print_trail(&runtime.audit, &action.id)?;
                println!("  RESULT: Failed, error captured (expected)");
            }
            other => println!("  UNEXPECTED: {}", other.message()),
        }
        print_audit_summary(&runtime.audit);
        println!();
    }

    println!("  Scenario 4 complete.");
    println!();

    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────────
