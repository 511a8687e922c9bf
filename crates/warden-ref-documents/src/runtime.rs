//! Wiring for the reference runtime.
//!
//! `DocumentRuntime` assembles the in-memory registry, setting store, action
//! store and audit log behind one `ActionLifecycle`, and keeps typed handles
//! to each so scenarios can inspect them afterwards.

use std::sync::Arc;

use tracing::debug;

use warden_audit::{HashChainAuditLog, InMemoryActionStore};
use warden_generate::{FallbackGenerator, VerifiedGenerator};
use warden_contracts::{action::ActionId, agent::AgentId, error::WardenResult};
use warden_core::{traits::ContentGenerator, ActionLifecycle, ActionRequest, DocumentInput, RequestOutcome};
use warden_policy::{InMemorySettingStore, WardenConfig};
use warden_registry::InMemoryAgentRegistry;

use crate::mock_data::get_document;

/// The reference configuration shipped with this crate.
pub const REFERENCE_CONFIG: &str = include_str!("../config/warden.toml");

pub struct DocumentRuntime {
    pub registry: Arc<InMemoryAgentRegistry>,
    pub settings: Arc<InMemorySettingStore>,
    pub actions: Arc<InMemoryActionStore>,
    pub audit: Arc<HashChainAuditLog>,
    pub lifecycle: ActionLifecycle,
}

impl DocumentRuntime {
    /// Build a runtime from `config` with the seed agents registered.
    pub fn new(config: &WardenConfig, generator: Arc<dyn ContentGenerator>) -> WardenResult<Self> {
        let registry = Arc::new(InMemoryAgentRegistry::with_seed_agents());
        let settings = Arc::new(InMemorySettingStore::from_config(config)?);
        let actions = Arc::new(InMemoryActionStore::new());
        let audit = Arc::new(HashChainAuditLog::new());

        let lifecycle = ActionLifecycle::new(
            registry.clone(),
            settings.clone(),
            actions.clone(),
            generator,
            audit.clone(),
        )
        .with_config(config.lifecycle_config());

        Ok(Self {
            registry,
            settings,
            actions,
            audit,
            lifecycle,
        })
    }

    /// A runtime over `REFERENCE_CONFIG`.
    pub fn reference(generator: Arc<dyn ContentGenerator>) -> WardenResult<Self> {
        let config = WardenConfig::from_toml_str(REFERENCE_CONFIG)?;
        Self::new(&config, generator)
    }

    /// A reference runtime over the canned generator. Needs no network.
    pub fn offline() -> WardenResult<Self> {
        Self::reference(offline_generator())
    }

    /// Ask for `action_type` on a mock document on behalf of `agent_id`.
    ///
    /// Unknown document ids are still evaluated (the default setting applies)
    /// with an empty body.
    pub async fn request(
        &self,
        agent_id: &str,
        action_type: &str,
        document_id: &str,
        reason: &str,
    ) -> WardenResult<RequestOutcome> {
        let document = match get_document(document_id) {
            Some(doc) => doc.to_input(),
            None => {
                debug!(document_id = %document_id, "document not in library; using an empty body");
                DocumentInput {
                    title: format!("Document {document_id}"),
                    content: String::new(),
                }
            }
        };

        self.lifecycle
            .request_action(ActionRequest {
                agent_id: AgentId::new(agent_id),
                action_type: action_type.to_string(),
                resource_type: "document".to_string(),
                resource_id: document_id.to_string(),
                document,
                reason: Some(reason.to_string()),
            })
            .await
    }
}

/// Deterministic generator used by the scenarios and their tests.
pub fn offline_generator() -> Arc<dyn ContentGenerator> {
    Arc::new(VerifiedGenerator::new(FallbackGenerator::new()))
}

// ── Console helpers ───────────────────────────────────────────────────────────

/// Print the outcome of one request in the scenario layout.
pub fn print_outcome(outcome: &RequestOutcome) {
    match outcome {
        RequestOutcome::Declined { decision, reason } => {
            println!("  Decision:               DENIED ({})", decision.permission_level);
            println!("  Reason:                 {}", reason);
            println!("  Action record:          none");
        }
        RequestOutcome::Pending { decision, action } => {
            println!("  Decision:               PERMITTED ({}), approval required", decision.permission_level);
            println!("  Action record:          {} [{}]", action.id, action.status);
            if let Some(result) = action.metadata.generated_result() {
                println!("  Generated (held):       {}", preview(result));
            }
        }
        RequestOutcome::Completed { decision, action } => {
            println!("  Decision:               PERMITTED ({}), no approval", decision.permission_level);
            println!("  Action record:          {} [{}]", action.id, action.status);
            if let Some(result) = &action.result {
                println!("  Result:                 {}", preview(result));
            }
        }
        RequestOutcome::Failed { action, error } => {
            println!("  Decision:               PERMITTED");
            println!("  Action record:          {} [{}]", action.id, action.status);
            println!("  Error:                  {}", error);
        }
    }
}

/// Print the audit chain status line shared by every scenario.
pub fn print_audit_summary(audit: &HashChainAuditLog) {
    println!(
        "  Audit chain integrity:  {} ({} event(s) in chain)",
        if audit.verify_integrity() { "VERIFIED" } else { "FAILED" },
        audit.len()
    );
}

/// Print the audit trail of one action, oldest first.
pub fn print_trail(audit: &HashChainAuditLog, id: &ActionId) -> WardenResult<()> {
    for event in audit.events_for(id)? {
        let record = &event.record;
        let from = record.from.map(|s| s.as_str()).unwrap_or("(new)");
        let actor = record.actor.as_deref().unwrap_or("system");
        println!(
            "    #{:<3} {:>9} -> {:<9} by {:<10} {}",
            event.sequence,
            from,
            record.to.as_str(),
            actor,
            event.this_hash.get(..12).unwrap_or(&event.this_hash)
        );
    }
    Ok(())
}

fn preview(text: &str) -> String {
    let first_line = text.lines().next().unwrap_or("");
    let mut chars = first_line.chars();
    let head: String = chars.by_ref().take(80).collect();
    if chars.next().is_some() {
        format!("{head}...")
    } else {
        head
    }
}
