//! The action lifecycle manager.
//!
//! `request_action` runs the full pipeline for an agent request:
//!
//!   Evaluate → [record pending] → Generate (bounded) → Complete | await review | Fail
//!
//! A denial never creates a record. Once a record exists, every outcome is
//! written back to it, so a generation failure or timeout ends in `failed`
//! rather than a lost request. Human review goes through `approve_action` and
//! `reject_action`.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use warden_contracts::{
    action::{Action, ActionId, ActionMetadata, ActionStatus, TransitionRecord},
    agent::{Agent, AgentId},
    error::{WardenError, WardenResult},
    permission::Decision,
};

use crate::{
    evaluator::PermissionEvaluator,
    rbac,
    traits::{ActionRepository, AgentRepository, AuditSink, ContentGenerator, SettingRepository},
    transition,
};

/// Tunables for the lifecycle manager.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LifecycleConfig {
    /// Upper bound for one content-generation call.
    pub generation_timeout: Duration,
}

impl Default for LifecycleConfig {
    fn default() -> Self {
        Self {
            generation_timeout: Duration::from_secs(30),
        }
    }
}

/// The document an action operates on, as handed to the content generator.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DocumentInput {
    pub title: String,
    pub content: String,
}

/// Everything a caller supplies when an agent asks to act.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionRequest {
    pub agent_id: AgentId,
    pub action_type: String,
    pub resource_type: String,
    pub resource_id: String,
    pub document: DocumentInput,
    pub reason: Option<String>,
}

/// What happened to a request.
#[derive(Debug, Clone)]
pub enum RequestOutcome {
    /// Permission was denied. No record exists.
    Declined { decision: Decision, reason: String },

    /// Generated output is waiting for human review.
    Pending { decision: Decision, action: Action },

    /// The action ran without supervision.
    Completed { decision: Decision, action: Action },

    /// Permission was granted but generation failed; the record is `failed`.
    Failed { action: Action, error: String },
}

impl RequestOutcome {
    pub fn action(&self) -> Option<&Action> {
        match self {
            RequestOutcome::Declined { .. } => None,
            RequestOutcome::Pending { action, .. }
            | RequestOutcome::Completed { action, .. }
            | RequestOutcome::Failed { action, .. } => Some(action),
        }
    }

    /// True when the requested content was produced.
    pub fn is_success(&self) -> bool {
        matches!(
            self,
            RequestOutcome::Pending { .. } | RequestOutcome::Completed { .. }
        )
    }

    /// A human-readable summary for the surrounding application.
    pub fn message(&self) -> String {
        match self {
            RequestOutcome::Declined { reason, .. } => {
                format!("AI agent does not have permission for this action: {reason}")
            }
            RequestOutcome::Pending { .. } => {
                "Action request created and pending approval".to_string()
            }
            RequestOutcome::Completed { .. } => "Action completed successfully".to_string(),
            RequestOutcome::Failed { error, .. } => format!("AI processing error: {error}"),
        }
    }
}

/// Drives action records through their state machine.
///
/// Every status change is committed through `ActionRepository::modify`,
/// together with its audit records, so concurrent reviewers on the same
/// action see exactly one winner.
pub struct ActionLifecycle {
    evaluator: PermissionEvaluator,
    agents: Arc<dyn AgentRepository>,
    settings: Arc<dyn SettingRepository>,
    actions: Arc<dyn ActionRepository>,
    generator: Arc<dyn ContentGenerator>,
    audit: Arc<dyn AuditSink>,
    config: LifecycleConfig,
}

impl ActionLifecycle {
    pub fn new(
        agents: Arc<dyn AgentRepository>,
        settings: Arc<dyn SettingRepository>,
        actions: Arc<dyn ActionRepository>,
        generator: Arc<dyn ContentGenerator>,
        audit: Arc<dyn AuditSink>,
    ) -> Self {
        Self {
            evaluator: PermissionEvaluator::new(Arc::clone(&agents), Arc::clone(&settings)),
            agents,
            settings,
            actions,
            generator,
            audit,
            config: LifecycleConfig::default(),
        }
    }

    pub fn with_config(mut self, config: LifecycleConfig) -> Self {
        self.config = config;
        self
    }

    pub fn evaluator(&self) -> &PermissionEvaluator {
        &self.evaluator
    }

    /// Shorthand for `evaluator().evaluate(...)`.
    pub fn evaluate(
        &self,
        agent_id: &AgentId,
        action: &str,
        resource_type: &str,
        resource_id: Option<&str>,
    ) -> Decision {
        self.evaluator
            .evaluate(agent_id, action, resource_type, resource_id)
    }

    // ── Request pipeline ─────────────────────────────────────────────────────

    /// Evaluate, record and execute one agent request.
    ///
    /// # Errors
    ///
    /// Denials and generation failures are NOT errors; they come back as
    /// `Declined` and `Failed`. `Err` means a repository or audit write failed.
    pub async fn request_action(&self, request: ActionRequest) -> WardenResult<RequestOutcome> {
        info!(
            agent_id = %request.agent_id,
            action_type = %request.action_type,
            resource_type = %request.resource_type,
            resource_id = %request.resource_id,
            "agent action requested"
        );

        // ── Step 1: permission ───────────────────────────────────────────────
        let decision = self.evaluator.evaluate(
            &request.agent_id,
            &request.action_type,
            &request.resource_type,
            Some(&request.resource_id),
        );

        if !decision.permitted {
            let reason = decision
                .reason()
                .unwrap_or_else(|| "permission denied".to_string());
            return Ok(RequestOutcome::Declined { decision, reason });
        }

        // ── Step 2: create the record ────────────────────────────────────────
        let action = self.create_record(&request, &decision)?;

        // ── Step 3: bounded content generation ───────────────────────────────
        let generation = tokio::time::timeout(
            self.config.generation_timeout,
            self.generator.generate(
                &request.action_type,
                &request.document.title,
                &request.document.content,
            ),
        )
        .await;

        let content = match generation {
            Ok(Ok(content)) => content,
            Ok(Err(e)) => return self.record_failure(&action.id, e),
            Err(_elapsed) => {
                let millis = self.config.generation_timeout.as_millis();
                let e = WardenError::GenerationTimedOut {
                    millis: u64::try_from(millis).unwrap_or(u64::MAX),
                };
                return self.record_failure(&action.id, e);
            }
        };

        // ── Step 4: auto-complete or wait for review ─────────────────────────
        if decision.requires_approval {
            let action = self.actions.modify(&action.id, &mut |a: &mut Action| {
                transition::attach_output(a, content.clone())
            })?;
            info!(action_id = %action.id, "action awaiting approval");
            Ok(RequestOutcome::Pending { decision, action })
        } else {
            let result = Some(content.result.clone());
            let action = self.commit(&action.id, |a, now| {
                transition::attach_output(a, content.clone())?;
                Ok(vec![transition::complete(a, result.clone(), now)?])
            })?;
            info!(action_id = %action.id, "action completed without approval");
            Ok(RequestOutcome::Completed { decision, action })
        }
    }

    fn create_record(&self, request: &ActionRequest, decision: &Decision) -> WardenResult<Action> {
        let action = Action {
            id: ActionId::generate(),
            agent_id: request.agent_id.clone(),
            action_type: request.action_type.clone(),
            resource_type: request.resource_type.clone(),
            resource_id: request.resource_id.clone(),
            status: ActionStatus::Pending,
            requires_approval: decision.requires_approval,
            requested_at: Utc::now(),
            completed_at: None,
            requested_by: request.agent_id.clone(),
            approved_by: None,
            rejected_by: None,
            metadata: ActionMetadata::Reason {
                reason: request.reason.clone(),
            },
            result: None,
        };

        // Stored and audited together, or not at all.
        let audit = &self.audit;
        let action = self.actions.insert_with(action, &mut |a: &Action| {
            audit.record(&[transition::created(a)])
        })?;
        debug!(action_id = %action.id, "action record created");
        Ok(action)
    }

    fn record_failure(&self, id: &ActionId, error: WardenError) -> WardenResult<RequestOutcome> {
        let message = error.to_string();
        warn!(action_id = %id, error = %message, "content generation failed");
        let action = self.fail_action(id, &message)?;
        Ok(RequestOutcome::Failed {
            action,
            error: message,
        })
    }

    // ── Transitions ──────────────────────────────────────────────────────────

    /// Approve a pending action and execute it.
    ///
    /// Applies pending → approved → completed in one commit; both transitions
    /// are written to the audit trail. The result is the generated output
    /// stored on the record.
    pub fn approve_action(&self, id: &ActionId, user_id: &str) -> WardenResult<Action> {
        let action = self.commit(id, |a, now| {
            let approved = transition::approve(a, user_id, now)?;
            let result = a.metadata.generated_result().map(str::to_string);
            let completed = transition::finalize(a, result, now)?;
            Ok(vec![approved, completed])
        })?;
        info!(action_id = %id, user_id = %user_id, "action approved and executed");
        Ok(action)
    }

    /// Like `approve_action`, after checking that `role` may review the action.
    pub fn approve_action_as(&self, id: &ActionId, user_id: &str, role: &str) -> WardenResult<Action> {
        self.authorize_reviewer(id, user_id, role, rbac::actions::APPROVE)?;
        self.approve_action(id, user_id)
    }

    /// Reject a pending action. Terminal.
    pub fn reject_action(&self, id: &ActionId, user_id: &str) -> WardenResult<Action> {
        let action = self.commit(id, |a, now| Ok(vec![transition::reject(a, user_id, now)?]))?;
        info!(action_id = %id, user_id = %user_id, "action rejected");
        Ok(action)
    }

    /// Like `reject_action`, after checking that `role` may review the action.
    pub fn reject_action_as(&self, id: &ActionId, user_id: &str, role: &str) -> WardenResult<Action> {
        self.authorize_reviewer(id, user_id, role, rbac::actions::REJECT)?;
        self.reject_action(id, user_id)
    }

    /// Mark a non-terminal action as failed, recording `error` in its metadata.
    pub fn fail_action(&self, id: &ActionId, error: &str) -> WardenResult<Action> {
        let action = self.commit(id, |a, now| Ok(vec![transition::fail(a, error, now)?]))?;
        warn!(action_id = %id, error = %error, "action failed");
        Ok(action)
    }

    /// approved → completed, for callers that approve and execute separately.
    pub fn finalize_action(&self, id: &ActionId, result: Option<String>) -> WardenResult<Action> {
        self.commit(id, |a, now| Ok(vec![transition::finalize(a, result.clone(), now)?]))
    }

    /// pending → completed for actions that never needed approval.
    pub fn complete_action(&self, id: &ActionId, result: Option<String>) -> WardenResult<Action> {
        self.commit(id, |a, now| Ok(vec![transition::complete(a, result.clone(), now)?]))
    }

    /// Apply `step` under the store's lock and audit what it produced.
    ///
    /// If either the transition or the audit write fails nothing is committed.
    fn commit<F>(&self, id: &ActionId, mut step: F) -> WardenResult<Action>
    where
        F: FnMut(&mut Action, DateTime<Utc>) -> WardenResult<Vec<TransitionRecord>>,
    {
        let audit = &self.audit;
        self.actions.modify(id, &mut |action: &mut Action| {
            let records = step(action, Utc::now())?;
            audit.record(&records)
        })
    }

    fn authorize_reviewer(
        &self,
        id: &ActionId,
        user_id: &str,
        role: &str,
        review: &str,
    ) -> WardenResult<()> {
        let action = self
            .actions
            .get(id)?
            .ok_or_else(|| WardenError::ActionNotFound {
                action_id: id.to_string(),
            })?;

        let setting = self
            .settings
            .lookup(&action.resource_type, Some(&action.resource_id))?;

        let role_allowed = setting
            .map(|s| s.approver_roles.is_empty() || s.approver_roles.iter().any(|r| r == role))
            .unwrap_or(true);

        if role_allowed && rbac::can_review(role, review) {
            Ok(())
        } else {
            warn!(action_id = %id, user_id = %user_id, role = %role, "reviewer not authorized");
            Err(WardenError::ApproverNotAuthorized {
                user_id: user_id.to_string(),
                role: role.to_string(),
            })
        }
    }

    // ── Read accessors ───────────────────────────────────────────────────────

    pub fn list_agents(&self) -> WardenResult<Vec<Agent>> {
        self.agents.list()
    }

    pub fn get_action(&self, id: &ActionId) -> WardenResult<Option<Action>> {
        self.actions.get(id)
    }

    pub fn list_actions(&self) -> WardenResult<Vec<Action>> {
        self.actions.list()
    }

    pub fn list_pending_actions(&self) -> WardenResult<Vec<Action>> {
        self.actions.list_pending()
    }

    pub fn list_actions_for_resource(&self, resource_id: &str) -> WardenResult<Vec<Action>> {
        self.actions.list_for_resource(resource_id)
    }

    pub fn list_actions_for_agent(&self, agent_id: &AgentId) -> WardenResult<Vec<Action>> {
        self.actions.list_for_agent(agent_id)
    }
}

// ── Tests ────────────────────────────────────────────────────────────────────
