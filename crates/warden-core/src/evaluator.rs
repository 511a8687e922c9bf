//! The permission evaluator: the decision core of the runtime.
//!
//! Evaluation order, each step short-circuiting to a denial:
//!
//!   Agent → Setting → Capability → Permission level → Approval overrides
//!
//! Capability gating runs before the permission level is consulted and is
//! never overridden by it: a `full_access` setting does not help an agent
//! that lacks the capability for the action.

use std::sync::Arc;

use tracing::{debug, warn};

use warden_contracts::{
    agent::{Agent, AgentId},
    capability::AgentAction,
    permission::{Decision, DenialReason, PermissionLevel, PermissionSetting},
};

use crate::traits::{AgentRepository, SettingRepository};

/// Pick the setting that governs a resource.
///
/// 1. exact match on (`resource_type`, `resource_id`) when an id is given,
/// 2. otherwise the default (id-less) setting for `resource_type`,
/// 3. otherwise `None`, which callers treat as an implicit `no_access`.
pub fn resolve_setting<'s>(
    settings: &'s [PermissionSetting],
    resource_type: &str,
    resource_id: Option<&str>,
) -> Option<&'s PermissionSetting> {
    let specific = resource_id.and_then(|id| {
        settings
            .iter()
            .find(|s| s.resource_type == resource_type && s.resource_id.as_deref() == Some(id))
    });

    specific.or_else(|| {
        settings
            .iter()
            .find(|s| s.resource_type == resource_type && s.is_default())
    })
}

/// Combine an already-resolved agent and setting into a decision.
///
/// `agent` and `setting` are `None` when the lookup found nothing.
pub fn decide(
    agent_id: &AgentId,
    agent: Option<&Agent>,
    setting: Option<&PermissionSetting>,
    action: &str,
    resource_type: &str,
    resource_id: Option<&str>,
) -> Decision {
    // ── Step 1: the agent must exist and be active ───────────────────────────
    let agent = match agent {
        None => {
            return Decision::deny(DenialReason::UnknownAgent {
                agent_id: agent_id.to_string(),
            })
        }
        Some(a) if !a.is_active => {
            return Decision::deny(DenialReason::AgentInactive {
                agent_id: agent_id.to_string(),
            })
        }
        Some(a) => a,
    };

    // ── Step 2: some setting must cover the resource ─────────────────────────
    let Some(setting) = setting else {
        return Decision::deny(DenialReason::NoSetting {
            resource_type: resource_type.to_string(),
            resource_id: resource_id.map(str::to_string),
        });
    };

    // ── Step 3: capability gate ──────────────────────────────────────────────
    let Some(parsed) = AgentAction::parse(action) else {
        return Decision::deny(DenialReason::UnknownAction {
            action: action.to_string(),
        });
    };

    let accepted = parsed.required_capabilities();
    if !agent.capabilities.has_any(accepted) {
        return Decision::deny(DenialReason::MissingCapability {
            action: action.to_string(),
            accepted: accepted.iter().map(|c| c.as_str().to_string()).collect(),
        });
    }

    // ── Step 4: permission level ─────────────────────────────────────────────
    let level = setting.permission_level;
    let permitted = match level {
        PermissionLevel::NoAccess => false,
        PermissionLevel::ReadOnly => parsed.is_read_class(),
        PermissionLevel::SuggestOnly | PermissionLevel::FullAccess => true,
    };

    // ── Step 5: approval, stored flag plus two overrides ────────────────────
    let mut requires_approval = setting.requires_approval;
    if level == PermissionLevel::SuggestOnly && parsed.is_mutating() {
        requires_approval = true;
    }
    if level == PermissionLevel::ReadOnly && parsed.is_read_class() {
        requires_approval = false;
    }

    Decision {
        permitted,
        requires_approval,
        permission_level: level,
        denial: (!permitted).then(|| DenialReason::LevelForbids {
            action: action.to_string(),
            level,
        }),
    }
}

/// Evaluates agent requests against the registry and the setting store.
///
/// Evaluation is synchronous and side-effect free. Repository failures are
/// reported as denials rather than errors.
#[derive(Clone)]
pub struct PermissionEvaluator {
    agents: Arc<dyn AgentRepository>,
    settings: Arc<dyn SettingRepository>,
}

impl PermissionEvaluator {
    pub fn new(agents: Arc<dyn AgentRepository>, settings: Arc<dyn SettingRepository>) -> Self {
        Self { agents, settings }
    }

    /// Decide whether `agent_id` may perform `action` on a resource.
    pub fn evaluate(
        &self,
        agent_id: &AgentId,
        action: &str,
        resource_type: &str,
        resource_id: Option<&str>,
    ) -> Decision {
        debug!(
            agent_id = %agent_id,
            action = %action,
            resource_type = %resource_type,
            resource_id = resource_id.unwrap_or("*"),
            "evaluating permission"
        );

        let agent = match self.agents.get(agent_id) {
            Ok(agent) => agent,
            Err(e) => return Self::lookup_failed(agent_id, e.to_string()),
        };

        // Skip the setting lookup when step 1 is going to deny anyway.
        let setting = match &agent {
            Some(a) if a.is_active => match self.settings.lookup(resource_type, resource_id) {
                Ok(setting) => setting,
                Err(e) => return Self::lookup_failed(agent_id, e.to_string()),
            },
            _ => None,
        };

        let decision = decide(
            agent_id,
            agent.as_ref(),
            setting.as_ref(),
            action,
            resource_type,
            resource_id,
        );

        match &decision.denial {
            Some(reason) => warn!(
                agent_id = %agent_id,
                action = %action,
                resource_type = %resource_type,
                reason = %reason,
                "permission denied"
            ),
            None => debug!(
                agent_id = %agent_id,
                action = %action,
                level = %decision.permission_level,
                requires_approval = decision.requires_approval,
                "permission granted"
            ),
        }

        decision
    }

    fn lookup_failed(agent_id: &AgentId, reason: String) -> Decision {
        warn!(agent_id = %agent_id, reason = %reason, "permission lookup failed; denying");
        Decision::deny(DenialReason::LookupFailed { reason })
    }
}

// ── Tests ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use chrono::Utc;

    use warden_contracts::{
        agent::{Agent, AgentDescriptor, AgentId, AgentRole},
        capability::{AgentAction, Capability, CapabilitySet},
        error::{WardenError, WardenResult},
        permission::{DenialReason, PermissionLevel, PermissionSetting},
    };

    use crate::traits::{AgentRepository, SettingRepository};

    use super::{decide, resolve_setting, PermissionEvaluator};

    // ── Mock helpers ─────────────────────────────────────────────────────────

    fn agent(id: &str, caps: &[Capability], active: bool) -> Agent {
        Agent {
            id: AgentId::new(id),
            name: id.to_string(),
            description: String::new(),
            role: AgentRole::Assistant,
            capabilities: caps.iter().copied().collect::<CapabilitySet>(),
            is_active: active,
            created_by: "admin-id".to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn all_caps() -> Vec<Capability> {
        Capability::ALL.to_vec()
    }

    struct MockAgents {
        agents: Vec<Agent>,
        fail: bool,
    }

    impl AgentRepository for MockAgents {
        fn get(&self, id: &AgentId) -> WardenResult<Option<Agent>> {
            if self.fail {
                return Err(WardenError::StorageError {
                    reason: "registry offline".to_string(),
                });
            }
            Ok(self.agents.iter().find(|a| &a.id == id).cloned())
        }
        fn list(&self) -> WardenResult<Vec<Agent>> {
            Ok(self.agents.clone())
        }
        fn create(&self, _descriptor: AgentDescriptor) -> WardenResult<Agent> {
            unimplemented!("not used by the evaluator")
        }
        fn update(&self, _agent: Agent) -> WardenResult<Agent> {
            unimplemented!("not used by the evaluator")
        }
        fn toggle_active(&self, _id: &AgentId) -> WardenResult<Agent> {
            unimplemented!("not used by the evaluator")
        }
    }

    /// Counts lookups so tests can assert the short-circuit order.
    struct MockSettings {
        settings: Vec<PermissionSetting>,
        lookups: Arc<Mutex<u32>>,
    }

    impl SettingRepository for MockSettings {
        fn lookup(
            &self,
            resource_type: &str,
            resource_id: Option<&str>,
        ) -> WardenResult<Option<PermissionSetting>> {
            *self.lookups.lock().unwrap() += 1;
            Ok(resolve_setting(&self.settings, resource_type, resource_id).cloned())
        }
        fn list(&self) -> WardenResult<Vec<PermissionSetting>> {
            Ok(self.settings.clone())
        }
        fn upsert(&self, settings: Vec<PermissionSetting>) -> WardenResult<Vec<PermissionSetting>> {
            Ok(settings)
        }
        fn reset_to_defaults(&self) -> WardenResult<Vec<PermissionSetting>> {
            Ok(self.settings.clone())
        }
    }

    fn evaluator(agents: Vec<Agent>, settings: Vec<PermissionSetting>) -> PermissionEvaluator {
        PermissionEvaluator::new(
            Arc::new(MockAgents { agents, fail: false }),
            Arc::new(MockSettings {
                settings,
                lookups: Arc::new(Mutex::new(0)),
            }),
        )
    }

    fn id(s: &str) -> AgentId {
        AgentId::new(s)
    }

    // ── Resolution ───────────────────────────────────────────────────────────

    #[test]
    fn specific_setting_wins_over_default() {
        let settings = vec![
            PermissionSetting::default_for("document", PermissionLevel::ReadOnly, false),
            PermissionSetting::specific("document", "42", PermissionLevel::FullAccess, false),
        ];
        let chosen = resolve_setting(&settings, "document", Some("42")).unwrap();
        assert_eq!(chosen.permission_level, PermissionLevel::FullAccess);

        // Declaration order does not matter.
        let reversed: Vec<_> = settings.into_iter().rev().collect();
        let chosen = resolve_setting(&reversed, "document", Some("42")).unwrap();
        assert_eq!(chosen.permission_level, PermissionLevel::FullAccess);
    }

    #[test]
    fn missing_specific_falls_back_to_default() {
        let settings = vec![
            PermissionSetting::specific("document", "1", PermissionLevel::SuggestOnly, true),
            PermissionSetting::default_for("document", PermissionLevel::ReadOnly, true),
        ];
        let chosen = resolve_setting(&settings, "document", Some("5")).unwrap();
        assert!(chosen.is_default());

        let chosen = resolve_setting(&settings, "document", None).unwrap();
        assert!(chosen.is_default());
    }

    #[test]
    fn other_resource_types_do_not_match() {
        let settings = vec![PermissionSetting::default_for(
            "document",
            PermissionLevel::FullAccess,
            false,
        )];
        assert!(resolve_setting(&settings, "folder", Some("1")).is_none());
        assert!(resolve_setting(&[], "document", None).is_none());
    }

    // ── Step 1: agent ────────────────────────────────────────────────────────

    #[test]
    fn inactive_agent_is_denied_regardless_of_setting() {
        let ev = evaluator(
            vec![agent("ai-editor-1", &all_caps(), false)],
            vec![PermissionSetting::default_for("document", PermissionLevel::FullAccess, false)],
        );
        for action in AgentAction::ALL {
            let d = ev.evaluate(&id("ai-editor-1"), action.as_str(), "document", Some("1"));
            assert!(!d.permitted, "{action} must be denied for an inactive agent");
            assert!(d.requires_approval);
            assert_eq!(d.permission_level, PermissionLevel::NoAccess);
            assert!(matches!(d.denial, Some(DenialReason::AgentInactive { .. })));
        }
    }

    #[test]
    fn unknown_agent_is_a_denial_not_an_error() {
        let ev = evaluator(
            vec![],
            vec![PermissionSetting::default_for("document", PermissionLevel::FullAccess, false)],
        );
        let d = ev.evaluate(&id("ghost"), "read", "document", Some("1"));
        assert!(!d.permitted);
        assert!(matches!(d.denial, Some(DenialReason::UnknownAgent { .. })));
    }

    #[test]
    fn denied_agent_skips_setting_lookup() {
        let lookups = Arc::new(Mutex::new(0));
        let ev = PermissionEvaluator::new(
            Arc::new(MockAgents {
                agents: vec![agent("ai-editor-1", &all_caps(), false)],
                fail: false,
            }),
            Arc::new(MockSettings {
                settings: vec![],
                lookups: lookups.clone(),
            }),
        );
        ev.evaluate(&id("ai-editor-1"), "read", "document", None);
        ev.evaluate(&id("ghost"), "read", "document", None);
        assert_eq!(*lookups.lock().unwrap(), 0);
    }

    #[test]
    fn registry_failure_denies() {
        let ev = PermissionEvaluator::new(
            Arc::new(MockAgents {
                agents: vec![],
                fail: true,
            }),
            Arc::new(MockSettings {
                settings: vec![],
                lookups: Arc::new(Mutex::new(0)),
            }),
        );
        let d = ev.evaluate(&id("ai-editor-1"), "read", "document", None);
        assert!(!d.permitted);
        match d.denial {
            Some(DenialReason::LookupFailed { reason }) => assert!(reason.contains("offline")),
            other => panic!("expected LookupFailed, got {:?}", other),
        }
    }

    // ── Step 2: setting ──────────────────────────────────────────────────────

    #[test]
    fn no_setting_is_implicit_no_access() {
        let ev = evaluator(vec![agent("a", &all_caps(), true)], vec![]);
        let d = ev.evaluate(&id("a"), "read", "document", Some("1"));
        assert!(!d.permitted);
        assert!(d.requires_approval);
        assert_eq!(d.permission_level, PermissionLevel::NoAccess);
        assert!(matches!(d.denial, Some(DenialReason::NoSetting { .. })));
    }

    // ── Step 3: capability ───────────────────────────────────────────────────

    #[test]
    fn capability_gate_dominates_full_access() {
        let ev = evaluator(
            vec![agent("reader", &[Capability::ReadDocuments], true)],
            vec![PermissionSetting::default_for("document", PermissionLevel::FullAccess, false)],
        );
        let d = ev.evaluate(&id("reader"), "update", "document", Some("1"));
        assert!(!d.permitted);
        assert_eq!(d.permission_level, PermissionLevel::NoAccess);
        assert!(matches!(d.denial, Some(DenialReason::MissingCapability { .. })));

        let d = ev.evaluate(&id("reader"), "read", "document", Some("1"));
        assert!(d.permitted);
    }

    #[test]
    fn unmapped_action_is_always_denied() {
        let ev = evaluator(
            vec![agent("a", &all_caps(), true)],
            vec![PermissionSetting::default_for("document", PermissionLevel::FullAccess, false)],
        );
        let d = ev.evaluate(&id("a"), "edit_document", "document", None);
        assert!(!d.permitted);
        assert!(matches!(d.denial, Some(DenialReason::UnknownAction { .. })));
    }

    #[test]
    fn improve_accepts_any_of_three_capabilities() {
        for cap in [
            Capability::EditDocuments,
            Capability::SuggestEdits,
            Capability::GenerateContent,
        ] {
            let ev = evaluator(
                vec![agent("a", &[cap], true)],
                vec![PermissionSetting::default_for("document", PermissionLevel::FullAccess, false)],
            );
            assert!(ev.evaluate(&id("a"), "improve_document", "document", None).permitted);
        }
    }

    // ── Step 4: level ────────────────────────────────────────────────────────

    #[test]
    fn no_access_denies_every_action() {
        let ev = evaluator(
            vec![agent("a", &all_caps(), true)],
            vec![PermissionSetting::default_for("document", PermissionLevel::NoAccess, false)],
        );
        for action in AgentAction::ALL {
            let d = ev.evaluate(&id("a"), action.as_str(), "document", Some("9"));
            assert!(!d.permitted, "{action} must be denied under no_access");
            assert_eq!(d.permission_level, PermissionLevel::NoAccess);
            assert!(matches!(d.denial, Some(DenialReason::LevelForbids { .. })));
        }
    }

    #[test]
    fn read_only_denies_writes_and_allows_reads_unsupervised() {
        let ev = evaluator(
            vec![agent("a", &all_caps(), true)],
            vec![PermissionSetting::default_for("document", PermissionLevel::ReadOnly, true)],
        );
        for action in ["create", "update", "delete", "improve_document", "translate_document"] {
            let d = ev.evaluate(&id("a"), action, "document", Some("1"));
            assert!(!d.permitted, "{action} must be denied under read_only");
            assert_eq!(d.permission_level, PermissionLevel::ReadOnly);
        }
        for action in ["read", "analyze_document", "summarize_document"] {
            let d = ev.evaluate(&id("a"), action, "document", Some("1"));
            assert!(d.permitted);
            assert!(!d.requires_approval, "{action} must not need approval under read_only");
            assert!(d.denial.is_none());
        }
    }

    // ── Step 5: approval overrides ───────────────────────────────────────────

    #[test]
    fn suggest_only_forces_approval_for_mutations() {
        let ev = evaluator(
            vec![agent("a", &all_caps(), true)],
            vec![PermissionSetting::default_for("document", PermissionLevel::SuggestOnly, false)],
        );
        for action in ["create", "update", "delete", "improve_document"] {
            let d = ev.evaluate(&id("a"), action, "document", None);
            assert!(d.permitted);
            assert!(d.requires_approval, "{action} must need approval under suggest_only");
        }
        // Non-mutating actions keep the stored flag.
        let d = ev.evaluate(&id("a"), "summarize_document", "document", None);
        assert!(d.permitted);
        assert!(!d.requires_approval);
    }

    #[test]
    fn full_access_uses_stored_flag() {
        let settings = |flag| {
            vec![PermissionSetting::default_for(
                "document",
                PermissionLevel::FullAccess,
                flag,
            )]
        };
        let ev = evaluator(vec![agent("a", &all_caps(), true)], settings(false));
        assert!(!ev.evaluate(&id("a"), "delete", "document", None).requires_approval);

        let ev = evaluator(vec![agent("a", &all_caps(), true)], settings(true));
        let d = ev.evaluate(&id("a"), "delete", "document", None);
        assert!(d.permitted);
        assert!(d.requires_approval);
    }

    // ── Reference scenarios ──────────────────────────────────────────────────

    #[test]
    fn editor_update_on_suggest_only_needs_approval() {
        let editor = agent("editor-1", &[Capability::EditDocuments], true);
        let setting = PermissionSetting::specific("document", "1", PermissionLevel::SuggestOnly, false);
        let d = decide(
            &id("editor-1"),
            Some(&editor),
            Some(&setting),
            "update",
            "document",
            Some("1"),
        );
        assert!(d.permitted);
        assert!(d.requires_approval);
        assert_eq!(d.permission_level, PermissionLevel::SuggestOnly);
    }

    #[test]
    fn assistant_read_on_read_only_default_is_unsupervised() {
        let ev = evaluator(
            vec![agent("assistant-1", &[Capability::ReadDocuments], true)],
            vec![PermissionSetting::default_for("document", PermissionLevel::ReadOnly, true)],
        );
        let d = ev.evaluate(&id("assistant-1"), "read", "document", Some("5"));
        assert!(d.permitted);
        assert!(!d.requires_approval);
        assert_eq!(d.permission_level, PermissionLevel::ReadOnly);
    }
}
