//! # warden-contracts
//!
//! Shared types, vocabularies, and error contracts for the warden AI
//! permission runtime.
//!
//! All crates in the workspace import from here. Apart from the static
//! action → capability table, no business logic lives in this crate.

pub mod action;
pub mod agent;
pub mod capability;
pub mod error;
pub mod permission;

#[cfg(test)]
mod tests {
    use super::*;
    use action::{ActionId, ActionMetadata, ActionStatus, DocumentChanges, GeneratedContent};
    use agent::{AgentId, AgentRole};
    use capability::{AgentAction, Capability, CapabilitySet};
    use error::WardenError;
    use permission::{Decision, DenialReason, PermissionLevel, PermissionSetting};

    // ── Capability table ─────────────────────────────────────────────────────

    #[test]
    fn every_action_has_a_table_entry() {
        for action in AgentAction::ALL {
            assert!(
                !action.required_capabilities().is_empty(),
                "action {action} must map to at least one capability"
            );
            assert_eq!(AgentAction::parse(action.as_str()), Some(action));
        }
    }

    #[test]
    fn unknown_action_has_no_entry() {
        assert_eq!(AgentAction::parse("edit_document"), None);
        assert_eq!(AgentAction::parse(""), None);
        assert_eq!(AgentAction::parse("READ"), None);
    }

    #[test]
    fn update_and_improve_accept_alternatives() {
        let update = AgentAction::Update.required_capabilities();
        assert!(update.contains(&Capability::EditDocuments));
        assert!(update.contains(&Capability::SuggestEdits));

        let improve = AgentAction::ImproveDocument.required_capabilities();
        assert_eq!(improve.len(), 3);
        assert!(improve.contains(&Capability::GenerateContent));
    }

    #[test]
    fn read_class_and_mutating_are_disjoint() {
        for action in AgentAction::ALL {
            assert!(!(action.is_read_class() && action.is_mutating()));
        }
        assert!(!AgentAction::TranslateDocument.is_read_class());
        assert!(!AgentAction::TranslateDocument.is_mutating());
    }

    #[test]
    fn capability_set_has_any() {
        let caps: CapabilitySet = [Capability::SuggestEdits].into_iter().collect();
        assert!(caps.has_any(AgentAction::Update.required_capabilities()));
        assert!(!caps.has_any(AgentAction::Delete.required_capabilities()));
        assert!(caps.has(Capability::SuggestEdits));
    }

    #[test]
    fn capability_set_serializes_as_name_list() {
        let caps: CapabilitySet = [Capability::SummarizeContent, Capability::ReadDocuments]
            .into_iter()
            .collect();
        let json = serde_json::to_value(&caps).unwrap();
        assert_eq!(json, serde_json::json!(["read_documents", "summarize_content"]));
    }

    #[test]
    fn capability_parse_matches_wire_names() {
        for cap in Capability::ALL {
            assert_eq!(Capability::parse(cap.as_str()), Some(cap));
        }
        assert_eq!(Capability::parse("fly"), None);
    }

    // ── Ids ──────────────────────────────────────────────────────────────────

    #[test]
    fn generated_agent_id_embeds_role() {
        let id = AgentId::generate(AgentRole::Analyzer);
        assert!(id.as_str().starts_with("ai-analyzer-"));
        assert_eq!(id.as_str().len(), "ai-analyzer-".len() + 8);
    }

    #[test]
    fn generated_action_ids_are_distinct() {
        let ids: std::collections::HashSet<String> =
            (0..100).map(|_| ActionId::generate().0).collect();
        assert_eq!(ids.len(), 100);
        assert!(ids.iter().all(|id| id.starts_with("action-")));
    }

    // ── Statuses and metadata ────────────────────────────────────────────────

    #[test]
    fn terminal_statuses() {
        assert!(!ActionStatus::Pending.is_terminal());
        assert!(!ActionStatus::Approved.is_terminal());
        assert!(ActionStatus::Rejected.is_terminal());
        assert!(ActionStatus::Completed.is_terminal());
        assert!(ActionStatus::Failed.is_terminal());
    }

    #[test]
    fn metadata_keeps_reason_across_shapes() {
        let requested = ActionMetadata::Reason {
            reason: Some("User requested summary".to_string()),
        };

        let generated = requested.with_generated(GeneratedContent {
            result: "short summary".to_string(),
            changes: None,
        });
        assert_eq!(generated.reason(), Some("User requested summary"));
        assert_eq!(generated.generated_result(), Some("short summary"));

        let failed = requested.with_error("upstream 503");
        assert_eq!(failed.reason(), Some("User requested summary"));
        assert_eq!(failed.generated_result(), None);
        assert_eq!(failed.error(), Some("upstream 503"));
        assert_eq!(generated.error(), None);
    }

    #[test]
    fn metadata_is_tagged_by_kind() {
        let meta = ActionMetadata::Generated {
            reason: None,
            result: "done".to_string(),
            changes: Some(DocumentChanges {
                title: "Improved".to_string(),
                content: "body".to_string(),
            }),
        };
        let json = serde_json::to_value(&meta).unwrap();
        assert_eq!(json["kind"], "generated");
        assert_eq!(json["changes"]["title"], "Improved");

        let back: ActionMetadata = serde_json::from_value(json).unwrap();
        assert_eq!(back, meta);
    }

    // ── Settings and decisions ───────────────────────────────────────────────

    #[test]
    fn setting_builders() {
        let default = PermissionSetting::default_for("document", PermissionLevel::ReadOnly, false)
            .with_approvers(["admin", "editor"]);
        assert!(default.is_default());
        assert_eq!(default.approver_roles, vec!["admin", "editor"]);

        let specific =
            PermissionSetting::specific("document", "1", PermissionLevel::SuggestOnly, true)
                .with_name("Getting Started Guide");
        assert!(!specific.is_default());
        assert_eq!(specific.resource_name.as_deref(), Some("Getting Started Guide"));
    }

    #[test]
    fn implicit_deny_setting() {
        let setting = PermissionSetting::implicit_deny("document");
        assert_eq!(setting.permission_level, PermissionLevel::NoAccess);
        assert!(setting.requires_approval);
    }

    #[test]
    fn denial_shape_and_reason() {
        let decision = Decision::deny(DenialReason::AgentInactive {
            agent_id: "ai-editor-1".to_string(),
        });
        assert!(!decision.permitted);
        assert!(decision.requires_approval);
        assert_eq!(decision.permission_level, PermissionLevel::NoAccess);
        let reason = decision.reason().unwrap();
        assert!(reason.contains("ai-editor-1"));
        assert!(reason.contains("deactivated"));
    }

    #[test]
    fn missing_capability_reason_lists_alternatives() {
        let reason = DenialReason::MissingCapability {
            action: "update".to_string(),
            accepted: vec!["edit_documents".to_string(), "suggest_edits".to_string()],
        };
        let msg = reason.to_string();
        assert!(msg.contains("edit_documents, suggest_edits"));
    }

    #[test]
    fn permission_level_parses_from_snake_case() {
        let level: PermissionLevel = serde_json::from_str("\"suggest_only\"").unwrap();
        assert_eq!(level, PermissionLevel::SuggestOnly);
    }

    // ── WardenError display messages ─────────────────────────────────────────

    #[test]
    fn error_invalid_transition_display() {
        let err = WardenError::InvalidTransition {
            action_id: "action-1".to_string(),
            from: ActionStatus::Completed,
            attempted: "rejected".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("action-1"));
        assert!(msg.contains("rejected"));
        assert!(msg.contains("completed"));
    }

    #[test]
    fn error_generation_display_and_classification() {
        let failed = WardenError::GenerationFailed {
            reason: "HTTP 500".to_string(),
        };
        assert!(failed.to_string().contains("HTTP 500"));
        assert!(failed.is_generation_failure());

        let timed_out = WardenError::GenerationTimedOut { millis: 30_000 };
        assert!(timed_out.to_string().contains("30000ms"));
        assert!(timed_out.is_generation_failure());

        let not_found = WardenError::ActionNotFound {
            action_id: "action-x".to_string(),
        };
        assert!(!not_found.is_generation_failure());
        assert!(not_found.to_string().contains("action-x"));
    }
}
