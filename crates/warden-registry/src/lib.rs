//! # warden-registry
//!
//! The agent registry: which AI agents exist, what they can do, and whether
//! they are currently allowed to act at all.
//!
//! ```rust,ignore
//! use warden_registry::InMemoryAgentRegistry;
//!
//! let registry = InMemoryAgentRegistry::with_seed_agents();
//! ```

pub mod registry;
pub mod seed;

pub use registry::InMemoryAgentRegistry;
pub use seed::seed_agents;

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use warden_contracts::{
        agent::{AgentDescriptor, AgentId, AgentRole},
        capability::{Capability, CapabilitySet},
        error::WardenError,
    };
    use warden_core::traits::AgentRepository;

    use crate::InMemoryAgentRegistry;

    fn descriptor(role: AgentRole) -> AgentDescriptor {
        AgentDescriptor {
            name: "Translator".to_string(),
            description: "Translates documents".to_string(),
            role,
            capabilities: [Capability::ReadDocuments, Capability::TranslateContent]
                .into_iter()
                .collect::<CapabilitySet>(),
            is_active: true,
            created_by: "admin-id".to_string(),
        }
    }

    #[test]
    fn test_seed_agents() {
        let registry = InMemoryAgentRegistry::with_seed_agents();
        let agents = registry.list().unwrap();
        assert_eq!(agents.len(), 3);

        let editor = registry.get(&AgentId::new("ai-editor-1")).unwrap().unwrap();
        assert_eq!(editor.name, "Content Editor");
        assert!(editor.capabilities.has(Capability::EditDocuments));
        assert!(!editor.capabilities.has(Capability::SuggestEdits));
        assert!(agents.iter().all(|a| a.is_active));
    }

    #[test]
    fn test_get_unknown_is_none() {
        let registry = InMemoryAgentRegistry::with_seed_agents();
        assert!(registry.get(&AgentId::new("ai-ghost-1")).unwrap().is_none());
    }

    #[test]
    fn test_create_assigns_id_and_timestamps() {
        let registry = InMemoryAgentRegistry::new();
        let a = registry.create(descriptor(AgentRole::Assistant)).unwrap();
        let b = registry.create(descriptor(AgentRole::Assistant)).unwrap();

        assert!(a.id.as_str().starts_with("ai-assistant-"));
        assert_ne!(a.id, b.id);
        assert_eq!(a.created_at, a.updated_at);
        assert_eq!(registry.list().unwrap().len(), 2);
    }

    #[test]
    fn test_update_keeps_creation_fields() {
        let registry = InMemoryAgentRegistry::new();
        let created = registry.create(descriptor(AgentRole::Editor)).unwrap();

        let mut changed = created.clone();
        changed.name = "Senior Translator".to_string();
        changed.created_by = "someone-else".to_string();
        changed.created_at = chrono::Utc::now() + chrono::Duration::days(1);
        changed.capabilities.revoke(Capability::TranslateContent);

        let updated = registry.update(changed).unwrap();
        assert_eq!(updated.name, "Senior Translator");
        assert_eq!(updated.created_at, created.created_at);
        assert_eq!(updated.created_by, "admin-id");
        assert!(updated.updated_at >= created.updated_at);
        assert!(!updated.capabilities.has(Capability::TranslateContent));
    }

    #[test]
    fn test_update_unknown_is_not_found() {
        let registry = InMemoryAgentRegistry::with_seed_agents();
        let mut ghost = registry.get(&AgentId::new("ai-editor-1")).unwrap().unwrap();
        ghost.id = AgentId::new("ai-ghost-1");

        match registry.update(ghost) {
            Err(WardenError::AgentNotFound { agent_id }) => assert_eq!(agent_id, "ai-ghost-1"),
            other => panic!("expected AgentNotFound, got {:?}", other),
        }
        assert_eq!(registry.list().unwrap().len(), 3);
    }

    #[test]
    fn test_toggle_active() {
        let registry = InMemoryAgentRegistry::with_seed_agents();
        let id = AgentId::new("ai-analyzer-1");

        let off = registry.toggle_active(&id).unwrap();
        assert!(!off.is_active);
        assert!(!registry.get(&id).unwrap().unwrap().is_active);

        let on = registry.toggle_active(&id).unwrap();
        assert!(on.is_active);

        assert!(matches!(
            registry.toggle_active(&AgentId::new("nope")),
            Err(WardenError::AgentNotFound { .. })
        ));
    }
}
