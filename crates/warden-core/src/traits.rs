//! Repository and collaborator seams for the warden runtime.
//!
//! - `AgentRepository`   : agent registry (who may act)
//! - `SettingRepository` : permission setting store (how far they may go)
//! - `ActionRepository`  : action records (what they asked for, and the outcome)
//! - `AuditSink`         : append-only transition log
//! - `ContentGenerator`  : untrusted, possibly slow text generation
//!
//! The evaluator and lifecycle manager only ever see these traits, so they
//! run unchanged against in-memory fakes or a persistent backend.

use async_trait::async_trait;

use warden_contracts::{
    action::{Action, ActionId, ActionStatus, GeneratedContent, TransitionRecord},
    agent::{Agent, AgentDescriptor, AgentId},
    error::WardenResult,
    permission::PermissionSetting,
};

/// The agent registry.
pub trait AgentRepository: Send + Sync {
    fn get(&self, id: &AgentId) -> WardenResult<Option<Agent>>;

    fn list(&self) -> WardenResult<Vec<Agent>>;

    /// Register a new agent. The repository assigns the id and timestamps.
    fn create(&self, descriptor: AgentDescriptor) -> WardenResult<Agent>;

    /// Replace a stored agent. Fails with `AgentNotFound` if the id is absent.
    fn update(&self, agent: Agent) -> WardenResult<Agent>;

    /// Flip the active flag. Fails with `AgentNotFound` if the id is absent.
    fn toggle_active(&self, id: &AgentId) -> WardenResult<Agent>;
}

/// The permission setting store.
pub trait SettingRepository: Send + Sync {
    /// Resolve the setting for a resource: exact match first, then the
    /// default for the type. `None` means nothing is configured.
    fn lookup(
        &self,
        resource_type: &str,
        resource_id: Option<&str>,
    ) -> WardenResult<Option<PermissionSetting>>;

    fn list(&self) -> WardenResult<Vec<PermissionSetting>>;

    /// Replace the whole collection.
    fn upsert(&self, settings: Vec<PermissionSetting>) -> WardenResult<Vec<PermissionSetting>>;

    /// Restore the collection the store was created with.
    fn reset_to_defaults(&self) -> WardenResult<Vec<PermissionSetting>>;
}

/// Storage for action records.
///
/// Records are never deleted. All changes go through `modify`, which must
/// serialize writers so only one transition wins from a given state.
pub trait ActionRepository: Send + Sync {
    /// Store a new record, committing it only if `on_insert` succeeds.
    ///
    /// `on_insert` runs while the store is locked, after the id has been
    /// checked for uniqueness. If either step fails nothing is stored.
    fn insert_with(
        &self,
        action: Action,
        on_insert: &mut dyn FnMut(&Action) -> WardenResult<()>,
    ) -> WardenResult<Action>;

    fn insert(&self, action: Action) -> WardenResult<Action> {
        self.insert_with(action, &mut |_: &Action| Ok(()))
    }

    fn get(&self, id: &ActionId) -> WardenResult<Option<Action>>;

    /// All records in insertion order.
    fn list(&self) -> WardenResult<Vec<Action>>;

    /// Apply `apply` to the record with `id` and commit the result.
    ///
    /// `apply` runs on a copy while the store is locked. If it returns an
    /// error the stored record is left untouched. Fails with
    /// `ActionNotFound` if the id is absent.
    fn modify(
        &self,
        id: &ActionId,
        apply: &mut dyn FnMut(&mut Action) -> WardenResult<()>,
    ) -> WardenResult<Action>;

    fn list_pending(&self) -> WardenResult<Vec<Action>> {
        Ok(self
            .list()?
            .into_iter()
            .filter(|a| a.status == ActionStatus::Pending)
            .collect())
    }

    fn list_for_resource(&self, resource_id: &str) -> WardenResult<Vec<Action>> {
        Ok(self
            .list()?
            .into_iter()
            .filter(|a| a.resource_id == resource_id)
            .collect())
    }

    fn list_for_agent(&self, agent_id: &AgentId) -> WardenResult<Vec<Action>> {
        Ok(self
            .list()?
            .into_iter()
            .filter(|a| &a.agent_id == agent_id)
            .collect())
    }
}

/// The append-only audit trail of action transitions.
///
/// A failed write is fatal for the transition that produced it.
pub trait AuditSink: Send + Sync {
    /// Append `records` in order. Implementations must append all or none.
    fn record(&self, records: &[TransitionRecord]) -> WardenResult<()>;
}

/// The external content-generation service.
///
/// Implementations are untrusted and may fail or hang; the lifecycle manager
/// bounds every call with a timeout.
#[async_trait]
pub trait ContentGenerator: Send + Sync {
    /// Produce output for `action_type` over a document.
    async fn generate(
        &self,
        action_type: &str,
        title: &str,
        content: &str,
    ) -> WardenResult<GeneratedContent>;
}
