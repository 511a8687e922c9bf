//! In-memory implementation of `AgentRepository`.

use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::Utc;
use tracing::info;

use warden_contracts::{
    agent::{Agent, AgentDescriptor, AgentId},
    error::{WardenError, WardenResult},
};
use warden_core::traits::AgentRepository;

use crate::seed::seed_agents;

/// Agents in registration order.
///
/// `created_at` and `created_by` are fixed at registration; every later
/// mutation refreshes `updated_at`.
#[derive(Debug, Default)]
pub struct InMemoryAgentRegistry {
    agents: RwLock<Vec<Agent>>,
}

impl InMemoryAgentRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding the three built-in agents.
    pub fn with_seed_agents() -> Self {
        Self {
            agents: RwLock::new(seed_agents()),
        }
    }

    fn read(&self) -> WardenResult<RwLockReadGuard<'_, Vec<Agent>>> {
        self.agents.read().map_err(|e| WardenError::StorageError {
            reason: format!("agent registry lock poisoned: {}", e),
        })
    }

    fn write(&self) -> WardenResult<RwLockWriteGuard<'_, Vec<Agent>>> {
        self.agents.write().map_err(|e| WardenError::StorageError {
            reason: format!("agent registry lock poisoned: {}", e),
        })
    }
}

fn not_found(id: &AgentId) -> WardenError {
    WardenError::AgentNotFound {
        agent_id: id.to_string(),
    }
}

impl AgentRepository for InMemoryAgentRegistry {
    fn get(&self, id: &AgentId) -> WardenResult<Option<Agent>> {
        Ok(self.read()?.iter().find(|a| &a.id == id).cloned())
    }

    fn list(&self) -> WardenResult<Vec<Agent>> {
        Ok(self.read()?.clone())
    }

    fn create(&self, descriptor: AgentDescriptor) -> WardenResult<Agent> {
        let mut agents = self.write()?;

        // Random suffixes make a clash unlikely, not impossible.
        let mut id = AgentId::generate(descriptor.role);
        while agents.iter().any(|a| a.id == id) {
            id = AgentId::generate(descriptor.role);
        }

        let now = Utc::now();
        let agent = Agent {
            id,
            name: descriptor.name,
            description: descriptor.description,
            role: descriptor.role,
            capabilities: descriptor.capabilities,
            is_active: descriptor.is_active,
            created_by: descriptor.created_by,
            created_at: now,
            updated_at: now,
        };
        agents.push(agent.clone());

        info!(agent_id = %agent.id, role = agent.role.as_str(), "agent registered");
        Ok(agent)
    }

    fn update(&self, agent: Agent) -> WardenResult<Agent> {
        let mut agents = self.write()?;
        let slot = agents
            .iter_mut()
            .find(|a| a.id == agent.id)
            .ok_or_else(|| not_found(&agent.id))?;

        let updated = Agent {
            created_by: slot.created_by.clone(),
            created_at: slot.created_at,
            updated_at: Utc::now(),
            ..agent
        };
        *slot = updated.clone();

        info!(agent_id = %updated.id, is_active = updated.is_active, "agent updated");
        Ok(updated)
    }

    fn toggle_active(&self, id: &AgentId) -> WardenResult<Agent> {
        let mut agents = self.write()?;
        let slot = agents
            .iter_mut()
            .find(|a| &a.id == id)
            .ok_or_else(|| not_found(id))?;

        slot.is_active = !slot.is_active;
        slot.updated_at = Utc::now();

        info!(agent_id = %id, is_active = slot.is_active, "agent toggled");
        Ok(slot.clone())
    }
}
