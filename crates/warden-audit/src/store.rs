//! In-memory implementation of `ActionRepository`.
//!
//! Records live in a `Vec` behind one `Mutex`, in insertion order. `modify`
//! holds the lock for the whole read-check-write, which is what gives
//! concurrent reviewers of the same action exactly one winner.

use std::sync::{Mutex, MutexGuard};

use warden_contracts::{
    action::{Action, ActionId},
    error::{WardenError, WardenResult},
};
use warden_core::traits::ActionRepository;

/// Action records, never deleted.
#[derive(Debug, Default)]
pub struct InMemoryActionStore {
    actions: Mutex<Vec<Action>>,
}

impl InMemoryActionStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> WardenResult<MutexGuard<'_, Vec<Action>>> {
        self.actions.lock().map_err(|e| WardenError::StorageError {
            reason: format!("action store lock poisoned: {}", e),
        })
    }
}

impl ActionRepository for InMemoryActionStore {
    fn insert_with(
        &self,
        action: Action,
        on_insert: &mut dyn FnMut(&Action) -> WardenResult<()>,
    ) -> WardenResult<Action> {
        let mut actions = self.lock()?;
        if actions.iter().any(|a| a.id == action.id) {
            return Err(WardenError::StorageError {
                reason: format!("action '{}' already exists", action.id),
            });
        }
        on_insert(&action)?;
        actions.push(action.clone());
        Ok(action)
    }

    fn get(&self, id: &ActionId) -> WardenResult<Option<Action>> {
        Ok(self.lock()?.iter().find(|a| &a.id == id).cloned())
    }

    fn list(&self) -> WardenResult<Vec<Action>> {
        Ok(self.lock()?.clone())
    }

    fn modify(
        &self,
        id: &ActionId,
        apply: &mut dyn FnMut(&mut Action) -> WardenResult<()>,
    ) -> WardenResult<Action> {
        let mut actions = self.lock()?;
        let slot = actions
            .iter_mut()
            .find(|a| &a.id == id)
            .ok_or_else(|| WardenError::ActionNotFound {
                action_id: id.to_string(),
            })?;

        // Work on a copy so a failed step leaves the stored record alone.
        let mut draft = slot.clone();
        apply(&mut draft)?;
        *slot = draft.clone();
        Ok(draft)
    }
}
