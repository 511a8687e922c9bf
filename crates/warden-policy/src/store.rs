//! In-memory permission setting store.
//!
//! `InMemorySettingStore` keeps the current collection behind an `RwLock`
//! and implements `SettingRepository` from warden-core. Lookups use the same
//! resolution as the evaluator: exact match first, then the type default.

use std::path::Path;
use std::sync::RwLock;

use tracing::{debug, info};

use warden_contracts::{
    error::{WardenError, WardenResult},
    permission::PermissionSetting,
};
use warden_core::{evaluator::resolve_setting, traits::SettingRepository};

use crate::config::{validate_settings, WardenConfig};
use crate::defaults::default_settings;

/// A `SettingRepository` over a validated, in-memory collection.
///
/// ```rust,ignore
/// use warden_policy::InMemorySettingStore;
///
/// let store = InMemorySettingStore::from_file(Path::new("config/warden.toml"))?;
/// ```
#[derive(Debug)]
pub struct InMemorySettingStore {
    current: RwLock<Vec<PermissionSetting>>,
    /// What `reset_to_defaults` restores.
    initial: Vec<PermissionSetting>,
}

impl InMemorySettingStore {
    /// Build a store over `settings` after checking the collection invariants.
    pub fn new(settings: Vec<PermissionSetting>) -> WardenResult<Self> {
        validate_settings(&settings)?;
        Ok(Self {
            current: RwLock::new(settings.clone()),
            initial: settings,
        })
    }

    /// A store seeded with the built-in settings.
    pub fn with_defaults() -> Self {
        let settings = default_settings();
        Self {
            current: RwLock::new(settings.clone()),
            initial: settings,
        }
    }

    /// Build a store from a loaded config. An empty `[[settings]]` list
    /// falls back to the built-in settings.
    pub fn from_config(config: &WardenConfig) -> WardenResult<Self> {
        if config.settings.is_empty() {
            return Ok(Self::with_defaults());
        }
        Self::new(config.settings.clone())
    }

    pub fn from_toml_str(s: &str) -> WardenResult<Self> {
        Self::from_config(&WardenConfig::from_toml_str(s)?)
    }

    pub fn from_file(path: &Path) -> WardenResult<Self> {
        Self::from_config(&WardenConfig::from_file(path)?)
    }

    fn poisoned() -> WardenError {
        WardenError::StorageError {
            reason: "setting store lock poisoned".to_string(),
        }
    }
}

impl SettingRepository for InMemorySettingStore {
    fn lookup(
        &self,
        resource_type: &str,
        resource_id: Option<&str>,
    ) -> WardenResult<Option<PermissionSetting>> {
        let settings = self.current.read().map_err(|_| Self::poisoned())?;
        let found = resolve_setting(&settings, resource_type, resource_id).cloned();
        debug!(
            resource_type = %resource_type,
            resource_id = resource_id.unwrap_or("*"),
            found = found.is_some(),
            "setting lookup"
        );
        Ok(found)
    }

    fn list(&self) -> WardenResult<Vec<PermissionSetting>> {
        let settings = self.current.read().map_err(|_| Self::poisoned())?;
        Ok(settings.clone())
    }

    /// Replace the whole collection. An invalid collection is rejected and
    /// the current one is kept.
    fn upsert(&self, settings: Vec<PermissionSetting>) -> WardenResult<Vec<PermissionSetting>> {
        validate_settings(&settings)?;
        let mut current = self.current.write().map_err(|_| Self::poisoned())?;
        *current = settings;
        info!(count = current.len(), "permission settings replaced");
        Ok(current.clone())
    }

    fn reset_to_defaults(&self) -> WardenResult<Vec<PermissionSetting>> {
        let mut current = self.current.write().map_err(|_| Self::poisoned())?;
        *current = self.initial.clone();
        info!(count = current.len(), "permission settings reset");
        Ok(current.clone())
    }
}
