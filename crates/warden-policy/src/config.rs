//! Runtime configuration schema.
//!
//! A `WardenConfig` is deserialized from TOML. It holds the lifecycle
//! tunables and the permission settings the store starts with.
//!
//! Example:
//! ```toml
//! [runtime]
//! generation_timeout_secs = 30
//!
//! [[settings]]
//! resource_type = "document"
//! permission_level = "read_only"
//! requires_approval = false
//! approver_roles = ["admin", "editor"]
//! ```

use std::collections::HashSet;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use warden_contracts::{
    error::{WardenError, WardenResult},
    permission::PermissionSetting,
};
use warden_core::LifecycleConfig;

fn default_generation_timeout_secs() -> u64 {
    30
}

/// The `[runtime]` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuntimeConfig {
    /// Upper bound for one content-generation call, in seconds. Must be > 0.
    #[serde(default = "default_generation_timeout_secs")]
    pub generation_timeout_secs: u64,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            generation_timeout_secs: default_generation_timeout_secs(),
        }
    }
}

/// The top-level structure deserialized from a warden config file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WardenConfig {
    #[serde(default)]
    pub runtime: RuntimeConfig,

    /// Settings in declaration order. Empty means "use the built-in defaults".
    #[serde(default)]
    pub settings: Vec<PermissionSetting>,
}

impl WardenConfig {
    /// Parse `s` as TOML and validate it.
    ///
    /// Returns `WardenError::ConfigError` if the TOML is malformed, does not
    /// match the schema, or breaks a setting invariant.
    pub fn from_toml_str(s: &str) -> WardenResult<Self> {
        let config: WardenConfig = toml::from_str(s).map_err(|e| WardenError::ConfigError {
            reason: format!("failed to parse warden config TOML: {}", e),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Read the file at `path` and parse it with `from_toml_str`.
    pub fn from_file(path: &Path) -> WardenResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| WardenError::ConfigError {
            reason: format!("failed to read config file '{}': {}", path.display(), e),
        })?;
        Self::from_toml_str(&contents)
    }

    pub fn validate(&self) -> WardenResult<()> {
        if self.runtime.generation_timeout_secs == 0 {
            return Err(WardenError::ConfigError {
                reason: "runtime.generation_timeout_secs must be greater than zero".to_string(),
            });
        }
        validate_settings(&self.settings)
    }

    pub fn lifecycle_config(&self) -> LifecycleConfig {
        LifecycleConfig {
            generation_timeout: Duration::from_secs(self.runtime.generation_timeout_secs),
        }
    }
}

/// Check the collection invariants: at most one default per resource type
/// and at most one setting per (resource type, resource id).
pub fn validate_settings(settings: &[PermissionSetting]) -> WardenResult<()> {
    let mut seen: HashSet<(&str, Option<&str>)> = HashSet::new();

    for setting in settings {
        if setting.resource_type.trim().is_empty() {
            return Err(WardenError::ConfigError {
                reason: "setting has an empty resource_type".to_string(),
            });
        }

        let key = (setting.resource_type.as_str(), setting.resource_id.as_deref());
        if !seen.insert(key) {
            let reason = match setting.resource_id.as_deref() {
                None => format!(
                    "more than one default setting for resource type '{}'",
                    setting.resource_type
                ),
                Some(id) => format!(
                    "duplicate setting for {} '{}'",
                    setting.resource_type, id
                ),
            };
            return Err(WardenError::ConfigError { reason });
        }
    }

    Ok(())
}
