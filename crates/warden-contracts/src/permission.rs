//! Permission settings and evaluation decisions.
//!
//! A `PermissionSetting` is a resource-scoped posture. The evaluator combines
//! it with an agent's capabilities and returns a `Decision`. A denial is a
//! normal decision, never an error.

use std::fmt;

use serde::{Deserialize, Serialize};

/// How far an agent may go on a resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PermissionLevel {
    NoAccess,
    ReadOnly,
    /// Changes may be proposed but writes are always supervised.
    SuggestOnly,
    FullAccess,
}

impl PermissionLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            PermissionLevel::NoAccess => "no_access",
            PermissionLevel::ReadOnly => "read_only",
            PermissionLevel::SuggestOnly => "suggest_only",
            PermissionLevel::FullAccess => "full_access",
        }
    }
}

impl fmt::Display for PermissionLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Permission posture for one resource, or for every resource of a type.
///
/// Example in TOML:
/// ```toml
/// [[settings]]
/// resource_type = "document"
/// resource_id = "1"
/// resource_name = "Getting Started Guide"
/// permission_level = "suggest_only"
/// requires_approval = true
/// approver_roles = ["admin"]
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermissionSetting {
    /// e.g. "document".
    pub resource_type: String,

    /// Absent means this is the default for `resource_type`.
    #[serde(default)]
    pub resource_id: Option<String>,

    /// Display only.
    #[serde(default)]
    pub resource_name: Option<String>,

    pub permission_level: PermissionLevel,

    pub requires_approval: bool,

    /// Human roles allowed to approve or reject actions on this resource.
    #[serde(default)]
    pub approver_roles: Vec<String>,
}

impl PermissionSetting {
    /// The default setting for a resource type.
    pub fn default_for(
        resource_type: impl Into<String>,
        permission_level: PermissionLevel,
        requires_approval: bool,
    ) -> Self {
        Self {
            resource_type: resource_type.into(),
            resource_id: None,
            resource_name: None,
            permission_level,
            requires_approval,
            approver_roles: Vec::new(),
        }
    }

    /// A setting bound to one resource.
    pub fn specific(
        resource_type: impl Into<String>,
        resource_id: impl Into<String>,
        permission_level: PermissionLevel,
        requires_approval: bool,
    ) -> Self {
        Self {
            resource_id: Some(resource_id.into()),
            ..Self::default_for(resource_type, permission_level, requires_approval)
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.resource_name = Some(name.into());
        self
    }

    pub fn with_approvers<I, S>(mut self, roles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.approver_roles = roles.into_iter().map(Into::into).collect();
        self
    }

    pub fn is_default(&self) -> bool {
        self.resource_id.is_none()
    }

    /// The implicit setting used when nothing is configured for a resource.
    pub fn implicit_deny(resource_type: impl Into<String>) -> Self {
        Self::default_for(resource_type, PermissionLevel::NoAccess, true)
    }
}

/// Why a request was denied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DenialReason {
    UnknownAgent { agent_id: String },
    AgentInactive { agent_id: String },
    NoSetting { resource_type: String, resource_id: Option<String> },
    UnknownAction { action: String },
    MissingCapability { action: String, accepted: Vec<String> },
    LevelForbids { action: String, level: PermissionLevel },
    LookupFailed { reason: String },
}

impl fmt::Display for DenialReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DenialReason::UnknownAgent { agent_id } => {
                write!(f, "agent '{agent_id}' is not registered")
            }
            DenialReason::AgentInactive { agent_id } => {
                write!(f, "agent '{agent_id}' is deactivated")
            }
            DenialReason::NoSetting { resource_type, resource_id } => match resource_id {
                Some(id) => write!(
                    f,
                    "no permission setting covers {resource_type} '{id}'; denied by default"
                ),
                None => write!(
                    f,
                    "no permission setting covers resource type '{resource_type}'; denied by default"
                ),
            },
            DenialReason::UnknownAction { action } => {
                write!(f, "action '{action}' is not in the action vocabulary")
            }
            DenialReason::MissingCapability { action, accepted } => write!(
                f,
                "action '{action}' requires one of [{}] which the agent does not hold",
                accepted.join(", ")
            ),
            DenialReason::LevelForbids { action, level } => {
                write!(f, "permission level '{level}' does not allow action '{action}'")
            }
            DenialReason::LookupFailed { reason } => {
                write!(f, "permission lookup failed: {reason}")
            }
        }
    }
}

/// The evaluator's answer for one (agent, action, resource) triple.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Decision {
    pub permitted: bool,
    pub requires_approval: bool,
    pub permission_level: PermissionLevel,
    /// Present exactly when `permitted` is false.
    pub denial: Option<DenialReason>,
}

impl Decision {
    /// The uniform denial shape: no access, approval required.
    pub fn deny(reason: DenialReason) -> Self {
        Self {
            permitted: false,
            requires_approval: true,
            permission_level: PermissionLevel::NoAccess,
            denial: Some(reason),
        }
    }

    /// Human-readable explanation for a denial, or `None` when permitted.
    pub fn reason(&self) -> Option<String> {
        self.denial.as_ref().map(ToString::to_string)
    }
}
