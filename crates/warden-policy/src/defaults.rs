//! Built-in permission settings.

use warden_contracts::permission::{PermissionLevel, PermissionSetting};

/// The settings a fresh store starts with when nothing else is configured.
///
/// Documents are read-only by default. The onboarding guide only accepts
/// supervised suggestions; the security policy is open to capable agents.
pub fn default_settings() -> Vec<PermissionSetting> {
    vec![
        PermissionSetting::default_for("document", PermissionLevel::ReadOnly, false)
            .with_approvers(["admin", "editor"]),
        PermissionSetting::specific("document", "1", PermissionLevel::SuggestOnly, true)
            .with_name("Getting Started Guide")
            .with_approvers(["admin"]),
        PermissionSetting::specific("document", "2", PermissionLevel::FullAccess, false)
            .with_name("Security Policy")
            .with_approvers(["admin"]),
    ]
}
