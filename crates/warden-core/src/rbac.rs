//! Static role table for human users.
//!
//! Humans are not evaluated by the agent permission engine; this lookup only
//! decides who may review AI actions.

/// Resource types known to the human role table.
pub mod resources {
    pub const DOCUMENT: &str = "document";
    pub const ADMIN_PANEL: &str = "admin_panel";
    pub const AI_AGENT: &str = "ai_agent";
    pub const AI_ACTION: &str = "ai_action";
}

/// Actions known to the human role table.
pub mod actions {
    pub const CREATE: &str = "create";
    pub const READ: &str = "read";
    pub const UPDATE: &str = "update";
    pub const DELETE: &str = "delete";
    pub const ACCESS: &str = "access";
    pub const APPROVE: &str = "approve";
    pub const REJECT: &str = "reject";
}

/// Return true if a human with `role` may perform `action` on `resource_type`.
pub fn has_permission(role: &str, action: &str, resource_type: &str) -> bool {
    if role == "admin" {
        return true;
    }

    match resource_type {
        resources::DOCUMENT => match role {
            "editor" => matches!(action, actions::CREATE | actions::READ | actions::UPDATE),
            "viewer" => action == actions::READ,
            _ => false,
        },
        resources::AI_ACTION => {
            matches!(action, actions::APPROVE | actions::REJECT) && role == "editor"
        }
        _ => false,
    }
}

/// Return true if `role` may approve or reject AI actions at all.
pub fn can_review(role: &str, action: &str) -> bool {
    has_permission(role, action, resources::AI_ACTION)
}
