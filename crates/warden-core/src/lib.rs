//! # warden-core
//!
//! The permission runtime for AI agents acting on documents.
//!
//! This crate provides:
//! - The repository and collaborator traits (`AgentRepository`,
//!   `SettingRepository`, `ActionRepository`, `AuditSink`, `ContentGenerator`)
//! - The `PermissionEvaluator` that decides what an agent may do
//! - The `ActionLifecycle` that records, executes and reviews agent actions
//!
//! ## Usage
//!
//! ```rust,ignore
//! use warden_core::{ActionLifecycle, PermissionEvaluator, traits::ContentGenerator};
//! ```

pub mod evaluator;
pub mod lifecycle;
pub mod rbac;
pub mod traits;
pub mod transition;

pub use evaluator::PermissionEvaluator;
pub use lifecycle::{ActionLifecycle, ActionRequest, DocumentInput, LifecycleConfig, RequestOutcome};
