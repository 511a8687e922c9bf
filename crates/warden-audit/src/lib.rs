//! # warden-audit
//!
//! Action record storage and an append-only, SHA-256 hash-chained log of
//! every action status change.
//!
//! ## Overview
//!
//! Every `TransitionRecord` the lifecycle manager produces is wrapped in an
//! `AuditEvent` that links to the previous event via its SHA-256 hash.
//! Tampering with any event breaks the chain and is detected by
//! `verify_chain`.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use warden_audit::{HashChainAuditLog, InMemoryActionStore};
//!
//! let audit = Arc::new(HashChainAuditLog::new());
//! let actions = Arc::new(InMemoryActionStore::new());
//! // hand both to `ActionLifecycle::new(...)`, then later:
//! assert!(audit.verify_integrity());
//! let log = audit.export_log()?;
//! ```

pub mod chain;
pub mod event;
pub mod store;
pub mod trail;

pub use chain::{hash_event, verify_chain};
pub use event::{AuditEvent, AuditLog};
pub use store::InMemoryActionStore;
pub use trail::HashChainAuditLog;

// ── Tests ─────────────────────────────────────────────────────────────────────
