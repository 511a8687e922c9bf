//! Audit event and log types.
//!
//! `AuditEvent` is a single entry in the hash chain. It wraps a
//! `TransitionRecord` with sequence numbering and the SHA-256 hashes that
//! make tampering detectable. `AuditLog` is the sealed snapshot returned by
//! `HashChainAuditLog::export_log`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use warden_contracts::action::TransitionRecord;

/// A single entry in the SHA-256 hash chain.
///
/// Each event commits to the previous event via `prev_hash`. Modifying any
/// field, including those of the embedded `record`, invalidates `this_hash`
/// and every later `prev_hash`, which `verify_chain` detects.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEvent {
    /// Position in the chain, starting at 0.
    pub sequence: u64,

    /// The status change being recorded.
    pub record: TransitionRecord,

    /// Hex SHA-256 of the previous event, or `GENESIS_HASH` for the first.
    pub prev_hash: String,

    /// Hex SHA-256 over (sequence, prev_hash, canonical JSON of record).
    pub this_hash: String,
}

impl AuditEvent {
    /// The `prev_hash` of the first event in every chain.
    pub const GENESIS_HASH: &'static str =
        "0000000000000000000000000000000000000000000000000000000000000000";
}

/// A point-in-time copy of the whole chain.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditLog {
    /// All events in chain order.
    pub events: Vec<AuditEvent>,

    pub exported_at: DateTime<Utc>,

    /// The `this_hash` of the last event. Empty if the log is empty.
    pub terminal_hash: String,
}
