//! Hash-chain primitives: hashing and chain integrity verification.
//!
//! Hash input layout (bytes, in order):
//!   1. sequence as 8-byte little-endian
//!   2. prev_hash as UTF-8 bytes (64 ASCII hex chars)
//!   3. canonical JSON of the transition record (no pretty-printing)

use sha2::{Digest, Sha256};

use warden_contracts::{
    action::TransitionRecord,
    error::{WardenError, WardenResult},
};

use crate::event::AuditEvent;

/// Compute the lowercase hex SHA-256 for one audit event.
///
/// Fails with `AuditWriteFailed` only if `record` cannot be serialized.
pub fn hash_event(sequence: u64, record: &TransitionRecord, prev_hash: &str) -> WardenResult<String> {
    let record_json = serde_json::to_vec(record).map_err(|e| WardenError::AuditWriteFailed {
        reason: format!("transition record is not serializable: {}", e),
    })?;

    let mut hasher = Sha256::new();
    hasher.update(sequence.to_le_bytes());
    hasher.update(prev_hash.as_bytes());
    hasher.update(&record_json);

    Ok(hex::encode(hasher.finalize()))
}

/// Verify the integrity of a hash chain.
///
/// Valid when every event links to its predecessor (or `GENESIS_HASH`),
/// sequence numbers have no gaps and every `this_hash` matches the value
/// recomputed from the event's own fields. An empty chain is valid.
pub fn verify_chain(events: &[AuditEvent]) -> bool {
    let mut expected_prev = AuditEvent::GENESIS_HASH.to_string();

    for (position, event) in events.iter().enumerate() {
        if event.sequence != position as u64 || event.prev_hash != expected_prev {
            return false;
        }

        match hash_event(event.sequence, &event.record, &event.prev_hash) {
            Ok(recomputed) if recomputed == event.this_hash => {}
            _ => return false,
        }

        expected_prev = event.this_hash.clone();
    }

    true
}
