//! In-memory implementation of `AuditSink`.
//!
//! `HashChainAuditLog` keeps all events in a `Vec` behind a `Mutex`, so one
//! log can be shared by every lifecycle call in the process. Use
//! `export_log()` to obtain a sealed copy and `verify_integrity()` to confirm
//! the chain has not been tampered with in memory.

use std::sync::Mutex;

use chrono::Utc;
use tracing::debug;

use warden_contracts::{
    action::{ActionId, TransitionRecord},
    error::{WardenError, WardenResult},
};
use warden_core::traits::AuditSink;

use crate::{
    chain::{hash_event, verify_chain},
    event::{AuditEvent, AuditLog},
};

pub(crate) struct ChainState {
    pub(crate) events: Vec<AuditEvent>,
    /// `this_hash` of the last event, or `GENESIS_HASH`.
    pub(crate) last_hash: String,
}

/// An append-only transition log backed by a SHA-256 hash chain.
pub struct HashChainAuditLog {
    pub(crate) state: Mutex<ChainState>,
}

impl Default for HashChainAuditLog {
    fn default() -> Self {
        Self::new()
    }
}

impl HashChainAuditLog {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(ChainState {
                events: Vec::new(),
                last_hash: AuditEvent::GENESIS_HASH.to_string(),
            }),
        }
    }

    fn lock(&self) -> WardenResult<std::sync::MutexGuard<'_, ChainState>> {
        self.state.lock().map_err(|e| WardenError::AuditWriteFailed {
            reason: format!("audit state lock poisoned: {}", e),
        })
    }

    /// Export a sealed copy of every event written so far.
    pub fn export_log(&self) -> WardenResult<AuditLog> {
        let state = self.lock()?;
        let terminal_hash = state
            .events
            .last()
            .map(|e| e.this_hash.clone())
            .unwrap_or_default();

        Ok(AuditLog {
            events: state.events.clone(),
            exported_at: Utc::now(),
            terminal_hash,
        })
    }

    /// True if the in-memory chain still verifies. A poisoned lock counts
    /// as a failed verification.
    pub fn verify_integrity(&self) -> bool {
        match self.state.lock() {
            Ok(state) => verify_chain(&state.events),
            Err(_) => false,
        }
    }

    /// The history of one action, oldest first.
    pub fn events_for(&self, action_id: &ActionId) -> WardenResult<Vec<AuditEvent>> {
        let state = self.lock()?;
        Ok(state
            .events
            .iter()
            .filter(|e| &e.record.action_id == action_id)
            .cloned()
            .collect())
    }

    pub fn len(&self) -> usize {
        self.state.lock().map(|s| s.events.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl AuditSink for HashChainAuditLog {
    /// Append `records` to the chain.
    ///
    /// All hashes are computed before the chain is touched, so a failure
    /// leaves it exactly as it was.
    fn record(&self, records: &[TransitionRecord]) -> WardenResult<()> {
        let mut state = self.lock()?;

        let mut prev_hash = state.last_hash.clone();
        let mut sequence = state.events.len() as u64;
        let mut staged = Vec::with_capacity(records.len());

        for record in records {
            let this_hash = hash_event(sequence, record, &prev_hash)?;
            staged.push(AuditEvent {
                sequence,
                record: record.clone(),
                prev_hash,
                this_hash: this_hash.clone(),
            });
            prev_hash = this_hash;
            sequence += 1;
        }

        for event in &staged {
            debug!(
                sequence = event.sequence,
                action_id = %event.record.action_id,
                to = %event.record.to,
                "transition audited"
            );
        }

        state.events.extend(staged);
        state.last_hash = prev_hash;
        Ok(())
    }
}
