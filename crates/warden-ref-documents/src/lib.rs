//! # warden-ref-documents
//!
//! Document-management reference runtime for the warden AI permission system.
//!
//! Demonstrates four agent scenarios against a small mock document library:
//!
//! 1. **Supervised Edit**: a `suggest_only` document where every edit waits
//!    for a listed reviewer, including a refused reviewer and a rejection.
//! 2. **Unsupervised Reads**: `read_only` and `full_access` documents where
//!    permitted actions complete without review.
//! 3. **Denials**: unknown agent, deactivated agent, missing capability and
//!    a level that forbids the action. None of them leaves a record.
//! 4. **Generation Failure**: an erroring and a stalled generator both end
//!    in a `failed` record with the error captured.
//!
//! All data is hardcoded and fictional. Scenarios 1-3 call whichever
//! generator the caller passes in; scenario 4 brings its own.

pub mod mock_data;
pub mod runtime;
pub mod scenarios;

pub use runtime::{offline_generator, DocumentRuntime, REFERENCE_CONFIG};
