//! Document reference runtime demo scenarios.
//!
//! Each scenario builds a fresh `DocumentRuntime` (registry, setting store,
//! action store, audit chain) so their audit trails stay independent.

pub mod denials;
pub mod generation_failure;
pub mod supervised_edit;
pub mod unsupervised_reads;
