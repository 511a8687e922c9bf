//! # warden-policy
//!
//! The TOML-driven permission setting store for the warden runtime.
//!
//! ## Overview
//!
//! This crate provides [`InMemorySettingStore`], which implements the
//! [`SettingRepository`](warden_core::traits::SettingRepository) trait, and
//! [`WardenConfig`], the config file schema that seeds it.
//!
//! ## Quick start
//!
//! ```rust,ignore
//! use std::path::Path;
//! use warden_policy::{InMemorySettingStore, WardenConfig};
//!
//! let config = WardenConfig::from_file(Path::new("config/warden.toml"))?;
//! let store = InMemorySettingStore::from_config(&config)?;
//! ```
//!
//! ## Resolution
//!
//! A setting with a `resource_id` applies to that resource only. A setting
//! without one is the default for its `resource_type`. A resource covered
//! by neither is treated as `no_access` by the evaluator.

pub mod config;
pub mod defaults;
pub mod store;

pub use config::{validate_settings, RuntimeConfig, WardenConfig};
pub use defaults::default_settings;
pub use store::InMemorySettingStore;

// ── Tests ─────────────────────────────────────────────────────────────────────
