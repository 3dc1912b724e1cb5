//! Engine Configuration Module
//!
//! Provides per-deployment configuration loaded from TOML files, replacing all
//! hardcoded scoring thresholds with operator-tunable values.
//!
//! ## Loading Order
//!
//! 1. `AEOLUS_CONFIG` environment variable (path to TOML file)
//! 2. `aeolus.toml` in the current working directory
//! 3. Built-in defaults
//!
//! Defaults are used only when neither file exists. A file that is present
//! but unreadable, malformed or invalid fails the load.
//!
//! ## Usage
//!
//! The binary calls `config::init()` once at startup and reads `config::get()`
//! for server settings. Engine components never read the global: they take
//! their section by value at construction.
//!
//! ```ignore
//! config::init(EngineConfig::load()?);
//! let engine = MaintenanceEngine::new(config::get().clone(), ModelSet::default());
//! ```

mod engine_config;
pub mod defaults;
pub mod validation;

pub use engine_config::*;

use std::sync::OnceLock;

/// Global engine configuration, initialized once at startup.
static ENGINE_CONFIG: OnceLock<EngineConfig> = OnceLock::new();

/// Initialize the global engine configuration.
///
/// Later calls are ignored with a warning.
pub fn init(config: EngineConfig) {
    if ENGINE_CONFIG.set(config).is_err() {
        tracing::warn!("config::init() called more than once, ignoring");
    }
}

/// Get a reference to the global engine configuration.
///
/// Falls back to a process-wide default instance when `init()` was never
/// called, so library callers and tests need no setup.
pub fn get() -> &'static EngineConfig {
    ENGINE_CONFIG.get_or_init(EngineConfig::default)
}
