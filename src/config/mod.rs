//! Job Configuration Module
//!
//! Per-job configuration loaded from TOML, covering report metadata, the
//! wire-size property table, and safety derating. Fluid-gradient
//! classification bands are deliberately NOT here: they are fixed domain
//! constants in [`crate::types::gradient_bands`].
//!
//! ## Loading Order
//!
//! 1. `WIRESCOPE_CONFIG` environment variable (path to TOML file)
//! 2. `wirescope.toml` in the current working directory
//! 3. Built-in defaults
//!
//! ## Usage
//!
//! Call `config::init()` once at startup, then `config::get()` anywhere:
//!
//! ```ignore
//! // In main():
//! config::init(JobConfig::load());
//!
//! // Anywhere in the binary:
//! let factor = config::get().safety.wire_safety_factor;
//! ```

mod job_config;

pub use job_config::*;

use std::sync::OnceLock;

/// Global job configuration, initialized once at startup.
static JOB_CONFIG: OnceLock<JobConfig> = OnceLock::new();

/// Initialize the global job configuration.
///
/// Must be called exactly once before any call to `get()`.
pub fn init(config: JobConfig) {
    if JOB_CONFIG.set(config).is_err() {
        tracing::warn!("config::init() called more than once, ignoring");
    }
}

/// Get a reference to the global job configuration.
///
/// Panics if `init()` has not been called; a missing config is a fatal
/// startup error, not a recoverable condition.
pub fn get() -> &'static JobConfig {
    JOB_CONFIG
        .get()
        .expect("config::get() called before config::init(); this is a startup bug")
}

/// Check whether the config has been initialized.
///
/// Useful for tests and optional config paths.
pub fn is_initialized() -> bool {
    JOB_CONFIG.get().is_some()
}
