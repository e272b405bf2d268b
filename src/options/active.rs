//! Process-wide active registry.
//!
//! Consumers that cannot be handed a `SpyOptions` explicitly reach it here.
//! Startup code that builds its own registry installs it before anything
//! calls [`active`]; otherwise the first caller builds one with defaults.

use std::sync::{Arc, OnceLock};

use crate::options::facade::SpyOptions;

static ACTIVE: OnceLock<Arc<SpyOptions>> = OnceLock::new();

/// The active registry, built with defaults on first access.
pub fn active() -> Arc<SpyOptions> {
    Arc::clone(ACTIVE.get_or_init(|| {
        tracing::info!("Initializing active options with defaults");
        Arc::new(SpyOptions::new())
    }))
}

/// Install `options` as the active registry.
///
/// Fails, handing `options` back, when a registry is already active.
pub fn install(options: Arc<SpyOptions>) -> Result<(), Arc<SpyOptions>> {
    ACTIVE.set(options)
}

impl SpyOptions {
    /// Shorthand for [`active`].
    pub fn active() -> Arc<SpyOptions> {
        active()
    }
}
