//! Modules named by the `modulelist` option.
//!
//! # Data Flow
//! ```text
//! modulelist CSV
//!     → moduleNames (ordered token set)
//!     → moduleFactories (one ModuleFactory per name)
//!
//! reload()
//!     → ModuleManager (re-fetches raw options, calls load() again)
//! ```
//!
//! The core module must stay in the list; the registry rejects any update
//! that would drop it.

pub mod factory;
pub mod manager;

use std::sync::Arc;

use crate::options::resolver::TypeRegistry;

pub use factory::{CoreModule, LogModule, ModuleFactory, OutageModule};
pub use manager::ModuleManager;

/// Identifier of the core module, the one entry `modulelist` can never lose.
pub const CORE_MODULE: &str = "com.p6spy.engine.spy.P6SpyFactory";
pub const LOG_MODULE: &str = "com.p6spy.engine.logging.P6LogFactory";
pub const OUTAGE_MODULE: &str = "com.p6spy.engine.outage.P6OutageFactory";

/// Register the built-in module factories.
pub fn register_builtins(modules: &TypeRegistry<dyn ModuleFactory>) {
    modules.register(CORE_MODULE, || Ok(Arc::new(CoreModule) as Arc<dyn ModuleFactory>));
    modules.register(LOG_MODULE, || Ok(Arc::new(LogModule) as Arc<dyn ModuleFactory>));
    modules.register(OUTAGE_MODULE, || Ok(Arc::new(OutageModule) as Arc<dyn ModuleFactory>));
}
