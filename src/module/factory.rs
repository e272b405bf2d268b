//! Module factories.

use std::fmt::Debug;

use crate::module::{CORE_MODULE, LOG_MODULE, OUTAGE_MODULE};

/// A module the proxy loads when its identifier is in `modulelist`.
pub trait ModuleFactory: Send + Sync + Debug {
    /// Identifier the module is registered under.
    fn name(&self) -> &str;

    fn is_core(&self) -> bool {
        self.name() == CORE_MODULE
    }
}

/// Statement interception and the options registry itself.
#[derive(Debug, Default, Clone, Copy)]
pub struct CoreModule;

impl ModuleFactory for CoreModule {
    fn name(&self) -> &str {
        CORE_MODULE
    }
}

/// Category filtering and logging of intercepted statements.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogModule;

impl ModuleFactory for LogModule {
    fn name(&self) -> &str {
        LOG_MODULE
    }
}

/// Detection of long running statements.
#[derive(Debug, Default, Clone, Copy)]
pub struct OutageModule;

impl ModuleFactory for OutageModule {
    fn name(&self) -> &str {
        OUTAGE_MODULE
    }
}
