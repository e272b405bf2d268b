//! The seam `reload()` delegates through.

use crate::options::error::OptionsResult;

/// Owner of the module lifecycle.
///
/// Implementations re-fetch raw option text from wherever it lives and
/// apply it with `SpyOptions::load`. Scheduling periodic reloads is theirs
/// too, driven by `reloadproperties` and `reloadpropertiesinterval`.
pub trait ModuleManager: Send + Sync {
    fn reload(&self) -> OptionsResult<()>;
}

impl<F> ModuleManager for F
where
    F: Fn() -> OptionsResult<()> + Send + Sync,
{
    fn reload(&self) -> OptionsResult<()> {
        self()
    }
}
