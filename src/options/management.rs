//! Self-describing management surface.
//!
//! Administration front ends (remote consoles, CLIs) drive the registry
//! through [`OptionsManagement`] by option name, without knowing the typed
//! accessors.

use std::collections::{BTreeMap, HashMap};

use crate::options::error::{OptionsError, OptionsResult};
use crate::options::facade::SpyOptions;
use crate::options::keys::*;

pub trait OptionsManagement {
    /// Every readable option name, settable ones first.
    fn attribute_names(&self) -> Vec<&'static str>;

    /// Current value of `key` rendered as text; `None` when unset.
    fn get_attribute(&self, key: &str) -> OptionsResult<Option<String>>;

    /// Set `key` from raw text. Derived options are read-only.
    fn set_attribute(&self, key: &str, raw: &str) -> OptionsResult<()>;

    fn load(&self, options: &HashMap<String, String>) -> OptionsResult<()>;

    fn reload(&self) -> OptionsResult<()>;

    fn defaults(&self) -> BTreeMap<String, String>;
}

impl OptionsManagement for SpyOptions {
    fn attribute_names(&self) -> Vec<&'static str> {
        SETTABLE_KEYS.iter().chain(DERIVED_KEYS.iter()).copied().collect()
    }

    fn get_attribute(&self, key: &str) -> OptionsResult<Option<String>> {
        let key = canonical(key).ok_or_else(|| OptionsError::UnknownKey(key.to_string()))?;
        let state = self.store().state();

        let value = match key {
            DRIVER_NAMES | MODULE_NAMES => Some(state.tokens(key).join(",")),
            MODULE_FACTORIES => Some(state.modules.names().join(",")),
            APPENDER_INSTANCE => state.appender.names().into_iter().next(),
            LOG_MESSAGE_FORMAT_INSTANCE => state.format.names().into_iter().next(),
            _ => state
                .raw(key)
                .map(ToString::to_string)
                .or_else(|| defaults().get(key).cloned()),
        };
        Ok(value)
    }

    fn set_attribute(&self, key: &str, raw: &str) -> OptionsResult<()> {
        match canonical(key) {
            Some(key) if SETTABLE_KEYS.contains(&key) => self.apply(key, raw),
            _ => Err(OptionsError::UnknownKey(key.to_string())),
        }
    }

    fn load(&self, options: &HashMap<String, String>) -> OptionsResult<()> {
        SpyOptions::load(self, options)
    }

    fn reload(&self) -> OptionsResult<()> {
        SpyOptions::reload(self)
    }

    fn defaults(&self) -> BTreeMap<String, String> {
        defaults()
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }
}
