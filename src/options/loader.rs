//! Bulk application of raw option text.

use std::collections::HashMap;

use crate::options::error::{OptionsError, OptionsResult};
use crate::options::facade::SpyOptions;
use crate::options::keys::*;

impl SpyOptions {
    /// Apply every recognized key present in `options`.
    ///
    /// Keys are applied in [`SETTABLE_KEYS`] order, `modulelist` first. Absent
    /// keys keep their current value. The first failing key aborts the batch;
    /// keys applied before it stay applied.
    pub fn load(&self, options: &HashMap<String, String>) -> OptionsResult<()> {
        for key in options.keys() {
            if canonical(key).is_none() {
                tracing::debug!(key = %key, "Ignoring unrecognized option");
            }
        }

        match self.load_from(|key| options.get(key).map(String::as_str)) {
            Ok(applied) => {
                tracing::info!(applied, "Options loaded");
                Ok(())
            }
            Err(e) => {
                tracing::error!(error = %e, "Options load aborted");
                Err(e)
            }
        }
    }

    pub(crate) fn load_from<'a>(
        &self,
        lookup: impl Fn(&str) -> Option<&'a str>,
    ) -> OptionsResult<usize> {
        let mut applied = 0;
        for key in SETTABLE_KEYS {
            if let Some(raw) = lookup(key) {
                self.apply(key, raw)?;
                applied += 1;
            }
        }
        Ok(applied)
    }

    /// Route raw text for `key` to its setter.
    pub(crate) fn apply(&self, key: &str, raw: &str) -> OptionsResult<()> {
        match key {
            MODULELIST => self.set_modulelist(raw),
            LOG_MESSAGE_FORMAT => self.set_log_message_format(raw),
            LOGFILE => self.set_logfile(raw),
            APPEND => self.set_append(raw),
            DATEFORMAT => self.set_dateformat(raw),
            APPENDER => self.set_appender(raw),
            DRIVERLIST => self.set_driverlist(raw),
            STACKTRACE => self.set_stack_trace(raw),
            STACKTRACECLASS => self.set_stack_trace_class(raw),
            AUTOFLUSH => self.set_autoflush(raw),
            RELOADPROPERTIES => self.set_reload_properties(raw),
            RELOADPROPERTIESINTERVAL => self.set_reload_properties_interval(raw),
            JNDICONTEXTFACTORY => self.set_jndi_context_factory(raw),
            JNDICONTEXTPROVIDERURL => self.set_jndi_context_provider_url(raw),
            JNDICONTEXTCUSTOM => self.set_jndi_context_custom(raw),
            REALDATASOURCE => self.set_real_data_source(raw),
            REALDATASOURCECLASS => self.set_real_data_source_class(raw),
            REALDATASOURCEPROPERTIES => self.set_real_data_source_properties(raw),
            DATABASE_DIALECT_DATE_FORMAT => self.set_database_dialect_date_format(raw),
            other => Err(OptionsError::UnknownKey(other.to_string())),
        }
    }
}
