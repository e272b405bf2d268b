//! Serializable view of every effective option.

use serde::Serialize;

use crate::options::facade::SpyOptions;
use crate::options::keys::*;
use crate::options::store::StoreState;

/// All effective values, read from one store generation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OptionsSnapshot {
    #[serde(rename = "logMessageFormat")]
    pub log_message_format: String,
    #[serde(rename = "logMessageFormatInstance")]
    pub log_message_format_instance: Option<String>,
    pub logfile: String,
    pub append: bool,
    pub appender: String,
    #[serde(rename = "appenderInstance")]
    pub appender_instance: Option<String>,
    pub modulelist: String,
    #[serde(rename = "moduleNames")]
    pub module_names: Vec<String>,
    #[serde(rename = "moduleFactories")]
    pub module_factories: Vec<String>,
    pub driverlist: Option<String>,
    #[serde(rename = "driverNames")]
    pub driver_names: Vec<String>,
    pub dateformat: Option<String>,
    pub stacktrace: bool,
    pub stacktraceclass: Option<String>,
    pub autoflush: bool,
    pub reloadproperties: bool,
    pub reloadpropertiesinterval: i64,
    pub jndicontextfactory: Option<String>,
    pub jndicontextproviderurl: Option<String>,
    pub jndicontextcustom: Option<String>,
    pub realdatasource: Option<String>,
    pub realdatasourceclass: Option<String>,
    pub realdatasourceproperties: Option<String>,
    #[serde(rename = "databaseDialectDateFormat")]
    pub database_dialect_date_format: String,
}

impl OptionsSnapshot {
    pub(crate) fn from_state(state: &StoreState) -> Self {
        Self {
            log_message_format: state.get(LOG_MESSAGE_FORMAT),
            log_message_format_instance: state.format.names().into_iter().next(),
            logfile: state.get(LOGFILE),
            append: state.get(APPEND),
            appender: state.get(APPENDER),
            appender_instance: state.appender.names().into_iter().next(),
            modulelist: state.get(MODULELIST),
            module_names: state.tokens(MODULE_NAMES).to_vec(),
            module_factories: state.modules.names(),
            driverlist: state.lookup(DRIVERLIST),
            driver_names: state.tokens(DRIVER_NAMES).to_vec(),
            dateformat: state.lookup(DATEFORMAT),
            stacktrace: state.get(STACKTRACE),
            stacktraceclass: state.lookup(STACKTRACECLASS),
            autoflush: state.get(AUTOFLUSH),
            reloadproperties: state.get(RELOADPROPERTIES),
            reloadpropertiesinterval: state.get(RELOADPROPERTIESINTERVAL),
            jndicontextfactory: state.lookup(JNDICONTEXTFACTORY),
            jndicontextproviderurl: state.lookup(JNDICONTEXTPROVIDERURL),
            jndicontextcustom: state.lookup(JNDICONTEXTCUSTOM),
            realdatasource: state.lookup(REALDATASOURCE),
            realdatasourceclass: state.lookup(REALDATASOURCECLASS),
            realdatasourceproperties: state.lookup(REALDATASOURCEPROPERTIES),
            database_dialect_date_format: state.get(DATABASE_DIALECT_DATE_FORMAT),
        }
    }
}

impl SpyOptions {
    pub fn snapshot(&self) -> OptionsSnapshot {
        OptionsSnapshot::from_state(&self.store().state())
    }
}
