//! Recognized option keys and the defaults table.
//!
//! The key set is closed: the registry never stores anything under a name
//! that is not listed here.

use std::collections::BTreeMap;
use std::sync::OnceLock;

use crate::appender::{FILE_LOGGER, SINGLE_LINE_FORMAT};
use crate::module::{CORE_MODULE, LOG_MODULE};

pub const LOG_MESSAGE_FORMAT: &str = "logMessageFormat";
pub const LOGFILE: &str = "logfile";
pub const APPEND: &str = "append";
pub const APPENDER: &str = "appender";
pub const MODULELIST: &str = "modulelist";
pub const DRIVERLIST: &str = "driverlist";
pub const DATEFORMAT: &str = "dateformat";
pub const STACKTRACE: &str = "stacktrace";
pub const STACKTRACECLASS: &str = "stacktraceclass";
pub const AUTOFLUSH: &str = "autoflush";
pub const RELOADPROPERTIES: &str = "reloadproperties";
pub const RELOADPROPERTIESINTERVAL: &str = "reloadpropertiesinterval";
pub const JNDICONTEXTFACTORY: &str = "jndicontextfactory";
pub const JNDICONTEXTPROVIDERURL: &str = "jndicontextproviderurl";
pub const JNDICONTEXTCUSTOM: &str = "jndicontextcustom";
pub const REALDATASOURCE: &str = "realdatasource";
pub const REALDATASOURCECLASS: &str = "realdatasourceclass";
pub const REALDATASOURCEPROPERTIES: &str = "realdatasourceproperties";
pub const DATABASE_DIALECT_DATE_FORMAT: &str = "databaseDialectDateFormat";

// Derived only, written as a side effect of the keys above.
pub const DRIVER_NAMES: &str = "driverNames";
pub const MODULE_NAMES: &str = "moduleNames";
pub const MODULE_FACTORIES: &str = "moduleFactories";
pub const LOG_MESSAGE_FORMAT_INSTANCE: &str = "logMessageFormatInstance";
pub const APPENDER_INSTANCE: &str = "appenderInstance";

/// Prefix marking a CSV token as "exclude this entry".
pub const COLLECTION_REMOVAL_PREFIX: char = '-';

/// Keys settable from outside, in bulk-load order.
pub const SETTABLE_KEYS: &[&str] = &[
    MODULELIST,
    LOG_MESSAGE_FORMAT,
    LOGFILE,
    APPEND,
    DATEFORMAT,
    APPENDER,
    DRIVERLIST,
    STACKTRACE,
    STACKTRACECLASS,
    AUTOFLUSH,
    RELOADPROPERTIES,
    RELOADPROPERTIESINTERVAL,
    JNDICONTEXTFACTORY,
    JNDICONTEXTPROVIDERURL,
    JNDICONTEXTCUSTOM,
    REALDATASOURCE,
    REALDATASOURCECLASS,
    REALDATASOURCEPROPERTIES,
    DATABASE_DIALECT_DATE_FORMAT,
];

pub const DERIVED_KEYS: &[&str] = &[
    DRIVER_NAMES,
    MODULE_NAMES,
    MODULE_FACTORIES,
    LOG_MESSAGE_FORMAT_INSTANCE,
    APPENDER_INSTANCE,
];

/// Map an arbitrary key onto its interned constant, if it is recognized.
pub fn canonical(key: &str) -> Option<&'static str> {
    SETTABLE_KEYS
        .iter()
        .chain(DERIVED_KEYS.iter())
        .copied()
        .find(|k| *k == key)
}

/// The defaults table, built once and immutable afterwards.
pub fn defaults() -> &'static BTreeMap<&'static str, String> {
    static DEFAULTS: OnceLock<BTreeMap<&'static str, String>> = OnceLock::new();
    DEFAULTS.get_or_init(|| {
        let mut map = BTreeMap::new();
        map.insert(LOG_MESSAGE_FORMAT, SINGLE_LINE_FORMAT.to_string());
        map.insert(LOGFILE, "spy.log".to_string());
        map.insert(APPEND, true.to_string());
        map.insert(APPENDER, FILE_LOGGER.to_string());
        map.insert(MODULELIST, format!("{},{}", CORE_MODULE, LOG_MODULE));
        map.insert(STACKTRACE, false.to_string());
        map.insert(AUTOFLUSH, false.to_string());
        map.insert(RELOADPROPERTIES, false.to_string());
        map.insert(RELOADPROPERTIESINTERVAL, 60.to_string());
        map.insert(DATABASE_DIALECT_DATE_FORMAT, "dd-MMM-yy".to_string());
        map
    })
}
