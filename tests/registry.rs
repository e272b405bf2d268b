//! End-to-end behavior of the options registry.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use spy_options::appender::{StatementLog, MULTI_LINE_FORMAT, SINGLE_LINE_FORMAT, STDOUT_LOGGER};
use spy_options::module::{CORE_MODULE, LOG_MODULE, OUTAGE_MODULE};
use spy_options::options::keys::*;
use spy_options::{OptionsError, OptionsManagement, SpyOptions};

mod common;

#[test]
fn test_defaults_match_explicit_defaults() {
    let fresh = SpyOptions::new();
    let explicit = SpyOptions::new();
    let table: std::collections::HashMap<String, String> = fresh
        .defaults()
        .iter()
        .map(|(k, v)| (k.to_string(), v.clone()))
        .collect();
    explicit.load(&table).unwrap();

    assert_eq!(fresh.snapshot(), explicit.snapshot());
    for key in fresh.defaults().keys() {
        assert_eq!(
            fresh.get_attribute(key).unwrap(),
            Some(fresh.defaults()[key].clone()),
            "{}",
            key
        );
    }
}

#[test]
fn test_bulk_load_of_a_full_configuration() {
    let options = SpyOptions::new();
    let modules = format!("{}, {}, {}", CORE_MODULE, LOG_MODULE, OUTAGE_MODULE);
    options
        .load(&common::map(&[
            (MODULELIST, modules.as_str()),
            (LOG_MESSAGE_FORMAT, MULTI_LINE_FORMAT),
            (APPENDER, STDOUT_LOGGER),
            (DRIVERLIST, "org.h2.Driver, org.postgresql.Driver"),
            (DATEFORMAT, "yyyy-MM-dd"),
            (AUTOFLUSH, "true"),
            (RELOADPROPERTIES, "true"),
            (RELOADPROPERTIESINTERVAL, "10"),
            (REALDATASOURCE, "jdbc/real"),
        ]))
        .unwrap();

    let snapshot = options.snapshot();
    assert_eq!(snapshot.module_names, vec![CORE_MODULE, LOG_MODULE, OUTAGE_MODULE]);
    assert_eq!(snapshot.module_factories, snapshot.module_names);
    assert_eq!(snapshot.log_message_format_instance.as_deref(), Some(MULTI_LINE_FORMAT));
    assert_eq!(snapshot.appender_instance.as_deref(), Some(STDOUT_LOGGER));
    assert_eq!(snapshot.driver_names, vec!["org.h2.Driver", "org.postgresql.Driver"]);
    assert_eq!(snapshot.dateformat.as_deref(), Some("yyyy-MM-dd"));
    assert!(snapshot.autoflush);
    assert!(snapshot.reloadproperties);
    assert_eq!(snapshot.reloadpropertiesinterval, 10);
    assert_eq!(snapshot.realdatasource.as_deref(), Some("jdbc/real"));
    // Untouched keys keep their defaults.
    assert_eq!(snapshot.logfile, "spy.log");
}

#[test]
fn test_custom_appender_constructed_once_and_used() {
    let recorder = Arc::new(common::RecordingAppender::default());
    let constructed = Arc::new(AtomicUsize::new(0));
    let options = SpyOptions::with_types(common::registries_with_recorder(
        recorder.clone(),
        constructed.clone(),
    ))
    .unwrap();

    options.set_appender(common::RECORDING_APPENDER).unwrap();
    options.set_appender(common::RECORDING_APPENDER).unwrap();
    assert_eq!(constructed.load(Ordering::SeqCst), 1);

    let appender = options.appender_instance().unwrap();
    let format = options.log_message_format_instance().unwrap();
    assert_eq!(options.log_message_format(), SINGLE_LINE_FORMAT);

    appender.log_statement(
        &StatementLog {
            connection_id: 1,
            now: "t0",
            elapsed_ms: 3,
            category: "statement",
            prepared: "select ?",
            sql: "select 1",
        },
        format.as_ref(),
    );
    appender.log_text("plain");
    assert_eq!(options.appender(), common::RECORDING_APPENDER);
    assert_eq!(
        *recorder.lines.lock().unwrap(),
        vec!["t0|3|statement|connection 1|select ?|select 1", "plain"]
    );
}

#[test]
fn test_failed_updates_keep_last_good_configuration() {
    let options = SpyOptions::new();
    options.set_appender(STDOUT_LOGGER).unwrap();
    let appender = options.appender_instance().unwrap();
    let before = options.snapshot();

    assert!(matches!(
        options.set_appender("com.example.Missing"),
        Err(OptionsError::Resolution { .. })
    ));
    assert!(matches!(
        options.set_log_message_format("com.example.Missing"),
        Err(OptionsError::Resolution { .. })
    ));
    assert!(matches!(
        options.set_modulelist(&format!("{},-{}", LOG_MODULE, CORE_MODULE)),
        Err(OptionsError::Validation { .. })
    ));
    assert!(matches!(
        options.set_reload_properties_interval("1m"),
        Err(OptionsError::Coercion { .. })
    ));

    assert_eq!(options.snapshot(), before);
    assert!(Arc::ptr_eq(&appender, &options.appender_instance().unwrap()));
}

#[test]
fn test_reload_reapplies_through_manager() {
    let options = Arc::new(SpyOptions::new());
    let source = Arc::new(std::sync::Mutex::new(common::map(&[(AUTOFLUSH, "true")])));

    let target = Arc::downgrade(&options);
    let raw = source.clone();
    options.attach_module_manager(move || -> spy_options::OptionsResult<()> {
        match target.upgrade() {
            Some(options) => options.load(&raw.lock().unwrap()),
            None => Ok(()),
        }
    });

    options.reload().unwrap();
    assert!(options.autoflush());

    source.lock().unwrap().insert(AUTOFLUSH.to_string(), "maybe".to_string());
    assert!(matches!(options.reload(), Err(OptionsError::Coercion { .. })));
    assert!(options.autoflush());
}
