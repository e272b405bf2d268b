//! Typed per-option accessors.
//!
//! Every setter replaces the whole value of its option. Setters that drive
//! derived state (`modulelist`, `driverlist`, `appender`, `logMessageFormat`)
//! publish text, tokens and instances together in one store update.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use arc_swap::ArcSwapOption;

use crate::appender::{Appender, MessageFormattingStrategy};
use crate::module::{ModuleFactory, ModuleManager, CORE_MODULE};
use crate::options::csv::{derive_set, removes};
use crate::options::error::{OptionsError, OptionsResult};
use crate::options::keys::*;
use crate::options::resolver::{resolve_instances, Instances, TypeRegistries, TypeRegistry};
use crate::options::store::{OptionsStore, StoreState};
use crate::options::value::OptionType;

/// Module names and factories taken from the same state.
#[derive(Debug, Clone)]
pub struct ModuleState {
    pub names: Arc<[String]>,
    pub factories: Vec<Arc<dyn ModuleFactory>>,
}

/// The options registry of the spy proxy.
pub struct SpyOptions {
    store: OptionsStore,
    types: TypeRegistries,
    manager: ArcSwapOption<Box<dyn ModuleManager>>,
}

impl SpyOptions {
    /// Registry with the built-in types and every default applied.
    pub fn new() -> Self {
        let (options, _) = Self::build(TypeRegistries::builtin());
        options
    }

    /// Registry resolving type names against `types`, defaults applied.
    ///
    /// Fails with the first default `types` cannot satisfy, so a registry
    /// missing part of its default state is never handed out.
    pub fn with_types(types: TypeRegistries) -> OptionsResult<Self> {
        let (options, failures) = Self::build(types);
        match failures.into_iter().next() {
            Some(e) => Err(e),
            None => Ok(options),
        }
    }

    fn build(types: TypeRegistries) -> (Self, Vec<OptionsError>) {
        let options = Self {
            store: OptionsStore::new(),
            types,
            manager: ArcSwapOption::empty(),
        };
        let failures = options.apply_defaults();
        (options, failures)
    }

    /// Apply each default on its own so one failure does not skip the rest.
    ///
    /// Derived state (names, factories, instances) exists only once set.
    fn apply_defaults(&self) -> Vec<OptionsError> {
        SETTABLE_KEYS
            .iter()
            .filter_map(|key| {
                let raw = defaults().get(key)?;
                self.apply(key, raw).err()
            })
            .inspect(|e| tracing::error!(error = %e, "Failed to apply option default"))
            .collect()
    }

    pub fn defaults(&self) -> &'static BTreeMap<&'static str, String> {
        defaults()
    }

    pub fn types(&self) -> &TypeRegistries {
        &self.types
    }

    pub fn store(&self) -> &OptionsStore {
        &self.store
    }

    /// Attach the module manager `reload()` delegates to, replacing any prior one.
    pub fn attach_module_manager<M: ModuleManager + 'static>(&self, manager: M) {
        self.manager
            .store(Some(Arc::new(Box::new(manager) as Box<dyn ModuleManager>)));
    }

    /// Ask the module manager to re-fetch and re-apply raw options.
    pub fn reload(&self) -> OptionsResult<()> {
        let manager = self.manager.load_full().ok_or(OptionsError::ReloadUnavailable)?;
        tracing::info!("Reloading options via module manager");
        let result = manager.reload();
        if let Err(e) = &result {
            tracing::error!(error = %e, "Reload failed, keeping current options");
        }
        result
    }

    fn set_scalar<T: OptionType>(&self, key: &'static str, raw: &str) -> OptionsResult<()> {
        let result = self.store.set::<T>(key, raw);
        trace_update(key, &result);
        result
    }

    fn set_typed<T: OptionType>(&self, key: &'static str, value: T) {
        self.store.set_value(key, value);
        tracing::debug!(key = %key, "Option updated");
    }

    fn set_instance<T: ?Sized>(
        &self,
        key: &'static str,
        instance_key: &'static str,
        raw: &str,
        registry: &TypeRegistry<T>,
        slot: fn(&mut StoreState) -> &mut Instances<T>,
    ) -> OptionsResult<()> {
        let name = raw.trim().to_string();
        let result = self.store.update(|state| {
            let resolved =
                resolve_instances(registry, instance_key, std::slice::from_ref(&name), slot(state))?;
            *slot(state) = resolved;
            state.put(key, name.clone());
            Ok(())
        });
        trace_update(key, &result);
        result
    }

    // logMessageFormat

    pub fn log_message_format(&self) -> String {
        self.store.get(LOG_MESSAGE_FORMAT)
    }

    pub fn set_log_message_format(&self, type_name: &str) -> OptionsResult<()> {
        self.set_instance(
            LOG_MESSAGE_FORMAT,
            LOG_MESSAGE_FORMAT_INSTANCE,
            type_name,
            &self.types.formats,
            format_slot,
        )
    }

    pub fn log_message_format_instance(&self) -> Option<Arc<dyn MessageFormattingStrategy>> {
        self.store.state().format.first()
    }

    // appender

    pub fn appender(&self) -> String {
        self.store.get(APPENDER)
    }

    pub fn set_appender(&self, type_name: &str) -> OptionsResult<()> {
        self.set_instance(APPENDER, APPENDER_INSTANCE, type_name, &self.types.appenders, appender_slot)
    }

    pub fn appender_instance(&self) -> Option<Arc<dyn Appender>> {
        self.store.state().appender.first()
    }

    // modulelist

    pub fn modulelist(&self) -> String {
        self.store.get(MODULELIST)
    }

    /// Replace the module list, re-deriving module names and factories.
    ///
    /// Rejected without any change when the list excludes the core module,
    /// either through a removal directive or by not naming it.
    pub fn set_modulelist(&self, modulelist: &str) -> OptionsResult<()> {
        let result = self.store.update(|state| {
            if removes(modulelist, CORE_MODULE) {
                return Err(OptionsError::validation(
                    MODULELIST,
                    format!("{} can't be removed, it is the core module", CORE_MODULE),
                ));
            }

            let names = derive_set(Some(modulelist));
            if !names.iter().any(|name| name == CORE_MODULE) {
                return Err(OptionsError::validation(
                    MODULELIST,
                    format!("{} must be listed, it is the core module", CORE_MODULE),
                ));
            }

            let factories = resolve_instances(&self.types.modules, MODULE_FACTORIES, &names, &state.modules)?;
            state.put(MODULELIST, modulelist.to_string());
            state.put_tokens(MODULE_NAMES, names);
            state.modules = factories;
            Ok(())
        });
        trace_update(MODULELIST, &result);
        result
    }

    pub fn module_names(&self) -> Arc<[String]> {
        self.store.get_set(MODULE_NAMES)
    }

    pub fn module_factories(&self) -> Vec<Arc<dyn ModuleFactory>> {
        self.store.state().modules.instances()
    }

    /// Names and factories as one consistent pair.
    pub fn modules(&self) -> ModuleState {
        let state = self.store.state();
        ModuleState {
            names: state.tokens(MODULE_NAMES),
            factories: state.modules.instances(),
        }
    }

    // driverlist

    pub fn driverlist(&self) -> Option<String> {
        self.store.lookup(DRIVERLIST)
    }

    pub fn set_driverlist(&self, driverlist: &str) -> OptionsResult<()> {
        let tokens = derive_set(Some(driverlist));
        let result = self.store.update(|state| {
            state.put(DRIVERLIST, driverlist.to_string());
            state.put_tokens(DRIVER_NAMES, tokens);
            Ok(())
        });
        trace_update(DRIVERLIST, &result);
        result
    }

    pub fn driver_names(&self) -> Arc<[String]> {
        self.store.get_set(DRIVER_NAMES)
    }

    // logfile, append, dateformat

    pub fn logfile(&self) -> String {
        self.store.get(LOGFILE)
    }

    pub fn set_logfile(&self, logfile: &str) -> OptionsResult<()> {
        self.set_scalar::<String>(LOGFILE, logfile)
    }

    pub fn append(&self) -> bool {
        self.store.get(APPEND)
    }

    pub fn set_append(&self, append: &str) -> OptionsResult<()> {
        self.set_scalar::<bool>(APPEND, append)
    }

    pub fn set_append_flag(&self, append: bool) {
        self.set_typed(APPEND, append);
    }

    pub fn dateformat(&self) -> Option<String> {
        self.store.lookup(DATEFORMAT)
    }

    pub fn set_dateformat(&self, dateformat: &str) -> OptionsResult<()> {
        self.set_scalar::<String>(DATEFORMAT, dateformat)
    }

    // stacktrace

    pub fn stack_trace(&self) -> bool {
        self.store.get(STACKTRACE)
    }

    pub fn set_stack_trace(&self, stacktrace: &str) -> OptionsResult<()> {
        self.set_scalar::<bool>(STACKTRACE, stacktrace)
    }

    pub fn set_stack_trace_flag(&self, stacktrace: bool) {
        self.set_typed(STACKTRACE, stacktrace);
    }

    pub fn stack_trace_class(&self) -> Option<String> {
        self.store.lookup(STACKTRACECLASS)
    }

    pub fn set_stack_trace_class(&self, class: &str) -> OptionsResult<()> {
        self.set_scalar::<String>(STACKTRACECLASS, class)
    }

    // autoflush

    pub fn autoflush(&self) -> bool {
        self.store.get(AUTOFLUSH)
    }

    pub fn set_autoflush(&self, autoflush: &str) -> OptionsResult<()> {
        self.set_scalar::<bool>(AUTOFLUSH, autoflush)
    }

    pub fn set_autoflush_flag(&self, autoflush: bool) {
        self.set_typed(AUTOFLUSH, autoflush);
    }

    // reloadproperties

    pub fn reload_properties(&self) -> bool {
        self.store.get(RELOADPROPERTIES)
    }

    pub fn set_reload_properties(&self, reload: &str) -> OptionsResult<()> {
        self.set_scalar::<bool>(RELOADPROPERTIES, reload)
    }

    pub fn set_reload_properties_flag(&self, reload: bool) {
        self.set_typed(RELOADPROPERTIES, reload);
    }

    /// Reload interval in seconds, as configured.
    pub fn reload_properties_interval(&self) -> i64 {
        self.store.get(RELOADPROPERTIESINTERVAL)
    }

    pub fn set_reload_properties_interval(&self, secs: &str) -> OptionsResult<()> {
        self.set_scalar::<i64>(RELOADPROPERTIESINTERVAL, secs)
    }

    pub fn set_reload_properties_interval_secs(&self, secs: i64) {
        self.set_typed(RELOADPROPERTIESINTERVAL, secs);
    }

    // JNDI lookup of the real data source

    pub fn jndi_context_factory(&self) -> Option<String> {
        self.store.lookup(JNDICONTEXTFACTORY)
    }

    pub fn set_jndi_context_factory(&self, factory: &str) -> OptionsResult<()> {
        self.set_scalar::<String>(JNDICONTEXTFACTORY, factory)
    }

    pub fn jndi_context_provider_url(&self) -> Option<String> {
        self.store.lookup(JNDICONTEXTPROVIDERURL)
    }

    pub fn set_jndi_context_provider_url(&self, url: &str) -> OptionsResult<()> {
        self.set_scalar::<String>(JNDICONTEXTPROVIDERURL, url)
    }

    pub fn jndi_context_custom(&self) -> Option<String> {
        self.store.lookup(JNDICONTEXTCUSTOM)
    }

    pub fn set_jndi_context_custom(&self, custom: &str) -> OptionsResult<()> {
        self.set_scalar::<String>(JNDICONTEXTCUSTOM, custom)
    }

    // real data source

    pub fn real_data_source(&self) -> Option<String> {
        self.store.lookup(REALDATASOURCE)
    }

    pub fn set_real_data_source(&self, name: &str) -> OptionsResult<()> {
        self.set_scalar::<String>(REALDATASOURCE, name)
    }

    pub fn real_data_source_class(&self) -> Option<String> {
        self.store.lookup(REALDATASOURCECLASS)
    }

    pub fn set_real_data_source_class(&self, class: &str) -> OptionsResult<()> {
        self.set_scalar::<String>(REALDATASOURCECLASS, class)
    }

    pub fn real_data_source_properties(&self) -> Option<String> {
        self.store.lookup(REALDATASOURCEPROPERTIES)
    }

    pub fn set_real_data_source_properties(&self, properties: &str) -> OptionsResult<()> {
        self.set_scalar::<String>(REALDATASOURCEPROPERTIES, properties)
    }

    // databaseDialectDateFormat

    pub fn database_dialect_date_format(&self) -> String {
        self.store.get(DATABASE_DIALECT_DATE_FORMAT)
    }

    pub fn set_database_dialect_date_format(&self, format: &str) -> OptionsResult<()> {
        self.set_scalar::<String>(DATABASE_DIALECT_DATE_FORMAT, format)
    }
}

impl Default for SpyOptions {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for SpyOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SpyOptions")
            .field("state", &self.store.state())
            .field("types", &self.types)
            .field("manager_attached", &self.manager.load().is_some())
            .finish()
    }
}

fn format_slot(state: &mut StoreState) -> &mut Instances<dyn MessageFormattingStrategy> {
    &mut state.format
}

fn appender_slot(state: &mut StoreState) -> &mut Instances<dyn Appender> {
    &mut state.appender
}

fn trace_update(key: &str, result: &OptionsResult<()>) {
    match result {
        Ok(()) => tracing::debug!(key = %key, "Option updated"),
        Err(e) => tracing::warn!(key = %key, error = %e, "Option update rejected"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::appender::{MULTI_LINE_FORMAT, STDOUT_LOGGER};
    use crate::module::{LOG_MODULE, OUTAGE_MODULE};
    use crate::options::value::OptionValue;

    #[test]
    fn test_fresh_registry_reports_defaults() {
        let options = SpyOptions::new();
        assert_eq!(options.logfile(), "spy.log");
        assert!(options.append());
        assert!(!options.stack_trace());
        assert!(!options.autoflush());
        assert!(!options.reload_properties());
        assert_eq!(options.reload_properties_interval(), 60);
        assert_eq!(options.database_dialect_date_format(), "dd-MMM-yy");
        assert_eq!(options.modulelist(), format!("{},{}", CORE_MODULE, LOG_MODULE));
        assert_eq!(&*options.module_names(), &[CORE_MODULE.to_string(), LOG_MODULE.to_string()]);
        assert_eq!(options.module_factories().len(), 2);
        assert!(options.appender_instance().is_some());
        assert!(options.log_message_format_instance().is_some());
        assert_eq!(options.driverlist(), None);
        assert!(options.driver_names().is_empty());
        assert_eq!(options.dateformat(), None);
    }

    fn registries_without_modules() -> TypeRegistries {
        let types = TypeRegistries::default();
        crate::appender::register_builtins(&types.appenders, &types.formats);
        types
    }

    #[test]
    fn test_with_types_rejects_unresolvable_defaults() {
        let err = SpyOptions::with_types(registries_without_modules()).unwrap_err();
        assert!(matches!(err, OptionsError::Resolution { ref key, ref name, .. }
            if key == MODULE_FACTORIES && name == CORE_MODULE));
    }

    #[test]
    fn test_defaults_applied_independently() {
        let (options, failures) = SpyOptions::build(registries_without_modules());
        assert_eq!(failures.len(), 1);
        assert!(matches!(failures[0], OptionsError::Resolution { .. }));

        // Defaults after the failing modulelist still took effect.
        assert!(options.appender_instance().is_some());
        assert!(options.log_message_format_instance().is_some());
        let state = options.store().state();
        assert_eq!(state.raw(LOGFILE), Some(&OptionValue::Text("spy.log".into())));
        assert_eq!(state.raw(RELOADPROPERTIESINTERVAL), Some(&OptionValue::Integer(60)));
    }

    #[test]
    fn test_with_types_accepts_complete_registries() {
        let options = SpyOptions::with_types(TypeRegistries::builtin()).unwrap();
        assert_eq!(options.module_factories().len(), 2);
    }

    #[test]
    fn test_scalar_coercion() {
        let options = SpyOptions::new();
        options.set_reload_properties_interval("120").unwrap();
        assert_eq!(options.reload_properties_interval(), 120);
        options.set_autoflush("true").unwrap();
        assert!(options.autoflush());

        assert!(options.set_autoflush("on").is_err());
        assert!(options.autoflush());

        options.set_stack_trace_flag(true);
        assert!(options.stack_trace());
        // Passed through as configured, scheduling policy is the manager's.
        options.set_reload_properties_interval_secs(-3);
        assert_eq!(options.reload_properties_interval(), -3);
    }

    #[test]
    fn test_driverlist_derivation() {
        let options = SpyOptions::new();
        options.set_driverlist("a.B,,c.D").unwrap();
        assert_eq!(options.driverlist().as_deref(), Some("a.B,,c.D"));
        assert_eq!(&*options.driver_names(), &["a.B".to_string(), "c.D".to_string()]);
    }

    #[test]
    fn test_modulelist_round_trip() {
        let options = SpyOptions::new();
        let csv = format!("{}, {} ,{}", CORE_MODULE, OUTAGE_MODULE, CORE_MODULE);
        options.set_modulelist(&csv).unwrap();
        assert_eq!(options.modulelist(), csv);

        let modules = options.modules();
        assert_eq!(&*modules.names, &[CORE_MODULE.to_string(), OUTAGE_MODULE.to_string()]);
        let factory_names: Vec<&str> = modules.factories.iter().map(|f| f.name()).collect();
        assert_eq!(factory_names, vec![CORE_MODULE, OUTAGE_MODULE]);
    }

    #[test]
    fn test_core_module_cannot_be_removed() {
        let options = SpyOptions::new();
        let before = options.modules();

        let rejected = [
            format!("-{}", CORE_MODULE),
            format!("{},{},-{}", CORE_MODULE, LOG_MODULE, CORE_MODULE),
            LOG_MODULE.to_string(),
            String::new(),
        ];
        for csv in rejected {
            let err = options.set_modulelist(&csv).unwrap_err();
            assert!(matches!(err, OptionsError::Validation { .. }), "{} accepted", csv);
        }

        let after = options.modules();
        assert_eq!(after.names, before.names);
        assert!(after
            .factories
            .iter()
            .zip(before.factories.iter())
            .all(|(a, b)| Arc::ptr_eq(a, b)));
        assert_eq!(options.modulelist(), format!("{},{}", CORE_MODULE, LOG_MODULE));
    }

    #[test]
    fn test_unresolvable_module_keeps_prior_state() {
        let options = SpyOptions::new();
        let err = options
            .set_modulelist(&format!("{},com.example.Missing", CORE_MODULE))
            .unwrap_err();
        assert!(matches!(err, OptionsError::Resolution { ref name, .. } if name == "com.example.Missing"));
        assert_eq!(options.module_names().len(), 2);
        assert_eq!(options.module_factories().len(), 2);
    }

    #[test]
    fn test_appender_instance_is_cached() {
        let options = SpyOptions::new();
        options.set_appender(STDOUT_LOGGER).unwrap();
        let first = options.appender_instance().unwrap();
        options.set_appender(STDOUT_LOGGER).unwrap();
        let second = options.appender_instance().unwrap();
        assert!(Arc::ptr_eq(&first, &second));

        let err = options.set_appender("com.example.NoSuchLogger").unwrap_err();
        assert!(matches!(err, OptionsError::Resolution { .. }));
        assert_eq!(options.appender(), STDOUT_LOGGER);
        assert!(Arc::ptr_eq(&first, &options.appender_instance().unwrap()));
    }

    #[test]
    fn test_log_message_format_switch() {
        let options = SpyOptions::new();
        options.set_log_message_format(MULTI_LINE_FORMAT).unwrap();
        assert_eq!(options.log_message_format(), MULTI_LINE_FORMAT);
        assert!(options.set_log_message_format("  ").is_err());
        assert_eq!(options.log_message_format(), MULTI_LINE_FORMAT);
    }

    #[test]
    fn test_reload_delegates_to_manager() {
        let options = SpyOptions::new();
        assert_eq!(options.reload(), Err(OptionsError::ReloadUnavailable));

        let calls = Arc::new(std::sync::atomic::AtomicUsize::new(0));
        let counter = calls.clone();
        options.attach_module_manager(move || -> OptionsResult<()> {
            counter.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
            Ok(())
        });
        options.reload().unwrap();
        assert_eq!(calls.load(std::sync::atomic::Ordering::SeqCst), 1);
    }
}
