//! Resolution of type names into live instances.
//!
//! A [`TypeRegistry`] maps type names to no-argument constructors. Resolved
//! instances are cached per option in [`Instances`], so asking for the same
//! name twice hands back the same `Arc`.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use dashmap::DashMap;

use crate::appender::{self, Appender, MessageFormattingStrategy};
use crate::module::{self, ModuleFactory};
use crate::options::error::{OptionsError, OptionsResult};

/// No-argument constructor registered under a type name.
pub type Constructor<T> = Arc<dyn Fn() -> Result<Arc<T>, String> + Send + Sync>;

/// Concurrent name → constructor table for one pluggable type.
pub struct TypeRegistry<T: ?Sized> {
    constructors: DashMap<String, Constructor<T>>,
}

impl<T: ?Sized> TypeRegistry<T> {
    pub fn new() -> Self {
        Self {
            constructors: DashMap::new(),
        }
    }

    /// Register (or replace) the constructor for `name`.
    pub fn register<F>(&self, name: impl Into<String>, constructor: F)
    where
        F: Fn() -> Result<Arc<T>, String> + Send + Sync + 'static,
    {
        let name = name.into();
        tracing::debug!(type_name = %name, "Registered type constructor");
        self.constructors.insert(name, Arc::new(constructor));
    }

    pub fn contains(&self, name: &str) -> bool {
        self.constructors.contains_key(name)
    }

    /// Registered type names, sorted.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.constructors.iter().map(|r| r.key().clone()).collect();
        names.sort();
        names
    }

    /// Build a fresh instance of `name` on behalf of option `key`.
    pub fn construct(&self, key: &str, name: &str) -> OptionsResult<Arc<T>> {
        // Clone the constructor out so no shard lock is held while it runs.
        let constructor = self
            .constructors
            .get(name)
            .map(|r| Arc::clone(r.value()))
            .ok_or_else(|| OptionsError::resolution(key, name, "no constructor registered"))?;

        constructor().map_err(|reason| OptionsError::resolution(key, name, reason))
    }
}

impl<T: ?Sized> Default for TypeRegistry<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ?Sized> fmt::Debug for TypeRegistry<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeRegistry")
            .field("names", &self.names())
            .finish()
    }
}

/// Resolved instances of one option: the active ones in token order plus
/// every instance built for it so far.
pub struct Instances<T: ?Sized> {
    active: Vec<(String, Arc<T>)>,
    cache: HashMap<String, Arc<T>>,
}

impl<T: ?Sized> Instances<T> {
    pub fn new() -> Self {
        Self {
            active: Vec::new(),
            cache: HashMap::new(),
        }
    }

    /// Active instances, in the order of their source tokens.
    pub fn instances(&self) -> Vec<Arc<T>> {
        self.active.iter().map(|(_, i)| Arc::clone(i)).collect()
    }

    /// Source tokens of the active instances.
    pub fn names(&self) -> Vec<String> {
        self.active.iter().map(|(n, _)| n.clone()).collect()
    }

    pub fn first(&self) -> Option<Arc<T>> {
        self.active.first().map(|(_, i)| Arc::clone(i))
    }
}

impl<T: ?Sized> Clone for Instances<T> {
    fn clone(&self) -> Self {
        Self {
            active: self.active.clone(),
            cache: self.cache.clone(),
        }
    }
}

impl<T: ?Sized> Default for Instances<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ?Sized> fmt::Debug for Instances<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Instances")
            .field("active", &self.names())
            .field("cached", &self.cache.len())
            .finish()
    }
}

/// Resolve `tokens` against `registry`, reusing instances cached in `prior`.
///
/// Returns the new instance set without touching `prior`; on the first
/// unresolvable token the whole call fails and nothing is replaced.
pub fn resolve_instances<T: ?Sized>(
    registry: &TypeRegistry<T>,
    key: &str,
    tokens: &[String],
    prior: &Instances<T>,
) -> OptionsResult<Instances<T>> {
    let mut cache = prior.cache.clone();
    let mut active = Vec::with_capacity(tokens.len());

    for token in tokens {
        let instance = match cache.get(token) {
            Some(cached) => Arc::clone(cached),
            None => {
                let built = registry.construct(key, token)?;
                cache.insert(token.clone(), Arc::clone(&built));
                built
            }
        };
        active.push((token.clone(), instance));
    }

    Ok(Instances { active, cache })
}

/// The registries for every pluggable type the options can name.
#[derive(Debug, Default)]
pub struct TypeRegistries {
    pub appenders: TypeRegistry<dyn Appender>,
    pub formats: TypeRegistry<dyn MessageFormattingStrategy>,
    pub modules: TypeRegistry<dyn ModuleFactory>,
}

impl TypeRegistries {
    /// Registries pre-populated with the built-in types.
    pub fn builtin() -> Self {
        let types = Self::default();
        appender::register_builtins(&types.appenders, &types.formats);
        module::register_builtins(&types.modules);
        types
    }
}
