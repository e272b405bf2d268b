//! Typed option store.
//!
//! # Concurrency
//! ```text
//! readers → ArcSwap::load → immutable StoreState (never torn)
//! writers → write_lock → clone state → mutate copy → ArcSwap::store
//! ```
//! A compound update (text + derived tokens + instances) is published as one
//! state, so readers see either all of it or none of it.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use arc_swap::ArcSwap;

use crate::appender::{Appender, MessageFormattingStrategy};
use crate::module::ModuleFactory;
use crate::options::error::{OptionsError, OptionsResult};
use crate::options::keys::defaults;
use crate::options::resolver::Instances;
use crate::options::value::{OptionType, OptionValue};

/// One immutable generation of the registry contents.
#[derive(Debug, Clone, Default)]
pub struct StoreState {
    values: HashMap<&'static str, OptionValue>,
    sets: HashMap<&'static str, Arc<[String]>>,
    pub(crate) appender: Instances<dyn Appender>,
    pub(crate) format: Instances<dyn MessageFormattingStrategy>,
    pub(crate) modules: Instances<dyn ModuleFactory>,
}

impl StoreState {
    /// Stored value, else the coerced default, else `None`.
    pub fn lookup<T: OptionType>(&self, key: &str) -> Option<T> {
        match self.values.get(key) {
            Some(value) => T::from_value(value),
            None => defaults().get(key).and_then(|raw| T::parse(raw)),
        }
    }

    /// Stored value, else the coerced default, else the type's zero value.
    pub fn get<T: OptionType>(&self, key: &str) -> T {
        self.lookup(key).unwrap_or_else(T::zero)
    }

    pub fn raw(&self, key: &str) -> Option<&OptionValue> {
        self.values.get(key)
    }

    /// Derived token set for `key`; empty if never derived.
    pub fn tokens(&self, key: &str) -> Arc<[String]> {
        self.sets.get(key).cloned().unwrap_or_else(|| Arc::from(Vec::new()))
    }

    pub(crate) fn put<T: OptionType>(&mut self, key: &'static str, value: T) {
        self.values.insert(key, value.into_value());
    }

    pub(crate) fn put_tokens(&mut self, key: &'static str, tokens: Vec<String>) {
        self.sets.insert(key, Arc::from(tokens));
    }
}

/// Shared store: lock-free reads, serialized writes.
#[derive(Debug, Default)]
pub struct OptionsStore {
    state: ArcSwap<StoreState>,
    write_lock: Mutex<()>,
}

impl OptionsStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// The current generation. Everything read from it is mutually consistent.
    pub fn state(&self) -> Arc<StoreState> {
        self.state.load_full()
    }

    pub fn get<T: OptionType>(&self, key: &str) -> T {
        self.state.load().get(key)
    }

    pub fn lookup<T: OptionType>(&self, key: &str) -> Option<T> {
        self.state.load().lookup(key)
    }

    pub fn get_set(&self, key: &str) -> Arc<[String]> {
        self.state.load().tokens(key)
    }

    /// Coerce `raw` into `T` and store it under `key`.
    pub fn set<T: OptionType>(&self, key: &'static str, raw: &str) -> OptionsResult<()> {
        let value = T::parse(raw).ok_or_else(|| OptionsError::coercion(key, raw, T::TYPE_NAME))?;
        self.set_value(key, value);
        Ok(())
    }

    /// Store an already typed value under `key`.
    pub fn set_value<T: OptionType>(&self, key: &'static str, value: T) {
        self.publish(|state| state.put(key, value));
    }

    /// Apply `f` to a copy of the current state and publish it if `f` succeeds.
    ///
    /// Writers are serialized; on error the published state is unchanged.
    pub fn update<R>(&self, f: impl FnOnce(&mut StoreState) -> OptionsResult<R>) -> OptionsResult<R> {
        // The guarded value is (), so a poisoned lock carries no broken state.
        let _guard = self.write_lock.lock().unwrap_or_else(PoisonError::into_inner);
        let mut next = StoreState::clone(&self.state.load());
        let out = f(&mut next)?;
        self.state.store(Arc::new(next));
        Ok(out)
    }

    /// Apply an infallible change to a copy of the current state and publish it.
    fn publish(&self, f: impl FnOnce(&mut StoreState)) {
        let _guard = self.write_lock.lock().unwrap_or_else(PoisonError::into_inner);
        let mut next = StoreState::clone(&self.state.load());
        f(&mut next);
        self.state.store(Arc::new(next));
    }
}
