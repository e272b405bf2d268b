//! Error definitions for the options registry.

use thiserror::Error;

/// Errors raised by option setters, the bulk loader and reload delegation.
///
/// Every variant is a synchronous failure of the triggering call. The
/// registry never holds partially applied state after one of these.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum OptionsError {
    /// Raw text could not be parsed into the key's declared type.
    #[error("cannot coerce {raw:?} for option '{key}' into {expected}")]
    Coercion {
        key: String,
        raw: String,
        expected: &'static str,
    },

    /// A type name could not be turned into a live instance.
    #[error("cannot resolve type '{name}' for option '{key}': {reason}")]
    Resolution {
        key: String,
        name: String,
        reason: String,
    },

    /// The update would break a structural invariant of the option.
    #[error("rejected update of option '{key}': {reason}")]
    Validation { key: String, reason: String },

    /// The key is not part of the recognized option set, or is derived only.
    #[error("unknown or read-only option '{0}'")]
    UnknownKey(String),

    /// `reload()` was called before a module manager was attached.
    #[error("no module manager attached, reload unavailable")]
    ReloadUnavailable,
}

impl OptionsError {
    pub(crate) fn coercion(key: &str, raw: &str, expected: &'static str) -> Self {
        Self::Coercion {
            key: key.to_string(),
            raw: raw.to_string(),
            expected,
        }
    }

    pub(crate) fn resolution(key: &str, name: &str, reason: impl Into<String>) -> Self {
        Self::Resolution {
            key: key.to_string(),
            name: name.to_string(),
            reason: reason.into(),
        }
    }

    pub(crate) fn validation(key: &str, reason: impl Into<String>) -> Self {
        Self::Validation {
            key: key.to_string(),
            reason: reason.into(),
        }
    }
}

/// Result type for registry operations.
pub type OptionsResult<T> = Result<T, OptionsError>;
