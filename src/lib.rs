//! Typed, mutable options registry for a JDBC logging proxy.

pub mod appender;
pub mod module;
pub mod observability;
pub mod options;

pub use options::{active, OptionsError, OptionsManagement, OptionsResult, SpyOptions};
