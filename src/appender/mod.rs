//! Pluggable logging strategies named by the options.
//!
//! # Data Flow
//! ```text
//! intercepted statement
//!     → StatementLog (what happened)
//!     → MessageFormattingStrategy (logMessageFormatInstance) → text
//!     → Appender (appenderInstance) → file / stdout / tracing
//! ```
//!
//! Built-in types are registered under dotted identifiers so existing
//! option files naming them keep resolving.

pub mod format;
pub mod logger;

use std::fmt::Debug;
use std::sync::Arc;

use crate::options::resolver::TypeRegistry;

pub use format::{MultiLineFormat, SingleLineFormat};
pub use logger::{FileLogger, StdoutLogger, TracingLogger};

pub const SINGLE_LINE_FORMAT: &str = "com.p6spy.engine.spy.appender.SingleLineFormat";
pub const MULTI_LINE_FORMAT: &str = "com.p6spy.engine.spy.appender.MultiLineFormat";
pub const FILE_LOGGER: &str = "com.p6spy.engine.spy.appender.FileLogger";
pub const STDOUT_LOGGER: &str = "com.p6spy.engine.spy.appender.StdoutLogger";
pub const SLF4J_LOGGER: &str = "com.p6spy.engine.spy.appender.Slf4JLogger";

/// One logged database operation.
#[derive(Debug, Clone, Copy)]
pub struct StatementLog<'a> {
    pub connection_id: i32,
    /// Timestamp, already rendered with the configured date format.
    pub now: &'a str,
    pub elapsed_ms: i64,
    /// Category such as `statement`, `commit` or `rollback`.
    pub category: &'a str,
    /// SQL as prepared, with `?` placeholders.
    pub prepared: &'a str,
    /// SQL with bound values substituted.
    pub sql: &'a str,
}

/// Renders a [`StatementLog`] into a log line.
pub trait MessageFormattingStrategy: Send + Sync + Debug {
    fn format_message(&self, entry: &StatementLog<'_>) -> String;
}

/// Destination for formatted log lines.
pub trait Appender: Send + Sync + Debug {
    fn log_text(&self, text: &str);

    fn log_statement(&self, entry: &StatementLog<'_>, format: &dyn MessageFormattingStrategy) {
        self.log_text(&format.format_message(entry));
    }
}

/// Register the built-in appenders and formats.
pub fn register_builtins(
    appenders: &TypeRegistry<dyn Appender>,
    formats: &TypeRegistry<dyn MessageFormattingStrategy>,
) {
    appenders.register(FILE_LOGGER, || Ok(Arc::new(FileLogger::new()) as Arc<dyn Appender>));
    appenders.register(STDOUT_LOGGER, || Ok(Arc::new(StdoutLogger) as Arc<dyn Appender>));
    appenders.register(SLF4J_LOGGER, || Ok(Arc::new(TracingLogger) as Arc<dyn Appender>));

    formats.register(SINGLE_LINE_FORMAT, || {
        Ok(Arc::new(SingleLineFormat) as Arc<dyn MessageFormattingStrategy>)
    });
    formats.register(MULTI_LINE_FORMAT, || {
        Ok(Arc::new(MultiLineFormat) as Arc<dyn MessageFormattingStrategy>)
    });
}
