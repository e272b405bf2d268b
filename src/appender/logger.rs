//! Built-in appenders.

use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::sync::{Arc, Mutex, Weak};

use crate::appender::Appender;
use crate::options::{self, SpyOptions};

/// Appends to the file named by the `logfile` option.
///
/// The file is opened on first write, honoring `append`; `autoflush`
/// is read on every write. Options come from the registry given to
/// [`FileLogger::with_options`], or the active registry otherwise.
#[derive(Debug, Default)]
pub struct FileLogger {
    options: Option<Weak<SpyOptions>>,
    writer: Mutex<Option<BufWriter<File>>>,
}

impl FileLogger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read settings from `options` instead of the active registry.
    ///
    /// Held weakly, the registry may cache this appender.
    pub fn with_options(options: &Arc<SpyOptions>) -> Self {
        Self {
            options: Some(Arc::downgrade(options)),
            writer: Mutex::new(None),
        }
    }

    fn settings(&self) -> Arc<SpyOptions> {
        self.options
            .as_ref()
            .and_then(Weak::upgrade)
            .unwrap_or_else(options::active)
    }

    fn open(options: &SpyOptions) -> std::io::Result<BufWriter<File>> {
        let path = options.logfile();
        let append = options.append();
        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .append(append)
            .truncate(!append)
            .open(&path)?;
        tracing::debug!(path = %path, append, "Opened log file");
        Ok(BufWriter::new(file))
    }
}

impl Appender for FileLogger {
    fn log_text(&self, text: &str) {
        let settings = self.settings();
        let mut writer = match self.writer.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };

        if writer.is_none() {
            match Self::open(&settings) {
                Ok(opened) => *writer = Some(opened),
                Err(e) => {
                    tracing::error!(error = %e, "Failed to open log file, dropping message");
                    return;
                }
            }
        }

        if let Some(out) = writer.as_mut() {
            let result = writeln!(out, "{}", text).and_then(|_| {
                if settings.autoflush() {
                    out.flush()
                } else {
                    Ok(())
                }
            });
            if let Err(e) = result {
                tracing::error!(error = %e, "Failed to write log file");
            }
        }
    }
}

/// Prints every line to standard output.
#[derive(Debug, Default, Clone, Copy)]
pub struct StdoutLogger;

impl Appender for StdoutLogger {
    fn log_text(&self, text: &str) {
        println!("{}", text);
    }
}

/// Emits every line as a `tracing` event under the `spy` target.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingLogger;

impl Appender for TracingLogger {
    fn log_text(&self, text: &str) {
        tracing::info!(target: "spy", "{}", text);
    }
}
