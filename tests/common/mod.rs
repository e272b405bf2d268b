//! Shared fixtures for integration tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use spy_options::appender::Appender;
use spy_options::options::TypeRegistries;

/// Appender that keeps every line in memory.
#[derive(Debug, Default)]
pub struct RecordingAppender {
    pub lines: Mutex<Vec<String>>,
}

impl Appender for RecordingAppender {
    fn log_text(&self, text: &str) {
        self.lines.lock().unwrap().push(text.to_string());
    }
}

pub const RECORDING_APPENDER: &str = "com.example.RecordingAppender";

/// Built-in registries plus `recorder` under [`RECORDING_APPENDER`],
/// counting how often it is constructed.
pub fn registries_with_recorder(
    recorder: Arc<RecordingAppender>,
    constructed: Arc<AtomicUsize>,
) -> TypeRegistries {
    let types = TypeRegistries::builtin();
    types.appenders.register(RECORDING_APPENDER, move || {
        constructed.fetch_add(1, Ordering::SeqCst);
        Ok(recorder.clone() as Arc<dyn Appender>)
    });
    types
}

pub fn map(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}
