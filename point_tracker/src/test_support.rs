//! Shared helpers for unit tests

use std::sync::{Arc, Mutex};
use crate::log::{Logger, LogEntry, LogSeverity};

/// Logger that stores every entry for later inspection
pub(crate) struct CaptureLogger {
    entries: Arc<Mutex<Vec<LogEntry>>>,
}

impl CaptureLogger {
    /// Create a logger and the handle used to read what it captured
    pub(crate) fn new() -> (Self, Arc<Mutex<Vec<LogEntry>>>) {
        let entries = Arc::new(Mutex::new(Vec::new()));
        (Self { entries: entries.clone() }, entries)
    }
}

impl Logger for CaptureLogger {
    fn log(&self, entry: &LogEntry) {
        self.entries.lock().unwrap().push(entry.clone());
    }
}

/// Messages captured from `source` at the given severity
///
/// Tests run in parallel and share the global logger, so assertions filter
/// on the emitting source instead of counting every entry.
pub(crate) fn messages_at(
    entries: &Arc<Mutex<Vec<LogEntry>>>,
    source: &str,
    severity: LogSeverity,
) -> Vec<String> {
    entries
        .lock()
        .unwrap()
        .iter()
        .filter(|e| e.severity == severity && e.source == source)
        .map(|e| e.message.clone())
        .collect()
}
