// Memory Logger
//
// Logger that keeps every enabled line in memory.

use super::logger::{LogLevel, Logger};
use std::sync::{Mutex, PoisonError};

/// In-memory logger. Lines are stored as `"<level>: <message>"`.
#[derive(Debug)]
pub struct MemoryLogger {
    level: LogLevel,
    lines: Mutex<Vec<String>>,
}

impl MemoryLogger {
    pub fn new(level: LogLevel) -> Self {
        Self {
            level,
            lines: Mutex::new(Vec::new()),
        }
    }

    /// Snapshot of the captured lines.
    pub fn lines(&self) -> Vec<String> {
        self.lines
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn push(&self, level: LogLevel, prefix: &str, msg: &str) {
        if self.is_enabled(level) {
            self.lines
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .push(format!("{}: {}", prefix, msg));
        }
    }
}

impl Default for MemoryLogger {
    fn default() -> Self {
        Self::new(LogLevel::Debug)
    }
}

impl Logger for MemoryLogger {
    fn level(&self) -> LogLevel {
        self.level
    }

    fn debug(&self, msg: &str) {
        self.push(LogLevel::Debug, "debug", msg);
    }

    fn info(&self, msg: &str) {
        self.push(LogLevel::Info, "info", msg);
    }

    fn warn(&self, msg: &str) {
        self.push(LogLevel::Warn, "warn", msg);
    }

    fn error(&self, msg: &str) {
        self.push(LogLevel::Error, "error", msg);
    }
}
