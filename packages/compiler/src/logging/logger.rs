// Logger Interface
//
// Where config validation reports progress that is not a diagnostic.

use std::fmt::Debug;

/// Minimum severity a logger emits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Debug = 0,
    Info = 1,
    Warn = 2,
    Error = 3,
}

impl LogLevel {
    /// Parse a level name, as accepted by `--log-level`.
    pub fn parse(name: &str) -> Option<LogLevel> {
        match name.trim().to_lowercase().as_str() {
            "debug" => Some(LogLevel::Debug),
            "info" => Some(LogLevel::Info),
            "warn" => Some(LogLevel::Warn),
            "error" => Some(LogLevel::Error),
            _ => None,
        }
    }
}

/// Sink for validation progress messages.
///
/// Resolved once per validation (bootstrap seed, then the user config, then
/// [`super::create_logger`]) and stored on the `ValidatedConfig`, which is
/// shared behind an `Arc` across threads and the global session.
///
/// Problems with the config itself are diagnostics, not log lines. The
/// logger only sees things like the session reusing a cached config, the
/// flags copy failing, or the summary line after validation.
pub trait Logger: Send + Sync + Debug {
    fn level(&self) -> LogLevel;
    fn debug(&self, msg: &str);
    fn info(&self, msg: &str);
    fn warn(&self, msg: &str);
    fn error(&self, msg: &str);
    /// Whether a message at `level` would be emitted.
    fn is_enabled(&self, level: LogLevel) -> bool {
        level >= self.level()
    }
}

/// Discards everything. Used by the napi entry points, which report
/// through returned diagnostics only.
#[derive(Debug)]
pub struct NullLogger;

impl NullLogger {
    pub fn new() -> Self {
        Self
    }
}

impl Default for NullLogger {
    fn default() -> Self {
        Self::new()
    }
}

impl Logger for NullLogger {
    fn level(&self) -> LogLevel {
        LogLevel::Error
    }
    fn debug(&self, _msg: &str) {}
    fn info(&self, _msg: &str) {}
    fn warn(&self, _msg: &str) {}
    fn error(&self, _msg: &str) {}
}
