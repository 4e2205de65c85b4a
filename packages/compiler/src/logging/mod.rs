//! Logging
//!
//! Logger trait plus the console, null and in-memory implementations.

pub mod console_logger;
pub mod logger;
pub mod memory_logger;

pub use console_logger::*;
pub use logger::*;
pub use memory_logger::*;

use std::sync::Arc;

/// Logger factory used when neither the bootstrap seed nor the user config
/// supplies a logger.
pub fn create_logger() -> Arc<dyn Logger> {
    Arc::new(ConsoleLogger::new(LogLevel::Info))
}
