//! Silent logger

use super::traits::{LogLevel, Logger};

/// Discards everything; the default in tests
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpLogger;

impl Logger for NoOpLogger {
    fn log(&self, _level: LogLevel, _message: &str) {}
}
