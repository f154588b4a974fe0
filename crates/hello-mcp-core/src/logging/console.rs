//! Console logger implementation

use super::traits::{LogLevel, Logger};

/// A logger that writes to the console
///
/// Info goes to stdout, everything else to stderr. Debug output is only
/// emitted when `verbose` is set.
#[derive(Debug, Clone)]
pub struct ConsoleLogger {
    prefix: String,
    verbose: bool,
}

impl Default for ConsoleLogger {
    fn default() -> Self {
        Self::with_prefix("[hello-mcp]")
    }
}

impl ConsoleLogger {
    /// Create a console logger with a custom prefix
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            verbose: false,
        }
    }

    /// Enable or disable debug output
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn is_enabled(&self, level: LogLevel) -> bool {
        self.verbose || level > LogLevel::Debug
    }

    fn format(&self, level: LogLevel, message: &str) -> String {
        format!("{} {}: {}", self.prefix, level, message)
    }
}

impl Logger for ConsoleLogger {
    fn log(&self, level: LogLevel, message: &str) {
        if !self.is_enabled(level) {
            return;
        }
        match level {
            LogLevel::Info => println!("{}", self.format(level, message)),
            _ => eprintln!("{}", self.format(level, message)),
        }
    }
}
