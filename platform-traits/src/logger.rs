//! Host Logging Abstraction
//!
//! Forwards tagged log lines from the runtime into the host's native logging
//! facility (Logcat, os_log, the process's `tracing` subscriber, ...).

use serde::{Deserialize, Serialize};

/// Log severity, lowest to highest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum LogLevel {
    Verbose,
    Debug,
    Info,
    Warning,
    Error,
}

/// Host logger trait
///
/// Each implementation forwards to the host platform's native log facility:
/// - **iOS**: os_log
/// - **Android**: Logcat
/// - **Desktop/Server**: the process's `tracing` subscriber or the console
///
/// Logging is synchronous and side-effect-only: no buffering, no structured
/// fields beyond tag + message, and no failure mode surfaced to the caller.
///
/// # Example
///
/// ```ignore
/// use platform_traits::logger::{HostLogger, LogLevel};
///
/// fn report(logger: &dyn HostLogger) {
///     logger.info("engine", "interpreter warmed up");
///     logger.log(LogLevel::Warning, "engine", "script cache cold");
/// }
/// ```
pub trait HostLogger: Send + Sync {
    /// Forward one tagged message to the host log.
    fn log(&self, level: LogLevel, tag: &str, message: &str);

    /// Minimum level this logger cares about.
    ///
    /// Callers that generate log lines eagerly (e.g. the runtime's tracing
    /// mirror) may skip levels below this as a throughput hint; `log` itself
    /// must still accept any level.
    fn min_level(&self) -> LogLevel {
        LogLevel::Verbose
    }

    fn verbose(&self, tag: &str, message: &str) {
        self.log(LogLevel::Verbose, tag, message);
    }

    fn debug(&self, tag: &str, message: &str) {
        self.log(LogLevel::Debug, tag, message);
    }

    fn info(&self, tag: &str, message: &str) {
        self.log(LogLevel::Info, tag, message);
    }

    fn warning(&self, tag: &str, message: &str) {
        self.log(LogLevel::Warning, tag, message);
    }

    fn error(&self, tag: &str, message: &str) {
        self.log(LogLevel::Error, tag, message);
    }
}

/// Console logger implementation for testing/development
#[derive(Debug, Clone)]
pub struct ConsoleLogger {
    pub min_level: LogLevel,
}

impl Default for ConsoleLogger {
    fn default() -> Self {
        Self {
            min_level: LogLevel::Info,
        }
    }
}

impl HostLogger for ConsoleLogger {
    fn log(&self, level: LogLevel, tag: &str, message: &str) {
        if level < self.min_level {
            return;
        }

        let level_str = match level {
            LogLevel::Verbose => "VERBOSE",
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warning => "WARN",
            LogLevel::Error => "ERROR",
        };

        println!("[{}] {}: {}", level_str, tag, message);
    }

    fn min_level(&self) -> LogLevel {
        self.min_level
    }
}
