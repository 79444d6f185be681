//! Host Logger over the Tracing Subscriber

use platform_traits::logger::{HostLogger, LogLevel};
use tracing::{debug, error, info, trace, warn};

/// Logger that emits capability log calls as `tracing` events
///
/// Desktop hosts usually already run a `tracing` subscriber; this adapter
/// folds script-runtime log lines into the same stream. The tag travels as
/// a field so subscribers can filter on it. No extra level filtering here,
/// the subscriber's filter is authoritative.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLogger;

impl TracingLogger {
    pub fn new() -> Self {
        Self
    }
}

impl HostLogger for TracingLogger {
    fn log(&self, level: LogLevel, tag: &str, message: &str) {
        match level {
            LogLevel::Verbose => trace!(tag = tag, "{}", message),
            LogLevel::Debug => debug!(tag = tag, "{}", message),
            LogLevel::Info => info!(tag = tag, "{}", message),
            LogLevel::Warning => warn!(tag = tag, "{}", message),
            LogLevel::Error => error!(tag = tag, "{}", message),
        }
    }
}
