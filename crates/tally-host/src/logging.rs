//! Host logging capability.
//!
//! The host provides one logging capability: a [`LogSink`] that every
//! plugin log line funnels into, and a [`LoggerFactory`] that hands out
//! named [`PluginLogger`]s bound to that sink. Plugins resolve both from
//! the service registry at startup; a missing sink or factory is an
//! unrecoverable environment error, not a transient condition.
//!
//! [`TracingLogSink`] is the production adapter — capability log calls
//! become `tracing` events, so plugin output lands in the same subscriber
//! as the host's own logs.

use std::fmt;
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::{debug, error, info, warn};

/// Severity of a capability log line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        };
        f.write_str(s)
    }
}

/// The host's log sink.
pub trait LogSink: Send + Sync {
    /// Writes one line attributed to `target` at `level`.
    fn log(&self, level: LogLevel, target: &str, message: &str);
}

/// Hands out named loggers bound to the host sink.
pub trait LoggerFactory: Send + Sync {
    /// A logger whose lines are attributed to `name`.
    fn logger(&self, name: &str) -> PluginLogger;
}

/// A named logger bound to the host's sink.
#[derive(Clone)]
pub struct PluginLogger {
    name: String,
    sink: Arc<dyn LogSink>,
}

impl PluginLogger {
    /// Creates a logger writing to `sink` under `name`.
    pub fn new(name: impl Into<String>, sink: Arc<dyn LogSink>) -> Self {
        Self {
            name: name.into(),
            sink,
        }
    }

    /// The name this logger attributes its lines to.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn debug(&self, message: &str) {
        self.sink.log(LogLevel::Debug, &self.name, message);
    }

    pub fn info(&self, message: &str) {
        self.sink.log(LogLevel::Info, &self.name, message);
    }

    pub fn warn(&self, message: &str) {
        self.sink.log(LogLevel::Warn, &self.name, message);
    }

    pub fn error(&self, message: &str) {
        self.sink.log(LogLevel::Error, &self.name, message);
    }
}

// =============================================================================
// Sink implementations
// =============================================================================

/// Sink adapter forwarding capability log calls into `tracing` events.
pub struct TracingLogSink;

impl LogSink for TracingLogSink {
    fn log(&self, level: LogLevel, target: &str, message: &str) {
        match level {
            LogLevel::Debug => debug!(logger = %target, "{message}"),
            LogLevel::Info => info!(logger = %target, "{message}"),
            LogLevel::Warn => warn!(logger = %target, "{message}"),
            LogLevel::Error => error!(logger = %target, "{message}"),
        }
    }
}

/// Factory binding named loggers to an existing sink.
pub struct SinkLoggerFactory {
    sink: Arc<dyn LogSink>,
}

impl SinkLoggerFactory {
    pub fn new(sink: Arc<dyn LogSink>) -> Self {
        Self { sink }
    }
}

impl LoggerFactory for SinkLoggerFactory {
    fn logger(&self, name: &str) -> PluginLogger {
        PluginLogger::new(name, Arc::clone(&self.sink))
    }
}

/// In-memory sink capturing formatted lines, for tests and fake hosts.
///
/// Lines are formatted as `<level> [<target>] <message>`.
#[derive(Default)]
pub struct MemoryLogSink {
    lines: Mutex<Vec<String>>,
}

impl MemoryLogSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of every captured line, oldest first.
    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().clone()
    }

    /// Whether any captured line contains `needle`.
    pub fn contains(&self, needle: &str) -> bool {
        self.lines.lock().iter().any(|line| line.contains(needle))
    }
}

impl LogSink for MemoryLogSink {
    fn log(&self, level: LogLevel, target: &str, message: &str) {
        self.lines.lock().push(format!("{level} [{target}] {message}"));
    }
}
