//! Observability utilities for the catalog service.
//!
//! This crate provides:
//! - A process-wide structured [`Logger`] with level filtering
//! - Axum middleware for request-lifecycle logging
//! - The global panic-to-response translator
//!
//! The logger is built once at startup and handed (cloned) to every
//! consumer; nothing here goes through ambient statics. Framework-level
//! diagnostics still flow through `tracing`, which is initialized
//! separately by the binary.
//!
//! # Example
//!
//! ```rust
//! use observability::{Logger, LogLevel};
//!
//! let logger = Logger::to_stdout(LogLevel::Information);
//! logger.log(LogLevel::Warning, "category lookup returned nothing");
//! logger.log(LogLevel::Debug, "filtered out before any formatting");
//! ```

pub mod middleware;
pub mod translator;

pub use middleware::request_logging;
pub use translator::translate_panics;

use std::io::Write;
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use serde::Serialize;
use strum::{Display, EnumString};

/// Severity of a log entry, ordered from most to least verbose.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(ascii_case_insensitive)]
pub enum LogLevel {
    #[strum(to_string = "trace")]
    Trace,
    #[strum(to_string = "debug")]
    Debug,
    #[strum(to_string = "information", serialize = "info")]
    Information,
    #[strum(to_string = "warning", serialize = "warn")]
    Warning,
    #[strum(to_string = "error")]
    Error,
    #[strum(to_string = "critical")]
    Critical,
}

/// One immutable log record
#[derive(Debug, Clone, Serialize)]
pub struct LogEntry {
    pub timestamp: DateTime<Utc>,
    pub level: LogLevel,
    pub message: String,
    /// Optional correlation data (route, status, ids)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<serde_json::Value>,
}

/// Destination for formatted log entries.
///
/// Implementations must write each entry as one atomic unit; entries from
/// concurrent callers may interleave with each other but never inside one
/// entry.
pub trait LogSink: Send + Sync {
    fn write(&self, entry: &LogEntry);
}

/// Writes each entry as a single JSON line to stdout.
#[derive(Debug, Default)]
pub struct StdoutSink;

impl LogSink for StdoutSink {
    fn write(&self, entry: &LogEntry) {
        // Single writeln while holding the stdout lock keeps the entry
        // atomic. Write failures are swallowed: logging is best-effort and
        // must not become a failure source.
        if let Ok(line) = serde_json::to_string(entry) {
            let mut out = std::io::stdout().lock();
            let _ = writeln!(out, "{line}");
        }
    }
}

/// Collects entries in memory; the sink used by tests.
#[derive(Debug, Default)]
pub struct MemorySink {
    entries: Mutex<Vec<LogEntry>>,
}

impl MemorySink {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn entries(&self) -> Vec<LogEntry> {
        self.entries.lock().map(|e| e.clone()).unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().map(|e| e.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl LogSink for MemorySink {
    fn write(&self, entry: &LogEntry) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.push(entry.clone());
        }
    }
}

/// Process-wide structured logger: pure sink + level filter.
///
/// Cheap to clone (the sink is shared); holds no per-request state. Entries
/// below the configured minimum are dropped before any formatting cost.
#[derive(Clone)]
pub struct Logger {
    min_level: LogLevel,
    sink: Arc<dyn LogSink>,
}

impl Logger {
    pub fn new(min_level: LogLevel, sink: Arc<dyn LogSink>) -> Self {
        Self { min_level, sink }
    }

    /// Logger writing JSON lines to stdout
    pub fn to_stdout(min_level: LogLevel) -> Self {
        Self::new(min_level, Arc::new(StdoutSink))
    }

    pub fn min_level(&self) -> LogLevel {
        self.min_level
    }

    pub fn log(&self, level: LogLevel, message: impl Into<String>) {
        self.log_with(level, message, None);
    }

    /// Log with optional correlation data attached to the entry.
    pub fn log_with(
        &self,
        level: LogLevel,
        message: impl Into<String>,
        context: Option<serde_json::Value>,
    ) {
        if level < self.min_level {
            return;
        }
        let entry = LogEntry {
            timestamp: Utc::now(),
            level,
            message: message.into(),
            context,
        };
        self.sink.write(&entry);
    }

    pub fn information(&self, message: impl Into<String>) {
        self.log(LogLevel::Information, message);
    }

    pub fn warning(&self, message: impl Into<String>) {
        self.log(LogLevel::Warning, message);
    }

    pub fn error(&self, message: impl Into<String>) {
        self.log(LogLevel::Error, message);
    }

    pub fn critical(&self, message: impl Into<String>) {
        self.log(LogLevel::Critical, message);
    }
}

impl std::fmt::Debug for Logger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Logger")
            .field("min_level", &self.min_level)
            .finish_non_exhaustive()
    }
}
