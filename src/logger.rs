//! Logging capability injected into stages that report what they see.
//!
//! Stages never reach for global logging state. They receive a [`Logger`] at
//! construction and call it directly. Two implementations ship with the crate:
//!
//! - [`TracingLogger`]: forwards every record to `tracing`
//! - [`InMemoryLogger`]: keeps records in a shared buffer for tests and
//!   local inspection

use std::sync::{Arc, Mutex, PoisonError};

/// Severity of a log record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Level {
    Info,
    Warning,
}

/// Sink for log records.
///
/// Logging is fire-and-forget: implementations must not fail the caller and
/// must be safe to share between threads.
pub trait Logger: Send + Sync {
    fn log(&self, level: Level, message: &str);
}

impl<L: Logger + ?Sized> Logger for Arc<L> {
    fn log(&self, level: Level, message: &str) {
        (**self).log(level, message)
    }
}

impl<L: Logger + ?Sized> Logger for &L {
    fn log(&self, level: Level, message: &str) {
        (**self).log(level, message)
    }
}

/// Default logger.
///
/// Routes [`Level::Warning`] to `tracing::warn!` and [`Level::Info`] to
/// `tracing::info!`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLogger;

impl Logger for TracingLogger {
    fn log(&self, level: Level, message: &str) {
        match level {
            Level::Info => tracing::info!("{message}"),
            Level::Warning => tracing::warn!("{message}"),
        }
    }
}

/// A single captured call to [`InMemoryLogger::log`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogRecord {
    pub level: Level,
    pub message: String,
}

/// In-memory logger for testing or local pipelines.
///
/// Clones share the same buffer, so a test can hand one clone to a stage and
/// read the records back through another.
#[derive(Debug, Clone, Default)]
pub struct InMemoryLogger {
    records: Arc<Mutex<Vec<LogRecord>>>,
}

impl InMemoryLogger {
    /// Snapshot of every record logged so far.
    pub fn records(&self) -> Vec<LogRecord> {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Return all records and clear the internal buffer.
    pub fn take(&self) -> Vec<LogRecord> {
        let mut records = self.records.lock().unwrap_or_else(PoisonError::into_inner);
        std::mem::take(&mut *records)
    }
}

impl Logger for InMemoryLogger {
    fn log(&self, level: Level, message: &str) {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(LogRecord {
                level,
                message: message.to_owned(),
            });
    }
}
