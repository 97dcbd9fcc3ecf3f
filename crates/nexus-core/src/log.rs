//! Bounded activity log shared by the dispatcher, scheduler and macro engine.
//!
//! Every entry is kept in memory for the console view and mirrored to
//! `tracing` so it also reaches the process log.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use crate::types::{LogEntry, LogSeverity};

/// Number of entries retained when no explicit capacity is given.
pub const DEFAULT_LOG_CAPACITY: usize = 50;

/// Thread-safe, cheaply clonable activity log.
///
/// Clones share the same buffer. The oldest entries are evicted once
/// `capacity` is reached.
#[derive(Debug, Clone)]
pub struct ActivityLog {
    entries: Arc<Mutex<VecDeque<LogEntry>>>,
    capacity: usize,
}

impl Default for ActivityLog {
    fn default() -> Self {
        Self::new()
    }
}

impl ActivityLog {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_LOG_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Arc::new(Mutex::new(VecDeque::with_capacity(capacity))),
            capacity: capacity.max(1),
        }
    }

    /// Append an entry and mirror it to `tracing`.
    pub fn record(&self, message: impl Into<String>, severity: LogSeverity) {
        let entry = LogEntry::new(message, severity);
        match severity {
            LogSeverity::Error => tracing::error!(severity = %severity, "{}", entry.message),
            LogSeverity::Warn => tracing::warn!(severity = %severity, "{}", entry.message),
            LogSeverity::Info | LogSeverity::Nexus => {
                tracing::info!(severity = %severity, "{}", entry.message)
            }
        }

        let mut entries = match self.entries.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        if entries.len() == self.capacity {
            entries.pop_front();
        }
        entries.push_back(entry);
    }

    pub fn info(&self, message: impl Into<String>) {
        self.record(message, LogSeverity::Info);
    }

    pub fn warn(&self, message: impl Into<String>) {
        self.record(message, LogSeverity::Warn);
    }

    pub fn error(&self, message: impl Into<String>) {
        self.record(message, LogSeverity::Error);
    }

    pub fn nexus(&self, message: impl Into<String>) {
        self.record(message, LogSeverity::Nexus);
    }

    /// Copy of the retained entries, oldest first.
    pub fn snapshot(&self) -> Vec<LogEntry> {
        match self.entries.lock() {
            Ok(guard) => guard.iter().cloned().collect(),
            Err(poisoned) => poisoned.into_inner().iter().cloned().collect(),
        }
    }

    /// Number of retained entries with the given severity.
    pub fn count(&self, severity: LogSeverity) -> usize {
        self.snapshot()
            .iter()
            .filter(|e| e.severity == severity)
            .count()
    }

    /// Whether any retained entry contains `needle`.
    pub fn contains(&self, needle: &str) -> bool {
        self.snapshot().iter().any(|e| e.message.contains(needle))
    }

    pub fn len(&self) -> usize {
        self.snapshot().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
