//! Bounded in-memory event log.
//!
//! The debug module keeps its user-facing event history here and mirrors it
//! to a JSON-lines file. This is application data; diagnostics of the tool
//! itself go through `tracing`.

use crate::error::{DashboardError, Result};
use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::fmt;
use std::str::FromStr;

/// Severity of a log entry, ordered from least to most severe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Verbose diagnostics
    Debug,
    /// Normal events
    Info,
    /// Something looks wrong
    Warning,
    /// An operation failed
    Error,
    /// The dashboard cannot continue
    Critical,
}

impl LogLevel {
    /// All levels in ascending severity.
    pub const ALL: [Self; 5] = [
        Self::Debug,
        Self::Info,
        Self::Warning,
        Self::Error,
        Self::Critical,
    ];

    /// Lowercase name.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Error => "error",
            Self::Critical => "critical",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LogLevel {
    type Err = DashboardError;

    fn from_str(s: &str) -> Result<Self> {
        let normalized = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|level| level.as_str() == normalized)
            .ok_or_else(|| DashboardError::UnknownLogLevel {
                level: s.to_string(),
            })
    }
}

/// A single log entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    /// UTC time, truncated to whole seconds
    pub timestamp: DateTime<Utc>,
    /// Severity
    pub level: LogLevel,
    /// Message text
    pub message: String,
    /// Component that produced the entry
    pub source: String,
}

impl LogEntry {
    /// Creates an entry; the timestamp defaults to now.
    pub fn new(
        level: LogLevel,
        message: impl Into<String>,
        source: impl Into<String>,
        timestamp: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            timestamp: timestamp.unwrap_or_else(Utc::now).trunc_subsecs(0),
            level,
            message: message.into(),
            source: source.into(),
        }
    }
}

/// FIFO log buffer that drops the oldest entry once full.
#[derive(Debug, Clone)]
pub struct LogBuffer {
    entries: VecDeque<LogEntry>,
    max_entries: usize,
}

impl LogBuffer {
    /// Default capacity.
    pub const DEFAULT_CAPACITY: usize = 100;

    /// Creates a buffer holding at most `max_entries` entries.
    pub fn new(max_entries: usize) -> Result<Self> {
        if max_entries == 0 {
            return Err(DashboardError::InvalidConfig(
                "log buffer capacity must be greater than 0".to_string(),
            ));
        }
        Ok(Self {
            entries: VecDeque::with_capacity(max_entries),
            max_entries,
        })
    }

    /// Capacity.
    pub fn max_entries(&self) -> usize {
        self.max_entries
    }

    /// Appends an entry and returns a copy of it.
    pub fn add(
        &mut self,
        message: impl Into<String>,
        level: LogLevel,
        source: impl Into<String>,
        timestamp: Option<DateTime<Utc>>,
    ) -> LogEntry {
        self.push(LogEntry::new(level, message, source, timestamp))
    }

    /// Appends a prepared entry.
    pub fn push(&mut self, entry: LogEntry) -> LogEntry {
        if self.entries.len() == self.max_entries {
            self.entries.pop_front();
        }
        self.entries.push_back(entry.clone());
        entry
    }

    /// Entries, oldest first.
    pub fn entries(&self) -> impl ExactSizeIterator<Item = &LogEntry> + DoubleEndedIterator {
        self.entries.iter()
    }

    /// Number of buffered entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries at or above `minimum`.
    pub fn filter_by_level(&self, minimum: LogLevel) -> Vec<&LogEntry> {
        self.entries.iter().filter(|e| e.level >= minimum).collect()
    }

    /// Removes every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// One JSON object per line, no trailing newline.
    pub fn export_json_lines(&self) -> Result<String> {
        let lines = self
            .entries
            .iter()
            .map(serde_json::to_string)
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(lines.join("\n"))
    }
}

impl Default for LogBuffer {
    fn default() -> Self {
        Self {
            entries: VecDeque::with_capacity(Self::DEFAULT_CAPACITY),
            max_entries: Self::DEFAULT_CAPACITY,
        }
    }
}
