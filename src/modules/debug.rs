//! Diagnostics module: user-facing event log with a JSON-lines mirror.

use crate::error::{DashboardError, Result};
use crate::log_buffer::{LogBuffer, LogEntry, LogLevel};
use crate::modules::payload::RawPayload;
use crate::modules::{DashboardModule, ModuleAction, ModuleContext};
use chrono::{DateTime, NaiveDateTime, Utc};
use serde_json::{json, Value};
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

const LOG_FILE: &str = "debug.log";
const DEFAULT_SOURCE: &str = "dashboard";

/// Event log viewer backed by `<log_directory>/debug.log`.
#[derive(Debug)]
pub struct DebugModule {
    context: ModuleContext,
    buffer: LogBuffer,
    log_file: PathBuf,
    loaded_entries: usize,
}

impl DebugModule {
    /// Module identifier.
    pub const IDENTIFIER: &'static str = "debug";

    /// Default buffer capacity.
    pub const DEFAULT_MAX_ENTRIES: usize = 250;

    /// Opens the module with the default buffer size.
    pub fn open(context: ModuleContext) -> Result<Self> {
        Self::with_capacity(context, Self::DEFAULT_MAX_ENTRIES)
    }

    /// Opens the module and reloads existing entries from the log file.
    pub fn with_capacity(context: ModuleContext, max_entries: usize) -> Result<Self> {
        let mut buffer = LogBuffer::new(max_entries)?;
        context.ensure_storage_dir(Self::IDENTIFIER)?;
        let log_file = context.ensure_log_file(LOG_FILE)?;
        let loaded_entries = reload(&log_file, &mut buffer)?;
        debug!(path = %log_file.display(), loaded_entries, "opened debug log");

        Ok(Self {
            context,
            buffer,
            log_file,
            loaded_entries,
        })
    }

    /// Path of the JSON-lines log file.
    pub fn log_file(&self) -> &Path {
        &self.log_file
    }

    /// Entries recovered from the log file at startup.
    pub fn loaded_entries(&self) -> usize {
        self.loaded_entries
    }

    /// Records an event in the buffer and appends it to the log file.
    pub fn log_event(
        &mut self,
        message: impl Into<String>,
        level: LogLevel,
        source: impl Into<String>,
    ) -> Result<LogEntry> {
        let entry = self.buffer.add(message, level, source, None);
        let line = serde_json::to_string(&entry)?;

        if let Some(dir) = self.log_file.parent() {
            fs::create_dir_all(dir).map_err(|e| DashboardError::io(dir, e))?;
        }
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.log_file)
            .map_err(|e| DashboardError::io(&self.log_file, e))?;
        writeln!(file, "{line}").map_err(|e| DashboardError::io(&self.log_file, e))?;

        Ok(entry)
    }

    /// The newest `limit` entries (all when `None`), oldest first.
    pub fn get_recent(&self, limit: Option<usize>) -> Vec<&LogEntry> {
        let total = self.buffer.len();
        let skip = limit.map_or(0, |limit| total.saturating_sub(limit));
        self.buffer.entries().skip(skip).collect()
    }

    /// Empties the buffer and removes the log file.
    pub fn clear_events(&mut self) -> Result<()> {
        self.buffer.clear();
        if self.log_file.exists() {
            fs::remove_file(&self.log_file).map_err(|e| DashboardError::io(&self.log_file, e))?;
        }
        Ok(())
    }

    /// Writes the buffered entries as JSON lines to `destination`.
    pub fn export_snapshot(&self, destination: &Path) -> Result<PathBuf> {
        if let Some(dir) = destination.parent() {
            fs::create_dir_all(dir).map_err(|e| DashboardError::io(dir, e))?;
        }
        fs::write(destination, self.buffer.export_json_lines()?)
            .map_err(|e| DashboardError::io(destination, e))?;
        Ok(destination.to_path_buf())
    }

    /// Supported level names, least severe first.
    pub fn supported_levels() -> Vec<&'static str> {
        LogLevel::ALL.iter().map(LogLevel::as_str).collect()
    }
}

/// Reloads JSON lines into `buffer`, skipping blank and unreadable lines.
fn reload(path: &Path, buffer: &mut LogBuffer) -> Result<usize> {
    if !path.exists() {
        return Ok(0);
    }
    let content = fs::read_to_string(path).map_err(|e| DashboardError::io(path, e))?;

    let mut loaded = 0;
    for (index, line) in content.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        match parse_line(line) {
            Some(entry) => {
                buffer.push(entry);
                loaded += 1;
            }
            None => warn!(path = %path.display(), line = index + 1, "skipping corrupt log line"),
        }
    }
    Ok(loaded)
}

fn parse_line(line: &str) -> Option<LogEntry> {
    let Value::Object(record) = serde_json::from_str::<Value>(line).ok()? else {
        return None;
    };
    let text = |key: &str| record.get(key).and_then(Value::as_str);

    let level = match text("level") {
        Some(level) => level.parse().ok()?,
        None => LogLevel::Info,
    };
    let timestamp = text("timestamp").and_then(parse_timestamp);

    Some(LogEntry::new(
        level,
        text("message").unwrap_or("Unknown message"),
        text("source").unwrap_or(DEFAULT_SOURCE),
        timestamp,
    ))
}

/// Accepts RFC 3339 and naive ISO timestamps (taken as UTC).
fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|t| t.with_timezone(&Utc))
        .ok()
        .or_else(|| {
            NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
                .ok()
                .map(|t| t.and_utc())
        })
}

impl DashboardModule for DebugModule {
    fn identifier(&self) -> &str {
        Self::IDENTIFIER
    }

    fn display_name(&self) -> &str {
        "Diagnostics"
    }

    fn description(&self) -> &str {
        "Shows log entries, stores them and suggests fixes."
    }

    fn context(&self) -> &ModuleContext {
        &self.context
    }

    fn render(&self) -> Result<RawPayload> {
        let config = self.context.config();
        let entries = self.get_recent(None);
        let last_level = entries
            .last()
            .map_or("none".to_string(), |e| e.level.to_string());

        let mut payload = RawPayload::new();
        payload.insert("component".into(), json!("debug"));
        payload.insert("title".into(), json!(self.display_name()));
        payload.insert("theme".into(), json!("monochrome"));
        payload.insert("entries".into(), serde_json::to_value(&entries)?);
        payload.insert("log_levels".into(), json!(Self::supported_levels()));
        payload.insert(
            "storage_directory".into(),
            json!(self.context.storage_dir(Self::IDENTIFIER).display().to_string()),
        );
        payload.insert("log_file".into(), json!(self.log_file.display().to_string()));
        payload.insert("loaded_entries".into(), json!(self.loaded_entries));
        payload.insert(
            "keyboard_shortcuts".into(),
            serde_json::to_value(&config.standards.keyboard_shortcuts)?,
        );
        payload.insert("breakpoints".into(), serde_json::to_value(&config.responsive)?);
        payload.insert(
            "status".into(),
            json!({
                "Entries": entries.len().to_string(),
                "Capacity": self.buffer.max_entries().to_string(),
                "Latest level": last_level,
            }),
        );
        Ok(payload)
    }

    fn module_actions(&self) -> Vec<ModuleAction> {
        vec![ModuleAction::new(
            "clear_log",
            "Clear log",
            "Removes all entries and deletes the log file.",
        )]
    }
}
