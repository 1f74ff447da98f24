//! Shared CLI plumbing: exit codes, errors and config loading.

use crate::config::DashboardConfig;
use crate::error::DashboardError;
use crate::modules::{default_modules, ModuleContext};
use crate::shell::DashboardShell;
use std::fmt;
use std::path::{Path, PathBuf};

/// Process exit codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// Command succeeded
    Success = 0,
    /// Input or dashboard data failed validation
    ValidationFailed = 1,
    /// Reading or writing a file failed
    IoError = 2,
    /// Arguments were well-formed but not usable
    UsageError = 3,
}

impl From<ExitCode> for std::process::ExitCode {
    fn from(code: ExitCode) -> Self {
        Self::from(code as u8)
    }
}

/// Error returned by command handlers.
#[derive(Debug)]
pub struct CliError {
    /// Exit code to terminate with
    pub code: ExitCode,
    /// Message printed to stderr
    pub message: String,
}

impl CliError {
    /// Validation failure (exit 1).
    pub fn validation(message: impl Into<String>) -> Self {
        Self {
            code: ExitCode::ValidationFailed,
            message: message.into(),
        }
    }

    /// I/O failure (exit 2).
    pub fn io(message: impl Into<String>) -> Self {
        Self {
            code: ExitCode::IoError,
            message: message.into(),
        }
    }

    /// Unusable arguments (exit 3).
    pub fn usage(message: impl Into<String>) -> Self {
        Self {
            code: ExitCode::UsageError,
            message: message.into(),
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for CliError {}

impl From<DashboardError> for CliError {
    fn from(err: DashboardError) -> Self {
        match err {
            DashboardError::Io { .. } | DashboardError::Serialization(_) => Self::io(err.to_string()),
            DashboardError::UnknownLogLevel { .. }
            | DashboardError::InvalidNoteId
            | DashboardError::UnknownTheme { .. } => Self::usage(err.to_string()),
            _ => Self::validation(err.to_string()),
        }
    }
}

/// Result type for command handlers.
pub type CliResult<T> = Result<T, CliError>;

/// Options shared by every subcommand.
#[derive(Debug, Clone, Default)]
pub struct CliContext {
    config_path: Option<PathBuf>,
}

impl CliContext {
    /// Creates a context; `None` uses the default config location.
    pub fn new(config_path: Option<PathBuf>) -> Self {
        Self { config_path }
    }

    /// Config file in effect.
    pub fn config_path(&self) -> CliResult<PathBuf> {
        match &self.config_path {
            Some(path) => Ok(path.clone()),
            None => DashboardConfig::config_file_path()
                .map_err(|e| CliError::io(format!("Failed to locate config file: {e:#}"))),
        }
    }

    /// Loads the configuration (defaults when the file does not exist).
    pub fn load_config(&self) -> CliResult<DashboardConfig> {
        let path = self.config_path()?;
        load_config_from(&path)
    }

    /// Module context around the loaded configuration.
    pub fn module_context(&self) -> CliResult<ModuleContext> {
        Ok(ModuleContext::new(self.load_config()?))
    }

    /// Shell with the bundled modules.
    pub fn default_shell(&self) -> CliResult<DashboardShell> {
        let context = self.module_context()?;
        let modules = default_modules(&context)?;
        Ok(DashboardShell::new(modules, context.shared_config())?)
    }
}

/// Unreadable files are I/O errors; bad contents are validation errors.
fn load_config_from(path: &Path) -> CliResult<DashboardConfig> {
    DashboardConfig::load_from(path).map_err(|e| {
        let message = format!("Failed to load configuration: {e:#}");
        if e.chain().any(|cause| cause.is::<std::io::Error>()) {
            CliError::io(message)
        } else {
            CliError::validation(message)
        }
    })
}

/// Prints a value as pretty JSON to stdout.
pub fn print_json<T: serde::Serialize>(value: &T) -> CliResult<()> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| CliError::io(format!("Failed to serialize JSON: {e}")))?;
    println!("{json}");
    Ok(())
}
