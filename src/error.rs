//! Error types for the dashboard core.
//!
//! Color and theme lookups fail fast with a descriptive message. Structural
//! defects in module payloads are never reported through this type; they are
//! recovered in place and recorded in a [`ValidationResult`].
//!
//! [`ValidationResult`]: crate::modules::validation::ValidationResult

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by the dashboard core and its bundled modules.
#[derive(Debug, Error)]
pub enum DashboardError {
    /// A color string is not six hex digits (after an optional `#`).
    #[error("Invalid color format '{color}'. Expected 6 hex digits (RRGGBB), optionally prefixed with '#'")]
    InvalidColorFormat {
        /// The rejected color string
        color: String,
    },

    /// A theme name is not present in the catalog.
    #[error("Theme '{name}' not found. Available themes: {}", available.join(", "))]
    UnknownTheme {
        /// Requested theme name
        name: String,
        /// Sorted names of all catalog themes
        available: Vec<String>,
    },

    /// Two modules handed to the shell share the same identifier.
    #[error("Module identifier '{identifier}' is used by both '{first}' and '{second}'")]
    DuplicateModuleIdentifier {
        /// The conflicting identifier
        identifier: String,
        /// Display name of the module registered first
        first: String,
        /// Display name of the module registered second
        second: String,
    },

    /// A module was registered without a render implementation.
    #[error("Module '{module}' does not implement render()")]
    NotImplemented {
        /// Identifier of the offending module
        module: String,
    },

    /// A theme catalog was built without any theme.
    #[error("Theme catalog must contain at least one theme")]
    EmptyThemeCatalog,

    /// A log level string is not one of the supported levels.
    #[error("Unknown log level '{level}'. Allowed levels: debug, info, warning, error, critical")]
    UnknownLogLevel {
        /// The rejected level
        level: String,
    },

    /// A note identifier was empty or blank.
    #[error("A note requires a non-empty identifier")]
    InvalidNoteId,

    /// A configuration value is out of range.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Reading or writing module storage failed.
    #[error("I/O error at {}: {source}", path.display())]
    Io {
        /// File or directory involved
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// JSON (de)serialization failed.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl DashboardError {
    /// Wraps an I/O error together with the path it concerns.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result type for dashboard operations.
pub type Result<T> = std::result::Result<T, DashboardError>;
