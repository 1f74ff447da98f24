//! CLI command handlers for DashboardTool.
//!
//! This module provides headless, scriptable access to the dashboard:
//! rendering exports, validating module payloads and managing module data.

pub mod common;
pub mod config;
pub mod export;
pub mod log;
pub mod notes;
pub mod themes;
pub mod validate;

// Re-export types used by main.rs and tests
pub use common::{CliContext, CliError, CliResult, ExitCode};
pub use config::ConfigArgs;
pub use export::ExportArgs;
pub use log::LogArgs;
pub use notes::NotesArgs;
pub use themes::ThemesArgs;
pub use validate::ValidateArgs;
