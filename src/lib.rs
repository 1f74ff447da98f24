//! DashboardTool Library
//!
//! This library provides the core of the dashboard: a validation and
//! self-healing pipeline for module payloads, the theme catalog with WCAG
//! contrast checks, responsive layout rules, the bundled notes and
//! diagnostics modules, and the shell that aggregates everything into a
//! serializable dashboard model.

pub mod cli;
pub mod config;
pub mod error;
pub mod export;
pub mod layout;
pub mod log_buffer;
pub mod modules;
pub mod shell;
pub mod theme;

pub use config::DashboardConfig;
pub use error::{DashboardError, Result};
pub use modules::{DashboardModule, ModuleContext, ModuleTile, ModuleTileExt};
pub use shell::{DashboardModel, DashboardShell};
