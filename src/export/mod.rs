//! Serializers turning a [`DashboardModel`](crate::shell::DashboardModel)
//! into files: a self-contained HTML page or pretty JSON.

pub mod html;
pub mod json;

pub use html::render_html;
pub use json::render_json;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Output format of an export.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    /// Standalone HTML page
    #[default]
    Html,
    /// Pretty JSON
    Json,
}

impl ExportFormat {
    /// Default file extension.
    pub const fn extension(&self) -> &'static str {
        match self {
            Self::Html => "html",
            Self::Json => "json",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "html" => Ok(Self::Html),
            "json" => Ok(Self::Json),
            other => Err(format!("Unknown format '{other}'. Expected html or json")),
        }
    }
}
