//! Export command writing the dashboard as HTML or JSON.

use crate::cli::common::{CliContext, CliError, CliResult};
use crate::export::{self, ExportFormat};
use clap::Args;
use std::fs;
use std::path::PathBuf;
use tracing::info;

/// Render the bundled modules and write the dashboard to a file
#[derive(Debug, Clone, Args)]
pub struct ExportArgs {
    /// Output file (defaults to dashboard.html or dashboard.json)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Output format (html or json)
    #[arg(short, long, default_value = "html", value_name = "FORMAT")]
    pub format: ExportFormat,

    /// Viewport width in pixels, selects the active breakpoint
    #[arg(long, value_name = "PX")]
    pub width: Option<u32>,
}

impl ExportArgs {
    /// Execute the export command
    pub fn execute(&self, context: &CliContext) -> CliResult<()> {
        let mut shell = context.default_shell()?;
        if let Some(width) = self.width {
            shell = shell.with_viewport_width(width);
        }
        let model = shell.render()?;

        let content = match self.format {
            ExportFormat::Html => export::render_html(&model),
            ExportFormat::Json => export::render_json(&model)?,
        };

        let output = self
            .output
            .clone()
            .unwrap_or_else(|| PathBuf::from(format!("dashboard.{}", self.format.extension())));
        if let Some(dir) = output.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir).map_err(|e| {
                CliError::io(format!("Failed to create directory {}: {e}", dir.display()))
            })?;
        }
        fs::write(&output, content)
            .map_err(|e| CliError::io(format!("Failed to write output file: {e}")))?;

        info!(path = %output.display(), format = %self.format, "exported dashboard");
        println!("✓ Dashboard exported to {} ({})", output.display(), self.format);
        Ok(())
    }
}
