//! Shared test fixtures for library and E2E CLI tests.
#![allow(dead_code)] // Not every test binary uses every fixture

use dashboardtool::config::{CONFIG_DIR_ENV, DATA_DIR_ENV};
use dashboardtool::theme::{ColorRole, Theme, ThemeCatalog};
use dashboardtool::{DashboardConfig, ModuleContext};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

/// Config file declaring a single, incomplete theme.
pub const PAPER_ONLY_CONFIG: &str = "\
[themes.paper]
background = \"#ffffff\"
text_primary = \"#000000\"
";

/// Path to the dashboardtool binary
pub fn dashboardtool_bin() -> &'static str {
    env!("CARGO_BIN_EXE_dashboardtool")
}

/// Isolated config and data directories for one test.
pub struct TestEnv {
    /// Holds `config.toml`
    pub config_dir: TempDir,
    /// Holds module storage and logs
    pub data_dir: TempDir,
}

impl TestEnv {
    /// Creates empty directories; no config file is written.
    pub fn new() -> Self {
        Self {
            config_dir: TempDir::new().expect("Failed to create config dir"),
            data_dir: TempDir::new().expect("Failed to create data dir"),
        }
    }

    /// Path of the config file the binary reads.
    pub fn config_file(&self) -> PathBuf {
        self.config_dir.path().join("config.toml")
    }

    /// Writes `content` as the config file.
    pub fn write_config(&self, content: &str) {
        fs::write(self.config_file(), content).expect("Failed to write config");
    }

    /// Path below the data directory.
    pub fn data_path(&self, relative: &str) -> PathBuf {
        self.data_dir.path().join(relative)
    }

    /// Command with isolated config and data directories.
    pub fn command(&self, args: &[&str]) -> Command {
        let mut cmd = Command::new(dashboardtool_bin());
        cmd.env(CONFIG_DIR_ENV, self.config_dir.path());
        cmd.env(DATA_DIR_ENV, self.data_dir.path());
        cmd.env_remove("RUST_LOG");
        cmd.current_dir(self.data_dir.path());
        cmd.args(args);
        cmd
    }

    /// Runs the command and returns its output.
    pub fn run(&self, args: &[&str]) -> Output {
        self.command(args)
            .output()
            .expect("Failed to execute command")
    }
}

/// Asserts a zero exit status, printing stderr otherwise.
pub fn assert_success(output: &Output, what: &str) {
    assert_eq!(
        output.status.code(),
        Some(0),
        "{what} should succeed. stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
}

/// Parses stdout as JSON.
pub fn stdout_json(output: &Output) -> serde_json::Value {
    serde_json::from_slice(&output.stdout).expect("Should parse JSON output")
}

/// Default configuration storing everything below `root`.
pub fn temp_config(root: &Path) -> DashboardConfig {
    DashboardConfig::new().with_data_root(root)
}

/// Module context storing everything below `root`.
pub fn temp_context(root: &Path) -> ModuleContext {
    ModuleContext::new(temp_config(root))
}

/// Catalog holding only the incomplete `paper` theme.
pub fn paper_catalog() -> ThemeCatalog {
    let paper = Theme::new()
        .with_color(ColorRole::Background, "#ffffff")
        .with_color(ColorRole::TextPrimary, "#000000");
    ThemeCatalog::new([("paper".to_string(), paper)]).expect("Catalog is not empty")
}
