//! Configuration management for the dashboard.
//!
//! One [`DashboardConfig`] is built at process start and shared read-only with
//! every module and the shell. It is stored as TOML with platform-specific
//! directory resolution; every field has a default so partial files load.

use crate::error::DashboardError;
use crate::layout::ResponsiveProfile;
use crate::theme::ThemeCatalog;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Environment variable overriding the config directory.
pub const CONFIG_DIR_ENV: &str = "DASHBOARDTOOL_CONFIG_DIR";

/// Environment variable overriding the data directory (notes, logs).
pub const DATA_DIR_ENV: &str = "DASHBOARDTOOL_DATA_DIR";

/// Size and behavior defaults every module tile inherits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModuleStandard {
    /// Minimum tile width (px)
    pub min_width: u32,
    /// Minimum tile height (px)
    pub min_height: u32,
    /// Inner padding (px)
    pub padding: u32,
    /// Whether tiles may be opened in a separate window
    pub allow_detach: bool,
    /// Whether tiles may be maximized
    pub allow_maximize: bool,
    /// Action name to key combination
    pub keyboard_shortcuts: BTreeMap<String, String>,
}

impl Default for ModuleStandard {
    fn default() -> Self {
        let keyboard_shortcuts = [
            ("focus", "CTRL+ALT+F"),
            ("toggle_visibility", "CTRL+ALT+V"),
            ("detach", "CTRL+ALT+D"),
        ]
        .into_iter()
        .map(|(action, keys)| (action.to_string(), keys.to_string()))
        .collect();

        Self {
            min_width: 320,
            min_height: 240,
            padding: 16,
            allow_detach: true,
            allow_maximize: true,
            keyboard_shortcuts,
        }
    }
}

/// Events that cause modules to persist their data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AutosaveTrigger {
    /// Save whenever a field changes
    FieldChange,
    /// Save on the periodic timer
    Timer,
    /// Save when the application closes
    OnExit,
}

impl AutosaveTrigger {
    /// Config name of the trigger.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::FieldChange => "field_change",
            Self::Timer => "timer",
            Self::OnExit => "on_exit",
        }
    }
}

/// Autosave policy shared by all persisting modules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AutosavePolicy {
    /// Timer period in minutes
    pub interval_minutes: u32,
    /// Enabled triggers
    pub triggers: Vec<AutosaveTrigger>,
}

impl Default for AutosavePolicy {
    fn default() -> Self {
        Self {
            interval_minutes: 10,
            triggers: vec![
                AutosaveTrigger::FieldChange,
                AutosaveTrigger::Timer,
                AutosaveTrigger::OnExit,
            ],
        }
    }
}

impl AutosavePolicy {
    /// True when the trigger is enabled.
    pub fn has_trigger(&self, trigger: AutosaveTrigger) -> bool {
        self.triggers.contains(&trigger)
    }

    /// Short human-readable hint about the next timer run.
    pub fn next_run_hint(&self) -> String {
        format!("within {} minutes at the latest", self.interval_minutes)
    }
}

/// Central dashboard configuration.
///
/// # File Location
///
/// - `$DASHBOARDTOOL_CONFIG_DIR/config.toml` when the variable is set
/// - Linux: `~/.config/DashboardTool/config.toml`
/// - macOS: `~/Library/Application Support/DashboardTool/config.toml`
/// - Windows: `%APPDATA%\DashboardTool\config.toml`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Theme substituted when a module payload has none (or an unusable one)
    pub default_theme: String,
    /// Theme highlighted in the shell's theme report
    pub active_theme: String,
    /// IANA zone the header clock is shown in (UTC when unknown)
    pub default_timezone: String,
    /// Directory for module log files
    pub log_directory: PathBuf,
    /// Root directory for per-module storage
    pub storage_directory: PathBuf,
    /// Autosave policy
    pub autosave: AutosavePolicy,
    /// Module layout standards
    pub standards: ModuleStandard,
    /// Responsive breakpoint table
    pub responsive: ResponsiveProfile,
    /// Theme catalog
    pub themes: ThemeCatalog,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        let data_root = Self::data_dir();
        Self {
            default_theme: "aurora".to_string(),
            active_theme: "aurora".to_string(),
            default_timezone: "Europe/Berlin".to_string(),
            log_directory: data_root
                .as_ref()
                .map_or_else(|| PathBuf::from("var/log/dashboardtool"), |d| d.join("logs")),
            storage_directory: data_root
                .as_ref()
                .map_or_else(|| PathBuf::from("var/data"), |d| d.join("data")),
            autosave: AutosavePolicy::default(),
            standards: ModuleStandard::default(),
            responsive: ResponsiveProfile::default(),
            themes: ThemeCatalog::presets(),
        }
    }
}

impl DashboardConfig {
    /// Creates a configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy rooted at `root` (`<root>/data`, `<root>/logs`).
    pub fn with_data_root(mut self, root: impl AsRef<Path>) -> Self {
        self.storage_directory = root.as_ref().join("data");
        self.log_directory = root.as_ref().join("logs");
        self
    }

    /// Gets the platform-specific config directory path.
    pub fn config_dir() -> Result<PathBuf> {
        if let Some(dir) = std::env::var_os(CONFIG_DIR_ENV) {
            return Ok(PathBuf::from(dir));
        }
        let config_dir = dirs::config_dir()
            .context("Failed to determine config directory")?
            .join("DashboardTool");
        Ok(config_dir)
    }

    /// Gets the full path to the default config file.
    pub fn config_file_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Data directory used for default storage and log locations.
    fn data_dir() -> Option<PathBuf> {
        std::env::var_os(DATA_DIR_ENV)
            .map(PathBuf::from)
            .or_else(|| dirs::data_dir().map(|d| d.join("DashboardTool")))
    }

    /// Loads the default config file, falling back to defaults if it is absent.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_file_path()?)
    }

    /// Loads a config file; a missing file yields the defaults.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!(path = %path.display(), "config file not found, using defaults");
            return Ok(Self::new());
        }

        let content = fs::read_to_string(path)
            .context(format!("Failed to read config file: {}", path.display()))?;

        let config: Self = toml::from_str(&content)
            .context(format!("Failed to parse config file: {}", path.display()))?;

        config
            .validate()
            .context(format!("Invalid config file: {}", path.display()))?;

        debug!(path = %path.display(), themes = config.themes.len(), "loaded config");
        Ok(config)
    }

    /// Saves configuration to `path` using temp file + rename.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        self.validate()?;

        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)
                .context(format!("Failed to create config directory: {}", dir.display()))?;
        }

        let content = toml::to_string_pretty(self).context("Failed to serialize configuration")?;
        let temp_path = path.with_extension("toml.tmp");

        fs::write(&temp_path, content).context(format!(
            "Failed to write temp config file: {}",
            temp_path.display()
        ))?;

        fs::rename(&temp_path, path).context(format!(
            "Failed to rename temp config file to: {}",
            path.display()
        ))?;

        Ok(())
    }

    /// Validates configuration values.
    ///
    /// Checks:
    /// - the theme catalog is not empty
    /// - every catalog color is a valid hex color
    /// - the autosave interval is positive
    pub fn validate(&self) -> std::result::Result<(), DashboardError> {
        if self.themes.is_empty() {
            return Err(DashboardError::EmptyThemeCatalog);
        }

        for (name, theme) in self.themes.iter() {
            let malformed = theme.malformed_roles();
            if !malformed.is_empty() {
                let roles: Vec<&str> = malformed.iter().map(|r| r.as_str()).collect();
                return Err(DashboardError::InvalidConfig(format!(
                    "theme '{name}' has malformed colors for: {}",
                    roles.join(", ")
                )));
            }
        }

        if self.autosave.interval_minutes == 0 {
            return Err(DashboardError::InvalidConfig(
                "autosave interval must be at least 1 minute".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::{ColorRole, Theme};
    use tempfile::TempDir;

    #[test]
    fn test_config_defaults() {
        let config = DashboardConfig::new();
        assert_eq!(config.themes.len(), 4);
        assert_eq!(config.autosave.interval_minutes, 10);
        assert!(config.autosave.has_trigger(AutosaveTrigger::Timer));
        assert_eq!(config.default_theme, "aurora");
        assert_eq!(config.standards.min_width, 320);
        assert_eq!(config.standards.keyboard_shortcuts["focus"], "CTRL+ALT+F");
        assert!(!config.standards.keyboard_shortcuts.contains_key("maximize"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("nested").join("config.toml");

        let mut config = DashboardConfig::new().with_data_root(temp_dir.path());
        config.active_theme = "forest".to_string();
        config.standards.allow_detach = false;
        config.save_to(&config_file).unwrap();

        let loaded = DashboardConfig::load_from(&config_file).unwrap();
        assert_eq!(loaded, config);
        assert!(!config_file.with_extension("toml.tmp").exists());
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let loaded = DashboardConfig::load_from(&temp_dir.path().join("absent.toml")).unwrap();
        assert_eq!(loaded.themes.len(), 4);
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        fs::write(
            &path,
            "active_theme = \"sunrise\"\n\n[standards]\nallow_maximize = false\n",
        )
        .unwrap();

        let loaded = DashboardConfig::load_from(&path).unwrap();
        assert_eq!(loaded.active_theme, "sunrise");
        assert!(!loaded.standards.allow_maximize);
        assert!(loaded.standards.allow_detach);
        assert_eq!(loaded.standards.padding, 16);
        assert_eq!(loaded.themes.len(), 4);
    }

    #[test]
    fn test_custom_themes_replace_presets() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        fs::write(
            &path,
            "[themes.paper]\nbackground = \"#ffffff\"\ntext_primary = \"#000000\"\n",
        )
        .unwrap();

        let loaded = DashboardConfig::load_from(&path).unwrap();
        assert_eq!(loaded.themes.names(), vec!["paper"]);
        let paper = loaded.themes.get("paper").unwrap();
        assert_eq!(paper.color(ColorRole::Background), Some("#ffffff"));
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = DashboardConfig::new();
        config.autosave.interval_minutes = 0;
        assert!(config.validate().is_err());

        let mut config = DashboardConfig::new();
        config.themes = ThemeCatalog::new([(
            "broken".to_string(),
            Theme::new().with_color(ColorRole::Background, "blue"),
        )])
        .unwrap();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("broken"));
    }

    #[test]
    fn test_invalid_file_reports_path() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        fs::write(&path, "autosave = 5").unwrap();
        let err = DashboardConfig::load_from(&path).unwrap_err();
        assert!(format!("{err:#}").contains("config.toml"));
    }
}
