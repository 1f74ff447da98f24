//! Configuration management CLI commands.

use crate::cli::common::{print_json, CliContext, CliError, CliResult};
use crate::config::DashboardConfig;
use clap::{Args, Subcommand};

/// Configuration management commands
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    command: ConfigCommand,
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Display current configuration
    Show(ConfigShowArgs),
    /// Write a configuration file with default values
    Init(ConfigInitArgs),
    /// Set configuration values
    Set(ConfigSetArgs),
}

/// Display current configuration
#[derive(Args, Debug)]
pub struct ConfigShowArgs {
    /// Output as JSON
    #[arg(long)]
    json: bool,
}

/// Write a configuration file with default values
#[derive(Args, Debug)]
pub struct ConfigInitArgs {
    /// Overwrite an existing file
    #[arg(long)]
    force: bool,
}

/// Set configuration values
#[derive(Args, Debug)]
pub struct ConfigSetArgs {
    /// Theme substituted for missing module themes
    #[arg(long, value_name = "NAME")]
    default_theme: Option<String>,

    /// Theme highlighted in the dashboard
    #[arg(long, value_name = "NAME")]
    active_theme: Option<String>,

    /// Autosave timer period in minutes
    #[arg(long, value_name = "MINUTES")]
    autosave_interval: Option<u32>,
}

impl ConfigArgs {
    /// Execute config subcommand
    pub fn execute(&self, context: &CliContext) -> CliResult<()> {
        match &self.command {
            ConfigCommand::Show(args) => args.execute(context),
            ConfigCommand::Init(args) => args.execute(context),
            ConfigCommand::Set(args) => args.execute(context),
        }
    }
}

impl ConfigShowArgs {
    /// Execute show command
    pub fn execute(&self, context: &CliContext) -> CliResult<()> {
        let config = context.load_config()?;

        if self.json {
            print_json(&config)
        } else {
            output_human_readable(&config, &context.config_path()?.display().to_string());
            Ok(())
        }
    }
}

impl ConfigInitArgs {
    /// Execute init command
    pub fn execute(&self, context: &CliContext) -> CliResult<()> {
        let path = context.config_path()?;
        if path.exists() && !self.force {
            return Err(CliError::usage(format!(
                "Config file already exists: {} (use --force to overwrite)",
                path.display()
            )));
        }

        DashboardConfig::new()
            .save_to(&path)
            .map_err(|e| CliError::io(format!("Failed to save configuration: {e:#}")))?;
        println!("✓ Configuration written to {}", path.display());
        Ok(())
    }
}

impl ConfigSetArgs {
    /// Execute set command
    pub fn execute(&self, context: &CliContext) -> CliResult<()> {
        if self.default_theme.is_none()
            && self.active_theme.is_none()
            && self.autosave_interval.is_none()
        {
            return Err(CliError::usage(
                "At least one configuration option must be specified: --default-theme, \
                 --active-theme, or --autosave-interval",
            ));
        }

        let mut config = context.load_config()?;

        for name in [&self.default_theme, &self.active_theme].into_iter().flatten() {
            config.themes.get(name)?;
        }
        if let Some(name) = &self.default_theme {
            config.default_theme.clone_from(name);
        }
        if let Some(name) = &self.active_theme {
            config.active_theme.clone_from(name);
        }
        if let Some(minutes) = self.autosave_interval {
            config.autosave.interval_minutes = minutes;
        }
        config.validate()?;

        let path = context.config_path()?;
        config
            .save_to(&path)
            .map_err(|e| CliError::io(format!("Failed to save configuration: {e:#}")))?;

        println!("Configuration updated successfully.");
        Ok(())
    }
}

/// Output configuration in human-readable format
fn output_human_readable(config: &DashboardConfig, path: &str) {
    println!("DashboardTool Configuration");
    println!("===========================");
    println!("File: {path}");
    println!();

    println!("Themes:");
    println!("  Default: {}", config.default_theme);
    println!("  Active:  {}", config.active_theme);
    println!("  Catalog: {}", config.themes.names().join(", "));
    println!();

    println!("Autosave:");
    println!("  Interval: {} minutes", config.autosave.interval_minutes);
    let triggers: Vec<&str> = config.autosave.triggers.iter().map(|t| t.as_str()).collect();
    println!("  Triggers: {}", triggers.join(", "));
    println!();

    println!("Storage:");
    println!("  Data: {}", config.storage_directory.display());
    println!("  Logs: {}", config.log_directory.display());
    println!();

    println!("Module standards:");
    let standards = &config.standards;
    println!(
        "  Minimum size: {}x{} px, padding {} px",
        standards.min_width, standards.min_height, standards.padding
    );
    println!(
        "  Detach: {}, maximize: {}",
        standards.allow_detach, standards.allow_maximize
    );
    for (action, keys) in &standards.keyboard_shortcuts {
        println!("  {action}: {keys}");
    }
    println!();

    println!("Breakpoints:");
    for bp in config.responsive.breakpoints() {
        println!(
            "  {:<8} from {:>4} px, {:>2} columns, modules up to {} px",
            bp.name, bp.min_width, bp.columns, bp.max_module_width
        );
    }
    println!("  Timezone: {}", config.default_timezone);
}
