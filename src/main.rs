//! DashboardTool - modular dashboard renderer
//!
//! Renders the bundled dashboard modules into a themed HTML or JSON export,
//! reports payload validation problems and manages the notes and event log
//! data behind the modules.

use clap::{Parser, Subcommand};
use dashboardtool::cli::{
    CliContext, ConfigArgs, ExitCode, ExportArgs, LogArgs, NotesArgs, ThemesArgs, ValidateArgs,
};
use std::path::PathBuf;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// DashboardTool - modular dashboard renderer
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to config file (defaults to the platform config directory)
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Enable debug logging on stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render the dashboard to an HTML or JSON file
    Export(ExportArgs),
    /// Validate every module payload
    Validate(ValidateArgs),
    /// List themes with contrast ratios
    Themes(ThemesArgs),
    /// Manage notes
    Notes(NotesArgs),
    /// Manage the diagnostics event log
    Log(LogArgs),
    /// Manage configuration
    Config(ConfigArgs),
}

fn init_tracing(verbose: bool) {
    let fallback = if verbose { "dashboardtool=debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| fallback.into()))
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() -> std::process::ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            // --help and --version also arrive here
            return if e.use_stderr() {
                ExitCode::UsageError.into()
            } else {
                ExitCode::Success.into()
            };
        }
    };
    init_tracing(cli.verbose);

    let context = CliContext::new(cli.config);
    let result = match &cli.command {
        Command::Export(args) => args.execute(&context),
        Command::Validate(args) => args.execute(&context),
        Command::Themes(args) => args.execute(&context),
        Command::Notes(args) => args.execute(&context),
        Command::Log(args) => args.execute(&context),
        Command::Config(args) => args.execute(&context),
    };

    match result {
        Ok(()) => ExitCode::Success.into(),
        Err(e) => {
            eprintln!("Error: {e}");
            e.code.into()
        }
    }
}
