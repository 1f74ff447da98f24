//! Debug event log commands.

use crate::cli::common::{print_json, CliContext, CliError, CliResult};
use crate::log_buffer::LogLevel;
use crate::modules::DebugModule;
use clap::{Args, Subcommand};
use std::path::PathBuf;

/// Manage the diagnostics event log
#[derive(Args, Debug)]
pub struct LogArgs {
    #[command(subcommand)]
    command: LogCommand,
}

#[derive(Subcommand, Debug)]
enum LogCommand {
    /// Record an event
    Add(LogAddArgs),
    /// Show the newest events
    Recent(LogRecentArgs),
    /// Remove all events and the log file
    Clear,
    /// Write the buffered events to a JSON-lines file
    Snapshot(LogSnapshotArgs),
}

/// Record an event
#[derive(Args, Debug)]
pub struct LogAddArgs {
    /// Event message
    message: String,

    /// Level (debug, info, warning, error, critical)
    #[arg(short, long, default_value = "info")]
    level: String,

    /// Component that produced the event
    #[arg(short, long, default_value = "cli")]
    source: String,
}

/// Show the newest events
#[derive(Args, Debug)]
pub struct LogRecentArgs {
    /// Maximum number of events
    #[arg(short = 'n', long)]
    limit: Option<usize>,

    /// Only events at or above this level
    #[arg(long)]
    min_level: Option<String>,

    /// Output as JSON
    #[arg(long)]
    json: bool,
}

/// Write the buffered events to a file
#[derive(Args, Debug)]
pub struct LogSnapshotArgs {
    /// Destination file
    #[arg(short, long, value_name = "FILE")]
    output: PathBuf,
}

impl LogArgs {
    /// Execute log subcommand
    pub fn execute(&self, context: &CliContext) -> CliResult<()> {
        let mut module = DebugModule::open(context.module_context()?)?;

        match &self.command {
            LogCommand::Add(args) => {
                let level: LogLevel = args.level.parse()?;
                let entry = module.log_event(args.message.clone(), level, args.source.clone())?;
                println!("✓ Logged {} event at {}", entry.level, entry.timestamp);
            }
            LogCommand::Recent(args) => {
                let minimum = args
                    .min_level
                    .as_deref()
                    .map(str::parse::<LogLevel>)
                    .transpose()?;
                let entries: Vec<_> = module
                    .get_recent(args.limit)
                    .into_iter()
                    .filter(|e| minimum.map_or(true, |min| e.level >= min))
                    .collect();

                if args.json {
                    print_json(&entries)?;
                } else if entries.is_empty() {
                    println!("No events recorded.");
                } else {
                    for entry in entries {
                        println!(
                            "{} [{}] {}: {}",
                            entry.timestamp.format("%Y-%m-%d %H:%M:%S"),
                            entry.level,
                            entry.source,
                            entry.message
                        );
                    }
                }
            }
            LogCommand::Clear => {
                module.clear_events()?;
                println!("✓ Event log cleared");
            }
            LogCommand::Snapshot(args) => {
                let path = module
                    .export_snapshot(&args.output)
                    .map_err(|e| CliError::io(format!("Failed to write snapshot: {e}")))?;
                println!("✓ Snapshot written to {}", path.display());
            }
        }
        Ok(())
    }
}
