//! Note management commands.

use crate::cli::common::{print_json, CliContext, CliError, CliResult};
use crate::modules::notes::notes_to_json;
use crate::modules::{DashboardModule, NotesModule};
use clap::{Args, Subcommand};

/// Manage notes
#[derive(Args, Debug)]
pub struct NotesArgs {
    #[command(subcommand)]
    command: NotesCommand,
}

#[derive(Subcommand, Debug)]
enum NotesCommand {
    /// Create or replace a note
    Add(NotesAddArgs),
    /// Print one note
    Show(NotesShowArgs),
    /// List note ids
    List(NotesListArgs),
    /// Delete a note
    Delete(NotesDeleteArgs),
}

/// Create or replace a note
#[derive(Args, Debug)]
pub struct NotesAddArgs {
    /// Note id
    id: String,
    /// Note text
    content: String,
}

/// Print one note
#[derive(Args, Debug)]
pub struct NotesShowArgs {
    /// Note id
    id: String,
}

/// List note ids
#[derive(Args, Debug)]
pub struct NotesListArgs {
    /// Output ids and contents as JSON
    #[arg(long)]
    json: bool,
}

/// Delete a note
#[derive(Args, Debug)]
pub struct NotesDeleteArgs {
    /// Note id
    id: String,
}

impl NotesArgs {
    /// Execute notes subcommand
    pub fn execute(&self, context: &CliContext) -> CliResult<()> {
        let mut notes = NotesModule::open(context.module_context()?)?;

        match &self.command {
            NotesCommand::Add(args) => {
                notes.write(&args.id, args.content.clone())?;
                // flush even when field_change saving is disabled
                notes.autosave()?;
                println!("✓ Saved note '{}'", args.id.trim());
            }
            NotesCommand::Show(args) => {
                let note = notes
                    .read(&args.id)
                    .ok_or_else(|| CliError::usage(format!("Note '{}' not found", args.id)))?;
                println!("{}", note.content);
            }
            NotesCommand::List(args) => {
                if args.json {
                    print_json(&notes_to_json(&notes))?;
                } else if notes.list_note_ids().is_empty() {
                    println!("No notes stored.");
                } else {
                    for id in notes.list_note_ids() {
                        println!("{id}");
                    }
                }
            }
            NotesCommand::Delete(args) => {
                if notes.delete(&args.id)?.is_none() {
                    return Err(CliError::usage(format!("Note '{}' not found", args.id)));
                }
                notes.autosave()?;
                println!("✓ Deleted note '{}'", args.id.trim());
            }
        }
        Ok(())
    }
}
