//! Notes module with autosave.
//!
//! Notes live in `<storage>/notes/notes.json` as an object of
//! `id -> {content, timestamp}`. With the `field_change` autosave trigger every
//! write is persisted immediately; otherwise changes are held until
//! [`DashboardModule::autosave`] runs.

use crate::config::AutosaveTrigger;
use crate::error::{DashboardError, Result};
use crate::modules::payload::RawPayload;
use crate::modules::{DashboardModule, ModuleContext};
use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

const NOTES_FILE: &str = "notes.json";

/// A stored note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    /// Note text
    pub content: String,
    /// Last modification (UTC)
    pub timestamp: DateTime<Utc>,
}

/// Persistent notes with autosave.
#[derive(Debug)]
pub struct NotesModule {
    context: ModuleContext,
    notes: BTreeMap<String, Note>,
    path: PathBuf,
    dirty: bool,
    last_saved: Option<DateTime<Utc>>,
}

impl NotesModule {
    /// Module identifier.
    pub const IDENTIFIER: &'static str = "notes";

    /// Opens the notes store, creating the storage directory if needed.
    pub fn open(context: ModuleContext) -> Result<Self> {
        let dir = context.ensure_storage_dir(Self::IDENTIFIER)?;
        let path = dir.join(NOTES_FILE);
        let notes = load_notes(&path)?;
        debug!(path = %path.display(), count = notes.len(), "loaded notes");

        Ok(Self {
            context,
            notes,
            path,
            dirty: false,
            last_saved: None,
        })
    }

    /// Path of the backing JSON file.
    pub fn notes_file(&self) -> &Path {
        &self.path
    }

    /// Creates or replaces a note.
    pub fn write(&mut self, id: &str, content: impl Into<String>) -> Result<()> {
        let id = id.trim();
        if id.is_empty() {
            return Err(DashboardError::InvalidNoteId);
        }
        self.notes.insert(
            id.to_string(),
            Note {
                content: content.into(),
                timestamp: Utc::now().trunc_subsecs(0),
            },
        );
        self.changed()
    }

    /// Removes a note, returning it if it existed.
    pub fn delete(&mut self, id: &str) -> Result<Option<Note>> {
        let removed = self.notes.remove(id.trim());
        if removed.is_some() {
            self.changed()?;
        }
        Ok(removed)
    }

    /// Reads a note.
    pub fn read(&self, id: &str) -> Option<&Note> {
        self.notes.get(id.trim())
    }

    /// Note ids in sorted order.
    pub fn list_note_ids(&self) -> Vec<&str> {
        self.notes.keys().map(String::as_str).collect()
    }

    /// True when changes are waiting for the next autosave.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Time of the last successful save in this session.
    pub fn last_saved(&self) -> Option<DateTime<Utc>> {
        self.last_saved
    }

    /// Marks the store dirty and saves right away on `field_change`.
    ///
    /// A failed save leaves the store dirty so the next autosave retries it.
    fn changed(&mut self) -> Result<()> {
        self.dirty = true;
        if self
            .context
            .config()
            .autosave
            .has_trigger(AutosaveTrigger::FieldChange)
        {
            self.save()
        } else {
            Ok(())
        }
    }

    fn save(&mut self) -> Result<()> {
        let content = serde_json::to_string_pretty(&self.notes)?;
        let temp_path = self.path.with_extension("json.tmp");
        let written = fs::write(&temp_path, content)
            .map_err(|e| DashboardError::io(&temp_path, e))
            .and_then(|()| {
                fs::rename(&temp_path, &self.path).map_err(|e| DashboardError::io(&self.path, e))
            });
        if let Err(e) = written {
            if temp_path.is_file() {
                let _ = fs::remove_file(&temp_path);
            }
            warn!(path = %self.path.display(), error = %e, "failed to save notes");
            return Err(e);
        }

        self.dirty = false;
        self.last_saved = Some(Utc::now().trunc_subsecs(0));
        info!(path = %self.path.display(), count = self.notes.len(), "saved notes");
        Ok(())
    }
}

fn load_notes(path: &Path) -> Result<BTreeMap<String, Note>> {
    if !path.exists() {
        return Ok(BTreeMap::new());
    }
    let content = fs::read_to_string(path).map_err(|e| DashboardError::io(path, e))?;
    if content.trim().is_empty() {
        return Ok(BTreeMap::new());
    }
    Ok(serde_json::from_str(&content)?)
}

impl DashboardModule for NotesModule {
    fn identifier(&self) -> &str {
        Self::IDENTIFIER
    }

    fn display_name(&self) -> &str {
        "Notes"
    }

    fn description(&self) -> &str {
        "Stores notes persistently with autosave."
    }

    fn context(&self) -> &ModuleContext {
        &self.context
    }

    fn render(&self) -> Result<RawPayload> {
        let config = self.context.config();
        let storage = self.context.storage_dir(Self::IDENTIFIER);
        let triggers: Vec<&str> = config.autosave.triggers.iter().map(|t| t.as_str()).collect();

        let mut payload = RawPayload::new();
        payload.insert("component".into(), json!("notes"));
        payload.insert("title".into(), json!(self.display_name()));
        // An unknown default theme is left to the tile pipeline to heal.
        if let Ok(theme) = config.themes.get(&config.default_theme) {
            payload.insert("theme".into(), theme.to_json());
        }
        payload.insert("autosave_interval".into(), json!(config.autosave.interval_minutes));
        payload.insert("autosave_triggers".into(), json!(triggers));
        payload.insert("breakpoints".into(), serde_json::to_value(&config.responsive)?);
        payload.insert(
            "keyboard_shortcuts".into(),
            serde_json::to_value(&config.standards.keyboard_shortcuts)?,
        );
        payload.insert("storage_directory".into(), json!(storage.display().to_string()));
        payload.insert("note_count".into(), json!(self.notes.len()));
        payload.insert(
            "status".into(),
            json!({
                "Notes": self.notes.len().to_string(),
                "Autosave": format!("every {} minutes", config.autosave.interval_minutes),
                "Triggers": triggers.join(", "),
            }),
        );
        Ok(payload)
    }

    fn autosave(&mut self) -> Result<()> {
        if self.dirty {
            self.save()?;
        }
        Ok(())
    }
}

/// Note ids and contents as a JSON object, for CLI output.
pub fn notes_to_json(module: &NotesModule) -> Value {
    Value::Object(
        module
            .notes
            .iter()
            .map(|(id, note)| {
                (
                    id.clone(),
                    json!({"content": note.content, "timestamp": note.timestamp}),
                )
            })
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DashboardConfig;
    use crate::modules::ModuleTileExt;
    use tempfile::TempDir;

    fn context(temp_dir: &TempDir, config: DashboardConfig) -> ModuleContext {
        ModuleContext::new(config.with_data_root(temp_dir.path()))
    }

    #[test]
    fn test_write_persists_on_field_change() {
        let temp_dir = TempDir::new().unwrap();
        let mut notes = NotesModule::open(context(&temp_dir, DashboardConfig::new())).unwrap();
        notes.write("todo", "Buy milk").unwrap();

        assert!(!notes.is_dirty());
        assert!(notes.notes_file().exists());
        assert!(notes.notes_file().ends_with("notes/notes.json"));

        let reopened = NotesModule::open(context(&temp_dir, DashboardConfig::new())).unwrap();
        assert_eq!(reopened.read("todo").unwrap().content, "Buy milk");
    }

    #[test]
    fn test_without_field_change_waits_for_autosave() {
        let temp_dir = TempDir::new().unwrap();
        let mut config = DashboardConfig::new();
        config.autosave.triggers = vec![AutosaveTrigger::Timer];
        let mut notes = NotesModule::open(context(&temp_dir, config)).unwrap();

        notes.write("a", "first").unwrap();
        assert!(notes.is_dirty());
        assert!(!notes.notes_file().exists());

        notes.autosave().unwrap();
        assert!(!notes.is_dirty());
        assert!(notes.notes_file().exists());
        assert!(notes.last_saved().is_some());
    }

    #[test]
    fn test_failed_save_stays_dirty_until_autosave() {
        let temp_dir = TempDir::new().unwrap();
        let mut notes = NotesModule::open(context(&temp_dir, DashboardConfig::new())).unwrap();
        let blocker = notes.notes_file().with_extension("json.tmp");
        fs::create_dir(&blocker).unwrap();

        assert!(notes.write("todo", "Buy milk").is_err());
        assert!(notes.is_dirty());
        assert!(notes.last_saved().is_none());
        assert!(!notes.notes_file().exists());

        fs::remove_dir(&blocker).unwrap();
        notes.autosave().unwrap();
        assert!(!notes.is_dirty());
        assert!(!blocker.exists());

        let reopened = NotesModule::open(context(&temp_dir, DashboardConfig::new())).unwrap();
        assert_eq!(reopened.read("todo").unwrap().content, "Buy milk");
    }

    #[test]
    fn test_failed_rename_removes_temp_file() {
        let temp_dir = TempDir::new().unwrap();
        let mut notes = NotesModule::open(context(&temp_dir, DashboardConfig::new())).unwrap();
        fs::create_dir(notes.notes_file()).unwrap();
        fs::write(notes.notes_file().join("keep"), "x").unwrap();

        assert!(notes.write("todo", "Buy milk").is_err());
        assert!(notes.is_dirty());
        assert!(!notes.notes_file().with_extension("json.tmp").exists());
    }

    #[test]
    fn test_blank_id_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let mut notes = NotesModule::open(context(&temp_dir, DashboardConfig::new())).unwrap();
        assert!(matches!(
            notes.write("  ", "x"),
            Err(DashboardError::InvalidNoteId)
        ));
    }

    #[test]
    fn test_list_and_delete() {
        let temp_dir = TempDir::new().unwrap();
        let mut notes = NotesModule::open(context(&temp_dir, DashboardConfig::new())).unwrap();
        notes.write("b", "2").unwrap();
        notes.write("a", "1").unwrap();
        assert_eq!(notes.list_note_ids(), vec!["a", "b"]);

        assert!(notes.delete("a").unwrap().is_some());
        assert!(notes.delete("a").unwrap().is_none());
        assert_eq!(notes.list_note_ids(), vec!["b"]);
    }

    #[test]
    fn test_tile_is_valid() {
        let temp_dir = TempDir::new().unwrap();
        let notes = NotesModule::open(context(&temp_dir, DashboardConfig::new())).unwrap();
        let tile = notes.render_dashboard_tile().unwrap();

        assert!(tile.validation.is_valid(), "{:?}", tile.validation);
        assert!(tile.validation.warnings().is_empty());
        assert!(tile.healed.is_empty());
        assert_eq!(tile.component, "notes");
        assert_eq!(tile.payload["note_count"], 0);
        assert_eq!(tile.payload["breakpoints"][1]["name"], "tablet");
    }
}
