//! The shared tile pipeline.
//!
//! [`ModuleTileExt`] is implemented for every [`DashboardModule`] and cannot be
//! overridden: concrete modules only supply `render()`, the pipeline adds
//! validation, theme/shortcut healing, actions and layout metadata.

use crate::config::ModuleStandard;
use crate::error::Result;
use crate::modules::payload::{
    RawPayload, ShortcutsRef, ThemeRef, COMPONENT_FIELD, SHORTCUTS_FIELD, THEME_FIELD,
};
use crate::modules::validation::{ValidationEngine, ValidationResult};
use crate::modules::DashboardModule;
use crate::theme::Theme;
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::PathBuf;
use tracing::{debug, warn};

/// Names of the actions every tile may offer, in display order.
pub const STANDARD_ACTIONS: [&str; 4] = ["focus", "toggle_visibility", "maximize", "detach"];

/// One interaction a tile offers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModuleAction {
    /// Action id (e.g., "focus")
    pub name: String,
    /// Button label
    pub label: String,
    /// Tooltip text
    pub description: String,
    /// Key combination, if one is configured
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shortcut: Option<String>,
}

impl ModuleAction {
    /// Creates an action without a shortcut.
    pub fn new(
        name: impl Into<String>,
        label: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
            description: description.into(),
            shortcut: None,
        }
    }

    /// Sets the shortcut; empty strings are treated as "none".
    #[must_use]
    pub fn with_shortcut(mut self, shortcut: Option<impl Into<String>>) -> Self {
        self.shortcut = shortcut.map(Into::into).filter(|s: &String| !s.is_empty());
        self
    }
}

/// Size and behavior hints for frontends, copied from [`ModuleStandard`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LayoutDefaults {
    /// Minimum width (px)
    pub min_width: u32,
    /// Minimum height (px)
    pub min_height: u32,
    /// Inner padding (px)
    pub padding: u32,
    /// Detaching allowed
    pub allow_detach: bool,
    /// Maximizing allowed
    pub allow_maximize: bool,
}

impl From<&ModuleStandard> for LayoutDefaults {
    fn from(standard: &ModuleStandard) -> Self {
        Self {
            min_width: standard.min_width,
            min_height: standard.min_height,
            padding: standard.padding,
            allow_detach: standard.allow_detach,
            allow_maximize: standard.allow_maximize,
        }
    }
}

/// Display-ready snapshot of one module render pass.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModuleTile {
    /// Module identifier
    pub identifier: String,
    /// Human-readable name
    pub display_name: String,
    /// Short description
    pub description: String,
    /// Frontend component id (payload `component`, else the identifier)
    pub component: String,
    /// Payload with resolved `theme` and `keyboard_shortcuts` merged in
    pub payload: RawPayload,
    /// Standard actions followed by module-specific ones
    pub actions: Vec<ModuleAction>,
    /// Layout hints
    pub layout: LayoutDefaults,
    /// Resolved keyboard shortcuts
    pub shortcuts: BTreeMap<String, String>,
    /// Validation outcome of the raw payload
    pub validation: ValidationResult,
    /// Per-module storage directory
    pub storage_directory: PathBuf,
    /// Payload fields replaced by defaults
    pub healed: Vec<String>,
}

impl ModuleTile {
    /// Shortcut bound to an action, if any.
    pub fn shortcut_for(&self, action: &str) -> Option<&str> {
        self.actions
            .iter()
            .find(|a| a.name == action)
            .and_then(|a| a.shortcut.as_deref())
    }

    /// True when the action is offered.
    pub fn has_action(&self, action: &str) -> bool {
        self.actions.iter().any(|a| a.name == action)
    }
}

/// Tile pipeline shared by all modules.
pub trait ModuleTileExt: DashboardModule {
    /// Renders the module and wraps the payload into a [`ModuleTile`].
    ///
    /// Payload defects never fail this call; they are recorded in the tile's
    /// validation result. Only a missing `render()` implementation errors.
    fn render_dashboard_tile(&self) -> Result<ModuleTile>;

    /// Standard actions (subject to the module standard) plus module extras.
    fn available_actions(&self, shortcuts: &BTreeMap<String, String>) -> Vec<ModuleAction>;

    /// Layout hints from the module standard.
    fn layout_defaults(&self) -> LayoutDefaults;

    /// Storage directory for this module (not created here).
    fn storage_directory(&self) -> PathBuf;
}

impl<M: DashboardModule + ?Sized> ModuleTileExt for M {
    fn render_dashboard_tile(&self) -> Result<ModuleTile> {
        let mut payload = self.render()?;
        let config = self.context().config();
        let engine = ValidationEngine::new(config);
        let mut validation =
            engine.validate(self.identifier(), self.display_name(), &payload);
        let mut healed = Vec::new();

        let theme = match ThemeRef::from_payload(&payload) {
            ThemeRef::Inline(theme) if theme.is_complete() => theme,
            ThemeRef::Named(name) if config.themes.contains(&name) => {
                config.themes.get(&name).cloned().unwrap_or_default()
            }
            other => {
                warn!(
                    module = self.identifier(),
                    theme = ?other,
                    "substituting default theme"
                );
                healed.push(THEME_FIELD.to_string());
                engine.fallback_theme(&mut validation)
            }
        };

        let shortcuts = match ShortcutsRef::from_payload(&payload) {
            ShortcutsRef::Mapping(mapping) => mapping,
            other => {
                warn!(
                    module = self.identifier(),
                    shortcuts = ?other,
                    "substituting standard keyboard shortcuts"
                );
                healed.push(SHORTCUTS_FIELD.to_string());
                config.standards.keyboard_shortcuts.clone()
            }
        };

        payload.insert(THEME_FIELD.to_string(), theme.to_json());
        payload.insert(
            SHORTCUTS_FIELD.to_string(),
            Value::Object(
                shortcuts
                    .iter()
                    .map(|(k, v)| (k.clone(), Value::String(v.clone())))
                    .collect(),
            ),
        );

        let component = payload
            .get(COMPONENT_FIELD)
            .and_then(Value::as_str)
            .unwrap_or_else(|| self.identifier())
            .to_string();

        debug!(
            module = self.identifier(),
            errors = validation.errors().len(),
            warnings = validation.warnings().len(),
            healed = healed.len(),
            "rendered tile"
        );

        Ok(ModuleTile {
            identifier: self.identifier().to_string(),
            display_name: self.display_name().to_string(),
            description: self.description().to_string(),
            component,
            actions: self.available_actions(&shortcuts),
            layout: self.layout_defaults(),
            payload,
            shortcuts,
            validation,
            storage_directory: self.storage_directory(),
            healed,
        })
    }

    fn available_actions(&self, shortcuts: &BTreeMap<String, String>) -> Vec<ModuleAction> {
        let standard = &self.context().config().standards;
        // Payload shortcuts win; the module standard fills the gaps.
        let shortcut = |name: &str| {
            shortcuts
                .get(name)
                .or_else(|| standard.keyboard_shortcuts.get(name))
                .cloned()
        };

        let mut actions = vec![
            ModuleAction::new(
                "focus",
                "Focus",
                "Brings the module to the foreground via keyboard.",
            )
            .with_shortcut(shortcut("focus")),
            ModuleAction::new(
                "toggle_visibility",
                "Show/Hide",
                "Shows or hides the module.",
            )
            .with_shortcut(shortcut("toggle_visibility")),
        ];
        if standard.allow_maximize {
            actions.push(
                ModuleAction::new(
                    "maximize",
                    "Maximize",
                    "Toggles between the standard and the full-screen view.",
                )
                .with_shortcut(shortcut("maximize")),
            );
        }
        if standard.allow_detach {
            actions.push(
                ModuleAction::new(
                    "detach",
                    "Detach",
                    "Opens the module in a separate window.",
                )
                .with_shortcut(shortcut("detach")),
            );
        }

        for extra in self.module_actions() {
            if STANDARD_ACTIONS.contains(&extra.name.as_str()) {
                debug!(
                    module = self.identifier(),
                    action = %extra.name,
                    "ignoring module action that shadows a standard action"
                );
                continue;
            }
            if actions.iter().any(|a| a.name == extra.name) {
                continue;
            }
            actions.push(extra);
        }
        actions
    }

    fn layout_defaults(&self) -> LayoutDefaults {
        LayoutDefaults::from(&self.context().config().standards)
    }

    fn storage_directory(&self) -> PathBuf {
        self.context().storage_dir(self.identifier())
    }
}

/// Theme a tile ended up with, read back from its payload.
pub fn tile_theme(tile: &ModuleTile) -> Theme {
    match ThemeRef::from_payload(&tile.payload) {
        ThemeRef::Inline(theme) => theme,
        _ => Theme::new(),
    }
}
