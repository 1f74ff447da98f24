//! Dashboard shell: composes module tiles into one dashboard model.
//!
//! The shell owns the modules, renders every tile through the shared
//! pipeline and adds the surrounding sections (header clock, status,
//! sidebar, theme report, validation summary, keyboard navigation,
//! notifications and self-healing recommendations). Timestamps only appear
//! in the header and status sections.

pub mod healing;

pub use healing::{AggregatedSolution, SelfHealing};

use crate::config::{AutosaveTrigger, DashboardConfig};
use crate::error::{DashboardError, Result};
use crate::layout::{LayoutSpec, ResponsiveBreakpoint, ResponsiveProfile};
use crate::modules::{DashboardModule, ModuleTile, ModuleTileExt, ValidationResult};
use crate::theme::{accessibility_report, meets_wcag_aa, AccessibilityReport, Theme};
use chrono::{DateTime, FixedOffset, SecondsFormat, Utc};
use chrono_tz::Tz;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Default window title.
pub const DEFAULT_TITLE: &str = "DashboardTool";
/// Default subtitle under the title.
pub const DEFAULT_SUBTITLE: &str = "Modular control center with help overlays for newcomers";
/// Global shortcut toggling the sidebar.
pub const TOGGLE_SIDEBAR_SHORTCUT: &str = "CTRL+ALT+S";
/// Global shortcut opening the help overlay.
pub const OPEN_HELP_SHORTCUT: &str = "F1";

/// The complete dashboard model handed to serializers.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardModel {
    /// Title and clock
    pub header: Header,
    /// Autosave and storage status
    pub status: Status,
    /// Grid variables, breakpoints and sidebar
    pub layout: LayoutSection,
    /// Theme catalog with accessibility scores
    pub themes: ThemeReport,
    /// Rendered module tiles
    pub modules: Vec<ModuleTile>,
    /// Per-module validation results
    pub validation: ValidationSummary,
    /// Keyboard shortcuts and focus order
    pub keyboard_navigation: KeyboardNavigation,
    /// Banners shown on top of the dashboard
    pub notifications: Vec<Notification>,
    /// Recommendations derived from validation
    pub self_healing: SelfHealing,
}

/// Header section.
#[derive(Debug, Clone, Serialize)]
pub struct Header {
    /// Window title
    pub title: String,
    /// Line under the title
    pub subtitle: String,
    /// Render time
    pub clock: Clock,
}

/// Render time in the configured IANA zone.
#[derive(Debug, Clone, Serialize)]
pub struct Clock {
    /// IANA zone name the clock is shown in
    pub timezone: String,
    /// RFC 3339, second precision
    pub iso: String,
    /// `DD.MM.YYYY HH:MM`
    pub readable: String,
}

/// Status section.
#[derive(Debug, Clone, Serialize)]
pub struct Status {
    /// Render time, RFC 3339
    pub timestamp: String,
    /// Autosave settings
    pub autosave: AutosaveStatus,
    /// Sorted, unique storage directories of all tiles
    pub storage_directories: Vec<PathBuf>,
    /// Number of rendered tiles
    pub module_count: usize,
}

/// Autosave settings as shown in the status section.
#[derive(Debug, Clone, Serialize)]
pub struct AutosaveStatus {
    /// Timer period in minutes
    pub interval_minutes: u32,
    /// Enabled triggers
    pub triggers: Vec<AutosaveTrigger>,
    /// Human-readable hint about the next timer run
    pub next_run_hint: String,
}

/// Layout section.
#[derive(Debug, Clone, Serialize)]
pub struct LayoutSection {
    /// Grid and breakpoint CSS custom properties
    pub css_variables: BTreeMap<String, String>,
    /// Breakpoint table
    pub responsive_profile: ResponsiveProfile,
    /// Breakpoint for the viewport width, when one was given
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active_breakpoint: Option<ResponsiveBreakpoint>,
    /// Sidebar navigation
    pub sidebar: Sidebar,
}

/// Sidebar navigation.
#[derive(Debug, Clone, Serialize)]
pub struct Sidebar {
    /// One entry per module
    pub items: Vec<SidebarItem>,
    /// Whether the sidebar can be collapsed
    pub collapsible: bool,
    /// Initial visibility
    pub initial_state: SidebarState,
    /// Accessible label
    pub aria_label: String,
    /// Usage hints
    pub tips: Vec<String>,
    /// Pixel width range for the viewport width, when one was given
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width_bounds: Option<SidebarBounds>,
}

/// One sidebar entry per module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SidebarItem {
    /// Module identifier
    pub identifier: String,
    /// Module display name
    pub label: String,
    /// Module description
    pub description: String,
    /// The module's focus shortcut
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shortcut: Option<String>,
}

/// Initial sidebar visibility.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct SidebarState {
    /// Collapsed on desktop
    pub collapsed: bool,
    /// Collapsed on small screens
    pub mobile_collapsed: bool,
}

/// Sidebar width range in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SidebarBounds {
    /// Minimum width
    pub min: u32,
    /// Maximum width
    pub max: u32,
}

/// Theme section.
#[derive(Debug, Clone, Serialize)]
pub struct ThemeReport {
    /// Active theme; the first catalog theme if the configured one is unknown
    pub active: String,
    /// Every catalog theme by name
    pub available: BTreeMap<String, ThemeEntry>,
}

/// One catalog theme with its contrast scores.
#[derive(Debug, Clone, Serialize)]
pub struct ThemeEntry {
    /// Role to hex color
    pub colors: Theme,
    /// Contrast ratio per text/background pair
    pub accessibility: AccessibilityReport,
    /// All pairs reach 4.5:1
    pub meets_wcag_aa: bool,
}

/// Validation section.
#[derive(Debug, Clone, Serialize)]
pub struct ValidationSummary {
    /// Result per module identifier
    pub modules: ModuleValidations,
    /// True if any module is invalid
    pub has_errors: bool,
    /// Errors across all modules
    pub error_count: usize,
    /// Warnings across all modules
    pub warning_count: usize,
}

/// Validation results keyed by module identifier, in render order.
///
/// Serializes as a JSON object whose keys keep that order.
#[derive(Debug, Clone, Default)]
pub struct ModuleValidations(Vec<(String, ValidationResult)>);

impl ModuleValidations {
    /// Result for one module.
    pub fn get(&self, identifier: &str) -> Option<&ValidationResult> {
        self.0
            .iter()
            .find(|(id, _)| id == identifier)
            .map(|(_, result)| result)
    }

    /// Module identifiers in render order.
    pub fn identifiers(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|(id, _)| id.as_str())
    }

    /// Results in render order.
    pub fn values(&self) -> impl Iterator<Item = &ValidationResult> {
        self.0.iter().map(|(_, result)| result)
    }

    /// Number of modules.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True when no module was rendered.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(String, ValidationResult)> for ModuleValidations {
    fn from_iter<I: IntoIterator<Item = (String, ValidationResult)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a ModuleValidations {
    type Item = &'a (String, ValidationResult);
    type IntoIter = std::slice::Iter<'a, (String, ValidationResult)>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl Serialize for ModuleValidations {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_map(self.0.iter().map(|(id, result)| (id, result)))
    }
}

/// Keyboard navigation section.
#[derive(Debug, Clone, Serialize)]
pub struct KeyboardNavigation {
    /// Dashboard-wide shortcuts
    pub global_shortcuts: BTreeMap<String, String>,
    /// Standard per-module shortcuts
    pub module_shortcuts: BTreeMap<String, String>,
    /// Module identifiers in tab order
    pub sidebar_focus_order: Vec<String>,
}

/// Kind of a notification banner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    /// Status information
    Info,
    /// Usage hint
    Tip,
}

impl NotificationKind {
    /// Serialized name.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Tip => "tip",
        }
    }
}

/// A notification banner.
#[derive(Debug, Clone, Serialize)]
pub struct Notification {
    /// Banner kind, serialized as `type`
    #[serde(rename = "type")]
    pub kind: NotificationKind,
    /// Banner text
    pub message: String,
}

/// Composes modules into a [`DashboardModel`].
pub struct DashboardShell {
    modules: Vec<Box<dyn DashboardModule>>,
    config: Arc<DashboardConfig>,
    layout: LayoutSpec,
    title: String,
    subtitle: String,
    active_theme: String,
    viewport_width: Option<u32>,
    timezone: Tz,
}

impl DashboardShell {
    /// Creates a shell; fails if two modules share an identifier.
    pub fn new(
        modules: Vec<Box<dyn DashboardModule>>,
        config: Arc<DashboardConfig>,
    ) -> Result<Self> {
        let mut seen: HashMap<&str, &str> = HashMap::new();
        for module in &modules {
            if let Some(first) = seen.insert(module.identifier(), module.display_name()) {
                return Err(DashboardError::DuplicateModuleIdentifier {
                    identifier: module.identifier().to_string(),
                    first: first.to_string(),
                    second: module.display_name().to_string(),
                });
            }
        }

        let active_theme = config.active_theme.clone();
        let timezone = clock_zone(&config.default_timezone);
        Ok(Self {
            modules,
            config,
            layout: LayoutSpec::default(),
            title: DEFAULT_TITLE.to_string(),
            subtitle: DEFAULT_SUBTITLE.to_string(),
            active_theme,
            viewport_width: None,
            timezone,
        })
    }

    /// Sets the header title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Sets the header subtitle.
    #[must_use]
    pub fn with_subtitle(mut self, subtitle: impl Into<String>) -> Self {
        self.subtitle = subtitle.into();
        self
    }

    /// Overrides the configured active theme.
    #[must_use]
    pub fn with_active_theme(mut self, theme: impl Into<String>) -> Self {
        self.active_theme = theme.into();
        self
    }

    /// Sets the viewport width used to pick a breakpoint and sidebar width.
    #[must_use]
    pub fn with_viewport_width(mut self, width: u32) -> Self {
        self.viewport_width = Some(width);
        self
    }

    /// Replaces the grid layout.
    #[must_use]
    pub fn with_layout(mut self, layout: LayoutSpec) -> Self {
        self.layout = layout;
        self
    }

    /// Registered modules, in render order.
    pub fn modules(&self) -> &[Box<dyn DashboardModule>] {
        &self.modules
    }

    /// Runs every module's autosave hook.
    pub fn autosave_all(&mut self) -> Result<()> {
        for module in &mut self.modules {
            module.autosave()?;
        }
        Ok(())
    }

    /// Renders the dashboard at the current time.
    pub fn render(&self) -> Result<DashboardModel> {
        self.render_at(Utc::now())
    }

    /// Renders the dashboard with a fixed clock.
    ///
    /// `instant` is shown in the configured `default_timezone`.
    pub fn render_at(&self, instant: DateTime<Utc>) -> Result<DashboardModel> {
        let now = instant.with_timezone(&self.timezone).fixed_offset();
        let tiles = self
            .modules
            .iter()
            .map(|module| module.render_dashboard_tile())
            .collect::<Result<Vec<_>>>()?;

        let themes = self.theme_report();
        let sidebar = self.sidebar(&tiles);
        let validation = validation_summary(&tiles);
        let auto_checks = auto_checks(&tiles, &themes);
        let self_healing = healing::self_healing(&tiles, auto_checks);

        info!(
            modules = tiles.len(),
            errors = validation.error_count,
            warnings = validation.warning_count,
            "rendered dashboard"
        );

        Ok(DashboardModel {
            header: self.header(now),
            status: self.status(now, &tiles),
            layout: LayoutSection {
                css_variables: self.layout.to_css_with_breakpoints(&self.config.responsive),
                responsive_profile: self.config.responsive.clone(),
                active_breakpoint: self
                    .viewport_width
                    .map(|w| self.config.responsive.breakpoint_for_width(w).clone()),
                sidebar,
            },
            themes,
            keyboard_navigation: self.keyboard_navigation(&tiles),
            notifications: self.notifications(),
            validation,
            self_healing,
            modules: tiles,
        })
    }

    fn header(&self, now: DateTime<FixedOffset>) -> Header {
        Header {
            title: self.title.clone(),
            subtitle: self.subtitle.clone(),
            clock: Clock {
                timezone: self.timezone.name().to_string(),
                iso: now.to_rfc3339_opts(SecondsFormat::Secs, false),
                readable: now.format("%d.%m.%Y %H:%M").to_string(),
            },
        }
    }

    fn status(&self, now: DateTime<FixedOffset>, tiles: &[ModuleTile]) -> Status {
        let storage_directories: BTreeSet<PathBuf> =
            tiles.iter().map(|t| t.storage_directory.clone()).collect();
        Status {
            timestamp: now.to_rfc3339_opts(SecondsFormat::Secs, false),
            autosave: AutosaveStatus {
                interval_minutes: self.config.autosave.interval_minutes,
                triggers: self.config.autosave.triggers.clone(),
                next_run_hint: self.config.autosave.next_run_hint(),
            },
            storage_directories: storage_directories.into_iter().collect(),
            module_count: tiles.len(),
        }
    }

    fn sidebar(&self, tiles: &[ModuleTile]) -> Sidebar {
        let items = tiles
            .iter()
            .map(|tile| SidebarItem {
                identifier: tile.identifier.clone(),
                label: tile.display_name.clone(),
                description: tile.description.clone(),
                shortcut: tile.shortcuts.get("focus").cloned(),
            })
            .collect();

        Sidebar {
            items,
            collapsible: true,
            initial_state: SidebarState {
                collapsed: false,
                mobile_collapsed: true,
            },
            aria_label: "Module selection".to_string(),
            tips: vec![format!(
                "Press {TOGGLE_SIDEBAR_SHORTCUT} to open the sidebar."
            )],
            width_bounds: self.viewport_width.map(|w| {
                let (min, max) = self.layout.sidebar_bounds(w);
                SidebarBounds { min, max }
            }),
        }
    }

    fn theme_report(&self) -> ThemeReport {
        let available: BTreeMap<String, ThemeEntry> = self
            .config
            .themes
            .iter()
            .map(|(name, theme)| {
                let accessibility = accessibility_report(theme);
                (
                    name.to_string(),
                    ThemeEntry {
                        colors: theme.clone(),
                        meets_wcag_aa: meets_wcag_aa(&accessibility),
                        accessibility,
                    },
                )
            })
            .collect();

        let active = if available.contains_key(&self.active_theme) {
            self.active_theme.clone()
        } else {
            let fallback = available
                .keys()
                .next()
                .cloned()
                .unwrap_or_else(|| self.active_theme.clone());
            warn!(
                requested = %self.active_theme,
                fallback = %fallback,
                "active theme not in catalog"
            );
            fallback
        };

        ThemeReport { active, available }
    }

    fn keyboard_navigation(&self, tiles: &[ModuleTile]) -> KeyboardNavigation {
        let global_shortcuts = [
            ("toggle_sidebar", TOGGLE_SIDEBAR_SHORTCUT),
            ("open_help", OPEN_HELP_SHORTCUT),
        ]
        .into_iter()
        .map(|(action, keys)| (action.to_string(), keys.to_string()))
        .collect();

        KeyboardNavigation {
            global_shortcuts,
            module_shortcuts: self.config.standards.keyboard_shortcuts.clone(),
            sidebar_focus_order: tiles.iter().map(|t| t.identifier.clone()).collect(),
        }
    }

    fn notifications(&self) -> Vec<Notification> {
        let autosave = &self.config.autosave;
        let when: Vec<String> = autosave
            .triggers
            .iter()
            .map(|trigger| match trigger {
                AutosaveTrigger::FieldChange => "on field change".to_string(),
                AutosaveTrigger::Timer => format!("every {} minutes", autosave.interval_minutes),
                AutosaveTrigger::OnExit => "on exit".to_string(),
            })
            .collect();
        let autosave_message = if when.is_empty() {
            "Autosave is disabled; save manually before closing.".to_string()
        } else {
            format!("Autosave active: saves {}.", when.join(", "))
        };

        vec![
            Notification {
                kind: NotificationKind::Info,
                message: autosave_message,
            },
            Notification {
                kind: NotificationKind::Tip,
                message: "Use the sidebar to show or hide modules. Colors can be switched \
                          under 'Themes'."
                    .to_string(),
            },
        ]
    }
}

/// Parses an IANA zone name, falling back to UTC.
fn clock_zone(name: &str) -> Tz {
    name.trim().parse::<Tz>().unwrap_or_else(|e| {
        warn!(timezone = name, error = %e, "unknown timezone, clock shows UTC");
        Tz::UTC
    })
}

fn validation_summary(tiles: &[ModuleTile]) -> ValidationSummary {
    let modules: ModuleValidations = tiles
        .iter()
        .map(|t| (t.identifier.clone(), t.validation.clone()))
        .collect();
    let has_errors = modules.values().any(|r| !r.is_valid());
    let error_count = modules.values().map(|r| r.errors().len()).sum();
    let warning_count = modules.values().map(|r| r.warnings().len()).sum();
    debug!(has_errors, error_count, warning_count, "validation summary");

    ValidationSummary {
        modules,
        has_errors,
        error_count,
        warning_count,
    }
}

fn auto_checks(tiles: &[ModuleTile], themes: &ThemeReport) -> Vec<String> {
    let healed: usize = tiles.iter().map(|t| t.healed.len()).sum();
    let passing = themes.available.values().filter(|t| t.meets_wcag_aa).count();
    vec![
        format!(
            "Storage check: {} of {} modules have a storage directory.",
            tiles
                .iter()
                .filter(|t| !t.storage_directory.as_os_str().is_empty())
                .count(),
            tiles.len()
        ),
        format!(
            "Theme check: {passing} of {} themes meet WCAG AA text contrast.",
            themes.available.len()
        ),
        format!("Healing check: {healed} payload fields were replaced by defaults."),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::{ModuleContext, RawPayload};
    use chrono::TimeZone;
    use serde_json::{json, Value};

    struct Stub {
        id: &'static str,
        name: &'static str,
        payload: Value,
        context: ModuleContext,
    }

    impl DashboardModule for Stub {
        fn identifier(&self) -> &str {
            self.id
        }

        fn display_name(&self) -> &str {
            self.name
        }

        fn context(&self) -> &ModuleContext {
            &self.context
        }

        fn render(&self) -> Result<RawPayload> {
            Ok(self.payload.as_object().cloned().unwrap_or_default())
        }
    }

    fn stub(
        config: &Arc<DashboardConfig>,
        id: &'static str,
        name: &'static str,
        payload: Value,
    ) -> Box<dyn DashboardModule> {
        Box::new(Stub {
            id,
            name,
            payload,
            context: ModuleContext::from_shared(Arc::clone(config)),
        })
    }

    fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 8, 5, 0).unwrap()
    }

    fn complete() -> Value {
        json!({
            "component": "stub",
            "title": "Stub",
            "theme": "aurora",
            "keyboard_shortcuts": {"focus": "F3"},
        })
    }

    #[test]
    fn test_duplicate_identifiers_rejected() {
        let config = Arc::new(DashboardConfig::new());
        let result = DashboardShell::new(
            vec![
                stub(&config, "notes", "Notes", complete()),
                stub(&config, "notes", "Scratchpad", complete()),
            ],
            config,
        );
        match result {
            Err(DashboardError::DuplicateModuleIdentifier {
                identifier,
                first,
                second,
            }) => {
                assert_eq!(identifier, "notes");
                assert_eq!(first, "Notes");
                assert_eq!(second, "Scratchpad");
            }
            _ => panic!("expected duplicate identifier error"),
        }
    }

    #[test]
    fn test_render_sections() {
        let config = Arc::new(DashboardConfig::new());
        let shell = DashboardShell::new(
            vec![
                stub(&config, "a", "Alpha", complete()),
                stub(&config, "b", "Beta", json!({})),
            ],
            Arc::clone(&config),
        )
        .unwrap()
        .with_title("Ops")
        .with_viewport_width(800);

        let model = shell.render_at(fixed_now()).unwrap();

        assert_eq!(model.header.title, "Ops");
        assert_eq!(model.header.clock.timezone, "Europe/Berlin");
        assert_eq!(model.header.clock.iso, "2024-03-01T09:05:00+01:00");
        assert_eq!(model.header.clock.readable, "01.03.2024 09:05");
        assert_eq!(model.status.module_count, 2);
        assert_eq!(model.layout.active_breakpoint.as_ref().unwrap().name, "tablet");
        assert_eq!(
            model.layout.sidebar.width_bounds,
            Some(SidebarBounds { min: 240, max: 360 })
        );

        let items = &model.layout.sidebar.items;
        assert_eq!(items[0].shortcut.as_deref(), Some("F3"));
        assert_eq!(items[1].shortcut.as_deref(), Some("CTRL+ALT+F"));
        assert_eq!(model.keyboard_navigation.sidebar_focus_order, vec!["a", "b"]);
        assert_eq!(model.keyboard_navigation.global_shortcuts["open_help"], "F1");

        assert!(model.validation.has_errors);
        assert_eq!(model.validation.error_count, 2);
        assert!(model.validation.modules.get("a").unwrap().is_valid());
        assert!(model.self_healing.recommended_actions.as_slice()[0].contains("'Beta'"));
    }

    #[test]
    fn test_validation_keeps_render_order() {
        let config = Arc::new(DashboardConfig::new());
        let shell = DashboardShell::new(
            vec![
                stub(&config, "zeta", "Zeta", complete()),
                stub(&config, "alpha", "Alpha", json!({})),
            ],
            Arc::clone(&config),
        )
        .unwrap();

        let model = shell.render_at(fixed_now()).unwrap();
        let ids: Vec<&str> = model.validation.modules.identifiers().collect();
        assert_eq!(ids, ["zeta", "alpha"]);
        assert!(model.validation.modules.get("missing").is_none());

        let json = serde_json::to_string(&model.validation).unwrap();
        let zeta = json.find("\"zeta\"").unwrap();
        let alpha = json.find("\"alpha\"").unwrap();
        assert!(zeta < alpha, "{json}");
    }

    #[test]
    fn test_aggregates_identical_solutions() {
        let config = Arc::new(DashboardConfig::new());
        let no_theme = json!({"component": "c", "title": "t", "keyboard_shortcuts": {}});
        let shell = DashboardShell::new(
            vec![
                stub(&config, "one", "One", no_theme.clone()),
                stub(&config, "two", "Two", no_theme),
            ],
            Arc::clone(&config),
        )
        .unwrap();

        let model = shell.render_at(fixed_now()).unwrap();
        assert!(!model.validation.has_errors);
        assert_eq!(model.self_healing.solutions.len(), 1);
        assert_eq!(model.self_healing.solutions[0].count, 2);
        assert_eq!(
            model.self_healing.recommended_actions.as_slice(),
            [healing::ALL_CLEAR]
        );
    }

    #[test]
    fn test_unknown_active_theme_falls_back_to_first() {
        let config = Arc::new(DashboardConfig::new());
        let shell = DashboardShell::new(Vec::new(), Arc::clone(&config))
            .unwrap()
            .with_active_theme("neon");
        let model = shell.render_at(fixed_now()).unwrap();
        assert_eq!(model.themes.active, "aurora");
        assert_eq!(model.themes.available.len(), 4);
        assert!(model.themes.available.values().all(|t| t.meets_wcag_aa));
        assert_eq!(model.themes.available["forest"].accessibility.len(), 3);
    }

    #[test]
    fn test_incomplete_theme_fails_wcag_aa() {
        let mut config = DashboardConfig::new();
        config.themes = crate::theme::ThemeCatalog::new([(
            "half".to_string(),
            Theme::new()
                .with_color(crate::theme::ColorRole::Background, "#ffffff")
                .with_color(crate::theme::ColorRole::TextPrimary, "#000000"),
        )])
        .unwrap();
        let shell = DashboardShell::new(Vec::new(), Arc::new(config)).unwrap();

        let model = shell.render_at(fixed_now()).unwrap();
        let half = &model.themes.available["half"];
        assert_eq!(half.accessibility.len(), 1);
        assert!(!half.meets_wcag_aa);
    }

    #[test]
    fn test_clock_uses_configured_timezone() {
        let summer = Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap();
        let clock_in = |zone: &str| {
            let mut config = DashboardConfig::new();
            config.default_timezone = zone.to_string();
            let shell = DashboardShell::new(Vec::new(), Arc::new(config)).unwrap();
            shell.render_at(summer).unwrap().header.clock
        };

        let berlin = clock_in("Europe/Berlin");
        assert_eq!(berlin.iso, "2024-06-15T14:00:00+02:00");
        assert_eq!(berlin.readable, "15.06.2024 14:00");

        let new_york = clock_in("America/New_York");
        assert_eq!(new_york.timezone, "America/New_York");
        assert_eq!(new_york.iso, "2024-06-15T08:00:00-04:00");

        let unknown = clock_in("Mars/Olympus");
        assert_eq!(unknown.timezone, "UTC");
        assert_eq!(unknown.iso, "2024-06-15T12:00:00+00:00");
    }

    #[test]
    fn test_model_serializes_sections() {
        let config = Arc::new(DashboardConfig::new());
        let shell =
            DashboardShell::new(vec![stub(&config, "a", "Alpha", complete())], config).unwrap();
        let value = serde_json::to_value(shell.render_at(fixed_now()).unwrap()).unwrap();
        for section in [
            "header",
            "status",
            "layout",
            "themes",
            "modules",
            "validation",
            "keyboard_navigation",
            "notifications",
            "self_healing",
        ] {
            assert!(value.get(section).is_some(), "missing section {section}");
        }
        assert_eq!(value["notifications"][0]["type"], "info");
        assert!(value["layout"].get("active_breakpoint").is_none());
        assert_eq!(value["status"]["autosave"]["triggers"][0], "field_change");
    }
}
