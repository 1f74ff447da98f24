//! Structural validation of module payloads.
//!
//! Every rule runs on every payload; nothing short-circuits. Each triggered
//! condition contributes a message (error or warning) and a remediation
//! ("solution") from a fixed catalog. All three lists are order-preserving
//! sets: blank entries are dropped, surrounding whitespace is trimmed and the
//! first occurrence of a message wins.

use crate::config::DashboardConfig;
use crate::modules::payload::{
    has_field, RawPayload, ShortcutsRef, ThemeRef, REQUIRED_FIELDS,
};
use crate::theme::{ColorRole, Theme};
use serde::{Serialize, Serializer};
use std::collections::HashSet;

/// Insertion-ordered set of trimmed, non-empty messages.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MessageSet {
    items: Vec<String>,
    seen: HashSet<String>,
}

impl MessageSet {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a message; returns false for blanks and duplicates.
    pub fn insert(&mut self, message: impl AsRef<str>) -> bool {
        let message = message.as_ref().trim();
        if message.is_empty() || self.seen.contains(message) {
            return false;
        }
        self.seen.insert(message.to_string());
        self.items.push(message.to_string());
        true
    }

    /// Messages in first-seen order.
    pub fn as_slice(&self) -> &[String] {
        &self.items
    }

    /// Number of distinct messages.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// True when no message was recorded.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Iterates in first-seen order.
    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.items.iter()
    }
}

impl<S: AsRef<str>> FromIterator<S> for MessageSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = Self::new();
        for message in iter {
            set.insert(message);
        }
        set
    }
}

impl Serialize for MessageSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(&self.items)
    }
}

/// Errors, warnings and remediation hints for one payload.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationResult {
    errors: MessageSet,
    warnings: MessageSet,
    solutions: MessageSet,
}

impl ValidationResult {
    /// Creates an empty (valid) result.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a result from raw lists, normalizing and deduplicating each.
    pub fn from_parts<E, W, S>(errors: E, warnings: W, solutions: S) -> Self
    where
        E: IntoIterator,
        E::Item: AsRef<str>,
        W: IntoIterator,
        W::Item: AsRef<str>,
        S: IntoIterator,
        S::Item: AsRef<str>,
    {
        Self {
            errors: errors.into_iter().collect(),
            warnings: warnings.into_iter().collect(),
            solutions: solutions.into_iter().collect(),
        }
    }

    /// True when no error was recorded (warnings are allowed).
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Records an error.
    pub fn add_error(&mut self, message: impl AsRef<str>) {
        self.errors.insert(message);
    }

    /// Records a warning.
    pub fn add_warning(&mut self, message: impl AsRef<str>) {
        self.warnings.insert(message);
    }

    /// Records a remediation hint.
    pub fn add_solution(&mut self, solution: impl AsRef<str>) {
        self.solutions.insert(solution);
    }

    /// Errors in first-seen order.
    pub fn errors(&self) -> &[String] {
        self.errors.as_slice()
    }

    /// Warnings in first-seen order.
    pub fn warnings(&self) -> &[String] {
        self.warnings.as_slice()
    }

    /// Solutions in first-seen order.
    pub fn solutions(&self) -> &[String] {
        self.solutions.as_slice()
    }

    /// One-line count summary, e.g. "1 error, 2 warnings".
    pub fn summary(&self) -> String {
        fn plural(count: usize, noun: &str) -> String {
            if count == 1 {
                format!("1 {noun}")
            } else {
                format!("{count} {noun}s")
            }
        }
        format!(
            "{}, {}",
            plural(self.errors.len(), "error"),
            plural(self.warnings.len(), "warning")
        )
    }
}

impl Serialize for ValidationResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        #[derive(Serialize)]
        struct View<'a> {
            is_valid: bool,
            errors: &'a MessageSet,
            warnings: &'a MessageSet,
            solutions: &'a MessageSet,
            summary: String,
        }

        View {
            is_valid: self.is_valid(),
            errors: &self.errors,
            warnings: &self.warnings,
            solutions: &self.solutions,
            summary: self.summary(),
        }
        .serialize(serializer)
    }
}

/// Remediation catalog, keyed by the condition that triggered it.
#[derive(Debug, Clone, Copy)]
enum Remedy<'a> {
    MissingField { field: &'a str, example: &'a str },
    ThemeMissing,
    ThemeIncomplete,
    ThemeUnknown,
    ThemeMalformed,
    ThemeColors,
    DefaultThemeMissing,
    ShortcutsMissing,
    ShortcutsMalformed,
}

/// Checks payloads against the structural rules of a module tile.
pub struct ValidationEngine<'a> {
    config: &'a DashboardConfig,
}

impl<'a> ValidationEngine<'a> {
    /// Creates an engine bound to a configuration.
    pub const fn new(config: &'a DashboardConfig) -> Self {
        Self { config }
    }

    /// Validates one payload.
    ///
    /// `identifier` and `display_name` only feed the examples in the
    /// remediation text.
    pub fn validate(
        &self,
        identifier: &str,
        display_name: &str,
        payload: &RawPayload,
    ) -> ValidationResult {
        let mut result = ValidationResult::new();
        self.check_required_fields(identifier, display_name, payload, &mut result);
        self.check_theme(payload, &mut result);
        self.check_shortcuts(payload, &mut result);
        result
    }

    /// Theme substituted for missing or unusable payload themes.
    ///
    /// Falls back to the first catalog theme (with a warning) when the
    /// configured default is not in the catalog.
    pub fn fallback_theme(&self, result: &mut ValidationResult) -> Theme {
        let catalog = &self.config.themes;
        if let Ok(theme) = catalog.get(&self.config.default_theme) {
            return theme.clone();
        }
        match catalog.first() {
            Some((name, theme)) => {
                result.add_warning(format!(
                    "Configured default theme '{}' not found; using '{}' instead.",
                    self.config.default_theme, name
                ));
                result.add_solution(self.remedy(Remedy::DefaultThemeMissing));
                theme.clone()
            }
            None => {
                result.add_error("No themes are configured; the tile is rendered without colors.");
                result.add_solution(self.remedy(Remedy::DefaultThemeMissing));
                Theme::new()
            }
        }
    }

    fn check_required_fields(
        &self,
        identifier: &str,
        display_name: &str,
        payload: &RawPayload,
        result: &mut ValidationResult,
    ) {
        for field in REQUIRED_FIELDS {
            if has_field(payload, field) {
                continue;
            }
            let example = if field == "title" { display_name } else { identifier };
            result.add_error(format!("Required field '{field}' missing."));
            result.add_solution(self.remedy(Remedy::MissingField { field, example }));
        }
    }

    fn check_theme(&self, payload: &RawPayload, result: &mut ValidationResult) {
        let default = self.default_theme_name();
        match ThemeRef::from_payload(payload) {
            ThemeRef::Absent => {
                result.add_warning(format!(
                    "Theme missing; the default theme '{default}' will be substituted."
                ));
                result.add_solution(self.remedy(Remedy::ThemeMissing));
            }
            ThemeRef::Named(name) => {
                if !self.config.themes.contains(&name) {
                    result.add_error(format!(
                        "Theme '{name}' is not a known preset; expected a mapping of color roles \
                         or one of: {}. Fell back to '{default}'.",
                        self.config.themes.names().join(", ")
                    ));
                    result.add_solution(self.remedy(Remedy::ThemeUnknown));
                }
            }
            ThemeRef::Inline(theme) => {
                let missing = theme.missing_roles();
                if !missing.is_empty() {
                    result.add_warning(format!(
                        "Theme is incomplete; missing roles: {}. The default theme '{default}' \
                         will be substituted.",
                        role_list(&missing)
                    ));
                    result.add_solution(self.remedy(Remedy::ThemeIncomplete));
                }
                let malformed = theme.malformed_roles();
                if !malformed.is_empty() {
                    result.add_warning(format!(
                        "Theme colors are not valid hex values for roles: {}.",
                        role_list(&malformed)
                    ));
                    result.add_solution(self.remedy(Remedy::ThemeColors));
                }
            }
            ThemeRef::Malformed(kind) => {
                result.add_error(format!(
                    "Theme must be a mapping of color roles or a preset name, got {kind}. \
                     Fell back to '{default}'."
                ));
                result.add_solution(self.remedy(Remedy::ThemeMalformed));
            }
        }
    }

    fn check_shortcuts(&self, payload: &RawPayload, result: &mut ValidationResult) {
        match ShortcutsRef::from_payload(payload) {
            ShortcutsRef::Mapping(_) => {}
            ShortcutsRef::Absent => {
                result.add_warning(
                    "Keyboard shortcuts missing; the module standard shortcuts will be substituted.",
                );
                result.add_solution(self.remedy(Remedy::ShortcutsMissing));
            }
            ShortcutsRef::Malformed(kind) => {
                result.add_error(format!(
                    "Keyboard shortcuts must be a mapping of action name to key combination, \
                     got {kind}. The module standard shortcuts were substituted."
                ));
                result.add_solution(self.remedy(Remedy::ShortcutsMalformed));
            }
        }
    }

    /// Name of the theme that substitution will actually use.
    fn default_theme_name(&self) -> &str {
        if self.config.themes.contains(&self.config.default_theme) {
            &self.config.default_theme
        } else {
            self.config
                .themes
                .first()
                .map_or(self.config.default_theme.as_str(), |(name, _)| name)
        }
    }

    /// Example shortcut for remediation text, preferring `focus`.
    fn example_shortcut(&self) -> (&str, &str) {
        let shortcuts = &self.config.standards.keyboard_shortcuts;
        shortcuts
            .get_key_value("focus")
            .or_else(|| shortcuts.iter().next())
            .map_or(("focus", "CTRL+ALT+F"), |(k, v)| (k.as_str(), v.as_str()))
    }

    fn remedy(&self, remedy: Remedy<'_>) -> String {
        let theme = self.default_theme_name();
        match remedy {
            Remedy::MissingField { field, example } => {
                format!("Return '{field}' from render(), e.g. \"{field}\": \"{example}\".")
            }
            Remedy::ThemeMissing => format!(
                "Look up a preset with ThemeCatalog::get(\"{theme}\") and return it under \
                 \"theme\", or set \"theme\": \"{theme}\"."
            ),
            Remedy::ThemeIncomplete => format!(
                "Define every color role ({}) or use a preset such as \"{theme}\".",
                role_list(&ColorRole::ALL)
            ),
            Remedy::ThemeUnknown => format!(
                "Use one of the available theme presets: {}.",
                self.config.themes.names().join(", ")
            ),
            Remedy::ThemeMalformed => format!(
                "Set \"theme\" to a mapping of color roles or to a preset name such as \"{theme}\"."
            ),
            Remedy::ThemeColors => {
                "Use 6-digit hex colors such as \"#0b132b\" for every theme role.".to_string()
            }
            Remedy::DefaultThemeMissing => format!(
                "Set default_theme in the configuration to one of: {}.",
                self.config.themes.names().join(", ")
            ),
            Remedy::ShortcutsMissing => {
                let (action, keys) = self.example_shortcut();
                format!(
                    "Return \"keyboard_shortcuts\" from render(), e.g. {{\"{action}\": \"{keys}\"}}."
                )
            }
            Remedy::ShortcutsMalformed => {
                let (action, keys) = self.example_shortcut();
                format!(
                    "Set \"keyboard_shortcuts\" to a mapping of action name to key combination, \
                     e.g. {{\"{action}\": \"{keys}\"}}."
                )
            }
        }
    }
}

fn role_list(roles: &[ColorRole]) -> String {
    roles
        .iter()
        .map(ColorRole::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}
