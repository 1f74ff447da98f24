//! Named color palettes.
//!
//! A [`Theme`] maps semantic color roles to hex colors. Themes are stored
//! loosely (roles may be missing) so that incomplete palettes coming from
//! module payloads or config files can be inspected instead of rejected.

use crate::error::{DashboardError, Result};
use crate::theme::contrast::HexColor;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Semantic color role inside a theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorRole {
    /// Page background
    Background,
    /// Panels and tiles
    Surface,
    /// Primary brand color
    Primary,
    /// Secondary brand color
    Secondary,
    /// Highlights and focus rings
    Accent,
    /// Body text
    TextPrimary,
    /// Labels and less important text
    TextSecondary,
}

impl ColorRole {
    /// Every role a complete theme defines.
    pub const ALL: [Self; 7] = [
        Self::Background,
        Self::Surface,
        Self::Primary,
        Self::Secondary,
        Self::Accent,
        Self::TextPrimary,
        Self::TextSecondary,
    ];

    /// Key used for this role in theme mappings.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Background => "background",
            Self::Surface => "surface",
            Self::Primary => "primary",
            Self::Secondary => "secondary",
            Self::Accent => "accent",
            Self::TextPrimary => "text_primary",
            Self::TextSecondary => "text_secondary",
        }
    }
}

impl fmt::Display for ColorRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A palette of role name to hex color.
///
/// Unknown keys are kept as-is so payload themes round-trip untouched.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Theme {
    colors: BTreeMap<String, String>,
}

impl Theme {
    /// Creates an empty theme.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a theme from raw role/color pairs.
    pub fn from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            colors: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Returns the theme with `role` set to `color`.
    pub fn with_color(mut self, role: ColorRole, color: impl Into<String>) -> Self {
        self.colors.insert(role.as_str().to_string(), color.into());
        self
    }

    /// Color assigned to a role, if any.
    pub fn color(&self, role: ColorRole) -> Option<&str> {
        self.colors.get(role.as_str()).map(String::as_str)
    }

    /// Roles without a color, sorted by role name.
    pub fn missing_roles(&self) -> Vec<ColorRole> {
        let mut missing: Vec<ColorRole> = ColorRole::ALL
            .into_iter()
            .filter(|role| !self.colors.contains_key(role.as_str()))
            .collect();
        missing.sort_by_key(ColorRole::as_str);
        missing
    }

    /// Roles whose value is present but not a valid hex color, sorted by name.
    pub fn malformed_roles(&self) -> Vec<ColorRole> {
        let mut malformed: Vec<ColorRole> = ColorRole::ALL
            .into_iter()
            .filter(|role| {
                self.color(*role)
                    .is_some_and(|color| HexColor::from_hex(color).is_err())
            })
            .collect();
        malformed.sort_by_key(ColorRole::as_str);
        malformed
    }

    /// True when all seven roles are present.
    pub fn is_complete(&self) -> bool {
        ColorRole::ALL
            .iter()
            .all(|role| self.colors.contains_key(role.as_str()))
    }

    /// Iterates over raw `(key, color)` entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.colors.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Converts the theme into a JSON object for payload embedding.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::Value::Object(
            self.colors
                .iter()
                .map(|(k, v)| (k.clone(), serde_json::Value::String(v.clone())))
                .collect(),
        )
    }
}

/// Immutable mapping of theme name to palette.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ThemeCatalog {
    themes: BTreeMap<String, Theme>,
}

impl ThemeCatalog {
    /// Creates a catalog; at least one theme is required.
    pub fn new(themes: impl IntoIterator<Item = (String, Theme)>) -> Result<Self> {
        let themes: BTreeMap<String, Theme> = themes.into_iter().collect();
        if themes.is_empty() {
            return Err(DashboardError::EmptyThemeCatalog);
        }
        Ok(Self { themes })
    }

    /// The four bundled high-contrast presets.
    pub fn presets() -> Self {
        let preset = |colors: [&str; 7]| {
            ColorRole::ALL
                .into_iter()
                .zip(colors)
                .fold(Theme::new(), |theme, (role, color)| {
                    theme.with_color(role, color)
                })
        };

        let themes = [
            (
                "aurora",
                preset([
                    "#0b132b", "#1c2541", "#5bc0be", "#9fb4c7", "#f5a623", "#f7f9fb", "#d2e0f2",
                ]),
            ),
            (
                "sunrise",
                preset([
                    "#fff5f0", "#ffd9c2", "#ff7b54", "#ffa26b", "#2b59c3", "#2a1a1f", "#4f3d47",
                ]),
            ),
            (
                "forest",
                preset([
                    "#0f3d3e", "#155e63", "#76c893", "#f2f7f5", "#ffb703", "#f1faee", "#a8dadc",
                ]),
            ),
            (
                "monochrome",
                preset([
                    "#111111", "#1f1f1f", "#4a90e2", "#50e3c2", "#f8e71c", "#f5f5f5", "#cfcfcf",
                ]),
            ),
        ];

        Self {
            themes: themes
                .into_iter()
                .map(|(name, theme)| (name.to_string(), theme))
                .collect(),
        }
    }

    /// Looks up a theme by name.
    ///
    /// # Examples
    ///
    /// ```
    /// use dashboardtool::theme::{ColorRole, ThemeCatalog};
    ///
    /// let catalog = ThemeCatalog::presets();
    /// let aurora = catalog.get("aurora").unwrap();
    /// assert_eq!(aurora.color(ColorRole::Background), Some("#0b132b"));
    /// assert!(catalog.get("neon").is_err());
    /// ```
    pub fn get(&self, name: &str) -> Result<&Theme> {
        self.themes
            .get(name)
            .ok_or_else(|| DashboardError::UnknownTheme {
                name: name.to_string(),
                available: self.names().into_iter().map(String::from).collect(),
            })
    }

    /// True when a theme with this name exists.
    pub fn contains(&self, name: &str) -> bool {
        self.themes.contains_key(name)
    }

    /// Sorted theme names.
    pub fn names(&self) -> Vec<&str> {
        self.themes.keys().map(String::as_str).collect()
    }

    /// First theme in name order; `None` only for a catalog deserialized empty.
    pub fn first(&self) -> Option<(&str, &Theme)> {
        self.themes.iter().next().map(|(k, v)| (k.as_str(), v))
    }

    /// Iterates over `(name, theme)` in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Theme)> {
        self.themes.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of themes.
    pub fn len(&self) -> usize {
        self.themes.len()
    }

    /// True for a catalog without themes (only reachable through deserialization).
    pub fn is_empty(&self) -> bool {
        self.themes.is_empty()
    }
}

impl Default for ThemeCatalog {
    fn default() -> Self {
        Self::presets()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets_contain_four_complete_themes() {
        let catalog = ThemeCatalog::presets();
        assert_eq!(catalog.names(), vec!["aurora", "forest", "monochrome", "sunrise"]);
        for (name, theme) in catalog.iter() {
            assert!(theme.is_complete(), "theme {name} is incomplete");
            assert!(theme.malformed_roles().is_empty(), "theme {name}");
        }
    }

    #[test]
    fn test_get_aurora_background() {
        let catalog = ThemeCatalog::presets();
        let theme = catalog.get("aurora").unwrap();
        assert_eq!(theme.color(ColorRole::Background), Some("#0b132b"));
        assert_eq!(theme.color(ColorRole::TextPrimary), Some("#f7f9fb"));
    }

    #[test]
    fn test_get_unknown_lists_sorted_names() {
        let catalog = ThemeCatalog::presets();
        let err = catalog.get("doesnotexist").unwrap_err();
        match &err {
            DashboardError::UnknownTheme { name, available } => {
                assert_eq!(name, "doesnotexist");
                assert_eq!(available, &["aurora", "forest", "monochrome", "sunrise"]);
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(err
            .to_string()
            .contains("aurora, forest, monochrome, sunrise"));
    }

    #[test]
    fn test_empty_catalog_rejected() {
        assert!(matches!(
            ThemeCatalog::new(Vec::new()),
            Err(DashboardError::EmptyThemeCatalog)
        ));
    }

    #[test]
    fn test_missing_roles_sorted_by_name() {
        let theme = Theme::new()
            .with_color(ColorRole::Background, "#000000")
            .with_color(ColorRole::Primary, "#ffffff");
        let missing: Vec<&str> = theme.missing_roles().iter().map(ColorRole::as_str).collect();
        assert_eq!(
            missing,
            vec!["accent", "secondary", "surface", "text_primary", "text_secondary"]
        );
        assert!(!theme.is_complete());
    }

    #[test]
    fn test_theme_round_trips_through_json_as_flat_mapping() {
        let theme = Theme::from_pairs([("background", "#000000"), ("custom", "#123456")]);
        let json = theme.to_json();
        assert_eq!(json["custom"], "#123456");
        let back: Theme = serde_json::from_value(json).unwrap();
        assert_eq!(back, theme);
    }
}
