//! Grid layout and responsive breakpoints.
//!
//! [`LayoutSpec`] describes the dashboard grid (columns, gutter, sidebar
//! share, header/footer heights). [`ResponsiveProfile`] holds the breakpoint
//! table frontends use to pick a column count for a viewport width.

use crate::error::{DashboardError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One responsive breakpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponsiveBreakpoint {
    /// Breakpoint name (e.g., "tablet")
    pub name: String,
    /// Smallest viewport width (px) this breakpoint applies to
    pub min_width: u32,
    /// Grid columns available at this width
    pub columns: u32,
    /// Upper bound for a single module's width (px)
    pub max_module_width: u32,
}

impl ResponsiveBreakpoint {
    /// Creates a new breakpoint.
    pub fn new(name: impl Into<String>, min_width: u32, columns: u32, max_module_width: u32) -> Self {
        Self {
            name: name.into(),
            min_width,
            columns,
            max_module_width,
        }
    }
}

/// Breakpoint table, kept sorted ascending by `min_width`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<ResponsiveBreakpoint>", into = "Vec<ResponsiveBreakpoint>")]
pub struct ResponsiveProfile {
    breakpoints: Vec<ResponsiveBreakpoint>,
}

impl ResponsiveProfile {
    /// Creates a profile from breakpoints in any order.
    ///
    /// Fails when the table is empty.
    pub fn new(mut breakpoints: Vec<ResponsiveBreakpoint>) -> Result<Self> {
        if breakpoints.is_empty() {
            return Err(DashboardError::InvalidConfig(
                "responsive profile needs at least one breakpoint".to_string(),
            ));
        }
        breakpoints.sort_by_key(|bp| bp.min_width);
        Ok(Self { breakpoints })
    }

    /// Breakpoints in ascending `min_width` order.
    pub fn breakpoints(&self) -> &[ResponsiveBreakpoint] {
        &self.breakpoints
    }

    /// Active breakpoint for a viewport width.
    ///
    /// Picks the last breakpoint whose `min_width <= width`; widths below every
    /// threshold get the smallest breakpoint.
    ///
    /// # Examples
    ///
    /// ```
    /// use dashboardtool::layout::ResponsiveProfile;
    ///
    /// let profile = ResponsiveProfile::default();
    /// assert_eq!(profile.breakpoint_for_width(800).name, "tablet");
    /// assert_eq!(profile.breakpoint_for_width(0).name, "mobile");
    /// ```
    pub fn breakpoint_for_width(&self, width: u32) -> &ResponsiveBreakpoint {
        let mut active = &self.breakpoints[0];
        for breakpoint in &self.breakpoints {
            if breakpoint.min_width <= width {
                active = breakpoint;
            }
        }
        active
    }
}

impl Default for ResponsiveProfile {
    fn default() -> Self {
        Self {
            breakpoints: vec![
                ResponsiveBreakpoint::new("mobile", 0, 4, 480),
                ResponsiveBreakpoint::new("tablet", 768, 8, 720),
                ResponsiveBreakpoint::new("desktop", 1200, 12, 960),
                ResponsiveBreakpoint::new("wide", 1600, 12, 1280),
            ],
        }
    }
}

impl TryFrom<Vec<ResponsiveBreakpoint>> for ResponsiveProfile {
    type Error = DashboardError;

    fn try_from(breakpoints: Vec<ResponsiveBreakpoint>) -> Result<Self> {
        Self::new(breakpoints)
    }
}

impl From<ResponsiveProfile> for Vec<ResponsiveBreakpoint> {
    fn from(profile: ResponsiveProfile) -> Self {
        profile.breakpoints
    }
}

/// Grid and region sizing for the dashboard window.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LayoutSpec {
    /// Grid columns
    pub columns: u32,
    /// Gap between grid cells (px)
    pub gutter: u32,
    /// Sidebar share of the total width
    pub sidebar_width_ratio: f64,
    /// Header height (px)
    pub header_height: u32,
    /// Footer height (px)
    pub footer_height: u32,
}

impl Default for LayoutSpec {
    fn default() -> Self {
        Self {
            columns: 12,
            gutter: 16,
            sidebar_width_ratio: 0.22,
            header_height: 72,
            footer_height: 48,
        }
    }
}

impl LayoutSpec {
    /// Sidebar pixel width range `(min, max)` for a window width.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn sidebar_bounds(&self, total_width: u32) -> (u32, u32) {
        let width = (f64::from(total_width) * self.sidebar_width_ratio).floor() as u32;
        (width.max(240), (width + 120).max(360))
    }

    /// CSS custom properties for the base grid.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn to_css_variables(&self) -> BTreeMap<String, String> {
        let mut vars = BTreeMap::new();
        vars.insert("--grid-columns".to_string(), self.columns.to_string());
        vars.insert("--grid-gutter".to_string(), format!("{}px", self.gutter));
        vars.insert(
            "--sidebar-width".to_string(),
            format!("{}vw", (self.sidebar_width_ratio * 100.0).round() as u32),
        );
        vars.insert(
            "--header-height".to_string(),
            format!("{}px", self.header_height),
        );
        vars.insert(
            "--footer-height".to_string(),
            format!("{}px", self.footer_height),
        );
        vars
    }

    /// Base grid variables plus `--bp-<name>-*` entries for every breakpoint.
    pub fn to_css_with_breakpoints(&self, profile: &ResponsiveProfile) -> BTreeMap<String, String> {
        let mut vars = self.to_css_variables();
        for bp in profile.breakpoints() {
            let prefix = format!("--bp-{}", bp.name);
            vars.insert(format!("{prefix}-min-width"), format!("{}px", bp.min_width));
            vars.insert(format!("{prefix}-columns"), bp.columns.to_string());
            vars.insert(
                format!("{prefix}-max-module-width"),
                format!("{}px", bp.max_module_width),
            );
        }
        vars
    }
}
