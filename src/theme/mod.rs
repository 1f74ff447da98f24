//! Color themes and accessibility scoring.
//!
//! The catalog ships four presets tuned for high text contrast; the contrast
//! module scores any theme against the WCAG AA threshold.

pub mod catalog;
pub mod contrast;

pub use catalog::{ColorRole, Theme, ThemeCatalog};
pub use contrast::{
    accessibility_report, contrast_ratio, meets_wcag_aa, relative_luminance,
    AccessibilityReport, HexColor, WCAG_AA_NORMAL_TEXT,
};
