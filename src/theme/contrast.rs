//! WCAG contrast computation for theme colors.
//!
//! Colors are decoded from `#RRGGBB` strings, converted to linear light with
//! the sRGB transfer curve and compared with the WCAG 2.x contrast formula.
//! See <https://www.w3.org/TR/WCAG20/#contrast-ratiodef>.

use crate::error::{DashboardError, Result};
use crate::theme::catalog::{ColorRole, Theme};
use std::collections::BTreeMap;
use tracing::warn;

/// Minimum contrast ratio for normal-size text (WCAG 2.x level AA).
pub const WCAG_AA_NORMAL_TEXT: f64 = 4.5;

/// Foreground/background role pairs scored in every accessibility report.
pub const CONTRAST_PAIRS: [(ColorRole, ColorRole); 3] = [
    (ColorRole::TextPrimary, ColorRole::Background),
    (ColorRole::TextPrimary, ColorRole::Surface),
    (ColorRole::TextSecondary, ColorRole::Background),
];

/// Contrast ratios keyed by `"<fg>_vs_<bg>"`.
pub type AccessibilityReport = BTreeMap<String, f64>;

/// An sRGB color decoded from a hex string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HexColor {
    /// Red channel (0-255)
    pub r: u8,
    /// Green channel (0-255)
    pub g: u8,
    /// Blue channel (0-255)
    pub b: u8,
}

impl HexColor {
    /// Parses a color from `RRGGBB` or `#RRGGBB` (case-insensitive).
    ///
    /// # Examples
    ///
    /// ```
    /// use dashboardtool::theme::HexColor;
    ///
    /// let color = HexColor::from_hex("#0b132b").unwrap();
    /// assert_eq!((color.r, color.g, color.b), (0x0b, 0x13, 0x2b));
    /// assert!(HexColor::from_hex("#fff").is_err());
    /// ```
    pub fn from_hex(color: &str) -> Result<Self> {
        let trimmed = color.trim();
        let hex = trimmed.strip_prefix('#').unwrap_or(trimmed);

        if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(DashboardError::InvalidColorFormat {
                color: color.to_string(),
            });
        }

        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&hex[range], 16).map_err(|_| DashboardError::InvalidColorFormat {
                color: color.to_string(),
            })
        };

        Ok(Self {
            r: channel(0..2)?,
            g: channel(2..4)?,
            b: channel(4..6)?,
        })
    }

    /// Channels scaled to `[0, 1]`.
    pub fn normalized(&self) -> [f64; 3] {
        [
            f64::from(self.r) / 255.0,
            f64::from(self.g) / 255.0,
            f64::from(self.b) / 255.0,
        ]
    }

    /// WCAG relative luminance of this color.
    pub fn relative_luminance(&self) -> f64 {
        let [r, g, b] = self.normalized().map(linearize);
        0.2126 * r + 0.7152 * g + 0.0722 * b
    }
}

/// sRGB transfer curve, inverted.
fn linearize(c: f64) -> f64 {
    if c <= 0.039_28 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

/// Relative luminance of a hex color string.
pub fn relative_luminance(color: &str) -> Result<f64> {
    Ok(HexColor::from_hex(color)?.relative_luminance())
}

/// Contrast ratio between two hex colors, always `>= 1.0`.
///
/// The result does not depend on argument order.
pub fn contrast_ratio(color_a: &str, color_b: &str) -> Result<f64> {
    let la = relative_luminance(color_a)?;
    let lb = relative_luminance(color_b)?;
    let (lighter, darker) = if la >= lb { (la, lb) } else { (lb, la) };
    Ok((lighter + 0.05) / (darker + 0.05))
}

/// Scores the fixed text/background pairs of a theme.
///
/// A pair is left out when either role is missing from the theme or holds a
/// malformed color; the gap is what downstream checks report on.
pub fn accessibility_report(theme: &Theme) -> AccessibilityReport {
    let mut report = AccessibilityReport::new();

    for (fg, bg) in CONTRAST_PAIRS {
        let (Some(fg_color), Some(bg_color)) = (theme.color(fg), theme.color(bg)) else {
            continue;
        };
        match contrast_ratio(fg_color, bg_color) {
            Ok(ratio) => {
                report.insert(pair_label(fg, bg), ratio);
            }
            Err(e) => warn!(pair = %pair_label(fg, bg), error = %e, "skipping contrast pair"),
        }
    }

    report
}

/// True when every pair was scored and each reaches the AA threshold.
pub fn meets_wcag_aa(report: &AccessibilityReport) -> bool {
    report.len() == CONTRAST_PAIRS.len()
        && report.values().all(|ratio| *ratio >= WCAG_AA_NORMAL_TEXT)
}

fn pair_label(fg: ColorRole, bg: ColorRole) -> String {
    format!("{}_vs_{}", fg.as_str(), bg.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::catalog::ThemeCatalog;

    #[test]
    fn test_luminance_extremes() {
        assert!(relative_luminance("#000000").unwrap() < 0.001);
        assert!(relative_luminance("ffffff").unwrap() > 0.999);
    }

    #[test]
    fn test_black_white_ratio() {
        let ratio = contrast_ratio("#000000", "#FFFFFF").unwrap();
        assert!((ratio - 21.0).abs() < 0.01);
    }

    #[test]
    fn test_ratio_is_symmetric_and_reflexive() {
        let colors = ["#0b132b", "#f7f9fb", "#ff7b54", "#76c893", "4a90e2"];
        for a in colors {
            for b in colors {
                let ab = contrast_ratio(a, b).unwrap();
                let ba = contrast_ratio(b, a).unwrap();
                assert!((ab - ba).abs() < f64::EPSILON);
                assert!(ab >= 1.0);
            }
            assert!((contrast_ratio(a, a).unwrap() - 1.0).abs() < f64::EPSILON);
        }
    }

    #[test]
    fn test_invalid_colors_rejected() {
        for bad in ["#fff", "#1234567", "", "#gg0000", "#ééé"] {
            assert!(
                matches!(
                    relative_luminance(bad),
                    Err(DashboardError::InvalidColorFormat { .. })
                ),
                "{bad} should be rejected"
            );
        }
    }

    #[test]
    fn test_report_has_three_pairs_for_complete_theme() {
        let catalog = ThemeCatalog::presets();
        for (name, theme) in catalog.iter() {
            let report = accessibility_report(theme);
            assert_eq!(report.len(), 3, "theme {name}");
            assert!(report.values().all(|r| *r >= 1.0));
            assert!(report.contains_key("text_primary_vs_background"));
            assert!(report.contains_key("text_primary_vs_surface"));
            assert!(report.contains_key("text_secondary_vs_background"));
        }
    }

    #[test]
    fn test_report_omits_pairs_with_missing_roles() {
        let theme = Theme::new()
            .with_color(ColorRole::Background, "#ffffff")
            .with_color(ColorRole::TextPrimary, "#000000");
        let report = accessibility_report(&theme);
        assert_eq!(report.len(), 1);
        assert!(!meets_wcag_aa(&report));
    }

    #[test]
    fn test_report_omits_pairs_with_malformed_colors() {
        let theme = Theme::new()
            .with_color(ColorRole::Background, "#ffffff")
            .with_color(ColorRole::Surface, "#eeeeee")
            .with_color(ColorRole::TextPrimary, "black")
            .with_color(ColorRole::TextSecondary, "#333333");
        let report = accessibility_report(&theme);
        assert_eq!(
            report.keys().collect::<Vec<_>>(),
            vec!["text_secondary_vs_background"]
        );
    }

    #[test]
    fn test_presets_meet_aa() {
        let catalog = ThemeCatalog::presets();
        for (name, theme) in catalog.iter() {
            assert!(meets_wcag_aa(&accessibility_report(theme)), "theme {name}");
        }
    }
}
