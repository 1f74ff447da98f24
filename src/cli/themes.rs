//! Theme listing with accessibility scores.

use crate::cli::common::{print_json, CliContext, CliResult};
use crate::theme::{accessibility_report, meets_wcag_aa, WCAG_AA_NORMAL_TEXT};
use clap::Args;
use serde_json::{json, Map};

/// List configured themes and their contrast ratios
#[derive(Debug, Clone, Args)]
pub struct ThemesArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

impl ThemesArgs {
    /// Execute the themes command
    pub fn execute(&self, context: &CliContext) -> CliResult<()> {
        let config = context.load_config()?;

        if self.json {
            let themes: Map<String, serde_json::Value> = config
                .themes
                .iter()
                .map(|(name, theme)| {
                    let accessibility = accessibility_report(theme);
                    (
                        name.to_string(),
                        json!({
                            "colors": theme,
                            "meets_wcag_aa": meets_wcag_aa(&accessibility),
                            "accessibility": accessibility,
                        }),
                    )
                })
                .collect();
            return print_json(&json!({
                "default": config.default_theme,
                "active": config.active_theme,
                "themes": themes,
            }));
        }

        println!("Themes (WCAG AA minimum {WCAG_AA_NORMAL_TEXT}:1):");
        for (name, theme) in config.themes.iter() {
            let accessibility = accessibility_report(theme);
            let mark = if meets_wcag_aa(&accessibility) { "✓" } else { "✗" };
            let active = if name == config.active_theme { " (active)" } else { "" };
            println!("\n{mark} {name}{active}");
            for (pair, ratio) in accessibility {
                println!("    {pair:<32} {ratio:>5.2}:1");
            }
        }
        Ok(())
    }
}
