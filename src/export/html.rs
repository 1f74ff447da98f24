//! Self-contained HTML page for a dashboard model.

use crate::modules::tile::tile_theme;
use crate::modules::ModuleTile;
use crate::shell::{DashboardModel, Header, Notification, Sidebar, Status, ValidationSummary};
use crate::theme::{ColorRole, HexColor};
use html_escape::{encode_single_quoted_attribute, encode_style, encode_text};
use serde_json::Value;
use std::fmt::Write as _;

const STYLE: &str = r"
    body { font-family: 'Segoe UI', Arial, sans-serif; margin: 0; background: #f5f7fb; }
    .dt-header { background: #0d1b2a; color: white; padding: 2rem; }
    .dt-subtitle { margin: 0; opacity: 0.8; }
    .dt-layout { display: grid; grid-template-columns: 260px 1fr; min-height: 100vh; }
    .dt-sidebar { background: #1b263b; color: #fff; padding: 1.5rem; }
    .dt-sidebar ul { list-style: none; padding: 0; }
    .dt-sidebar button { width: 100%; margin-bottom: 0.5rem; padding: 0.75rem; border: none; border-radius: 0.5rem; background: #415a77; color: #fff; cursor: pointer; }
    .dt-content { padding: 2rem; display: grid; gap: 1.5rem; }
    .dt-status, .dt-notifications, .dt-validation { background: #fff; border-radius: 1rem; padding: 1.5rem; }
    .dt-modules { display: grid; gap: 1.5rem; grid-template-columns: repeat(auto-fit, minmax(260px, 1fr)); }
    .dt-module { background: #fff; border-radius: 1rem; padding: 1.5rem; }
    .dt-module-status { list-style: none; padding: 0; margin-top: 1rem; }
    @media (max-width: 900px) { .dt-layout { grid-template-columns: 1fr; } .dt-sidebar { grid-row: 2; } }";

/// Renders the model as one HTML document ending in a single newline.
pub fn render_html(model: &DashboardModel) -> String {
    let css_custom_props: String = model
        .layout
        .css_variables
        .iter()
        .map(|(name, value)| format!("{}: {};", encode_style(name), encode_style(value)))
        .collect();

    let mut output = String::new();
    output.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    output.push_str("  <meta charset=\"utf-8\" />\n");
    let _ = writeln!(output, "  <title>{}</title>", encode_text(&model.header.title));
    let _ = writeln!(output, "  <style>\n    :root {{ {css_custom_props} }}{STYLE}\n  </style>");
    output.push_str("</head>\n<body>\n");
    let _ = writeln!(output, "  {}", render_header(&model.header));
    output.push_str("  <div class=\"dt-layout\">\n");
    let _ = writeln!(output, "    {}", render_sidebar(&model.layout.sidebar));
    output.push_str("    <main class=\"dt-content\">\n");
    for section in [
        render_status(&model.status),
        render_notifications(&model.notifications),
        render_validation(&model.validation),
        render_modules(&model.modules),
    ] {
        if !section.is_empty() {
            let _ = writeln!(output, "      {section}");
        }
    }
    output.push_str("    </main>\n  </div>\n</body>\n</html>\n");

    let mut page: String = output
        .lines()
        .map(str::trim_end)
        .collect::<Vec<_>>()
        .join("\n");
    page.push('\n');
    page
}

fn render_header(header: &Header) -> String {
    format!(
        "<header class='dt-header'><h1>{}</h1><p class='dt-subtitle'>{}</p>\
         <div class='dt-clock'><time datetime='{}'>{}</time> ({})</div></header>",
        encode_text(&header.title),
        encode_text(&header.subtitle),
        encode_single_quoted_attribute(&header.clock.iso),
        encode_text(&header.clock.readable),
        encode_text(&header.clock.timezone),
    )
}

fn render_sidebar(sidebar: &Sidebar) -> String {
    let mut items = String::new();
    for item in &sidebar.items {
        let shortcut = item
            .shortcut
            .as_deref()
            .map(|s| format!(" title='{}'", encode_single_quoted_attribute(s)))
            .unwrap_or_default();
        let _ = write!(
            items,
            "<li><button data-module='{}'{shortcut}>{}</button></li>",
            encode_single_quoted_attribute(&item.identifier),
            encode_text(&item.label),
        );
    }
    format!(
        "<nav class='dt-sidebar' aria-label='{}'><h2>Modules</h2><ul>{items}</ul></nav>",
        encode_single_quoted_attribute(&sidebar.aria_label)
    )
}

fn render_status(status: &Status) -> String {
    let dirs: String = status
        .storage_directories
        .iter()
        .map(|path| format!("<li>{}</li>", encode_text(&path.display().to_string())))
        .collect();
    format!(
        "<section class='dt-status'><h2>Status</h2>\
         <p>Autosave interval: {} minutes</p>\
         <p>Next run: {}</p>\
         <ul class='dt-storage'>{dirs}</ul></section>",
        status.autosave.interval_minutes,
        encode_text(&status.autosave.next_run_hint),
    )
}

fn render_notifications(notifications: &[Notification]) -> String {
    if notifications.is_empty() {
        return String::new();
    }
    let items: String = notifications
        .iter()
        .map(|note| {
            format!(
                "<li class='dt-note-{}'>{}</li>",
                note.kind.as_str(),
                encode_text(&note.message)
            )
        })
        .collect();
    format!("<section class='dt-notifications'><h2>Notices</h2><ul>{items}</ul></section>")
}

fn render_validation(validation: &ValidationSummary) -> String {
    format!(
        "<section class='dt-validation'><h2>Checks</h2><p>Errors: {}, warnings: {}</p></section>",
        validation.error_count, validation.warning_count
    )
}

fn render_modules(tiles: &[ModuleTile]) -> String {
    let mut output = String::from("<section class='dt-modules'>");
    for tile in tiles {
        let status = match tile.payload.get("status") {
            Some(Value::Object(status)) => {
                let entries: String = status
                    .iter()
                    .map(|(key, value)| {
                        let value = match value {
                            Value::String(s) => s.clone(),
                            other => other.to_string(),
                        };
                        format!(
                            "<li><strong>{}:</strong> {}</li>",
                            encode_text(key),
                            encode_text(&value)
                        )
                    })
                    .collect();
                format!("<ul class='dt-module-status'>{entries}</ul>")
            }
            _ => String::new(),
        };
        let _ = write!(
            output,
            "<article class='dt-module' id='module-{}'{}><header><h3>{}</h3><p>{}</p></header>{status}</article>",
            encode_single_quoted_attribute(&tile.identifier),
            tile_style(tile),
            encode_text(&tile.display_name),
            encode_text(&tile.description),
        );
    }
    output.push_str("</section>");
    output
}

/// Inline style painting a tile with its resolved theme.
///
/// Roles whose value is not a valid hex color are left out.
fn tile_style(tile: &ModuleTile) -> String {
    let theme = tile_theme(tile);
    let declarations: String = [
        ("background: ", ColorRole::Surface),
        ("color: ", ColorRole::TextPrimary),
        ("border-top: 4px solid ", ColorRole::Accent),
    ]
    .into_iter()
    .filter_map(|(property, role)| {
        let color = HexColor::from_hex(theme.color(role)?).ok()?;
        Some(format!(
            "{property}#{:02x}{:02x}{:02x};",
            color.r, color.g, color.b
        ))
    })
    .collect();

    if declarations.is_empty() {
        String::new()
    } else {
        format!(" style='{declarations}'")
    }
}
