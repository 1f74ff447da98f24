//! JSON serialization of a dashboard model.

use crate::error::Result;
use crate::shell::DashboardModel;

/// Pretty-printed JSON with a trailing newline.
pub fn render_json(model: &DashboardModel) -> Result<String> {
    let mut json = serde_json::to_string_pretty(model)?;
    json.push('\n');
    Ok(json)
}
