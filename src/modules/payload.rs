//! Raw module payloads and the tagged views the tile pipeline reads from them.

use crate::theme::Theme;
use serde_json::Value;
use std::collections::BTreeMap;

/// Untyped structure produced by [`DashboardModule::render`].
///
/// [`DashboardModule::render`]: crate::modules::DashboardModule::render
pub type RawPayload = serde_json::Map<String, Value>;

/// Payload key holding the frontend component id.
pub const COMPONENT_FIELD: &str = "component";
/// Payload key holding the tile title.
pub const TITLE_FIELD: &str = "title";
/// Payload key holding the theme (mapping or preset name).
pub const THEME_FIELD: &str = "theme";
/// Payload key holding the action-to-keys mapping.
pub const SHORTCUTS_FIELD: &str = "keyboard_shortcuts";

/// Fields every payload must carry.
pub const REQUIRED_FIELDS: [&str; 2] = [COMPONENT_FIELD, TITLE_FIELD];

/// How a payload refers to its theme.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ThemeRef {
    /// No theme given (key absent or `null`)
    Absent,
    /// A preset name to look up in the catalog
    Named(String),
    /// An inline palette, possibly incomplete
    Inline(Theme),
    /// Any other JSON value; carries the JSON type name
    Malformed(&'static str),
}

impl ThemeRef {
    /// Classifies the payload's `theme` entry.
    pub fn from_payload(payload: &RawPayload) -> Self {
        match payload.get(THEME_FIELD) {
            None | Some(Value::Null) => Self::Absent,
            Some(Value::String(name)) => Self::Named(name.clone()),
            // Non-string role values are dropped and show up as missing roles.
            Some(Value::Object(map)) => Self::Inline(Theme::from_pairs(
                map.iter()
                    .filter_map(|(k, v)| v.as_str().map(|s| (k.clone(), s.to_string()))),
            )),
            Some(other) => Self::Malformed(json_kind(other)),
        }
    }
}

/// How a payload supplies its keyboard shortcuts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShortcutsRef {
    /// Key absent or `null`
    Absent,
    /// A mapping whose values are all strings
    Mapping(BTreeMap<String, String>),
    /// Anything else; carries a description of what was found
    Malformed(&'static str),
}

impl ShortcutsRef {
    /// Classifies the payload's `keyboard_shortcuts` entry.
    pub fn from_payload(payload: &RawPayload) -> Self {
        match payload.get(SHORTCUTS_FIELD) {
            None | Some(Value::Null) => Self::Absent,
            Some(Value::Object(map)) => {
                let mapping: Option<BTreeMap<String, String>> = map
                    .iter()
                    .map(|(action, keys)| keys.as_str().map(|k| (action.clone(), k.to_string())))
                    .collect();
                mapping.map_or(Self::Malformed("mapping with non-string values"), Self::Mapping)
            }
            Some(other) => Self::Malformed(json_kind(other)),
        }
    }
}

/// Short JSON type name for diagnostics.
pub fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "mapping",
    }
}

/// True when a required field is present and not `null`.
pub fn has_field(payload: &RawPayload, field: &str) -> bool {
    payload.get(field).is_some_and(|v| !v.is_null())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn payload(value: Value) -> RawPayload {
        match value {
            Value::Object(map) => map,
            _ => unreachable!("test payloads are objects"),
        }
    }

    #[test]
    fn test_theme_ref_variants() {
        assert_eq!(ThemeRef::from_payload(&payload(json!({}))), ThemeRef::Absent);
        assert_eq!(
            ThemeRef::from_payload(&payload(json!({"theme": null}))),
            ThemeRef::Absent
        );
        assert_eq!(
            ThemeRef::from_payload(&payload(json!({"theme": "forest"}))),
            ThemeRef::Named("forest".to_string())
        );
        assert_eq!(
            ThemeRef::from_payload(&payload(json!({"theme": 42}))),
            ThemeRef::Malformed("number")
        );
        match ThemeRef::from_payload(&payload(json!({"theme": {"background": "#000000", "surface": 1}}))) {
            ThemeRef::Inline(theme) => {
                assert_eq!(theme.iter().count(), 1);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_shortcuts_ref_variants() {
        assert_eq!(ShortcutsRef::from_payload(&payload(json!({}))), ShortcutsRef::Absent);
        assert_eq!(
            ShortcutsRef::from_payload(&payload(json!({"keyboard_shortcuts": "invalid"}))),
            ShortcutsRef::Malformed("string")
        );
        assert_eq!(
            ShortcutsRef::from_payload(&payload(json!({"keyboard_shortcuts": {"focus": 1}}))),
            ShortcutsRef::Malformed("mapping with non-string values")
        );
        match ShortcutsRef::from_payload(&payload(json!({"keyboard_shortcuts": {"focus": "F2"}}))) {
            ShortcutsRef::Mapping(map) => assert_eq!(map["focus"], "F2"),
            other => panic!("unexpected {other:?}"),
        }
    }
}
