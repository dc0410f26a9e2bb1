//! Turns a JSON byte slice into a [`ParsedSettings`].

use serde_json::Value;

use crate::error::DeserializationError;
use crate::model::{ColorScheme, GlobalAppSettings, KeyBindingAction, OriginTag, ParsedSettings, Profile};
use crate::util::debug;

/// Parses one settings document.
///
/// Accepts both the legacy `"profiles": [ ... ]` array form and the modern
/// `"profiles": {"defaults": ..., "list": [...]}` form (spec.md §4.1, §6).
#[derive(Debug)]
pub struct Parser;

impl Parser {
    /// Parses `bytes` as a settings document, tagging every profile it produces with `origin`.
    ///
    /// # Errors
    /// Returns [`DeserializationError`] if `bytes` is not valid JSON, or a required top-level
    /// shape is wrong. Malformed individual profile/scheme entries are dropped silently
    /// rather than failing the whole document (spec.md §4.1, §7: "silent recovery").
    pub fn parse(bytes: &[u8], origin: OriginTag) -> Result<ParsedSettings, DeserializationError> {
        debug!("Parser::parse", origin);

        let root: Value = serde_json::from_slice(bytes).map_err(|e| Self::map_error(bytes, e, None))?;
        let root = root.as_object().ok_or_else(|| DeserializationError {
            message: "top-level settings document must be a JSON object".to_string(),
            line: 1,
            column: 1,
            key: None
        })?;

        let mut globals: GlobalAppSettings = match root.get("globals") {
            Some(v) => serde_json::from_value(v.clone()).map_err(|e| Self::map_error(bytes, e, Some("globals")))?,
            None => GlobalAppSettings::default()
        };

        if let Some(default_profile) = root.get("defaultProfile") {
            if let Ok(guid) = serde_json::from_value(default_profile.clone()) {
                globals.default_profile = crate::model::Setting::Set(guid);
            }
        }
        if let Some(disabled) = root.get("disabledProfileSources") {
            if let Ok(set) = serde_json::from_value(disabled.clone()) {
                globals.disabled_profile_sources = set;
            }
        }
        if let Some(actions) = root.get("actions") {
            globals.actions = Self::parse_actions(actions);
        }
        globals.color_schemes = Self::parse_color_schemes(root.get("schemes"));

        let (profile_defaults_value, profile_values) = Self::split_profiles(root.get("profiles"));

        let mut profile_defaults = match profile_defaults_value {
            Some(v) => serde_json::from_value(v).map_err(|e| Self::map_error(bytes, e, Some("profiles.defaults")))?,
            None => Profile::default()
        };
        profile_defaults.guid = crate::model::Guid::ZERO;
        profile_defaults.origin = origin;

        let mut collected = Vec::with_capacity(profile_values.len());
        for value in profile_values {
            let Some(object) = value.as_object() else { continue };
            if !object.contains_key("name") && !object.contains_key("guid") {
                // Prevents malformed empty objects from becoming ghost "Default" profiles.
                continue;
            }
            let mut profile: Profile = match serde_json::from_value(value) {
                Ok(p) => p,
                Err(_) => continue
            };
            profile.origin = origin;
            collected.push(profile);
        }
        // Profiles may still share Guid::ZERO here (not every profile declares one); a
        // real duplicate check only makes sense after IdentityAssigner assigns identities.
        let profiles = crate::catalog::ProfileCatalog::from_unchecked(collected);

        Ok(ParsedSettings { globals, profile_defaults, profiles })
    }

    fn split_profiles(value: Option<&Value>) -> (Option<Value>, Vec<Value>) {
        match value {
            Some(Value::Array(list)) => (None, list.clone()),
            Some(Value::Object(map)) => (
                map.get("defaults").cloned(),
                map.get("list").and_then(|v| v.as_array()).cloned().unwrap_or_default()
            ),
            _ => (None, Vec::new())
        }
    }

    fn parse_color_schemes(value: Option<&Value>) -> std::collections::HashMap<String, ColorScheme> {
        let mut out = std::collections::HashMap::new();
        let Some(Value::Array(list)) = value else { return out };
        for item in list {
            if let Ok(scheme) = serde_json::from_value::<ColorScheme>(item.clone()) {
                if scheme.is_plausible() {
                    out.insert(scheme.name.clone(), scheme);
                }
            }
        }
        out
    }

    fn parse_actions(value: &Value) -> Vec<KeyBindingAction> {
        let Value::Array(list) = value else { return Vec::new() };
        list.iter().filter_map(|v| serde_json::from_value(v.clone()).ok()).collect()
    }

    /// Maps a `serde_json::Error` to a [`DeserializationError`] with a human-readable
    /// line/column computed from the reported byte offset by counting line feeds
    /// (spec.md §4.1).
    fn map_error(_bytes: &[u8], error: serde_json::Error, key: Option<&str>) -> DeserializationError {
        DeserializationError {
            message: error.to_string(),
            line: error.line(),
            column: error.column(),
            key: key.map(str::to_string)
        }
    }
}
