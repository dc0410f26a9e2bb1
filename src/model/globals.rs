//! Global application settings.

use std::collections::{HashMap, HashSet};

use serde::{Serialize, Deserialize};

use crate::model::{Guid, Setting};
use crate::util::is_default;

/// A single bag of settings shared across all profiles (spec.md §3).
///
/// Participates in parent-chain inheritance the same way a [`crate::model::Profile`] does:
/// `user.globals` inherits from `defaults.globals` (spec.md §4.6).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct GlobalAppSettings {
    /// GUID of the profile new windows and tabs open with.
    #[serde(default, skip_serializing_if = "Setting::is_unset")]
    pub default_profile: Setting<Guid>,
    /// Generator/publisher namespaces the user has opted out of. Additive across the
    /// parent chain: a child's disabled set is the union of its own and its parent's.
    #[serde(default, skip_serializing_if = "is_default")]
    pub disabled_profile_sources: HashSet<String>,
    /// Named color schemes, keyed by name. Additive across the parent chain, with a
    /// child's entry overriding a parent's entry of the same name.
    #[serde(default, skip_serializing_if = "is_default")]
    pub color_schemes: HashMap<String, ColorScheme>,
    /// Key-binding actions. Concatenated child-then-parent during finalization; the
    /// effective binding for a given key is the first entry that names it.
    #[serde(default, skip_serializing_if = "is_default")]
    pub actions: Vec<KeyBindingAction>,
    /// Whether new windows should always stay on top of others.
    #[serde(default, skip_serializing_if = "Setting::is_unset")]
    pub always_on_top: Setting<bool>,
    /// How new windows should be launched (e.g. `"default"`, `"maximized"`, `"fullscreen"`).
    #[serde(default, skip_serializing_if = "Setting::is_unset")]
    pub launch_mode: Setting<String>
}

/// A named color scheme. Validated structurally (not semantically) by [`ColorScheme::is_plausible`];
/// the Validator only performs name lookups (spec.md §1 Out of scope).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ColorScheme {
    /// The scheme's name, used as the lookup key from [`crate::model::Profile::color_scheme`].
    pub name: String,
    /// Foreground color as a `#RRGGBB` hex string.
    pub foreground: String,
    /// Background color as a `#RRGGBB` hex string.
    pub background: String
}

impl ColorScheme {
    /// Cheap shape check used by [`crate::parser::Parser`] to skip malformed scheme objects
    /// (spec.md §4.1: "validating each via a scheme-specific predicate; skip invalid ones silently").
    pub fn is_plausible(&self) -> bool {
        !self.name.is_empty() && Self::is_hex_color(&self.foreground) && Self::is_hex_color(&self.background)
    }

    fn is_hex_color(s: &str) -> bool {
        s.len() == 7 && s.starts_with('#') && s[1..].chars().all(|c| c.is_ascii_hexdigit())
    }
}

/// A parsed key binding action.
///
/// Only the `action` and, when relevant, `colorScheme` fields are given structure; every
/// other field rides along opaquely in `rest`. This mirrors how loosely the real binding
/// schema is — validating it fully is out of scope (spec.md §1) — while still letting the
/// Validator perform its one required check: `setColorScheme` actions reference a real scheme.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct KeyBindingAction {
    /// The action name, e.g. `"setColorScheme"`, `"copy"`, `"newTab"`.
    pub action: String,
    /// Present when `action == "setColorScheme"`.
    #[serde(default, skip_serializing_if = "Option::is_none", rename = "colorScheme")]
    pub color_scheme: Option<String>,
    /// Every other field on the action object.
    #[serde(flatten)]
    pub rest: serde_json::Map<String, serde_json::Value>
}

impl KeyBindingAction {
    /// `true` if this is a `setColorScheme` action and thus subject to the Validator's
    /// `InvalidColorSchemeInCmd` check. Iteration-expanding commands (e.g. macros over a
    /// list of schemes) are not literal `setColorScheme` actions and are skipped, per
    /// spec.md §4.8.
    pub fn is_literal_set_color_scheme(&self) -> bool {
        self.action == "setColorScheme" && self.color_scheme.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn color_scheme_shape_check() {
        let good = ColorScheme { name: "Campbell".into(), foreground: "#CCCCCC".into(), background: "#0C0C0C".into() };
        assert!(good.is_plausible());

        let bad = ColorScheme { name: "Nope".into(), foreground: "not-a-color".into(), background: "#0C0C0C".into() };
        assert!(!bad.is_plausible());
    }
}
