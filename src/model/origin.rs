//! Provenance tagging for profiles.

use serde::{Serialize, Deserialize};

/// Where a profile definition came from, in increasing precedence (spec.md §3).
///
/// Used by inheritance lookups (defaults always sit at the back of a chain). Every
/// non-deleted profile is persisted to the user file regardless of origin — see
/// [`crate::model::Profile::is_persistable`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OriginTag {
    /// Shipped in `defaults.json`.
    InBox,
    /// Produced by a [`crate::generators::Generator`].
    Generated,
    /// Produced by a third-party publisher's fragment file.
    Fragment,
    /// The anonymous `profiles.defaults` slot.
    ProfilesDefaults,
    /// Declared directly by the user in `settings.json`.
    User
}

impl Default for OriginTag {
    /// Placeholder used only until [`crate::parser::Parser`] overwrites it post-deserialization.
    fn default() -> Self {
        Self::User
    }
}
