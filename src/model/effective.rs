//! Finalized, parent-chain-collapsed profile values.

use serde::Serialize;

use crate::model::{Guid, OriginTag};

/// The read-only, finalized output of [`crate::inherit::InheritanceFinalizer`] for one profile.
///
/// Every tri-state field has already collapsed to a plain `Option` — `Setting::Cleared`
/// became `None` at the point it shadowed its parents, so there is no more chain left to
/// walk. This is what the Validator and any UI-facing adapter consume (spec.md §3).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EffectiveProfile {
    /// The profile's stable identity.
    pub guid: Guid,
    /// The profile's display name.
    pub name: String,
    /// The profile's provenance.
    pub origin: OriginTag,
    /// Whether the profile is excluded from the active list.
    pub hidden: bool,
    /// Effective cursor shape.
    pub cursor_shape: Option<String>,
    /// Effective font face.
    pub font_face: Option<String>,
    /// Effective color scheme name. `None` after the Validator clears an unknown one.
    pub color_scheme: Option<String>,
    /// Effective background image reference.
    pub background_image: Option<String>,
    /// Effective icon reference.
    pub icon: Option<String>,
    /// Effective starting directory.
    pub starting_directory: Option<String>,
    /// Effective command line.
    pub commandline: Option<String>,
    /// Effective tab title.
    pub tab_title: Option<String>
}
