//! The profile record and its settable fields.

use serde::{Serialize, Deserialize};

use crate::model::{Guid, OriginTag, Setting};
use crate::util::is_default;

/// A named bag of optional settings and the root of an inheritance chain (spec.md §3).
///
/// Parents are stored as GUIDs — indices into the owning [`crate::catalog::ProfileCatalog`]'s
/// arena — rather than owning pointers, which is what makes invariant 2 (no cycles) a
/// property we can check by walking GUIDs instead of fighting shared ownership (spec.md §9).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    /// Stable identity. Required after [`crate::identity::IdentityAssigner`] runs;
    /// [`Guid::ZERO`] only ever appears transiently on the anonymous `profiles.defaults` slot.
    #[serde(default)]
    pub guid: Guid,
    /// Human label. Required except on the `ProfilesDefaults` slot, where it's empty.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
    /// Namespace of the generator or fragment publisher that produced this profile.
    /// Absent for user-declared profiles.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    /// Provenance. Not read from JSON; set by [`crate::parser::Parser`] from its origin argument.
    #[serde(skip_deserializing)]
    pub origin: OriginTag,
    /// If `true`, excluded from the active list but still serialized.
    #[serde(default, skip_serializing_if = "is_default")]
    pub hidden: bool,
    /// Runtime-only: marks a generated entry the user removed from their file.
    /// Never read from or written to JSON (invariant 3: `deleted ⇒ not persisted`).
    #[serde(skip)]
    pub deleted: bool,
    /// Fragment overlay target: this entry is not standalone, it overlays the profile
    /// with this GUID (spec.md §4.6 step 1).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updates: Option<Guid>,
    /// Ordered parent references. Lookup scans front-to-back; order matters.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parents: Vec<Guid>,

    /// Terminal cursor shape (e.g. `"bar"`, `"vintage"`).
    #[serde(default, skip_serializing_if = "Setting::is_unset")]
    pub cursor_shape: Setting<String>,
    /// Font family name.
    #[serde(default, skip_serializing_if = "Setting::is_unset")]
    pub font_face: Setting<String>,
    /// Name of an entry in `globals.colorSchemes`.
    #[serde(default, skip_serializing_if = "Setting::is_unset")]
    pub color_scheme: Setting<String>,
    /// A URI or a short (≤2 code unit) symbol identifying a background image.
    #[serde(default, skip_serializing_if = "Setting::is_unset")]
    pub background_image: Setting<String>,
    /// A URI or a short symbol identifying an icon.
    #[serde(default, skip_serializing_if = "Setting::is_unset")]
    pub icon: Setting<String>,
    /// Shell working directory on launch.
    #[serde(default, skip_serializing_if = "Setting::is_unset")]
    pub starting_directory: Setting<String>,
    /// Command line to execute instead of the default shell.
    #[serde(default, skip_serializing_if = "Setting::is_unset")]
    pub commandline: Setting<String>,
    /// Tab title override.
    #[serde(default, skip_serializing_if = "Setting::is_unset")]
    pub tab_title: Setting<String>
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            guid: Guid::ZERO,
            name: String::new(),
            source: None,
            origin: OriginTag::User,
            hidden: false,
            deleted: false,
            updates: None,
            parents: Vec::new(),
            cursor_shape: Setting::Unset,
            font_face: Setting::Unset,
            color_scheme: Setting::Unset,
            background_image: Setting::Unset,
            icon: Setting::Unset,
            starting_directory: Setting::Unset,
            commandline: Setting::Unset,
            tab_title: Setting::Unset
        }
    }
}

impl Profile {
    /// `true` if the profile should appear in the on-disk settings file.
    ///
    /// Every profile that reaches the user-visible catalog — whether declared directly or
    /// published by the Layerer as a reproduction of a generated/fragment candidate — is
    /// persisted so the user can edit or delete it later. Only `deleted` entries are held
    /// back (invariant 3); raw backing records that were never promoted into the catalog
    /// (the generated/fragment candidates themselves, and anything in `defaults.json`)
    /// never reach this check at all.
    pub fn is_persistable(&self) -> bool {
        !self.deleted
    }

    /// Invariant 4: if `source` is set, origin must be one of the three collaborator tags.
    pub fn has_valid_origin_for_source(&self) -> bool {
        self.source.is_none() || matches!(self.origin, OriginTag::Generated | OriginTag::Fragment | OriginTag::InBox)
    }
}
