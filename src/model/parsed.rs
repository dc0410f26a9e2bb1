//! The transient result of parsing one document.

use crate::catalog::ProfileCatalog;
use crate::model::{GlobalAppSettings, Profile};

/// The transient result of parsing one JSON document (spec.md §3).
#[derive(Debug, Clone, Default)]
pub struct ParsedSettings {
    /// Global application settings.
    pub globals: GlobalAppSettings,
    /// The anonymous `profiles.defaults` slot.
    pub profile_defaults: Profile,
    /// Ordered profile list with GUID-keyed lookup.
    pub profiles: ProfileCatalog
}
