//! Assigns stable GUIDs to profiles that declared a name but no explicit GUID.

use crate::catalog::ProfileCatalog;
use crate::error::SettingsWarning;
use crate::model::Guid;
use crate::util::debug;

/// Synthesizes GUIDs, then re-establishes the catalog's GUID index (spec.md §4.2).
///
/// Parsed profiles may carry [`Guid::ZERO`] when the source document named them but never
/// gave them an explicit `guid`. Assigning happens before indexing on purpose: two profiles
/// both missing a GUID would otherwise collide on `Guid::ZERO` and one would be rejected by
/// [`ProfileCatalog::append`] as a spurious duplicate before it ever got a real identity.
#[derive(Debug)]
pub struct IdentityAssigner;

impl IdentityAssigner {
    /// Synthesizes a GUID for every zero-GUID profile in `catalog` from `namespace` and the
    /// profile's name, then reindexes the catalog and returns any
    /// [`SettingsWarning::DuplicateProfile`] surfaced by genuine post-assignment collisions.
    pub fn assign(catalog: &mut ProfileCatalog, namespace: &str) -> Vec<SettingsWarning> {
        debug!("IdentityAssigner::assign", namespace);

        for profile in catalog.iter_mut() {
            if profile.guid.is_zero() && !profile.name.is_empty() {
                let source = profile.source.as_deref().unwrap_or(namespace);
                profile.guid = Guid::synthesize(source, &profile.name);
            }
        }
        catalog.reindex()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{OriginTag, Profile};

    fn named(name: &str) -> Profile {
        Profile { name: name.to_string(), origin: OriginTag::User, ..Default::default() }
    }

    #[test]
    fn assigns_deterministic_guid_to_zero_guid_profile() {
        let mut catalog = ProfileCatalog::from_unchecked(vec![named("Cmd")]);
        let warnings = IdentityAssigner::assign(&mut catalog, "Windows.Terminal");
        assert!(warnings.is_empty());
        let guid = catalog.iter().next().unwrap().guid;
        assert_eq!(guid, Guid::synthesize("Windows.Terminal", "Cmd"));
    }

    #[test]
    fn two_profiles_with_same_name_collide_after_assignment() {
        let mut catalog = ProfileCatalog::from_unchecked(vec![named("Cmd"), named("Cmd")]);
        let warnings = IdentityAssigner::assign(&mut catalog, "Windows.Terminal");
        assert_eq!(warnings.len(), 1);
        assert_eq!(catalog.len(), 1);
    }

    #[test]
    fn existing_non_zero_guid_is_left_untouched() {
        let explicit = Guid::synthesize("custom", "seed");
        let mut catalog = ProfileCatalog::from_unchecked(vec![Profile { guid: explicit, ..named("Cmd") }]);
        IdentityAssigner::assign(&mut catalog, "Windows.Terminal");
        assert_eq!(catalog.iter().next().unwrap().guid, explicit);
    }
}
