//! Collapses a profile's parent chain into effective values (spec.md §4.7).

use std::collections::HashSet;

use crate::layer::ParentPool;
use crate::model::{EffectiveProfile, GlobalAppSettings, Guid, Profile, Setting};
use crate::util::debug;

/// Walks parent chains once per profile and materializes [`EffectiveProfile`] values.
#[derive(Debug)]
pub struct InheritanceFinalizer;

impl InheritanceFinalizer {
    /// Finalizes a single profile by walking its parent chain depth-first, left-to-right.
    ///
    /// Policy is first-declaration-wins: the first chain member (starting with `profile`
    /// itself) that is not [`Setting::Unset`] decides the effective value, and
    /// [`Setting::Cleared`] decides it as `None` rather than continuing the search.
    pub fn finalize_profile(profile: &Profile, pool: &ParentPool) -> EffectiveProfile {
        debug!("InheritanceFinalizer::finalize_profile", profile);

        let chain = Self::collect_chain(profile, pool);

        EffectiveProfile {
            guid: profile.guid,
            name: profile.name.clone(),
            origin: profile.origin,
            hidden: profile.hidden,
            cursor_shape: Self::resolve(&chain, |p| &p.cursor_shape),
            font_face: Self::resolve(&chain, |p| &p.font_face),
            color_scheme: Self::resolve(&chain, |p| &p.color_scheme),
            background_image: Self::resolve(&chain, |p| &p.background_image),
            icon: Self::resolve(&chain, |p| &p.icon),
            starting_directory: Self::resolve(&chain, |p| &p.starting_directory),
            commandline: Self::resolve(&chain, |p| &p.commandline),
            tab_title: Self::resolve(&chain, |p| &p.tab_title)
        }
    }

    /// Finalizes a chain of [`GlobalAppSettings`], ordered front (highest precedence, e.g.
    /// the user's own globals) to back (e.g. built-in defaults). Scalars are first-Set-wins;
    /// `disabledProfileSources` is a union; `colorSchemes` is a union where an earlier
    /// (higher-precedence) entry overrides a later one with the same name; `actions` is
    /// concatenated child-then-parent, i.e. in the same front-to-back order as `chain`.
    pub fn finalize_globals(chain: &[&GlobalAppSettings]) -> GlobalAppSettings {
        let mut result = GlobalAppSettings::default();

        for globals in chain {
            if result.default_profile.is_unset() {
                result.default_profile = globals.default_profile.clone();
            }
            if result.always_on_top.is_unset() {
                result.always_on_top = globals.always_on_top.clone();
            }
            if result.launch_mode.is_unset() {
                result.launch_mode = globals.launch_mode.clone();
            }
            result.disabled_profile_sources.extend(globals.disabled_profile_sources.iter().cloned());
            result.actions.extend(globals.actions.iter().cloned());
        }

        for globals in chain.iter().rev() {
            for (name, scheme) in &globals.color_schemes {
                result.color_schemes.insert(name.clone(), scheme.clone());
            }
        }

        result
    }

    /// Depth-first, left-to-right, pre-order traversal of `root`'s parent chain.
    ///
    /// `root` itself is never looked up in `pool` — only its `parents` entries are. This
    /// matters because a reproduction (spec.md §4.6 step 3) deliberately shares its GUID
    /// with the candidate backing it in `pool`; were that GUID seeded into the visited set
    /// up front, the candidate would look like an immediate self-cycle and never resolve.
    /// A guid that reappears while walking `pool` is a genuine cycle; the walk stops there
    /// rather than recursing forever (spec.md §4.7: "cycles are detected and broken").
    fn collect_chain<'a>(root: &'a Profile, pool: &'a ParentPool) -> Vec<&'a Profile> {
        let mut order = vec![root];
        let mut visited = HashSet::new();
        for &parent_guid in &root.parents {
            Self::visit(parent_guid, pool, &mut visited, &mut order);
        }
        order
    }

    fn visit<'a>(guid: Guid, pool: &'a ParentPool, visited: &mut HashSet<Guid>, order: &mut Vec<&'a Profile>) {
        if !visited.insert(guid) {
            return;
        }
        if let Some(profile) = pool.get(&guid) {
            order.push(profile);
            for &parent_guid in &profile.parents {
                Self::visit(parent_guid, pool, visited, order);
            }
        }
    }

    fn resolve(chain: &[&Profile], field: impl Fn(&Profile) -> &Setting<String>) -> Option<String> {
        for profile in chain {
            match field(profile) {
                Setting::Set(v) => return Some(v.clone()),
                Setting::Cleared => return None,
                Setting::Unset => continue
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::OriginTag;

    fn profile(guid: Guid, parents: Vec<Guid>) -> Profile {
        Profile { guid, origin: OriginTag::User, parents, ..Default::default() }
    }

    #[test]
    fn own_value_wins_over_parent() {
        let parent_guid = Guid::synthesize("t", "parent");
        let mut pool = ParentPool::new();
        pool.insert(parent_guid, Profile { cursor_shape: Setting::Set("bar".to_string()), ..profile(parent_guid, vec![]) });

        let mut root = profile(Guid::synthesize("t", "root"), vec![parent_guid]);
        root.cursor_shape = Setting::Set("vintage".to_string());

        let effective = InheritanceFinalizer::finalize_profile(&root, &pool);
        assert_eq!(effective.cursor_shape.as_deref(), Some("vintage"));
    }

    #[test]
    fn unset_falls_through_to_parent() {
        let parent_guid = Guid::synthesize("t", "parent");
        let mut pool = ParentPool::new();
        pool.insert(parent_guid, Profile { font_face: Setting::Set("Cascadia Code".to_string()), ..profile(parent_guid, vec![]) });

        let root = profile(Guid::synthesize("t", "root"), vec![parent_guid]);
        let effective = InheritanceFinalizer::finalize_profile(&root, &pool);
        assert_eq!(effective.font_face.as_deref(), Some("Cascadia Code"));
    }

    #[test]
    fn cleared_shadows_parent() {
        let parent_guid = Guid::synthesize("t", "parent");
        let mut pool = ParentPool::new();
        pool.insert(parent_guid, Profile { icon: Setting::Set("\u{1F600}".to_string()), ..profile(parent_guid, vec![]) });

        let mut root = profile(Guid::synthesize("t", "root"), vec![parent_guid]);
        root.icon = Setting::Cleared;

        let effective = InheritanceFinalizer::finalize_profile(&root, &pool);
        assert_eq!(effective.icon, None);
    }

    #[test]
    fn cycle_does_not_infinite_loop() {
        let a = Guid::synthesize("t", "a");
        let b = Guid::synthesize("t", "b");
        let mut pool = ParentPool::new();
        pool.insert(b, profile(b, vec![a]));

        let root = profile(a, vec![b]);
        let effective = InheritanceFinalizer::finalize_profile(&root, &pool);
        assert_eq!(effective.guid, a);
    }

    #[test]
    fn globals_scalar_is_first_set_wins() {
        let mut user_globals = GlobalAppSettings::default();
        user_globals.launch_mode = Setting::Unset;
        let mut defaults_globals = GlobalAppSettings::default();
        defaults_globals.launch_mode = Setting::Set("maximized".to_string());

        let finalized = InheritanceFinalizer::finalize_globals(&[&user_globals, &defaults_globals]);
        assert_eq!(finalized.launch_mode.as_option(), Some(&"maximized".to_string()));
    }

    #[test]
    fn globals_disabled_sources_are_unioned() {
        let mut a = GlobalAppSettings::default();
        a.disabled_profile_sources.insert("Ns.A".to_string());
        let mut b = GlobalAppSettings::default();
        b.disabled_profile_sources.insert("Ns.B".to_string());

        let finalized = InheritanceFinalizer::finalize_globals(&[&a, &b]);
        assert!(finalized.disabled_profile_sources.contains("Ns.A"));
        assert!(finalized.disabled_profile_sources.contains("Ns.B"));
    }
}
