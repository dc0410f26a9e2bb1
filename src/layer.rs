//! Core merge engine: attaches candidate profiles onto the user-visible catalog (spec.md §4.6).

use std::collections::HashMap;

use crate::model::{Guid, ParsedSettings, Profile};
use crate::util::debug;

/// Profiles reachable only as somebody else's parent.
///
/// Never iterated directly and never serialized; looked up purely by [`Guid`] while walking
/// a visible profile's `parents` chain. Kept separate from [`crate::catalog::ProfileCatalog`]
/// because a layered candidate may legitimately share a GUID with the visible profile it
/// backs (match-and-layer, below) — two different namespaces, so no collision.
pub type ParentPool = HashMap<Guid, Profile>;

/// Attaches generator/fragment candidates onto a user-visible [`ParsedSettings`].
#[derive(Debug)]
pub struct Layerer;

impl Layerer {
    /// Layers every candidate in `candidates` onto `user`, in order.
    pub fn layer(candidates: Vec<Profile>, user: &mut ParsedSettings, pool: &mut ParentPool) {
        for candidate in candidates {
            Self::layer_one(candidate, user, pool);
        }
    }

    fn layer_one(candidate: Profile, user: &mut ParsedSettings, pool: &mut ParentPool) {
        debug!("Layerer::layer_one", candidate);

        // Step 1: update overlay. Prepending (not appending) means the fragment's values
        // take precedence over any other layered parent but still defer to whatever the
        // user declared directly on the overlaid profile.
        if let Some(target) = candidate.updates {
            if user.profiles.contains(target) {
                let guid = candidate.guid;
                pool.insert(guid, candidate);
                if let Some(existing) = user.profiles.get_mut(target) {
                    existing.parents.insert(0, guid);
                }
                return;
            }
        }

        // Step 2: match-and-layer. The candidate's own identity already has a visible
        // counterpart; fall back into it rather than publishing a second visible entry.
        if user.profiles.contains(candidate.guid) {
            let guid = candidate.guid;
            pool.insert(guid, candidate);
            if let Some(existing) = user.profiles.get_mut(guid) {
                existing.parents.push(guid);
            }
            return;
        }

        // Step 3: reproduce-and-publish. The reproduction is a new, empty, visible profile
        // whose only parent is the candidate; later user edits land on the reproduction,
        // leaving the generated/fragment record itself immutable.
        let guid = candidate.guid;
        let reproduction = Profile {
            guid,
            name: candidate.name.clone(),
            source: candidate.source.clone(),
            origin: candidate.origin,
            hidden: candidate.hidden,
            parents: vec![guid],
            ..Profile::default()
        };
        pool.insert(guid, candidate);
        // The `else` branch above guarantees `guid` is not already in `user.profiles`.
        let _ = user.profiles.append(reproduction);
    }

    /// Inserts `parent_guid` at the front of every visible profile's parent list, skipping
    /// profiles that already name it (spec.md §4.6: "attach ... as a front-most parent of
    /// every user-visible profile").
    pub fn attach_front_parent(user: &mut ParsedSettings, parent_guid: Guid) {
        for profile in user.profiles.iter_mut() {
            if !profile.parents.contains(&parent_guid) {
                profile.parents.insert(0, parent_guid);
            }
        }
    }
}
