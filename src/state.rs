//! Cross-run bookkeeping for generated profiles (spec.md §4.9).

use std::collections::HashSet;
use std::io;
use std::path::Path;

use serde::{Serialize, Deserialize};

use crate::catalog::ProfileCatalog;
use crate::model::{Guid, OriginTag};
use crate::util::debug;

/// GUIDs of every generated profile ever emitted on this installation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PersistentState {
    /// The tracked GUID set.
    #[serde(rename = "generatedProfiles")]
    pub generated_profiles: HashSet<Guid>
}

impl PersistentState {
    /// Loads the sidecar state file, treating a missing file as an empty, fresh state.
    ///
    /// # Errors
    /// Returns an error if the file exists but is not valid JSON, or a filesystem error other
    /// than "not found" occurs.
    pub fn load(path: &Path) -> io::Result<Self> {
        match std::fs::read(path) {
            Ok(bytes) => serde_json::from_slice(&bytes).map_err(io::Error::other),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(e)
        }
    }

    /// Writes the state file, 4-space indented, if `dirty`. A no-op otherwise (spec.md §4.9:
    /// "persist the updated set" only "if the dirty bit is set").
    pub fn persist_if_dirty(&self, path: &Path, dirty: bool) -> io::Result<()> {
        if !dirty {
            return Ok(());
        }
        let json = serde_json::to_string_pretty(self).map_err(io::Error::other)?;
        let json = json.replace("  ", "    ");
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)
    }

    /// Reconciles `self` against the generated profiles the current run produced.
    ///
    /// For each generated profile:
    /// - not yet tracked: remembers its GUID and marks `self` dirty. The profile is new, so
    ///   it stays visible as-is.
    /// - already tracked but absent from the user's on-disk file (`reproduction_is_user_declared`
    ///   returns `false` for it): the user deleted it previously, so it is re-hidden
    ///   (`hidden = true, deleted = true`) without touching the underlying generated record.
    ///
    /// Returns whether `self` was modified.
    pub fn reconcile(&mut self, catalog: &mut ProfileCatalog, user_declared_guids: &HashSet<Guid>) -> bool {
        debug!("PersistentState::reconcile", user_declared_guids);

        let mut dirty = false;
        for profile in catalog.iter_mut() {
            if profile.origin != OriginTag::Generated {
                continue;
            }
            if self.generated_profiles.insert(profile.guid) {
                dirty = true;
                continue;
            }
            if !user_declared_guids.contains(&profile.guid) {
                profile.hidden = true;
                profile.deleted = true;
            }
        }
        dirty
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Profile;

    fn generated(guid: Guid) -> Profile {
        Profile { guid, name: "Gen".to_string(), origin: OriginTag::Generated, ..Default::default() }
    }

    #[test]
    fn first_sighting_is_tracked_and_stays_visible() {
        let mut state = PersistentState::default();
        let mut catalog = ProfileCatalog::new();
        let guid = Guid::synthesize("t", "gen");
        catalog.append(generated(guid)).unwrap();

        let dirty = state.reconcile(&mut catalog, &HashSet::from([guid]));
        assert!(dirty);
        assert!(!catalog.get(guid).unwrap().hidden);
    }

    #[test]
    fn previously_seen_but_user_removed_is_rehidden() {
        let guid = Guid::synthesize("t", "gen");
        let mut state = PersistentState { generated_profiles: HashSet::from([guid]) };
        let mut catalog = ProfileCatalog::new();
        catalog.append(generated(guid)).unwrap();

        let dirty = state.reconcile(&mut catalog, &HashSet::new());
        assert!(!dirty);
        let profile = catalog.get(guid).unwrap();
        assert!(profile.hidden);
        assert!(profile.deleted);
    }

    #[test]
    fn persist_if_dirty_is_a_noop_when_clean() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");
        let state = PersistentState::default();
        state.persist_if_dirty(&path, false).unwrap();
        assert!(!path.exists());
    }

    #[test]
    fn load_missing_file_is_empty_state() {
        let dir = tempfile::tempdir().unwrap();
        let state = PersistentState::load(&dir.path().join("nope.json")).unwrap();
        assert!(state.generated_profiles.is_empty());
    }
}
