//! Top-level orchestration: `Parser(defaults) → Parser(user) → GeneratorRunner → Layerer →
//! FragmentLoader → Layerer → InheritanceFinalizer → Validator → Persister` (spec.md §2).

use std::collections::HashSet;

use crate::catalog::ProfileCatalog;
use crate::error::{SettingsLoadError, SettingsWarning};
use crate::fragments::{AppExtensionCatalog, FragmentLoader};
use crate::generators::{Generator, GeneratorRunner};
use crate::identity::IdentityAssigner;
use crate::inherit::InheritanceFinalizer;
use crate::layer::{Layerer, ParentPool};
use crate::model::{EffectiveProfile, GlobalAppSettings, Guid, OriginTag, ParsedSettings};
use crate::parser::Parser;
use crate::paths::Paths;
use crate::persist::Persister;
use crate::state::PersistentState;
use crate::util::debug;

/// The fixed namespace used when synthesizing GUIDs for user-declared profiles that have a
/// name but no explicit GUID (spec.md §4.2: "a fixed well-known 'user' namespace").
const USER_PROFILE_NAMESPACE: &str = "__user__";

/// The fully-resolved output of one settings load.
#[derive(Debug, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoadedSettings {
    /// Every profile, in display order, with parent chains collapsed to effective values.
    pub profiles: Vec<EffectiveProfile>,
    /// Finalized global settings.
    pub globals: GlobalAppSettings,
    /// Non-fatal diagnostics accumulated along the way.
    pub warnings: Vec<SettingsWarning>
}

impl LoadedSettings {
    /// Profiles excluding hidden ones — what a UI's profile switcher would show.
    pub fn active_profiles(&self) -> impl Iterator<Item = &EffectiveProfile> {
        self.profiles.iter().filter(|p| !p.hidden)
    }
}

/// Runs a full settings load against `paths`, `generators`, and an extension `catalog`,
/// persisting the resolved state back to `paths.settings_file` when it changed.
///
/// # Errors
/// Returns [`SettingsLoadError`] for any of the fatal conditions in spec.md §7: an unreadable
/// or unparseable user/defaults file, no profiles after resolution, or every profile hidden.
pub fn load_all(paths: &Paths, generators: &[Generator], catalog: &dyn AppExtensionCatalog) -> Result<LoadedSettings, SettingsLoadError> {
    load_all_with_options(paths, generators, catalog, true)
}

/// As [`load_all`], but when `persist` is `false` skips writing the settings and state files
/// back to disk (spec.md §4.13's `--dry-run`). The sidecar state's dirty bit is still computed
/// so the returned [`LoadedSettings`] reflects what a real run would hide, it just never hits
/// the filesystem.
///
/// # Errors
/// See [`load_all`].
pub fn load_all_with_options(
    paths: &Paths,
    generators: &[Generator],
    catalog: &dyn AppExtensionCatalog,
    persist: bool
) -> Result<LoadedSettings, SettingsLoadError> {
    debug!("resolve::load_all", paths);

    let defaults = load_defaults(paths)?;
    let mut user = load_user(paths)?;

    let mut warnings = IdentityAssigner::assign(&mut user.profiles, USER_PROFILE_NAMESPACE);
    let mut pool: ParentPool = ParentPool::new();

    let user_declared_guids: HashSet<Guid> = user.profiles.iter().map(|p| p.guid).collect();

    let (generated, generator_warnings) = GeneratorRunner::run(generators, &user.globals.disabled_profile_sources);
    warnings.extend(generator_warnings);
    let mut generated_catalog = ProfileCatalog::from_unchecked(generated);
    warnings.extend(IdentityAssigner::assign(&mut generated_catalog, "__generated__"));
    Layerer::layer(generated_catalog.into_vec(), &mut user, &mut pool);

    let fragment_roots = [paths.user_fragments_root.clone(), paths.machine_fragments_root.clone()];
    let (fragments, fragment_failures) = FragmentLoader::load(&fragment_roots, catalog, &user.globals.disabled_profile_sources);
    for failure in fragment_failures {
        debug!("resolve::load_all/fragment-failure", failure);
    }
    for mut fragment in fragments {
        warnings.extend(IdentityAssigner::assign(&mut fragment.profiles, "__fragment__"));
        for (name, scheme) in fragment.globals.color_schemes {
            user.globals.color_schemes.entry(name).or_insert(scheme);
        }
        Layerer::layer(fragment.profiles.into_vec(), &mut user, &mut pool);
    }

    attach_profile_defaults_chain(&mut user, &defaults, &mut pool);

    let mut state_dirty = false;
    let mut state = PersistentState::load(&paths.state_file).map_err(SettingsLoadError::CantLoadPersistentState)?;
    if state.reconcile(&mut user.profiles, &user_declared_guids) {
        state_dirty = true;
    }

    let mut effective_profiles: Vec<EffectiveProfile> =
        user.profiles.iter().map(|p| InheritanceFinalizer::finalize_profile(p, &pool)).collect();
    let mut effective_globals = InheritanceFinalizer::finalize_globals(&[&user.globals, &defaults.globals]);

    warnings.extend(crate::validate::Validator::validate(&mut effective_profiles, &mut effective_globals)?);

    if persist {
        let _ = state.persist_if_dirty(&paths.state_file, state_dirty);

        if state_dirty || !paths.settings_file.exists() {
            if let Err(e) = Persister::persist(&paths.settings_file, &user.globals, &user.profile_defaults, &user.profiles.into_vec()) {
                warnings.push(SettingsWarning::FailedToWriteToSettings { message: e.to_string() });
            }
        }
    }

    Ok(LoadedSettings { profiles: effective_profiles, globals: effective_globals, warnings })
}

fn load_defaults(paths: &Paths) -> Result<ParsedSettings, SettingsLoadError> {
    let bytes = match std::fs::read(&paths.defaults_file) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return load_embedded_defaults(),
        Err(e) => return Err(SettingsLoadError::CantReadDefaultsFile(e))
    };
    Parser::parse(&bytes, OriginTag::InBox).map_err(SettingsLoadError::CantParseDefaultsFile)
}

#[cfg(feature = "default-config")]
fn load_embedded_defaults() -> Result<ParsedSettings, SettingsLoadError> {
    const EMBEDDED: &str = include_str!("../assets/defaults.json");
    Parser::parse(EMBEDDED.as_bytes(), OriginTag::InBox).map_err(SettingsLoadError::CantParseDefaultsFile)
}

#[cfg(not(feature = "default-config"))]
fn load_embedded_defaults() -> Result<ParsedSettings, SettingsLoadError> {
    Err(SettingsLoadError::NoDefaultsAvailable)
}

fn load_user(paths: &Paths) -> Result<ParsedSettings, SettingsLoadError> {
    let bytes = match std::fs::read(&paths.settings_file) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(ParsedSettings::default()),
        Err(e) => return Err(SettingsLoadError::CantReadSettingsFile { path: paths.settings_file.clone(), source: e })
    };
    Parser::parse(&bytes, OriginTag::User).map_err(SettingsLoadError::CantParseSettingsFile)
}

/// Wires the two-level `profileDefaults` chain (spec.md §4.6): every visible profile gets
/// the user's `profileDefaults` as a front-most parent, and the user's `profileDefaults` in
/// turn inherits from the built-in `profileDefaults`. Both slots are given internal-only
/// GUIDs distinct from [`Guid::ZERO`] so they can be addressed through the same
/// [`ParentPool`] lookup every other parent reference uses.
fn attach_profile_defaults_chain(user: &mut ParsedSettings, defaults: &ParsedSettings, pool: &mut ParentPool) {
    let builtin_guid = Guid::synthesize("__internal__", "builtin-profile-defaults");
    let user_guid = Guid::synthesize("__internal__", "user-profile-defaults");

    let mut builtin_defaults = defaults.profile_defaults.clone();
    builtin_defaults.guid = builtin_guid;
    pool.insert(builtin_guid, builtin_defaults);

    let mut user_defaults = user.profile_defaults.clone();
    user_defaults.guid = user_guid;
    user_defaults.parents = vec![builtin_guid];
    pool.insert(user_guid, user_defaults);

    Layerer::attach_front_parent(user, user_guid);
}
