//! Filesystem locations the resolver reads from and writes to.

use std::path::{Path, PathBuf};

/// The fixed application directory name under the user's config/data roots.
const APP_DIR: &str = "termset";

/// Resolves every filesystem location the resolver needs, via the `dirs` crate so the same
/// code works unmodified across platforms.
#[derive(Debug, Clone)]
pub struct Paths {
    /// `settings.json` — the user's editable settings file.
    pub settings_file: PathBuf,
    /// `defaults.json` — the built-in, read-only base layer.
    pub defaults_file: PathBuf,
    /// Per-user fragment root (`<data>/termset/Fragments`).
    pub user_fragments_root: PathBuf,
    /// Machine-wide fragment root (`<data>/../Fragments`, platform dependent).
    pub machine_fragments_root: PathBuf,
    /// The generated-profile GUID sidecar state file.
    pub state_file: PathBuf
}

impl Paths {
    /// Resolves every path from the platform's standard config/data directories.
    ///
    /// # Errors
    /// Returns an error if the platform has no resolvable config or data directory at all
    /// (e.g. `HOME` unset on a Unix-like system) — a broken environment, not a user mistake.
    pub fn discover() -> Result<Self, PathsError> {
        let config_dir = dirs::config_dir().ok_or(PathsError::NoConfigDir)?.join(APP_DIR);
        let data_dir = dirs::data_dir().ok_or(PathsError::NoDataDir)?.join(APP_DIR);

        Ok(Self {
            settings_file: config_dir.join("settings.json"),
            defaults_file: Self::exe_relative("defaults.json"),
            user_fragments_root: data_dir.join("Fragments"),
            machine_fragments_root: Self::shared_fragments_root(),
            state_file: data_dir.join("state.json")
        })
    }

    fn exe_relative(name: &str) -> PathBuf {
        std::env::current_exe().ok().and_then(|p| p.parent().map(Path::to_path_buf)).unwrap_or_default().join(name)
    }

    #[cfg(unix)]
    fn shared_fragments_root() -> PathBuf {
        PathBuf::from("/usr/share").join(APP_DIR).join("Fragments")
    }

    #[cfg(windows)]
    fn shared_fragments_root() -> PathBuf {
        dirs::data_local_dir().unwrap_or_default().join(APP_DIR).join("Fragments")
    }

    #[cfg(not(any(unix, windows)))]
    fn shared_fragments_root() -> PathBuf {
        PathBuf::new()
    }
}

/// Errors resolving platform filesystem locations.
#[derive(Debug, thiserror::Error)]
pub enum PathsError {
    /// The platform reported no config directory.
    #[error("no platform config directory available")]
    NoConfigDir,
    /// The platform reported no data directory.
    #[error("no platform data directory available")]
    NoDataDir
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn discover_produces_app_scoped_paths() {
        let paths = Paths::discover().expect("test environment provides HOME or equivalent");
        assert!(paths.settings_file.ends_with("settings.json"));
        assert!(paths.state_file.ends_with("state.json"));
        assert!(paths.user_fragments_root.ends_with("Fragments"));
    }
}
