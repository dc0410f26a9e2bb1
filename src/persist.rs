//! Serializes the user-visible state back to disk (spec.md §4.10).

use std::io;
use std::path::Path;

use time::format_description::FormatItem;
use time::macros::format_description;

use crate::model::{ColorScheme, GlobalAppSettings, Profile};
use crate::util::debug;

const BACKUP_TIMESTAMP: &[FormatItem<'_>] = format_description!("[year][month][day]-[hour][minute][second]");

/// The subset of resolved state that gets written back to `settings.json`.
#[derive(Debug, Clone, serde::Serialize)]
pub struct PersistedDocument<'a> {
    #[serde(rename = "defaultProfile", skip_serializing_if = "crate::model::Setting::is_unset")]
    default_profile: crate::model::Setting<crate::model::Guid>,
    #[serde(rename = "disabledProfileSources", skip_serializing_if = "std::collections::HashSet::is_empty")]
    disabled_profile_sources: std::collections::HashSet<String>,
    profiles: PersistedProfiles<'a>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    schemes: Vec<&'a ColorScheme>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    actions: Vec<&'a crate::model::KeyBindingAction>
}

#[derive(Debug, Clone, serde::Serialize)]
struct PersistedProfiles<'a> {
    defaults: &'a Profile,
    list: Vec<&'a Profile>
}

/// Serializes and atomically writes the user-visible settings document, with a timestamped
/// backup of whatever was there before.
pub struct Persister;

impl Persister {
    /// Serializes `globals`, `profile_defaults`, and every non-deleted profile to `path`,
    /// using 4-space indentation and a stable field order. Backs up the previous file first
    /// and writes via write-to-temp-then-rename so concurrent readers never observe a
    /// partial file (spec.md §4.10, §5).
    ///
    /// # Errors
    /// Returns an IO error if the backup copy, temp-file write, or rename fails.
    pub fn persist(path: &Path, globals: &GlobalAppSettings, profile_defaults: &Profile, profiles: &[Profile]) -> io::Result<()> {
        debug!("Persister::persist", path);

        if path.exists() {
            Self::backup(path)?;
        }

        let visible: Vec<&Profile> = profiles.iter().filter(|p| p.is_persistable()).collect();
        let mut schemes: Vec<&ColorScheme> = globals.color_schemes.values().collect();
        schemes.sort_by(|a, b| a.name.cmp(&b.name));

        let document = PersistedDocument {
            default_profile: globals.default_profile.clone(),
            disabled_profile_sources: globals.disabled_profile_sources.clone(),
            profiles: PersistedProfiles { defaults: profile_defaults, list: visible },
            schemes,
            actions: globals.actions.iter().collect()
        };

        let json = serde_json::to_string_pretty(&document).map_err(io::Error::other)?;
        let json = Self::reindent_to_four_spaces(&json);

        let tmp_path = path.with_extension("json.tmp");
        std::fs::write(&tmp_path, json)?;
        std::fs::rename(&tmp_path, path)
    }

    fn backup(path: &Path) -> io::Result<()> {
        let now = time::OffsetDateTime::now_utc();
        let stamp = now.format(BACKUP_TIMESTAMP).unwrap_or_else(|_| "unknown-time".to_string());
        let backup_path = path.with_extension(format!("json.{stamp}.backup"));
        std::fs::copy(path, backup_path)?;
        Ok(())
    }

    /// `serde_json::to_string_pretty` indents with two spaces; the settings file convention
    /// is four. Re-indenting a freshly generated string is cheaper than hand-rolling a
    /// custom `Formatter`.
    fn reindent_to_four_spaces(json: &str) -> String {
        json.lines()
            .map(|line| {
                let indent = line.len() - line.trim_start_matches(' ').len();
                format!("{}{}", "  ".repeat(indent), line.trim_start_matches(' '))
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Guid, OriginTag};

    #[test]
    fn writes_both_user_and_reproduced_generated_profiles() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");

        let globals = GlobalAppSettings::default();
        let defaults = Profile::default();
        let profiles = vec![
            Profile { guid: Guid::synthesize("t", "user"), name: "User".to_string(), origin: OriginTag::User, ..Default::default() },
            Profile { guid: Guid::synthesize("t", "gen"), name: "Gen".to_string(), origin: OriginTag::Generated, ..Default::default() }
        ];

        Persister::persist(&path, &globals, &defaults, &profiles).unwrap();
        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.contains("User"));
        assert!(written.contains("Gen"));
    }

    #[test]
    fn existing_file_is_backed_up_before_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, "{}").unwrap();

        let globals = GlobalAppSettings::default();
        let defaults = Profile::default();
        Persister::persist(&path, &globals, &defaults, &[]).unwrap();

        let backups = std::fs::read_dir(dir.path())
            .unwrap()
            .filter_map(Result::ok)
            .filter(|e| e.file_name().to_string_lossy().contains(".backup"))
            .count();
        assert_eq!(backups, 1);
    }

    #[test]
    fn deleted_profile_is_never_persisted() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");

        let globals = GlobalAppSettings::default();
        let defaults = Profile::default();
        let profiles = vec![Profile {
            guid: Guid::synthesize("t", "gone"),
            name: "Gone".to_string(),
            origin: OriginTag::User,
            deleted: true,
            ..Default::default()
        }];
        Persister::persist(&path, &globals, &defaults, &profiles).unwrap();
        let written = std::fs::read_to_string(&path).unwrap();
        assert!(!written.contains("Gone"));
    }
}
