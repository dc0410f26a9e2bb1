//! The error and warning taxonomy produced by a settings load.

use std::io;
use std::path::PathBuf;

use serde::Serialize;
use thiserror::Error;

use crate::model::Guid;

/// Deserialization failure with enough context to report a human-readable position.
///
/// Produced by [`crate::parser::Parser`] when `serde_json` rejects a document; `line`/`column`
/// are computed by counting line feeds up to the reported byte offset.
#[derive(Debug, Error)]
#[error("{message} at line {line}, column {column}{}", key.as_deref().map(|k| format!(" (key: {k})")).unwrap_or_default())]
pub struct DeserializationError {
    /// The underlying `serde_json` message.
    pub message: String,
    /// 1-based line number.
    pub line: usize,
    /// 1-based column number.
    pub column: usize,
    /// The JSON key being parsed when the error occurred, if known.
    pub key: Option<String>
}

/// Fatal errors. A load that produces one of these does not return usable profiles;
/// callers should fall back to built-in defaults, per spec.md §7.
#[derive(Debug, Error)]
pub enum SettingsLoadError {
    /// The user settings file could not be read from disk.
    #[error("could not read settings file {path:?}: {source}")]
    CantReadSettingsFile {
        /// The path that could not be read.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: io::Error
    },
    /// The user settings file is not valid JSON or does not match the schema.
    #[error("could not parse settings file: {0}")]
    CantParseSettingsFile(#[from] DeserializationError),
    /// `defaults.json` could not be read. Indicates a broken installation.
    #[error("could not read built-in defaults: {0}")]
    CantReadDefaultsFile(#[source] io::Error),
    /// `defaults.json` is not valid JSON or does not match the schema.
    #[error("could not parse built-in defaults: {0}")]
    CantParseDefaultsFile(#[source] DeserializationError),
    /// The binary was built without an embedded default config and no on-disk `defaults.json` exists.
    #[error("no built-in defaults available")]
    NoDefaultsAvailable,
    /// The generated-profile GUID sidecar file exists but is not valid JSON.
    #[error("could not load persisted resolver state: {0}")]
    CantLoadPersistentState(#[source] io::Error),
    /// After parsing, generating, layering, and finalizing, no profile exists at all.
    #[error("no profiles exist after resolution")]
    NoProfiles,
    /// At least one profile exists but every one of them is hidden.
    #[error("all profiles are hidden")]
    AllProfilesHidden
}

/// Warnings. Accumulated during a load; the load continues and the result may still be
/// written back to disk (see spec.md §4.10, §7).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum SettingsWarning {
    /// Two profiles declared the same GUID; only the first survived.
    DuplicateProfile {
        /// The GUID that collided.
        guid: Guid
    },
    /// `globals.defaultProfile` was unset or did not resolve to an existing profile.
    /// The first profile in the catalog was used instead.
    MissingDefaultProfile,
    /// A profile referenced a color scheme name not present in `globals.colorSchemes`.
    /// The field was cleared.
    UnknownColorScheme {
        /// The profile whose color scheme was cleared.
        profile: Guid,
        /// The unresolved scheme name.
        name: String
    },
    /// A profile's background image was neither a parseable URI nor a short symbol. Cleared.
    InvalidBackgroundImage {
        /// The profile whose background image was cleared.
        profile: Guid,
        /// The raw value that failed to parse.
        value: String
    },
    /// A profile's icon was neither a parseable URI nor a short symbol. Cleared.
    InvalidIcon {
        /// The profile whose icon was cleared.
        profile: Guid,
        /// The raw value that failed to parse.
        value: String
    },
    /// At least one key binding failed to parse and was dropped.
    AtLeastOneKeybindingWarning {
        /// The raw key-binding text that failed to parse.
        raw: String
    },
    /// A `setColorScheme` action referenced a scheme absent from `globals.colorSchemes`.
    InvalidColorSchemeInCmd {
        /// The unresolved scheme name.
        name: String
    },
    /// The resolved settings could not be written back to disk. Non-fatal: the in-memory
    /// state returned to the caller is still correct.
    FailedToWriteToSettings {
        /// A human-readable description of the IO failure.
        message: String
    }
}
