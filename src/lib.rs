//! Layered inheritance resolver and merge engine for terminal emulator profile settings.
//!
//! Reads a built-in `defaults.json`, the user's `settings.json`, any registered
//! [`generators::Generator`]s, and third-party fragment files, then collapses every profile's
//! parent chain into an [`EffectiveProfile`] a front end can render directly. See
//! [`resolve::load_all`] for the entry point.

pub(crate) mod util;
pub mod error;
pub mod model;
pub mod catalog;
pub mod parser;
pub mod identity;
pub mod generators;
pub mod fragments;
pub mod layer;
pub mod inherit;
pub mod validate;
pub mod persist;
pub mod state;
pub mod paths;
pub mod resolve;
pub mod fixtures;

pub use error::{DeserializationError, SettingsLoadError, SettingsWarning};
pub use model::{ColorScheme, EffectiveProfile, GlobalAppSettings, Guid, KeyBindingAction, OriginTag, ParsedSettings, Profile, Setting};
pub use resolve::{load_all, LoadedSettings};
