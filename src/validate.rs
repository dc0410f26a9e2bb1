//! Post-finalization consistency pass (spec.md §4.8).

use crate::error::{SettingsLoadError, SettingsWarning};
use crate::model::{EffectiveProfile, GlobalAppSettings, KeyBindingAction};
use crate::util::debug;

/// Runs the fixed-order checks described in spec.md §4.8.
#[derive(Debug)]
pub struct Validator;

impl Validator {
    /// Validates `profiles` and `globals` in place, clearing fields the checks reject and
    /// returning the accumulated warnings.
    ///
    /// # Errors
    /// Returns [`SettingsLoadError::NoProfiles`] or [`SettingsLoadError::AllProfilesHidden`]
    /// if either of the two fatal preconditions fails. Both checks run before any warning is
    /// produced, matching the fixed ordering in spec.md §4.8.
    pub fn validate(profiles: &mut [EffectiveProfile], globals: &mut GlobalAppSettings) -> Result<Vec<SettingsWarning>, SettingsLoadError> {
        debug!("Validator::validate", profiles);

        if profiles.is_empty() {
            return Err(SettingsLoadError::NoProfiles);
        }
        if profiles.iter().all(|p| p.hidden) {
            return Err(SettingsLoadError::AllProfilesHidden);
        }

        let mut warnings = Vec::new();

        Self::resolve_default_profile(profiles, globals, &mut warnings);
        for profile in profiles.iter_mut() {
            Self::check_color_scheme(profile, globals, &mut warnings);
            Self::check_image_ref(profile, &mut warnings);
        }
        Self::check_actions(globals, &mut warnings);

        Ok(warnings)
    }

    fn resolve_default_profile(profiles: &[EffectiveProfile], globals: &mut GlobalAppSettings, warnings: &mut Vec<SettingsWarning>) {
        let resolves = globals.default_profile.as_option().is_some_and(|guid| profiles.iter().any(|p| p.guid == *guid));
        if !resolves {
            warnings.push(SettingsWarning::MissingDefaultProfile);
            if let Some(first) = profiles.first() {
                globals.default_profile = crate::model::Setting::Set(first.guid);
            }
        }
    }

    fn check_color_scheme(profile: &mut EffectiveProfile, globals: &GlobalAppSettings, warnings: &mut Vec<SettingsWarning>) {
        if let Some(name) = profile.color_scheme.clone() {
            if !globals.color_schemes.contains_key(&name) {
                warnings.push(SettingsWarning::UnknownColorScheme { profile: profile.guid, name });
                profile.color_scheme = None;
            }
        }
    }

    fn check_image_ref(profile: &mut EffectiveProfile, warnings: &mut Vec<SettingsWarning>) {
        if let Some(value) = profile.background_image.clone() {
            if !Self::is_valid_image_ref(&value) {
                warnings.push(SettingsWarning::InvalidBackgroundImage { profile: profile.guid, value });
                profile.background_image = None;
            }
        }
        if let Some(value) = profile.icon.clone() {
            if !Self::is_valid_image_ref(&value) {
                warnings.push(SettingsWarning::InvalidIcon { profile: profile.guid, value });
                profile.icon = None;
            }
        }
    }

    /// A "recognized short symbol" is at most two Unicode scalar values (e.g. an emoji with
    /// a variation selector); anything longer must parse as a URI with an explicit scheme.
    fn is_valid_image_ref(value: &str) -> bool {
        value.chars().count() <= 2 || value.split_once("://").is_some()
    }

    fn check_actions(globals: &mut GlobalAppSettings, warnings: &mut Vec<SettingsWarning>) {
        let mut has_bad_binding = false;
        for action in &globals.actions {
            if action.action.is_empty() {
                has_bad_binding = true;
            }
            if action.is_literal_set_color_scheme() {
                let name = action.color_scheme.clone().expect("checked by is_literal_set_color_scheme");
                if !globals.color_schemes.contains_key(&name) {
                    warnings.push(SettingsWarning::InvalidColorSchemeInCmd { name });
                }
            }
        }
        if has_bad_binding {
            warnings.push(SettingsWarning::AtLeastOneKeybindingWarning { raw: Self::describe_bad_bindings(&globals.actions) });
        }
    }

    fn describe_bad_bindings(actions: &[KeyBindingAction]) -> String {
        actions.iter().filter(|a| a.action.is_empty()).count().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Guid, OriginTag, Setting};

    fn profile(guid: Guid) -> EffectiveProfile {
        EffectiveProfile {
            guid,
            name: "P".to_string(),
            origin: OriginTag::User,
            hidden: false,
            cursor_shape: None,
            font_face: None,
            color_scheme: None,
            background_image: None,
            icon: None,
            starting_directory: None,
            commandline: None,
            tab_title: None
        }
    }

    #[test]
    fn no_profiles_is_fatal() {
        let mut globals = GlobalAppSettings::default();
        let err = Validator::validate(&mut [], &mut globals).unwrap_err();
        assert!(matches!(err, SettingsLoadError::NoProfiles));
    }

    #[test]
    fn all_hidden_is_fatal() {
        let mut profiles = vec![EffectiveProfile { hidden: true, ..profile(Guid::synthesize("t", "a")) }];
        let mut globals = GlobalAppSettings::default();
        let err = Validator::validate(&mut profiles, &mut globals).unwrap_err();
        assert!(matches!(err, SettingsLoadError::AllProfilesHidden));
    }

    #[test]
    fn missing_default_profile_falls_back_to_first() {
        let guid = Guid::synthesize("t", "a");
        let mut profiles = vec![profile(guid)];
        let mut globals = GlobalAppSettings::default();
        let warnings = Validator::validate(&mut profiles, &mut globals).unwrap();
        assert!(warnings.contains(&SettingsWarning::MissingDefaultProfile));
        assert_eq!(globals.default_profile, Setting::Set(guid));
    }

    #[test]
    fn unknown_color_scheme_is_cleared() {
        let guid = Guid::synthesize("t", "a");
        let mut profiles = vec![EffectiveProfile { color_scheme: Some("Nope".to_string()), ..profile(guid) }];
        let mut globals = GlobalAppSettings::default();
        globals.default_profile = Setting::Set(guid);
        let warnings = Validator::validate(&mut profiles, &mut globals).unwrap();
        assert_eq!(profiles[0].color_scheme, None);
        assert!(warnings.contains(&SettingsWarning::UnknownColorScheme { profile: guid, name: "Nope".to_string() }));
    }

    #[test]
    fn short_symbol_icon_is_accepted() {
        let guid = Guid::synthesize("t", "a");
        let mut profiles = vec![EffectiveProfile { icon: Some("\u{1F680}".to_string()), ..profile(guid) }];
        let mut globals = GlobalAppSettings::default();
        globals.default_profile = Setting::Set(guid);
        let warnings = Validator::validate(&mut profiles, &mut globals).unwrap();
        assert_eq!(profiles[0].icon.as_deref(), Some("\u{1F680}"));
        assert!(!warnings.iter().any(|w| matches!(w, SettingsWarning::InvalidIcon { .. })));
    }
}
