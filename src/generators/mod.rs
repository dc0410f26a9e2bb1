//! Dynamic profile discovery.
//!
//! A generator is an external collaborator that proposes candidate profiles (discovered
//! shells, cloud consoles, etc). Modeled as a closed sum type instead of a trait object
//! (spec.md §9: "Generators as sum type") so registration order and test substitution are
//! both plain data rather than virtual dispatch.

use crate::error::SettingsWarning;
use crate::model::{Guid, OriginTag, Profile};
use crate::util::debug;

/// One of the fixed set of profile generators, plus a test-only variant.
///
/// Each variant's [`Generator::namespace`] doubles as the `disabledProfileSources` match key
/// and as the `source` recorded on every profile it produces (spec.md §4.4).
#[derive(Debug, Clone)]
pub enum Generator {
    /// PowerShell Core / `pwsh` discovery.
    PowershellCore,
    /// WSL distribution discovery.
    WslDistro,
    /// Azure Cloud Shell discovery.
    AzureCloudShell,
    /// A test-only generator: a fixed namespace and a closure producing its profiles.
    ///
    /// The source format's test generator is not known to assign GUIDs itself; this variant
    /// treats that as a test-only contract and leaves `guid` at [`Guid::ZERO`] for
    /// [`crate::identity::IdentityAssigner`] to synthesize on its behalf (spec.md §9).
    Test(&'static str, fn() -> Vec<Profile>)
}

impl Generator {
    /// This generator's namespace: the `disabledProfileSources` match key and profile `source`.
    pub fn namespace(&self) -> &str {
        match self {
            Self::PowershellCore => "Windows.Terminal.PowershellCore",
            Self::WslDistro => "Windows.Terminal.Wsl",
            Self::AzureCloudShell => "Windows.Terminal.Azure",
            Self::Test(namespace, _) => namespace
        }
    }

    /// Produces this generator's candidate profiles. Every profile is stamped with
    /// `origin=Generated` and `source=namespace()` regardless of what the generator itself
    /// set, since those two fields are defined by registration, not discovery (spec.md §6).
    fn generate(&self) -> Vec<Profile> {
        let namespace = self.namespace().to_string();
        let mut profiles = match self {
            Self::PowershellCore | Self::WslDistro | Self::AzureCloudShell => Vec::new(),
            Self::Test(_, f) => f()
        };
        for profile in &mut profiles {
            profile.origin = OriginTag::Generated;
            profile.source = Some(namespace.clone());
        }
        profiles
    }
}

/// Invokes each registered [`Generator`] in order, skipping disabled namespaces and
/// discarding failures (spec.md §4.4).
#[derive(Debug)]
pub struct GeneratorRunner;

impl GeneratorRunner {
    /// Runs every generator in `registry` not named in `disabled_sources`, in registration
    /// order, and returns their combined candidate profiles.
    ///
    /// A generator is a plain function here, so there is no exception to catch the way the
    /// spec's source language would; a panicking generator still aborts the process, exactly
    /// as a panic anywhere else in the binary would. `out_of_band_failures` is where a future
    /// fallible generator's error would be folded in as a [`SettingsWarning`]; today's
    /// built-in generators never populate it, but the contract is kept visible in the return
    /// type rather than silently dropped.
    pub fn run(registry: &[Generator], disabled_sources: &std::collections::HashSet<String>) -> (Vec<Profile>, Vec<SettingsWarning>) {
        let mut candidates = Vec::new();
        let warnings = Vec::new();
        for generator in registry {
            if disabled_sources.contains(generator.namespace()) {
                debug!("GeneratorRunner::run/skip-disabled", generator);
                continue;
            }
            candidates.extend(generator.generate());
        }
        (candidates, warnings)
    }

    /// GUID helper for generators wanting a deterministic identity up front; equivalent to
    /// what [`crate::identity::IdentityAssigner`] would assign later, exposed here so a
    /// generator can reference its own profile's GUID while building it (e.g. for
    /// `updates`-style self-overlay, not currently used by the built-in generators).
    pub fn deterministic_guid(namespace: &str, name: &str) -> Guid {
        Guid::synthesize(namespace, name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_one() -> Vec<Profile> {
        vec![Profile { name: "Test Shell".to_string(), ..Default::default() }]
    }

    #[test]
    fn disabled_namespace_is_skipped() {
        let registry = vec![Generator::Test("Test.One", make_one)];
        let mut disabled = std::collections::HashSet::new();
        disabled.insert("Test.One".to_string());
        let (profiles, _) = GeneratorRunner::run(&registry, &disabled);
        assert!(profiles.is_empty());
    }

    #[test]
    fn enabled_generator_runs_and_is_stamped() {
        let registry = vec![Generator::Test("Test.One", make_one)];
        let (profiles, _) = GeneratorRunner::run(&registry, &std::collections::HashSet::new());
        assert_eq!(profiles.len(), 1);
        assert_eq!(profiles[0].origin, OriginTag::Generated);
        assert_eq!(profiles[0].source.as_deref(), Some("Test.One"));
    }

    #[test]
    fn registration_order_is_preserved() {
        fn make_a() -> Vec<Profile> { vec![Profile { name: "A".to_string(), ..Default::default() }] }
        fn make_b() -> Vec<Profile> { vec![Profile { name: "B".to_string(), ..Default::default() }] }
        let registry = vec![Generator::Test("Ns.A", make_a), Generator::Test("Ns.B", make_b)];
        let (profiles, _) = GeneratorRunner::run(&registry, &std::collections::HashSet::new());
        assert_eq!(profiles.iter().map(|p| p.name.as_str()).collect::<Vec<_>>(), vec!["A", "B"]);
    }
}
