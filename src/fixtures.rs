//! A JSON-driven scenario harness for exercising the resolver end to end.
//!
//! Mirrors the shape of a hand-rolled settings fixture: a `defaults.json`, a `settings.json`,
//! zero or more fragment files, and an expectation about what [`crate::resolve::load_all`]
//! should produce. Meant to be loaded from a file and run with [`Scenarios::run`], the same
//! way a test suite would be handed to a cleaner elsewhere in this ecosystem.

use std::collections::HashMap;

use serde::{Serialize, Deserialize};

use crate::fragments::NoExtensionCatalog;
use crate::paths::Paths;
use crate::resolve::load_all;

/// A batch of [`Scenario`]s, typically loaded from one JSON file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Scenarios {
    /// The individual [`Scenario`]s.
    pub scenarios: Vec<Scenario>
}

impl Scenarios {
    /// Runs every scenario in order, panicking on the first mismatch.
    ///
    /// # Panics
    /// If any scenario's resolved state doesn't match its `expect`.
    pub fn run(self) {
        for scenario in self.scenarios {
            scenario.run();
        }
    }
}

/// One resolver run: the documents it's given, and what the result should look like.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scenario {
    /// A human-readable label, printed before the scenario runs and on any failed assertion.
    pub name: String,
    /// Raw `defaults.json` contents. Defaults to an empty profile list.
    #[serde(default = "default_defaults_json")]
    pub defaults_json: String,
    /// Raw `settings.json` contents.
    pub user_json: String,
    /// Fragment files to materialize, keyed by publisher namespace.
    #[serde(default)]
    pub fragments: HashMap<String, String>,
    /// What the resolved state must look like.
    pub expect: Expectation
}

fn default_defaults_json() -> String {
    r#"{"profiles": {"defaults": {}, "list": []}}"#.to_string()
}

/// What a [`Scenario`]'s resolved [`crate::resolve::LoadedSettings`] must satisfy.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Expectation {
    /// Profile names that must appear in the active (non-hidden) list.
    #[serde(default)]
    pub active_profile_names: Vec<String>,
    /// Profile names that must be present but hidden.
    #[serde(default)]
    pub hidden_profile_names: Vec<String>,
    /// If `true`, the load is expected to fail rather than succeed.
    #[serde(default)]
    pub is_err: bool
}

impl Scenario {
    /// Materializes this scenario into a fresh temp directory and runs it through
    /// [`load_all`], asserting the result against `self.expect`.
    ///
    /// # Panics
    /// If the temp directory or its files can't be written, or if the resolved state doesn't
    /// match `self.expect`.
    pub fn run(self) {
        println!("Scenario: {}", self.name);

        let dir = tempfile::tempdir().expect("a temp directory to be creatable");
        let paths = Paths {
            settings_file: dir.path().join("settings.json"),
            defaults_file: dir.path().join("defaults.json"),
            user_fragments_root: dir.path().join("fragments"),
            machine_fragments_root: dir.path().join("machine-fragments"),
            state_file: dir.path().join("state.json")
        };

        std::fs::write(&paths.defaults_file, &self.defaults_json).expect("defaults.json to write");
        std::fs::write(&paths.settings_file, &self.user_json).expect("settings.json to write");

        for (publisher, json) in &self.fragments {
            let publisher_dir = paths.user_fragments_root.join(publisher);
            std::fs::create_dir_all(&publisher_dir).expect("a fragment publisher dir to be creatable");
            std::fs::write(publisher_dir.join("fragment.json"), json).expect("a fragment file to write");
        }

        let result = load_all(&paths, &[], &NoExtensionCatalog);

        if self.expect.is_err {
            assert!(result.is_err(), "scenario {:?}: expected a fatal error, got a resolved state", self.name);
            return;
        }

        let loaded = result.unwrap_or_else(|e| panic!("scenario {:?}: expected success, got {e}", self.name));
        let active: Vec<&str> = loaded.active_profiles().map(|p| p.name.as_str()).collect();

        for expected in &self.expect.active_profile_names {
            assert!(active.contains(&expected.as_str()), "scenario {:?}: {expected:?} should be active, got {active:?}", self.name);
        }
        for expected in &self.expect.hidden_profile_names {
            let hidden = loaded.profiles.iter().any(|p| p.name == *expected && p.hidden);
            assert!(hidden, "scenario {:?}: {expected:?} should be present and hidden", self.name);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inline_scenario_runs() {
        let scenario = Scenario {
            name: "inline".to_string(),
            defaults_json: default_defaults_json(),
            user_json: r#"{"profiles": [{"name": "A"}]}"#.to_string(),
            fragments: HashMap::new(),
            expect: Expectation { active_profile_names: vec!["A".to_string()], ..Default::default() }
        };
        scenario.run();
    }

    #[test]
    fn scenarios_parse_from_a_json_document() {
        let json = r#"{
            "scenarios": [{
                "name": "single profile",
                "user_json": "{\"profiles\": [{\"name\": \"A\"}]}",
                "expect": {"active_profile_names": ["A"]}
            }]
        }"#;
        let scenarios: Scenarios = serde_json::from_str(json).unwrap();
        assert_eq!(scenarios.scenarios.len(), 1);
        scenarios.run();
    }

    #[test]
    fn is_err_scenario_expects_a_fatal_load() {
        let scenario = Scenario {
            name: "all hidden".to_string(),
            defaults_json: default_defaults_json(),
            user_json: r#"{"profiles": [{"name": "A", "hidden": true}]}"#.to_string(),
            fragments: HashMap::new(),
            expect: Expectation { is_err: true, ..Default::default() }
        };
        scenario.run();
    }
}
