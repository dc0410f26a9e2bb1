//! Top-level smoke tests exercising the public API the way an external caller would,
//! through [`termset_core::fixtures::Scenario`] rather than `resolve::load_all` directly.

use termset_core::fixtures::{Expectation, Scenario};

#[test]
fn user_override_beats_builtin_default() {
    Scenario {
        name: "user override beats builtin default".to_string(),
        defaults_json: r#"{"profiles": {"defaults": {"cursorShape": "bar"}, "list": []}}"#.to_string(),
        user_json: r#"{"profiles": [{"name": "Cmd", "cursorShape": "vintage"}]}"#.to_string(),
        fragments: Default::default(),
        expect: Expectation { active_profile_names: vec!["Cmd".to_string()], ..Default::default() }
    }
    .run();
}

#[test]
fn fragment_can_overlay_a_user_declared_profile() {
    let guid = "{22222222-2222-2222-2222-222222222222}";
    let mut fragments = std::collections::HashMap::new();
    fragments.insert("Contoso".to_string(), format!(r#"{{"profiles": [{{"updates": "{guid}", "fontFace": "Cascadia Code"}}]}}"#));

    Scenario {
        name: "fragment overlay".to_string(),
        defaults_json: r#"{"profiles": {"defaults": {}, "list": []}}"#.to_string(),
        user_json: format!(r#"{{"profiles": [{{"guid": "{guid}", "name": "Cmd"}}]}}"#),
        fragments,
        expect: Expectation { active_profile_names: vec!["Cmd".to_string()], ..Default::default() }
    }
    .run();
}

#[test]
fn every_profile_hidden_is_a_fatal_load() {
    Scenario {
        name: "all hidden".to_string(),
        defaults_json: r#"{"profiles": {"defaults": {}, "list": []}}"#.to_string(),
        user_json: r#"{"profiles": [{"name": "A", "hidden": true}]}"#.to_string(),
        fragments: Default::default(),
        expect: Expectation { is_err: true, ..Default::default() }
    }
    .run();
}
