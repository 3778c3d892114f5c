//! Tests for the config module

use super::loader::{load_or_default, suggest_key, with_overrides_from};
use super::types::*;
use super::PROJECT_CONFIG_FILE;
use crate::error::ValidgenError;
use std::collections::HashMap;
use std::fs;
use tempfile::tempdir;

fn overrides(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key| map.get(key).cloned()
}

#[test]
fn test_config_default() {
    let config = Config::default();

    assert_eq!(config.generate.tag, "arg");
    assert_eq!(config.generate.method, "Valid");
    assert_eq!(config.generate.suffix, "_validgen.go");
    assert_eq!(config.output.verbosity, Verbosity::Normal);
}

#[test]
fn test_config_parse_toml() {
    let toml = r#"
[generate]
tag = "validate"
method = "Validate"
suffix = "_valid.go"

[output]
verbosity = "debug"
"#;

    let config: Config = toml::from_str(toml).unwrap();

    assert_eq!(config.generate.tag, "validate");
    assert_eq!(config.generate.method, "Validate");
    assert_eq!(config.generate.suffix, "_valid.go");
    assert_eq!(config.output.verbosity, Verbosity::Debug);
    assert_eq!(config.render_config().method_name, "Validate");
}

#[test]
fn test_config_partial_section_keeps_defaults() {
    let config: Config = toml::from_str("[generate]\ntag = \"v\"\n").unwrap();
    assert_eq!(config.generate.tag, "v");
    assert_eq!(config.generate.method, "Valid");
}

#[test]
fn test_verbosity_serde() {
    let config: Config = toml::from_str("[output]\nverbosity = \"quiet\"\n").unwrap();
    assert_eq!(config.output.verbosity, Verbosity::Quiet);

    assert!(toml::from_str::<Config>("[output]\nverbosity = \"loud\"\n").is_err());
}

#[test]
fn test_verbosity_from_name_is_lenient() {
    assert_eq!(Verbosity::from_name("VERBOSE"), Verbosity::Verbose);
    assert_eq!(Verbosity::from_name("whatever"), Verbosity::Normal);
}

#[test]
fn test_overrides_apply() {
    let config = with_overrides_from(
        Config::default(),
        overrides(&[
            ("VALIDGEN_TAG", "check"),
            ("VALIDGEN_METHOD", "Validate"),
            ("VALIDGEN_SUFFIX", "_gen.go"),
            ("VALIDGEN_VERBOSITY", "debug"),
        ]),
    );
    assert_eq!(config.generate.tag, "check");
    assert_eq!(config.generate.method, "Validate");
    assert_eq!(config.generate.suffix, "_gen.go");
    assert_eq!(config.output.verbosity, Verbosity::Debug);
}

#[test]
fn test_empty_overrides_are_ignored() {
    let config = with_overrides_from(Config::default(), overrides(&[("VALIDGEN_TAG", "")]));
    assert_eq!(config.generate.tag, "arg");
}

#[test]
fn test_config_load_with_warnings_reports_unknown_key_with_suggestion() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.toml");

    fs::write(&path, "[generate]\nmethd = \"V\"\n").unwrap();

    let (_config, warnings) = Config::load_with_warnings(&path).unwrap();
    assert_eq!(warnings.len(), 1);
    assert_eq!(warnings[0].key, "methd");
    assert_eq!(warnings[0].line, Some(2));
    assert_eq!(warnings[0].suggestion, Some("method".to_string()));
    assert!(warnings[0]
        .to_string()
        .ends_with(":2 (did you mean 'method'?)"));
}

#[test]
fn test_suggest_key_gives_up_on_distant_keys() {
    assert_eq!(suggest_key("colour_scheme"), None);
    assert_eq!(suggest_key("sufix"), Some("suffix".to_string()));
}

#[test]
fn test_config_load_invalid_toml() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(&path, "[generate\n").unwrap();

    assert!(matches!(
        Config::load(&path),
        Err(ValidgenError::InvalidConfig { .. })
    ));
}

#[test]
fn test_load_or_default_prefers_explicit_then_project() {
    let dir = tempdir().unwrap();
    let project = dir.path().join(PROJECT_CONFIG_FILE);
    fs::write(&project, "[generate]\ntag = \"project\"\n").unwrap();
    let explicit = dir.path().join("other.toml");
    fs::write(&explicit, "[generate]\ntag = \"explicit\"\n").unwrap();

    let (config, _) = load_or_default(Some(&explicit), Some(dir.path())).unwrap();
    assert_eq!(config.generate.tag, "explicit");

    let (config, _) = load_or_default(None, Some(dir.path())).unwrap();
    assert_eq!(config.generate.tag, "project");
}

#[test]
fn test_load_or_default_missing_explicit_is_error() {
    let dir = tempdir().unwrap();
    let missing = dir.path().join("missing.toml");
    assert!(matches!(
        load_or_default(Some(&missing), None),
        Err(ValidgenError::Io(_))
    ));
}
