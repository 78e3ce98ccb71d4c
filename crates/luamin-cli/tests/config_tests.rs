use luamin_cli::config::{LuaminConfig, Settings, find_config, parse_config};
use std::fs;
use tempfile::TempDir;

#[test]
fn test_empty_config_uses_defaults() {
    let config = parse_config("{}").expect("parse");
    assert_eq!(config, LuaminConfig::default());

    let settings = Settings::from_config(&config);
    assert_eq!(settings, Settings::default());
    assert_eq!(settings.nesting_threshold, 6);
    assert_eq!(settings.snippet_level, 5);
    assert!(!settings.options.keep_comments);
}

#[test]
fn test_all_keys() {
    let config = parse_config(
        r#"{
            "keepComments": true,
            "keepTableFieldBrackets": true,
            "replace": true,
            "nestingThreshold": 3,
            "snippetLevel": 2
        }"#,
    )
    .expect("parse");
    let settings = Settings::from_config(&config);
    assert!(settings.options.keep_comments);
    assert!(settings.options.keep_table_field_brackets);
    assert!(settings.replace);
    assert_eq!(settings.nesting_threshold, 3);
    assert_eq!(settings.snippet_level, 2);
}

#[test]
fn test_unknown_keys_are_rejected() {
    assert!(parse_config(r#"{"keepComment": true}"#).is_err());
}

#[test]
fn test_wrong_value_type_is_rejected() {
    assert!(parse_config(r#"{"nestingThreshold": "six"}"#).is_err());
}

#[test]
fn test_config_is_found_in_an_ancestor() {
    let dir = TempDir::new().expect("temp dir");
    let nested = dir.path().join("a").join("b");
    fs::create_dir_all(&nested).expect("mkdir");
    fs::write(dir.path().join("luamin.json"), "{}").expect("config");
    let dump = nested.join("x.lua.json");
    fs::write(&dump, "{}").expect("dump");

    assert_eq!(find_config(&dump), Some(dir.path().join("luamin.json")));
    assert_eq!(find_config(&nested), Some(dir.path().join("luamin.json")));
}
