//! Tests for TOML config loading, creation, and path resolution.

use super::*;
use std::path::Path;

#[test]
fn load_from_nonexistent_returns_file_not_found() {
    let result = load_from_path(Path::new("/tmp/nonexistent_uplink_config.toml"));
    let err = result.unwrap_err();
    assert!(matches!(err, uplink_common::ConfigError::FileNotFound(_)));
}

#[test]
fn load_valid_partial_toml() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(
        &path,
        r##"
[chat]
model = "gemini-2.5-pro"
temperature = 0.2

[image]
number_of_images = 2
"##,
    )
    .unwrap();

    let config = load_from_path(&path).unwrap();
    assert_eq!(config.chat.model, "gemini-2.5-pro");
    assert_eq!(config.chat.temperature, 0.2);
    assert_eq!(config.image.number_of_images, 2);
    // Defaults preserved
    assert_eq!(config.image.aspect_ratio, "16:9");
    assert_eq!(config.api.key_env, "GEMINI_API_KEY");
}

#[test]
fn load_invalid_toml_returns_parse_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "this is not valid toml {{{").unwrap();

    let err = load_from_path(&path).unwrap_err();
    assert!(matches!(err, uplink_common::ConfigError::ParseError(_)));
}

#[test]
fn load_keeps_out_of_range_values() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[chat]\ntemperature = 9.0\n").unwrap();

    let config = load_from_path(&path).unwrap();
    assert_eq!(config.chat.temperature, 9.0);
}

#[test]
fn create_and_load_default_config() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("uplink").join("config.toml");

    assert!(create_default_config(&path).unwrap());
    assert!(path.exists());

    let config = load_from_path(&path).unwrap();
    assert_eq!(config.chat.model, "gemini-2.5-flash");
    assert_eq!(config.image.model, "imagen-4.0-generate-001");
}

#[test]
fn default_template_parses_to_defaults() {
    let config: crate::UplinkConfig =
        toml::from_str(&super::template::default_config_toml()).unwrap();
    assert!(crate::validation::validate(&config).is_ok());
}

#[test]
fn default_config_path_ends_with_uplink() {
    if let Ok(path) = default_config_path() {
        assert!(path.ends_with("uplink/config.toml"));
    }
}

#[test]
fn template_never_overwrites_existing_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[chat]\nmodel = \"mine\"\n").unwrap();

    assert!(!create_default_config(&path).unwrap());
    assert_eq!(load_from_path(&path).unwrap().chat.model, "mine");
}

#[test]
fn load_or_create_writes_template_on_first_run() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("config.toml");

    let first = load_or_create(&path).unwrap();
    assert_eq!(first.chat.model, "gemini-2.5-flash");
    assert!(path.exists());

    std::fs::write(&path, "[image]\nnumber_of_images = 3\n").unwrap();
    let second = load_or_create(&path).unwrap();
    assert_eq!(second.image.number_of_images, 3);
}

#[test]
fn blank_file_yields_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "  \n\n").unwrap();

    let config = load_from_path(&path).unwrap();
    assert_eq!(config.image.aspect_ratio, "16:9");
}

#[test]
fn parse_error_names_the_file() {
    let err = parse_config("[chat\n", Path::new("/etc/uplink/config.toml")).unwrap_err();
    match err {
        uplink_common::ConfigError::ParseError(msg) => {
            assert!(msg.starts_with("/etc/uplink/config.toml: "))
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn directory_in_place_of_file_is_a_read_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = load_from_path(dir.path()).unwrap_err();
    assert!(matches!(err, uplink_common::ConfigError::ParseError(_)));
}
