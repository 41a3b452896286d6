//! Uplink configuration system.
//!
//! Provides TOML-based configuration for the chat and image models, the
//! status readout, and logging. All config sections use sensible defaults
//! so partial configs work out of the box.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use uplink_config::{load_config, config_to_json};
//!
//! let config = load_config(None).expect("failed to load config");
//! let json = config_to_json(&config);
//! println!("{json}");
//! ```

pub mod schema;
pub mod toml_loader;
pub mod validation;

pub use schema::{UplinkConfig, CONFIG_SCHEMA_VERSION};

use std::path::Path;

use uplink_common::ConfigError;

/// Load config from `path`, or from the platform default path when `None`.
///
/// The default path is created with a commented template if it does not
/// exist yet. The result is validated before it is returned.
pub fn load_config(path: Option<&Path>) -> Result<UplinkConfig, ConfigError> {
    let config = match path {
        Some(path) => toml_loader::load_from_path(path)?,
        None => toml_loader::load_default()?,
    };

    validation::validate(&config)?;
    Ok(config)
}

/// Serialize a config to a pretty-printed JSON string.
pub fn config_to_json(config: &UplinkConfig) -> String {
    serde_json::to_string_pretty(config)
        .unwrap_or_else(|e| format!("{{\"error\": \"failed to serialize config: {e}\"}}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_to_json_contains_all_sections() {
        let config = UplinkConfig::default();
        let json = config_to_json(&config);
        assert!(json.contains("\"api\""));
        assert!(json.contains("\"chat\""));
        assert!(json.contains("\"image\""));
        assert!(json.contains("\"status\""));
        assert!(json.contains("\"logging\""));
    }

    #[test]
    fn config_schema_version_is_1() {
        assert_eq!(CONFIG_SCHEMA_VERSION, 1);
    }

    #[test]
    fn load_config_rejects_invalid_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[image]\nnumber_of_images = 12\n").unwrap();

        let err = load_config(Some(&path)).unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
        assert!(err.to_string().contains("image.number_of_images"));
    }

    #[test]
    fn load_config_from_explicit_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[chat]\nmodel = \"gemini-2.5-pro\"\n").unwrap();

        let config = load_config(Some(&path)).unwrap();
        assert_eq!(config.chat.model, "gemini-2.5-pro");
    }
}
