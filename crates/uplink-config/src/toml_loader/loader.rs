//! Reading `config.toml` into an [`UplinkConfig`].

use std::io::ErrorKind;
use std::path::Path;

use tracing::{debug, info, warn};
use uplink_common::ConfigError;

use crate::schema::UplinkConfig;
use crate::validation;

use super::paths::{create_default_config, default_config_path};

/// Parse config text. A blank file yields the defaults.
pub fn parse_config(content: &str, origin: &Path) -> Result<UplinkConfig, ConfigError> {
    if content.trim().is_empty() {
        debug!(path = %origin.display(), "Config file is blank; using defaults");
        return Ok(UplinkConfig::default());
    }
    toml::from_str(content)
        .map_err(|e| ConfigError::ParseError(format!("{}: {e}", origin.display())))
}

/// Load config from a specific TOML file.
///
/// Out-of-range values are reported with a warning and kept; rejecting
/// them is left to [`crate::load_config`].
pub fn load_from_path(path: &Path) -> Result<UplinkConfig, ConfigError> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            return Err(ConfigError::FileNotFound(path.to_path_buf()));
        }
        Err(e) => {
            return Err(ConfigError::ParseError(format!(
                "cannot read {}: {e}",
                path.display()
            )));
        }
    };

    let config = parse_config(&content, path)?;

    if let Err(e) = validation::validate(&config) {
        warn!(path = %path.display(), "Config has invalid values: {e}");
    }

    info!(
        path = %path.display(),
        chat = %config.chat.model,
        image = %config.image.model,
        "Config loaded"
    );
    Ok(config)
}

/// Load `path`, writing the commented template there first when it is
/// missing.
pub fn load_or_create(path: &Path) -> Result<UplinkConfig, ConfigError> {
    match load_from_path(path) {
        Err(ConfigError::FileNotFound(_)) => {
            create_default_config(path)?;
            Ok(UplinkConfig::default())
        }
        loaded => loaded,
    }
}

/// Load config from `<config_dir>/uplink/config.toml`, creating it on
/// first run.
pub fn load_default() -> Result<UplinkConfig, ConfigError> {
    load_or_create(&default_config_path()?)
}
