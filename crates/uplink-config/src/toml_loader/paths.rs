//! Where the config file lives, and first-run creation.

use std::fs::OpenOptions;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, info};
use uplink_common::ConfigError;

use super::template::default_config_toml;

pub const CONFIG_DIR_NAME: &str = "uplink";
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// `<config_dir>/uplink/config.toml`, or `~/.config/uplink/config.toml`
/// where the platform reports no config directory.
pub fn default_config_path() -> Result<PathBuf, ConfigError> {
    let base = dirs::config_dir()
        .or_else(|| dirs::home_dir().map(|home| home.join(".config")))
        .ok_or_else(|| {
            ConfigError::FileNotFound(PathBuf::from(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
        })?;
    Ok(base.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
}

fn write_error(path: &Path, e: std::io::Error) -> ConfigError {
    ConfigError::WriteError(format!("{}: {e}", path.display()))
}

/// Write the commented template to `path` unless a file is already there.
///
/// Returns `true` when the template was written.
pub fn create_default_config(path: &Path) -> Result<bool, ConfigError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| write_error(parent, e))?;
    }

    let mut file = match OpenOptions::new().write(true).create_new(true).open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == ErrorKind::AlreadyExists => {
            debug!(path = %path.display(), "Config already present; template not written");
            return Ok(false);
        }
        Err(e) => return Err(write_error(path, e)),
    };
    file.write_all(default_config_toml().as_bytes())
        .map_err(|e| write_error(path, e))?;

    info!(path = %path.display(), "Wrote default config");
    Ok(true)
}
