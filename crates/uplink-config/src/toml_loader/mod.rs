//! TOML config file loading and creation.

mod loader;
mod paths;
mod template;

#[cfg(test)]
mod tests;

pub use loader::{load_default, load_from_path, load_or_create, parse_config};
pub use paths::{create_default_config, default_config_path, CONFIG_DIR_NAME, CONFIG_FILE_NAME};
