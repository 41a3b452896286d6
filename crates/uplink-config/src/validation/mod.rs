//! Full configuration validation.
//!
//! Validates numeric ranges and enumerated string values. Each section has
//! its own submodule; this orchestrator calls them all and collects errors
//! into a single `ConfigError`.

mod chat;
mod helpers;
mod image;
mod misc;


use crate::schema::UplinkConfig;
use uplink_common::ConfigError;

/// Run all validations on a config, collecting all errors.
pub fn validate(config: &UplinkConfig) -> Result<(), ConfigError> {
    let mut errors: Vec<String> = Vec::new();

    chat::validate_chat(&mut errors, config);
    image::validate_image(&mut errors, config);
    misc::validate_api(&mut errors, config);
    misc::validate_status(&mut errors, config);

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::ValidationError(errors.join("; ")))
    }
}
