//! Validation for the api and status sections.

use crate::schema::UplinkConfig;

use super::helpers::{validate_not_empty, validate_range};

pub(crate) fn validate_api(errors: &mut Vec<String>, config: &UplinkConfig) {
    validate_not_empty(errors, "api.key_env", &config.api.key_env);
    let base = config.api.base_url.trim();
    if !(base.starts_with("https://") || base.starts_with("http://")) {
        errors.push(format!("api.base_url = \"{base}\" must be an http(s) URL"));
    }
}

pub(crate) fn validate_status(errors: &mut Vec<String>, config: &UplinkConfig) {
    validate_range(
        errors,
        "status.tick_interval_ms",
        config.status.tick_interval_ms,
        100,
        60000,
    );
}
