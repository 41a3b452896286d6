use crate::schema::UplinkConfig;

use super::helpers::{validate_not_empty, validate_range, validate_range_f64};

pub(crate) fn validate_chat(errors: &mut Vec<String>, config: &UplinkConfig) {
    validate_not_empty(errors, "chat.model", &config.chat.model);
    validate_range_f64(errors, "chat.temperature", config.chat.temperature, 0.0, 2.0);
    validate_range(
        errors,
        "chat.max_output_tokens",
        u64::from(config.chat.max_output_tokens),
        1,
        65536,
    );
}
