use crate::schema::{UplinkConfig, SUPPORTED_ASPECT_RATIOS, SUPPORTED_IMAGE_MIME_TYPES};

use super::helpers::{validate_not_empty, validate_one_of, validate_range};

pub(crate) fn validate_image(errors: &mut Vec<String>, config: &UplinkConfig) {
    let image = &config.image;
    validate_not_empty(errors, "image.model", &image.model);
    validate_one_of(
        errors,
        "image.aspect_ratio",
        &image.aspect_ratio,
        SUPPORTED_ASPECT_RATIOS,
    );
    validate_range(
        errors,
        "image.number_of_images",
        u64::from(image.number_of_images),
        1,
        4,
    );
    validate_one_of(
        errors,
        "image.output_mime_type",
        &image.output_mime_type,
        SUPPORTED_IMAGE_MIME_TYPES,
    );
}
