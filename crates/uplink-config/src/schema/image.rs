//! Image model configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Aspect ratios the image models accept.
pub const SUPPORTED_ASPECT_RATIOS: &[&str] = &["1:1", "3:4", "4:3", "9:16", "16:9"];

/// Output formats the image models can return.
pub const SUPPORTED_IMAGE_MIME_TYPES: &[&str] = &["image/png", "image/jpeg"];

/// Image model configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ImageConfig {
    pub model: String,
    pub aspect_ratio: String,
    /// Images per request (valid range: 1-4).
    pub number_of_images: u32,
    pub output_mime_type: String,
    /// Where decoded images are written. Defaults to `<data_dir>/uplink/images`.
    pub output_dir: Option<PathBuf>,
}

impl Default for ImageConfig {
    fn default() -> Self {
        Self {
            model: "imagen-4.0-generate-001".into(),
            aspect_ratio: "16:9".into(),
            number_of_images: 1,
            output_mime_type: "image/jpeg".into(),
            output_dir: None,
        }
    }
}

impl ImageConfig {
    pub fn resolved_output_dir(&self) -> PathBuf {
        self.output_dir.clone().unwrap_or_else(|| {
            dirs::data_dir()
                .unwrap_or_else(std::env::temp_dir)
                .join("uplink")
                .join("images")
        })
    }
}
