//! Image generation request and response types.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use uplink_common::ImageArtifact;

use crate::AiError;

/// Per-request image settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageRequest {
    pub aspect_ratio: String,
    pub number_of_images: u32,
    pub output_mime_type: String,
}

impl Default for ImageRequest {
    fn default() -> Self {
        Self {
            aspect_ratio: "16:9".into(),
            number_of_images: 1,
            output_mime_type: "image/jpeg".into(),
        }
    }
}

/// A base64 payload as returned by the service, not yet decoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImagePart {
    pub mime_type: String,
    pub data: String,
}

impl ImagePart {
    pub fn decode(&self) -> Result<ImageArtifact, AiError> {
        let bytes = BASE64
            .decode(self.data.trim().as_bytes())
            .map_err(|e| AiError::Decode(format!("image base64 decode failed: {e}")))?;
        Ok(ImageArtifact::new(self.mime_type.clone(), bytes))
    }
}

/// Everything the image model returned for one prompt. May be empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImageResponse {
    pub parts: Vec<ImagePart>,
}

impl ImageResponse {
    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }
}
