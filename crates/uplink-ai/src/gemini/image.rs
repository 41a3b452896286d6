//! Image generation over Imagen `:predict` or Gemini `:generateContent`.

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::image::{ImagePart, ImageRequest, ImageResponse};
use crate::{AiError, ImageBackend};

use super::api::check_status;
use super::client::build_http_client;
use super::config::DEFAULT_BASE_URL;
use super::wire::{GenerateContentResponse, PredictResponse};

/// Image model client.
///
/// Models named `imagen-*` are called through `:predict`; any other model
/// is treated as an image-capable Gemini model.
pub struct GeminiImageClient {
    api_key: String,
    base_url: String,
    model: String,
    http: reqwest::Client,
}

impl std::fmt::Debug for GeminiImageClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiImageClient")
            .field("api_key", &"[REDACTED]")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .finish()
    }
}

impl GeminiImageClient {
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Result<Self, AiError> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(AiError::NotConfigured("API key is empty".into()));
        }
        Ok(Self {
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
            model: model.into(),
            http: build_http_client()?,
        })
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn uses_predict(&self) -> bool {
        self.model.starts_with("imagen")
    }

    pub(crate) fn api_url(&self) -> String {
        let method = if self.uses_predict() {
            "predict"
        } else {
            "generateContent"
        };
        format!(
            "{}/models/{}:{}",
            self.base_url.trim_end_matches('/'),
            self.model,
            method
        )
    }

    pub(crate) fn build_request_body(&self, prompt: &str, request: &ImageRequest) -> serde_json::Value {
        if self.uses_predict() {
            serde_json::json!({
                "instances": [{ "prompt": prompt }],
                "parameters": {
                    "sampleCount": request.number_of_images,
                    "aspectRatio": request.aspect_ratio,
                    "outputOptions": { "mimeType": request.output_mime_type },
                }
            })
        } else {
            serde_json::json!({
                "contents": [{ "role": "user", "parts": [{ "text": prompt }] }],
                "generationConfig": {
                    "responseModalities": ["TEXT", "IMAGE"],
                    "candidateCount": 1,
                    "imageConfig": { "aspectRatio": request.aspect_ratio },
                }
            })
        }
    }

    pub(crate) fn parse_response(&self, data: &str) -> Result<ImageResponse, AiError> {
        if self.uses_predict() {
            parse_predict(data)
        } else {
            parse_generate_content(data)
        }
    }
}

fn parse_predict(data: &str) -> Result<ImageResponse, AiError> {
    let response: PredictResponse =
        serde_json::from_str(data).map_err(|e| AiError::ParseError(e.to_string()))?;
    if let Some(error) = response.error {
        return Err(AiError::ApiError(error.describe()));
    }

    let parts = response
        .predictions
        .into_iter()
        .filter_map(|prediction| {
            let data = prediction.bytes_base64_encoded.filter(|d| !d.is_empty())?;
            Some(ImagePart {
                mime_type: prediction.mime_type.unwrap_or_else(|| "image/png".into()),
                data,
            })
        })
        .collect();
    Ok(ImageResponse { parts })
}

fn parse_generate_content(data: &str) -> Result<ImageResponse, AiError> {
    let response: GenerateContentResponse =
        serde_json::from_str(data).map_err(|e| AiError::ParseError(e.to_string()))?;
    if let Some(error) = response.error {
        return Err(AiError::ApiError(error.describe()));
    }

    let parts = response
        .candidates
        .into_iter()
        .filter_map(|candidate| candidate.content)
        .flat_map(|content| content.parts)
        .filter_map(|part| part.inline_data)
        .filter(|inline| !inline.data.is_empty())
        .map(|inline| ImagePart {
            mime_type: if inline.mime_type.is_empty() {
                "image/png".into()
            } else {
                inline.mime_type
            },
            data: inline.data,
        })
        .collect();
    Ok(ImageResponse { parts })
}

#[async_trait]
impl ImageBackend for GeminiImageClient {
    async fn generate(&self, prompt: &str, request: &ImageRequest) -> Result<ImageResponse, AiError> {
        let body = self.build_request_body(prompt, request);
        let url = self.api_url();

        debug!(model = %self.model, aspect_ratio = %request.aspect_ratio, "Image API request");

        let response = self
            .http
            .post(&url)
            .header("content-type", "application/json")
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| AiError::NetworkError(e.to_string()))?;

        let response = check_status(response).await?;
        let text = response
            .text()
            .await
            .map_err(|e| AiError::NetworkError(e.to_string()))?;

        let parsed = self.parse_response(&text)?;
        if parsed.is_empty() {
            warn!(model = %self.model, "Image API returned no image parts");
        }
        Ok(parsed)
    }

    fn model(&self) -> &str {
        &self.model
    }
}
