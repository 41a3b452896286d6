//! Response shapes of the Generative Language API.
//!
//! Every field is optional on the wire; missing fields deserialize to
//! their defaults.

use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub(crate) struct GenerateContentResponse {
    pub candidates: Vec<Candidate>,
    pub usage_metadata: Option<UsageMetadata>,
    pub error: Option<ApiErrorBody>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub(crate) struct Candidate {
    pub content: Option<Content>,
    pub grounding_metadata: Option<GroundingMetadata>,
    pub finish_reason: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct Content {
    pub parts: Vec<Part>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub(crate) struct Part {
    pub text: Option<String>,
    /// Set on thought-summary parts, which are not part of the answer.
    pub thought: bool,
    #[serde(alias = "inline_data")]
    pub inline_data: Option<InlineData>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub(crate) struct InlineData {
    #[serde(alias = "mime_type")]
    pub mime_type: String,
    pub data: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub(crate) struct GroundingMetadata {
    pub grounding_chunks: Vec<GroundingChunk>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct GroundingChunk {
    pub web: Option<WebSource>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct WebSource {
    pub uri: String,
    pub title: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub(crate) struct UsageMetadata {
    pub prompt_token_count: u64,
    pub candidates_token_count: u64,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct ApiErrorBody {
    pub code: Option<u16>,
    pub message: String,
    pub status: Option<String>,
}

impl ApiErrorBody {
    pub(crate) fn describe(&self) -> String {
        match (&self.status, self.code) {
            (Some(status), Some(code)) => format!("{status} ({code}): {}", self.message),
            (Some(status), None) => format!("{status}: {}", self.message),
            (None, Some(code)) => format!("{code}: {}", self.message),
            (None, None) => self.message.clone(),
        }
    }
}

/// Imagen `:predict` response.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct PredictResponse {
    pub predictions: Vec<Prediction>,
    pub error: Option<ApiErrorBody>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub(crate) struct Prediction {
    pub bytes_base64_encoded: Option<String>,
    pub mime_type: Option<String>,
}
