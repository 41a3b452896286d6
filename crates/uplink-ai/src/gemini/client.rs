//! Gemini chat client struct, request building, and fragment parsing.

use tracing::debug;
use uplink_common::{ChatRole, Citation};

use crate::{AiError, Fragment, Message, TokenUsage};

use super::config::GeminiConfig;
use super::wire::GenerateContentResponse;

/// Gemini chat API client.
pub struct GeminiClient {
    pub(crate) config: GeminiConfig,
    pub(crate) http: reqwest::Client,
}

impl GeminiClient {
    /// Build a client. Fails when the key is blank or the HTTP client
    /// cannot be constructed.
    pub fn new(config: GeminiConfig) -> Result<Self, AiError> {
        if config.api_key.trim().is_empty() {
            return Err(AiError::NotConfigured("API key is empty".into()));
        }
        let http = build_http_client()?;
        Ok(Self { config, http })
    }

    pub fn config(&self) -> &GeminiConfig {
        &self.config
    }

    pub(crate) fn stream_url(&self) -> String {
        format!(
            "{}/models/{}:streamGenerateContent?alt=sse",
            self.config.base_url.trim_end_matches('/'),
            self.config.model
        )
    }

    /// Build the JSON request body: prior turns, then the new message.
    pub(crate) fn build_request_body(
        &self,
        history: &[Message],
        message: &str,
    ) -> serde_json::Value {
        let mut contents: Vec<serde_json::Value> = history
            .iter()
            .map(|msg| {
                let role = match msg.role {
                    ChatRole::User => "user",
                    ChatRole::Assistant => "model",
                };
                serde_json::json!({
                    "role": role,
                    "parts": [{ "text": msg.content }]
                })
            })
            .collect();
        contents.push(serde_json::json!({
            "role": "user",
            "parts": [{ "text": message }]
        }));

        let mut body = serde_json::json!({
            "contents": contents,
            "generationConfig": {
                "maxOutputTokens": self.config.max_output_tokens,
                "temperature": self.config.temperature,
            }
        });

        if let Some(ref instruction) = self.config.system_instruction {
            body["systemInstruction"] = serde_json::json!({
                "parts": [{ "text": instruction }]
            });
        }

        if self.config.grounding {
            body["tools"] = serde_json::json!([{ "googleSearch": {} }]);
        }

        body
    }
}

/// Shared HTTP client setup. Only the connect phase is bounded; request
/// duration is left to the service.
pub(crate) fn build_http_client() -> Result<reqwest::Client, AiError> {
    reqwest::Client::builder()
        .connect_timeout(std::time::Duration::from_secs(10))
        .build()
        .map_err(|e| AiError::NotConfigured(format!("failed to build HTTP client: {e}")))
}

/// Parse one SSE `data:` payload into a fragment.
///
/// An `error` object in the payload means the service aborted the stream.
pub(crate) fn parse_fragment(data: &str) -> Result<Fragment, AiError> {
    let response: GenerateContentResponse =
        serde_json::from_str(data).map_err(|e| AiError::ParseError(e.to_string()))?;

    if let Some(error) = response.error {
        return Err(AiError::ApiError(error.describe()));
    }

    let mut fragment = Fragment::default();

    if let Some(candidate) = response.candidates.into_iter().next() {
        if let Some(content) = candidate.content {
            for part in content.parts {
                if part.thought {
                    continue;
                }
                if let Some(text) = part.text {
                    fragment.text.push_str(&text);
                }
            }
        }

        if let Some(grounding) = candidate.grounding_metadata {
            fragment.citations = grounding
                .grounding_chunks
                .into_iter()
                .filter_map(|chunk| chunk.web)
                .filter(|web| !web.uri.is_empty())
                .map(|web| Citation::new(web.title, web.uri))
                .collect();
        }

        if let Some(reason) = candidate.finish_reason {
            debug!(finish_reason = %reason, "Gemini candidate finished");
        }
    }

    if let Some(meta) = response.usage_metadata {
        fragment.usage = Some(TokenUsage {
            input_tokens: meta.prompt_token_count,
            output_tokens: meta.candidates_token_count,
        });
    }

    Ok(fragment)
}
