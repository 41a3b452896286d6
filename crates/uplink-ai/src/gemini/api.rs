//! ChatBackend implementation for GeminiClient (streaming).

use async_trait::async_trait;
use futures_util::StreamExt;
use tracing::debug;

use crate::streaming::sse_events;
use crate::{AiError, ChatBackend, FragmentStream, Message};

use super::client::{parse_fragment, GeminiClient};

/// Map a non-success HTTP status to an error, reading the body for context.
pub(crate) async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, AiError> {
    let status = response.status();
    if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
        return Err(AiError::RateLimited);
    }
    if !status.is_success() {
        let text = response.text().await.unwrap_or_default();
        return Err(AiError::ApiError(format!("HTTP {status}: {text}")));
    }
    Ok(response)
}

#[async_trait]
impl ChatBackend for GeminiClient {
    async fn open_stream(
        &self,
        history: &[Message],
        message: &str,
    ) -> Result<FragmentStream, AiError> {
        let body = self.build_request_body(history, message);
        let url = self.stream_url();

        debug!(
            model = %self.config.model,
            history = history.len(),
            "Gemini API streaming request"
        );

        let response = self
            .http
            .post(&url)
            .header("content-type", "application/json")
            .header("x-goog-api-key", &self.config.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| AiError::NetworkError(e.to_string()))?;

        let response = check_status(response).await?;

        let fragments = sse_events(Box::pin(response.bytes_stream()))
            .map(|event| event.and_then(|event| parse_fragment(&event.data)));

        Ok(Box::pin(fragments))
    }

    fn model(&self) -> &str {
        &self.config.model
    }
}
