//! AI engine for Uplink.
//!
//! Provides the Gemini chat and image clients with:
//! - Streaming (SSE) responses delivered as typed [`Fragment`]s
//! - Grounding citations collected from search-backed answers
//! - A conversation session that carries history between requests
//! - Token usage tracking

pub mod fragment;
pub mod gemini;
pub mod image;
pub mod session;
pub mod streaming;
pub mod token_tracker;

use std::pin::Pin;

use async_trait::async_trait;
use futures_util::Stream;
use uplink_common::ChatRole;

pub use fragment::Fragment;
pub use gemini::{GeminiClient, GeminiConfig, GeminiImageClient};
pub use image::{ImagePart, ImageRequest, ImageResponse};
pub use session::ChatSession;
pub use token_tracker::TokenTracker;

/// Incremental response fragments, in arrival order.
pub type FragmentStream = Pin<Box<dyn Stream<Item = Result<Fragment, AiError>> + Send>>;

/// A chat model that streams its reply.
#[async_trait]
pub trait ChatBackend: Send + Sync {
    /// Send `message` after `history` and return the reply as a stream.
    ///
    /// Resolves once the response headers arrive; fragments follow as the
    /// body is read.
    async fn open_stream(&self, history: &[Message], message: &str)
        -> Result<FragmentStream, AiError>;

    /// Model name used for logging and usage tracking.
    fn model(&self) -> &str;
}

/// An image model answering one prompt with a single response.
#[async_trait]
pub trait ImageBackend: Send + Sync {
    async fn generate(&self, prompt: &str, request: &ImageRequest)
        -> Result<ImageResponse, AiError>;

    fn model(&self) -> &str;
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Message {
    pub role: ChatRole,
    pub content: String,
}

impl Message {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Assistant,
            content: content.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TokenUsage {
    pub input_tokens: u64,
    pub output_tokens: u64,
}

impl TokenUsage {
    pub fn total_tokens(&self) -> u64 {
        self.input_tokens.saturating_add(self.output_tokens)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AiError {
    #[error("API error: {0}")]
    ApiError(String),
    #[error("Rate limited")]
    RateLimited,
    #[error("Network error: {0}")]
    NetworkError(String),
    #[error("Parse error: {0}")]
    ParseError(String),
    #[error("Decode error: {0}")]
    Decode(String),
    #[error("Not configured: {0}")]
    NotConfigured(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_constructors_set_role() {
        assert_eq!(Message::user("hi").role, ChatRole::User);
        assert_eq!(Message::assistant("hello").role, ChatRole::Assistant);
    }

    #[test]
    fn token_usage_total_saturates() {
        let usage = TokenUsage {
            input_tokens: u64::MAX,
            output_tokens: 5,
        };
        assert_eq!(usage.total_tokens(), u64::MAX);
    }

    #[test]
    fn ai_error_display() {
        assert_eq!(AiError::RateLimited.to_string(), "Rate limited");
        assert_eq!(
            AiError::NotConfigured("GEMINI_API_KEY is not set".into()).to_string(),
            "Not configured: GEMINI_API_KEY is not set"
        );
    }
}
