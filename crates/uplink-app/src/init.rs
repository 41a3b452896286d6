//! Startup wiring: config sections into model clients.
//!
//! Failures here never abort startup. The affected service stays offline
//! and the console keeps running.

use std::sync::Arc;

use uplink_ai::{ChatSession, GeminiClient, GeminiConfig, GeminiImageClient, ImageBackend, ImageRequest};
use uplink_config::schema::ImageConfig;
use uplink_config::UplinkConfig;

pub fn gemini_config(config: &UplinkConfig, api_key: String) -> GeminiConfig {
    GeminiConfig::new(api_key)
        .with_base_url(config.api.base_url.clone())
        .with_model(config.chat.model.clone())
        .with_max_output_tokens(config.chat.max_output_tokens)
        .with_temperature(config.chat.temperature)
        .with_system_instruction(config.chat.system_instruction.clone())
        .with_grounding(config.chat.grounding)
}

/// Build the chat session, or `None` when the client cannot be created.
pub fn init_chat_session(config: &UplinkConfig, api_key: Option<&str>) -> Option<ChatSession> {
    let Some(key) = api_key else {
        tracing::error!(
            "Chat offline: no API key in ${} or $API_KEY",
            config.api.key_env
        );
        return None;
    };

    match GeminiClient::new(gemini_config(config, key.to_string())) {
        Ok(client) => {
            tracing::info!(model = %config.chat.model, "Chat session ready");
            Some(ChatSession::new(Arc::new(client)))
        }
        Err(e) => {
            tracing::error!("Chat offline: {e}");
            None
        }
    }
}

pub fn init_image_backend(
    config: &UplinkConfig,
    api_key: Option<&str>,
) -> Option<Arc<dyn ImageBackend>> {
    let Some(key) = api_key else {
        tracing::error!("Image offline: no API key");
        return None;
    };

    match GeminiImageClient::new(key, config.image.model.clone()) {
        Ok(client) => {
            tracing::info!(model = %config.image.model, "Image backend ready");
            Some(Arc::new(client.with_base_url(config.api.base_url.clone())))
        }
        Err(e) => {
            tracing::error!("Image offline: {e}");
            None
        }
    }
}

pub fn image_request(config: &ImageConfig) -> ImageRequest {
    ImageRequest {
        aspect_ratio: config.aspect_ratio.clone(),
        number_of_images: config.number_of_images,
        output_mime_type: config.output_mime_type.clone(),
    }
}
