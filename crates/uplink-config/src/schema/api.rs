//! Remote API access settings.

use serde::{Deserialize, Serialize};

/// Where requests go and which environment variable holds the key.
///
/// The key itself is never stored in the config file.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub key_env: String,
    pub base_url: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            key_env: "GEMINI_API_KEY".into(),
            base_url: "https://generativelanguage.googleapis.com/v1beta".into(),
        }
    }
}

impl ApiConfig {
    /// Read the API key from the configured environment variable.
    ///
    /// Falls back to `API_KEY` when the configured variable is unset.
    pub fn resolve_key(&self) -> Option<String> {
        [self.key_env.as_str(), "API_KEY"]
            .iter()
            .filter_map(|name| std::env::var(name).ok())
            .map(|value| value.trim().to_string())
            .find(|value| !value.is_empty())
    }
}
