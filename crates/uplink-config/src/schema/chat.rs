//! Chat model configuration.

use serde::{Deserialize, Serialize};

pub const DEFAULT_SYSTEM_INSTRUCTION: &str = "You are UPLINK, a terse field-operations console. \
Answer in plain text, lead with the conclusion, and cite sources when you use search results.";

/// Chat model configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatConfig {
    pub model: String,
    pub system_instruction: Option<String>,
    /// Sampling temperature (valid range: 0.0-2.0).
    pub temperature: f64,
    /// Output token cap (valid range: 1-65536).
    pub max_output_tokens: u32,
    /// Ground answers with web search so the model returns citations.
    pub grounding: bool,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            model: "gemini-2.5-flash".into(),
            system_instruction: Some(DEFAULT_SYSTEM_INSTRUCTION.into()),
            temperature: 0.7,
            max_output_tokens: 8192,
            grounding: true,
        }
    }
}
