//! Status readout configuration.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StatusConfig {
    /// Readout refresh period in milliseconds (valid range: 100-60000).
    pub tick_interval_ms: u64,
    pub show_latency: bool,
}

impl Default for StatusConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: 1000,
            show_latency: true,
        }
    }
}
