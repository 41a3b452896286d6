//! Configuration schema types for Uplink.
//!
//! All structs use `serde(default)` so partial configs work correctly.

mod api;
mod chat;
mod image;
mod status;
mod system;

pub use api::*;
pub use chat::*;
pub use image::*;
pub use status::*;
pub use system::*;

use serde::{Deserialize, Serialize};

/// Current config schema version.
pub const CONFIG_SCHEMA_VERSION: u32 = 1;

/// Root configuration for Uplink.
///
/// Only override what you want to change.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct UplinkConfig {
    pub api: ApiConfig,
    pub chat: ChatConfig,
    pub image: ImageConfig,
    pub status: StatusConfig,
    pub logging: LoggingConfig,
}

// =============================================================================
// Tests
// =============================================================================
