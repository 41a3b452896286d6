pub mod errors;
pub mod id;
pub mod types;

pub use errors::{ConfigError, UplinkError};
pub use id::{new_correlation_id, new_id, SessionId, TurnHandle};
pub use types::{ChatRole, Citation, ImageArtifact};

pub type Result<T> = std::result::Result<T, UplinkError>;
