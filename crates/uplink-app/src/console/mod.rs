//! Console handlers: the chat aggregator, the image request, and the
//! controls that keep each of them to one request in flight.

mod chat;
mod control;
mod image;
mod status;


use std::sync::{Arc, Mutex, PoisonError};

pub use chat::ChatHandler;
pub use image::ImageHandler;
pub use status::{spawn_status_ticker, Light};

/// Shown when a chat request fails at any point.
pub const CHAT_FAILURE_NOTICE: &str = "TRANSMISSION FAILED. Uplink unstable; resubmit query.";

/// Shown when an image request cannot be completed.
pub const IMAGE_FAILURE_NOTICE: &str = "IMAGE SYNTHESIS FAILED. Uplink unstable; resubmit prompt.";

/// Shown when the image service answered but produced no image.
pub const IMAGE_EMPTY_NOTICE: &str = "IMAGE SYNTHESIS RETURNED NO IMAGERY.";

/// A surface shared between the REPL and in-flight requests.
pub type Shared<T> = Arc<Mutex<T>>;

pub fn shared<T>(value: T) -> Shared<T> {
    Arc::new(Mutex::new(value))
}

/// Run `f` with the shared value locked. The lock is never held across
/// an await point.
pub(crate) fn with_locked<T: ?Sized, R>(shared: &Mutex<T>, f: impl FnOnce(&mut T) -> R) -> R {
    let mut guard = shared.lock().unwrap_or_else(PoisonError::into_inner);
    f(&mut guard)
}

/// Why a submission was dropped without doing anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    /// Nothing but whitespace was submitted.
    Empty,
    /// The session could not be initialized at startup.
    Unavailable,
    /// The control is disabled while a request is in flight.
    Busy,
}
