//! Rendering surfaces for the Uplink console.
//!
//! The console writes turns, citations, notices, and images through the
//! [`RenderSurface`] and [`ImageSurface`] traits. [`Transcript`] keeps the
//! turn log in memory, [`TerminalSurface`] mirrors it to a terminal, and
//! [`ImageGallery`] writes decoded images to disk.

pub mod gallery;
pub mod status;
pub mod surface;
pub mod terminal;
pub mod transcript;

pub use gallery::ImageGallery;
pub use status::{ActivityState, StatusReadout};
pub use surface::{ImageSurface, RenderSurface};
pub use terminal::TerminalSurface;
pub use transcript::{Transcript, Turn};
