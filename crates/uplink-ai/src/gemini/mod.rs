//! Google Gemini API clients.
//!
//! `GeminiClient` implements [`ChatBackend`](crate::ChatBackend) over
//! `streamGenerateContent`. `GeminiImageClient` implements
//! [`ImageBackend`](crate::ImageBackend) over Imagen `predict` or an
//! image-capable Gemini model's `generateContent`.

mod api;
mod client;
mod config;
mod image;
mod wire;

#[cfg(test)]
mod tests;

pub use client::GeminiClient;
pub use config::{GeminiConfig, DEFAULT_BASE_URL};
pub use image::GeminiImageClient;
