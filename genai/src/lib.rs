//! Generative provider layer for the shadowsong toy.
//!
//! One prompt goes out to a text/image provider and comes back as either a
//! short melody (scale-degree notes with durations) or a silhouette image
//! reference. Providers are interchangeable behind the [`Generator`] trait;
//! the shipped backends are Google Gemini and MiniMax, selected at startup
//! via [`Config`].
//!
//! The two toy-facing operations never fail past their boundary:
//! [`generate_melody`] falls back to the fixed default melody and
//! [`generate_silhouette`] returns `None`.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use shadowsong_genai::{generate_melody, generate_silhouette, Config};
//!
//! let generator = Config::from_env().generator();
//! let melody = generate_melody(generator.as_ref(), "the ocean").await;
//! let image = generate_silhouette(generator.as_ref(), "the ocean").await;
//! ```

pub mod config;
pub mod error;
pub mod gemini;
pub mod json;
pub mod melody;
pub mod minimax;
pub mod silhouette;

pub use config::{Config, ProviderKind};
pub use error::{Error, Result};
pub use gemini::{GeminiConfig, GeminiGenerator};
pub use melody::generate_melody;
pub use minimax::{MiniMaxConfig, MiniMaxGenerator};
pub use silhouette::{decode_data_uri, generate_silhouette};

use async_trait::async_trait;

/// A generative text/image provider.
///
/// Both operations are single HTTP round-trips; adapters perform no retries
/// and surface transport and API failures as [`Error`]. Image references are
/// either direct URLs or `data:<mime>;base64,<payload>` URIs, whichever the
/// provider produces.
#[async_trait]
pub trait Generator: Send + Sync {
    /// Generates a text completion for `prompt`.
    async fn generate_text(&self, prompt: &str) -> Result<String>;

    /// Generates an image for `prompt`, returning an image reference.
    async fn generate_image(&self, prompt: &str) -> Result<String>;
}
