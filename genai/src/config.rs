//! Provider selection and credentials.

use std::str::FromStr;
use std::sync::Arc;

use crate::error::Error;
use crate::gemini::{GeminiConfig, GeminiGenerator};
use crate::minimax::{MiniMaxConfig, MiniMaxGenerator};
use crate::Generator;

/// Environment variable selecting the provider backend.
pub const ENV_PROVIDER: &str = "SHADOWSONG_PROVIDER";

/// Environment variable holding the Gemini API key.
pub const ENV_GEMINI_API_KEY: &str = "GEMINI_API_KEY";

/// Environment variable holding the MiniMax API key.
pub const ENV_MINIMAX_API_KEY: &str = "MINIMAX_API_KEY";

/// Which provider backend to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProviderKind {
    #[default]
    Gemini,
    MiniMax,
}

impl FromStr for ProviderKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "gemini" => Ok(ProviderKind::Gemini),
            "minimax" => Ok(ProviderKind::MiniMax),
            other => Err(Error::Config(format!("unknown provider {other:?}"))),
        }
    }
}

/// Process-level configuration, read once at startup.
///
/// Missing keys become empty strings: requests then fail provider-side and
/// the melody/silhouette operations fall back to their defaults, rather
/// than erroring locally.
#[derive(Debug, Clone, Default)]
pub struct Config {
    pub provider: ProviderKind,
    pub gemini_api_key: String,
    pub minimax_api_key: String,
}

impl Config {
    /// Reads configuration from the environment.
    ///
    /// An unset or unrecognized `SHADOWSONG_PROVIDER` selects Gemini.
    pub fn from_env() -> Self {
        let provider = std::env::var(ENV_PROVIDER)
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or_default();
        Self {
            provider,
            gemini_api_key: std::env::var(ENV_GEMINI_API_KEY).unwrap_or_default(),
            minimax_api_key: std::env::var(ENV_MINIMAX_API_KEY).unwrap_or_default(),
        }
    }

    /// Builds the configured provider backend.
    pub fn generator(&self) -> Arc<dyn Generator> {
        match self.provider {
            ProviderKind::Gemini => Arc::new(GeminiGenerator::new(GeminiConfig::new(
                self.gemini_api_key.clone(),
            ))),
            ProviderKind::MiniMax => Arc::new(MiniMaxGenerator::new(MiniMaxConfig::new(
                self.minimax_api_key.clone(),
            ))),
        }
    }
}
