//! Google Gemini generator.
//!
//! Thin adapter over the `generateContent` REST endpoint. Text responses are
//! collected from the first candidate's text parts; image responses come back
//! as inline base64 data and are handed out as data URIs.

use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};

use crate::error::{Error, Result};
use crate::Generator;

/// Default model for text generation.
pub const DEFAULT_TEXT_MODEL: &str = "gemini-2.0-flash";

/// Default model for image generation.
pub const DEFAULT_IMAGE_MODEL: &str = "gemini-2.0-flash-exp";

const BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Gemini generator configuration.
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    /// API key for authentication.
    pub api_key: String,
    /// Model used for text generation.
    pub text_model: String,
    /// Model used for image generation.
    pub image_model: String,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            text_model: DEFAULT_TEXT_MODEL.to_string(),
            image_model: DEFAULT_IMAGE_MODEL.to_string(),
        }
    }
}

impl GeminiConfig {
    /// Creates a configuration with the default models.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            ..Default::default()
        }
    }
}

/// Gemini generator.
pub struct GeminiGenerator {
    client: Client,
    config: GeminiConfig,
}

impl GeminiGenerator {
    /// Creates a new Gemini generator.
    pub fn new(config: GeminiConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    /// Returns the configuration.
    pub fn config(&self) -> &GeminiConfig {
        &self.config
    }

    fn api_url(&self, model: &str) -> String {
        format!(
            "{BASE_URL}/models/{}:generateContent?key={}",
            model, self.config.api_key
        )
    }

    async fn generate(&self, model: &str, body: &Value) -> Result<Value> {
        let response = self.client.post(self.api_url(model)).json(body).send().await?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown".to_string());
            return Err(Error::api(status.as_u16(), message));
        }

        Ok(response.json().await?)
    }
}

fn text_request(prompt: &str) -> Value {
    json!({
        "contents": [{
            "role": "user",
            "parts": [{"text": prompt}],
        }],
    })
}

fn image_request(prompt: &str) -> Value {
    let mut body = text_request(prompt);
    body["generationConfig"] = json!({"responseModalities": ["IMAGE", "TEXT"]});
    body
}

/// Collects the text parts of the first candidate.
fn text_from_response(response: &Value) -> Option<String> {
    let parts = response["candidates"][0]["content"]["parts"].as_array()?;
    let text: String = parts
        .iter()
        .filter_map(|part| part["text"].as_str())
        .collect();
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

/// Finds the first inline image part and assembles a data URI.
fn image_from_response(response: &Value) -> Option<String> {
    let parts = response["candidates"][0]["content"]["parts"].as_array()?;
    for part in parts {
        // The REST API returns camelCase keys; some proxies use snake_case.
        let inline = if part["inlineData"].is_object() {
            &part["inlineData"]
        } else {
            &part["inline_data"]
        };
        let mime = inline["mimeType"]
            .as_str()
            .or_else(|| inline["mime_type"].as_str());
        let Some(mime) = mime else { continue };
        if !mime.starts_with("image/") {
            continue;
        }
        if let Some(data) = inline["data"].as_str() {
            return Some(format!("data:{mime};base64,{data}"));
        }
    }
    None
}

#[async_trait]
impl Generator for GeminiGenerator {
    async fn generate_text(&self, prompt: &str) -> Result<String> {
        let response = self
            .generate(&self.config.text_model, &text_request(prompt))
            .await?;
        text_from_response(&response).ok_or(Error::MissingData("text content"))
    }

    async fn generate_image(&self, prompt: &str) -> Result<String> {
        let response = self
            .generate(&self.config.image_model, &image_request(prompt))
            .await?;
        image_from_response(&response).ok_or(Error::MissingData("inline image data"))
    }
}
