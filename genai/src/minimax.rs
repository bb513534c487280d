//! MiniMax generator.
//!
//! Adapter over the MiniMax chat-completion and image-generation endpoints.
//! MiniMax signals API-level failures inside a 200 response via
//! `base_resp.status_code`, so both paths check it before extracting data.

use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};

use crate::error::{Error, Result};
use crate::Generator;

/// Default MiniMax API base URL.
pub const DEFAULT_BASE_URL: &str = "https://api.minimaxi.com";

/// Default model for text generation.
pub const DEFAULT_TEXT_MODEL: &str = "MiniMax-M2.1";

/// Default model for image generation.
pub const DEFAULT_IMAGE_MODEL: &str = "image-01";

/// MiniMax generator configuration.
#[derive(Debug, Clone)]
pub struct MiniMaxConfig {
    /// API key for authentication.
    pub api_key: String,
    /// API base URL.
    pub base_url: String,
    /// Model used for text generation.
    pub text_model: String,
    /// Model used for image generation.
    pub image_model: String,
}

impl Default for MiniMaxConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
            text_model: DEFAULT_TEXT_MODEL.to_string(),
            image_model: DEFAULT_IMAGE_MODEL.to_string(),
        }
    }
}

impl MiniMaxConfig {
    /// Creates a configuration with the default base URL and models.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            ..Default::default()
        }
    }
}

/// MiniMax generator.
pub struct MiniMaxGenerator {
    client: Client,
    config: MiniMaxConfig,
}

impl MiniMaxGenerator {
    /// Creates a new MiniMax generator.
    pub fn new(config: MiniMaxConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    /// Returns the configuration.
    pub fn config(&self) -> &MiniMaxConfig {
        &self.config
    }

    async fn post(&self, path: &str, body: &Value) -> Result<Value> {
        let url = format!("{}{}", self.config.base_url, path);
        let response = self
            .client
            .post(url)
            .bearer_auth(&self.config.api_key)
            .json(body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown".to_string());
            return Err(Error::api(status.as_u16(), message));
        }

        let value: Value = response.json().await?;
        if let Some(err) = api_error(&value, status.as_u16()) {
            return Err(err);
        }
        Ok(value)
    }
}

/// Checks the `base_resp` wrapper for an API-level error.
fn api_error(response: &Value, http_status: u16) -> Option<Error> {
    let code = response["base_resp"]["status_code"].as_i64().unwrap_or(0);
    if code == 0 {
        return None;
    }
    let message = response["base_resp"]["status_msg"]
        .as_str()
        .unwrap_or("unknown");
    Some(Error::api(http_status, format!("{message} (code={code})")))
}

fn chat_request(model: &str, prompt: &str) -> Value {
    json!({
        "model": model,
        "messages": [{"role": "user", "content": prompt}],
    })
}

fn image_request(model: &str, prompt: &str) -> Value {
    json!({
        "model": model,
        "prompt": prompt,
        "aspect_ratio": "1:1",
        "n": 1,
    })
}

fn text_from_response(response: &Value) -> Option<String> {
    response["choices"][0]["message"]["content"]
        .as_str()
        .map(str::to_string)
}

fn image_from_response(response: &Value) -> Option<String> {
    response["data"]["images"][0]["url"]
        .as_str()
        .filter(|url| !url.is_empty())
        .map(str::to_string)
}

#[async_trait]
impl Generator for MiniMaxGenerator {
    async fn generate_text(&self, prompt: &str) -> Result<String> {
        let body = chat_request(&self.config.text_model, prompt);
        let response = self.post("/v1/chat/completions", &body).await?;
        text_from_response(&response).ok_or(Error::MissingData("chat content"))
    }

    async fn generate_image(&self, prompt: &str) -> Result<String> {
        let body = image_request(&self.config.image_model, prompt);
        let response = self.post("/v1/image/generation", &body).await?;
        image_from_response(&response).ok_or(Error::MissingData("image url"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chat_request_shape() {
        let body = chat_request("MiniMax-M2.1", "hello");
        assert_eq!(body["model"], "MiniMax-M2.1");
        assert_eq!(body["messages"][0]["role"], "user");
        assert_eq!(body["messages"][0]["content"], "hello");
    }

    #[test]
    fn test_image_request_shape() {
        let body = image_request("image-01", "a fox");
        assert_eq!(body["model"], "image-01");
        assert_eq!(body["prompt"], "a fox");
        assert_eq!(body["n"], 1);
    }

    #[test]
    fn test_api_error_clean_response() {
        let response = json!({"base_resp": {"status_code": 0, "status_msg": "success"}});
        assert!(api_error(&response, 200).is_none());
        assert!(api_error(&json!({}), 200).is_none());
    }

    #[test]
    fn test_api_error_detected() {
        let response = json!({"base_resp": {"status_code": 1001, "status_msg": "invalid api key"}});
        let err = api_error(&response, 200).unwrap();
        assert!(err.to_string().contains("invalid api key"));
        assert!(err.to_string().contains("1001"));
    }

    #[test]
    fn test_text_from_response() {
        let response = json!({
            "choices": [{"message": {"role": "assistant", "content": "[1,2]"}}]
        });
        assert_eq!(text_from_response(&response).as_deref(), Some("[1,2]"));
        assert_eq!(text_from_response(&json!({})), None);
    }

    #[test]
    fn test_image_from_response() {
        let response = json!({
            "data": {"images": [{"url": "https://cdn.example/i.png"}]}
        });
        assert_eq!(
            image_from_response(&response).as_deref(),
            Some("https://cdn.example/i.png")
        );
        let empty = json!({"data": {"images": [{"url": ""}]}});
        assert_eq!(image_from_response(&empty), None);
    }
}
