use anyhow::{anyhow, Result};
use async_trait::async_trait;
use reqwest::Client as ReqwestClient;
use serde_json::Value;
use tracing::{debug, info};

use crate::service::GenerationService;
use crate::session::ResponseType;

const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
const TEXT_MODEL: &str = "gpt-4o-mini";
const IMAGE_MODEL: &str = "dall-e-3";

/// Generation backend speaking the OpenAI-compatible API: chat completions
/// for text, image generations for images.
pub struct OpenAiClient {
    client: ReqwestClient,
    api_key: String,
    base_url: String,
}

impl OpenAiClient {
    pub fn new(client: ReqwestClient, api_key: String) -> Self {
        Self::with_base_url(client, api_key, DEFAULT_BASE_URL.to_string())
    }

    // Override for tests and OpenAI-compatible gateways.
    pub fn with_base_url(client: ReqwestClient, api_key: String, base_url: String) -> Self {
        Self {
            client,
            api_key,
            base_url,
        }
    }

    async fn generate_text(&self, prompt: &str) -> Result<String> {
        let request_body = serde_json::json!({
            "model": TEXT_MODEL,
            "messages": [
                {
                    "role": "user",
                    "content": prompt
                }
            ],
            "max_tokens": 1024
        });

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();
        let json_response: Value = response.json().await?;
        debug!("chat completion response status: {}", status);

        if !status.is_success() {
            return Err(api_error(&json_response, status));
        }

        let content = json_response["choices"][0]["message"]["content"]
            .as_str()
            .ok_or_else(|| anyhow!("No text content received"))?;

        Ok(content.to_string())
    }

    async fn generate_image(&self, prompt: &str) -> Result<String> {
        let request_body = serde_json::json!({
            "model": IMAGE_MODEL,
            "prompt": prompt,
            "size": "1024x1024"
        });

        let response = self
            .client
            .post(format!("{}/images/generations", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();
        let json_response: Value = response.json().await?;
        debug!("image generation response status: {}", status);

        if !status.is_success() {
            return Err(api_error(&json_response, status));
        }

        let img_url = json_response["data"][0]["url"].as_str().unwrap_or_default();
        if img_url.is_empty() {
            return Err(anyhow!("No image URL received"));
        }

        Ok(img_url.to_string())
    }
}

// The API reports failures as {"error": {"message": ...}}; surface that
// message so the user sees what the backend said.
fn api_error(body: &Value, status: reqwest::StatusCode) -> anyhow::Error {
    match body["error"]["message"].as_str() {
        Some(message) if !message.trim().is_empty() => anyhow!("{message}"),
        _ => anyhow!("Request failed with status {status}"),
    }
}

#[async_trait]
impl GenerationService for OpenAiClient {
    async fn generate(&self, prompt: &str, response_type: ResponseType) -> Result<String> {
        info!("sending {} generation request", response_type);
        match response_type {
            ResponseType::Text => self.generate_text(prompt).await,
            ResponseType::Image => self.generate_image(prompt).await,
        }
    }
}
