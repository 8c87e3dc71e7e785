//! HTTP completion backend speaking the Ollama generate API.
//!
//! - `POST {base}/api/generate` with `{model, prompt, stream: false, options}`
//! - `GET {base}/api/tags` as the availability probe
//!
//! Timeouts are applied by [`ExternalAdvisor`](super::ExternalAdvisor), not here.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::{AdvisorError, CompletionBackend};
use crate::config::AdvisorConfig;

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
    options: GenerateOptions,
}

#[derive(Debug, Serialize)]
struct GenerateOptions {
    num_predict: u32,
    temperature: f32,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    response: String,
}

#[derive(Debug, Clone)]
pub struct OllamaBackend {
    client: reqwest::Client,
    base_url: String,
    model: String,
    num_predict: u32,
    temperature: f32,
}

impl OllamaBackend {
    pub fn new(config: &AdvisorConfig) -> Result<Self, AdvisorError> {
        let client = reqwest::Client::builder().build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            num_predict: config.num_predict,
            temperature: config.temperature,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

#[async_trait]
impl CompletionBackend for OllamaBackend {
    fn provider(&self) -> &str {
        "ollama"
    }

    async fn probe(&self) -> Result<(), AdvisorError> {
        let response = self.client.get(self.url("/api/tags")).send().await?;
        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(AdvisorError::Status(status.as_u16()))
        }
    }

    async fn complete(&self, prompt: &str) -> Result<String, AdvisorError> {
        let body = GenerateRequest {
            model: &self.model,
            prompt,
            stream: false,
            options: GenerateOptions {
                num_predict: self.num_predict,
                temperature: self.temperature,
            },
        };

        let response = self
            .client
            .post(self.url("/api/generate"))
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(AdvisorError::Status(status.as_u16()));
        }

        let text = response.text().await?;
        Ok(match serde_json::from_str::<GenerateResponse>(&text) {
            Ok(parsed) => parsed.response,
            Err(_) => text,
        })
    }
}
