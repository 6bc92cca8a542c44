//! Ollama provider implementation
//!
//! Local model execution through Ollama's OpenAI-compatible API. Runs
//! against a localhost server by default and needs no real API key; a
//! placeholder is injected to satisfy the OpenAI-shaped auth header.

use std::time::Instant;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, warn};

use crate::error::ProviderError;
use crate::models::{CompletionRequest, CompletionResponse, ProviderConfig, TokenUsage};
use crate::provider::Provider;

const DEFAULT_ENDPOINT: &str = "http://localhost:11434/v1";
const PLACEHOLDER_API_KEY: &str = "ollama";

/// Ollama provider implementation
pub struct OllamaProvider {
    config: ProviderConfig,
    client: Client,
}

impl OllamaProvider {
    /// Create a new Ollama provider instance
    ///
    /// Unlike the cloud providers, an empty API key is accepted.
    pub fn new(mut config: ProviderConfig) -> Result<Self, ProviderError> {
        if config.api_key.is_empty() {
            config.api_key = PLACEHOLDER_API_KEY.to_string();
        }
        if config.endpoint.is_empty() {
            config.endpoint = DEFAULT_ENDPOINT.to_string();
        }

        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ProviderError::ConfigError(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self { config, client })
    }

    fn auth_header(&self) -> String {
        format!("Bearer {}", self.config.api_key)
    }

    fn api_error(&self, status: Option<u16>, message: impl Into<String>) -> ProviderError {
        ProviderError::Api {
            provider: self.name().to_string(),
            status,
            message: message.into(),
        }
    }
}

#[async_trait]
impl Provider for OllamaProvider {
    fn name(&self) -> &str {
        "Ollama"
    }

    async fn completion(
        &self,
        request: CompletionRequest,
    ) -> Result<CompletionResponse, ProviderError> {
        let model = request
            .model
            .unwrap_or_else(|| self.config.default_model.clone());

        let mut messages = Vec::with_capacity(2);
        if let Some(system) = request.system_prompt {
            messages.push(WireMessage {
                role: "system",
                content: system,
            });
        }
        messages.push(WireMessage {
            role: "user",
            content: request.prompt,
        });

        let body = ChatCompletionRequest {
            model: &model,
            messages,
            max_tokens: request.max_tokens,
            temperature: request.temperature,
        };

        debug!("Sending completion request to Ollama for model: {}", model);
        let started = Instant::now();

        let response = self
            .client
            .post(format!("{}/chat/completions", self.config.endpoint))
            .header("Authorization", self.auth_header())
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                error!("Ollama API request failed: {}", e);
                self.api_error(None, e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            error!("Ollama API error ({}): {}", status, message);
            return Err(self.api_error(Some(status.as_u16()), message));
        }

        let parsed: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| self.api_error(None, format!("Malformed response: {e}")))?;
        let elapsed = started.elapsed();

        let text = parsed
            .choices
            .first()
            .and_then(|c| c.message.as_ref())
            .map(|m| m.content.trim().to_string())
            .ok_or_else(|| self.api_error(None, "No completion choice in response"))?;

        Ok(CompletionResponse {
            text,
            usage: parsed.usage.map(|u| TokenUsage {
                prompt_tokens: u.prompt_tokens,
                completion_tokens: u.completion_tokens,
                total_tokens: u.total_tokens,
            }),
            response_time: Some(elapsed),
        })
    }

    async fn test_connection(&self) -> bool {
        debug!("Probing Ollama models endpoint");
        match self
            .client
            .get(format!("{}/models", self.config.endpoint))
            .header("Authorization", self.auth_header())
            .send()
            .await
        {
            Ok(response) => response.status().is_success(),
            Err(e) => {
                warn!("Ollama connection test failed: {}", e);
                false
            }
        }
    }
}

/// OpenAI-compatible chat completions request body
#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<WireMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

#[derive(Debug, Serialize)]
struct WireMessage {
    role: &'static str,
    content: String,
}

/// OpenAI-compatible chat completions response body
#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<Choice>,
    usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: Option<ChoiceMessage>,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: String,
}

#[derive(Debug, Deserialize)]
struct Usage {
    #[serde(default)]
    prompt_tokens: u32,
    #[serde(default)]
    completion_tokens: u32,
    #[serde(default)]
    total_tokens: u32,
}
