//! Anthropic provider implementation
//!
//! Talks to the Anthropic messages API.

use std::time::Instant;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, warn};

use crate::error::ProviderError;
use crate::models::{CompletionRequest, CompletionResponse, ProviderConfig, TokenUsage};
use crate::provider::Provider;

const DEFAULT_ENDPOINT: &str = "https://api.anthropic.com";
const API_VERSION: &str = "2023-06-01";

/// The messages API requires max_tokens; used when the request carries none
const FALLBACK_MAX_TOKENS: u32 = 1024;

/// Anthropic provider implementation
pub struct AnthropicProvider {
    config: ProviderConfig,
    client: Client,
}

impl AnthropicProvider {
    /// Create a new Anthropic provider instance
    pub fn new(mut config: ProviderConfig) -> Result<Self, ProviderError> {
        if config.api_key.is_empty() {
            return Err(ProviderError::ConfigError(
                "Anthropic API key is required".to_string(),
            ));
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

    fn api_error(&self, status: Option<u16>, message: impl Into<String>) -> ProviderError {
        ProviderError::Api {
            provider: self.name().to_string(),
            status,
            message: message.into(),
        }
    }
}

#[async_trait]
impl Provider for AnthropicProvider {
    fn name(&self) -> &str {
        "Anthropic"
    }

    async fn completion(
        &self,
        request: CompletionRequest,
    ) -> Result<CompletionResponse, ProviderError> {
        let model = request
            .model
            .unwrap_or_else(|| self.config.default_model.clone());

        let body = MessagesRequest {
            model: &model,
            max_tokens: request.max_tokens.unwrap_or(FALLBACK_MAX_TOKENS),
            system: request.system_prompt,
            messages: vec![WireMessage {
                role: "user",
                content: request.prompt,
            }],
            temperature: request.temperature,
        };

        debug!("Sending completion request to Anthropic for model: {}", model);
        let started = Instant::now();

        let response = self
            .client
            .post(format!("{}/v1/messages", self.config.endpoint))
            .header("x-api-key", &self.config.api_key)
            .header("anthropic-version", API_VERSION)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                error!("Anthropic API request failed: {}", e);
                self.api_error(None, e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            error!("Anthropic API error ({}): {}", status, message);
            return Err(self.api_error(Some(status.as_u16()), message));
        }

        let parsed: MessagesResponse = response
            .json()
            .await
            .map_err(|e| self.api_error(None, format!("Malformed response: {e}")))?;
        let elapsed = started.elapsed();

        let text = parsed
            .content
            .first()
            .map(|block| block.text.trim().to_string())
            .ok_or_else(|| self.api_error(None, "No content block in response"))?;

        Ok(CompletionResponse {
            text,
            usage: parsed.usage.map(|u| TokenUsage {
                prompt_tokens: u.input_tokens,
                completion_tokens: u.output_tokens,
                total_tokens: u.input_tokens + u.output_tokens,
            }),
            response_time: Some(elapsed),
        })
    }

    async fn test_connection(&self) -> bool {
        debug!("Probing Anthropic models endpoint");
        match self
            .client
            .get(format!("{}/v1/models", self.config.endpoint))
            .header("x-api-key", &self.config.api_key)
            .header("anthropic-version", API_VERSION)
            .send()
            .await
        {
            Ok(response) => response.status().is_success(),
            Err(e) => {
                warn!("Anthropic connection test failed: {}", e);
                false
            }
        }
    }
}

/// Anthropic messages API request body
#[derive(Debug, Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    system: Option<String>,
    messages: Vec<WireMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

#[derive(Debug, Serialize)]
struct WireMessage {
    role: &'static str,
    content: String,
}

/// Anthropic messages API response body
#[derive(Debug, Deserialize)]
struct MessagesResponse {
    content: Vec<ContentBlock>,
    usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    text: String,
}

#[derive(Debug, Deserialize)]
struct Usage {
    input_tokens: u32,
    output_tokens: u32,
}
