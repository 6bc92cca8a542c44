//! OpenAI provider implementation
//!
//! Talks to the OpenAI chat completions API.

use std::time::Instant;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, warn};

use crate::error::ProviderError;
use crate::models::{CompletionRequest, CompletionResponse, ProviderConfig, TokenUsage};
use crate::provider::Provider;

const DEFAULT_ENDPOINT: &str = "https://api.openai.com/v1";

/// OpenAI provider implementation
pub struct OpenAiProvider {
    config: ProviderConfig,
    client: Client,
}

impl OpenAiProvider {
    /// Create a new OpenAI provider instance
    ///
    /// An empty endpoint falls back to the public OpenAI API; an empty API
    /// key is a configuration error.
    pub fn new(mut config: ProviderConfig) -> Result<Self, ProviderError> {
        if config.api_key.is_empty() {
            return Err(ProviderError::ConfigError(
                "OpenAI API key is required".to_string(),
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
impl Provider for OpenAiProvider {
    fn name(&self) -> &str {
        "OpenAI"
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

        debug!("Sending completion request to OpenAI for model: {}", model);
        let started = Instant::now();

        let response = self
            .client
            .post(format!("{}/chat/completions", self.config.endpoint))
            .header("Authorization", self.auth_header())
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                error!("OpenAI API request failed: {}", e);
                self.api_error(None, e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            error!("OpenAI API error ({}): {}", status, message);
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
        debug!("Probing OpenAI models endpoint");
        match self
            .client
            .get(format!("{}/models", self.config.endpoint))
            .header("Authorization", self.auth_header())
            .send()
            .await
        {
            Ok(response) => response.status().is_success(),
            Err(e) => {
                warn!("OpenAI connection test failed: {}", e);
                false
            }
        }
    }
}

/// OpenAI chat completions request body
#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<WireMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

/// Outgoing message
#[derive(Debug, Serialize)]
struct WireMessage {
    role: &'static str,
    content: String,
}

/// OpenAI chat completions response body
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
    prompt_tokens: u32,
    completion_tokens: u32,
    total_tokens: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_creation_empty_key() {
        let provider = OpenAiProvider::new(ProviderConfig::new("", "", "gpt-4"));
        assert!(matches!(provider, Err(ProviderError::ConfigError(_))));
    }

    #[test]
    fn test_default_endpoint_injected() {
        let provider = OpenAiProvider::new(ProviderConfig::new("sk-test", "", "gpt-4")).unwrap();
        assert_eq!(provider.config.endpoint, DEFAULT_ENDPOINT);
    }

    #[test]
    fn test_custom_endpoint_preserved() {
        let provider =
            OpenAiProvider::new(ProviderConfig::new("sk-test", "http://localhost:9999", "gpt-4"))
                .unwrap();
        assert_eq!(provider.config.endpoint, "http://localhost:9999");
    }

    #[test]
    fn test_name() {
        let provider = OpenAiProvider::new(ProviderConfig::new("sk-test", "", "gpt-4")).unwrap();
        assert_eq!(provider.name(), "OpenAI");
    }
}
