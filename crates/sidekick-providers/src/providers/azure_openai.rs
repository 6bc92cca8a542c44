//! Azure OpenAI provider implementation
//!
//! Talks to the Azure OpenAI service. Azure addresses a deployment rather
//! than a model: the request's model field is interpreted as a deployment
//! name and becomes part of the URL, and every call carries an explicit
//! api-version query parameter.

use std::time::Instant;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, warn};

use crate::error::ProviderError;
use crate::models::{CompletionRequest, CompletionResponse, ProviderConfig, TokenUsage};
use crate::provider::Provider;

const API_VERSION: &str = "2024-02-15-preview";

/// Azure OpenAI provider implementation
pub struct AzureOpenAiProvider {
    config: ProviderConfig,
    client: Client,
}

impl AzureOpenAiProvider {
    /// Create a new Azure OpenAI provider instance
    ///
    /// Azure has no default endpoint; both the resource endpoint and the
    /// API key are required.
    pub fn new(config: ProviderConfig) -> Result<Self, ProviderError> {
        if config.api_key.is_empty() {
            return Err(ProviderError::ConfigError(
                "Azure OpenAI API key is required".to_string(),
            ));
        }
        if config.endpoint.is_empty() {
            return Err(ProviderError::ConfigError(
                "Azure OpenAI endpoint is required".to_string(),
            ));
        }

        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ProviderError::ConfigError(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self { config, client })
    }

    fn chat_url(&self, deployment: &str) -> String {
        format!(
            "{}/openai/deployments/{}/chat/completions",
            self.config.endpoint.trim_end_matches('/'),
            deployment
        )
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
impl Provider for AzureOpenAiProvider {
    fn name(&self) -> &str {
        "Azure OpenAI"
    }

    async fn completion(
        &self,
        request: CompletionRequest,
    ) -> Result<CompletionResponse, ProviderError> {
        // Deployment name, not a model identifier
        let deployment = request
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
            messages,
            max_tokens: request.max_tokens,
            temperature: request.temperature,
        };

        debug!(
            "Sending completion request to Azure OpenAI deployment: {}",
            deployment
        );
        let started = Instant::now();

        let response = self
            .client
            .post(self.chat_url(&deployment))
            .query(&[("api-version", API_VERSION)])
            .header("api-key", &self.config.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                error!("Azure OpenAI API request failed: {}", e);
                self.api_error(None, e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            error!("Azure OpenAI API error ({}): {}", status, message);
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
        debug!("Probing Azure OpenAI models endpoint");
        match self
            .client
            .get(format!(
                "{}/openai/models",
                self.config.endpoint.trim_end_matches('/')
            ))
            .query(&[("api-version", API_VERSION)])
            .header("api-key", &self.config.api_key)
            .send()
            .await
        {
            Ok(response) => response.status().is_success(),
            Err(e) => {
                warn!("Azure OpenAI connection test failed: {}", e);
                false
            }
        }
    }
}

/// Azure chat completions request body; the deployment is addressed in the
/// URL, so no model field is sent
#[derive(Debug, Serialize)]
struct ChatCompletionRequest {
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

/// Azure chat completions response body
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
