//! Google Gemini provider implementation
//!
//! Talks to the Google AI generateContent API.

use std::time::Instant;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, warn};

use crate::error::ProviderError;
use crate::models::{CompletionRequest, CompletionResponse, ProviderConfig, TokenUsage};
use crate::provider::Provider;

const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Google Gemini provider implementation
pub struct GeminiProvider {
    config: ProviderConfig,
    client: Client,
}

impl GeminiProvider {
    /// Create a new Gemini provider instance
    pub fn new(mut config: ProviderConfig) -> Result<Self, ProviderError> {
        if config.api_key.is_empty() {
            return Err(ProviderError::ConfigError(
                "Gemini API key is required".to_string(),
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
impl Provider for GeminiProvider {
    fn name(&self) -> &str {
        "Gemini"
    }

    async fn completion(
        &self,
        request: CompletionRequest,
    ) -> Result<CompletionResponse, ProviderError> {
        let model = request
            .model
            .unwrap_or_else(|| self.config.default_model.clone());

        let generation_config =
            if request.max_tokens.is_some() || request.temperature.is_some() {
                Some(GenerationConfig {
                    max_output_tokens: request.max_tokens,
                    temperature: request.temperature,
                })
            } else {
                None
            };

        let body = GenerateContentRequest {
            system_instruction: request.system_prompt.map(|text| Content {
                role: None,
                parts: vec![Part { text }],
            }),
            contents: vec![Content {
                role: Some("user"),
                parts: vec![Part {
                    text: request.prompt,
                }],
            }],
            generation_config,
        };

        debug!("Sending completion request to Gemini for model: {}", model);
        let started = Instant::now();

        let response = self
            .client
            .post(format!(
                "{}/models/{}:generateContent",
                self.config.endpoint, model
            ))
            .query(&[("key", self.config.api_key.as_str())])
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                error!("Gemini API request failed: {}", e);
                self.api_error(None, e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            error!("Gemini API error ({}): {}", status, message);
            return Err(self.api_error(Some(status.as_u16()), message));
        }

        let parsed: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| self.api_error(None, format!("Malformed response: {e}")))?;
        let elapsed = started.elapsed();

        let text = parsed
            .candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .and_then(|c| c.parts.first())
            .map(|p| p.text.trim().to_string())
            .ok_or_else(|| self.api_error(None, "No candidate content in response"))?;

        Ok(CompletionResponse {
            text,
            usage: parsed.usage_metadata.map(|u| TokenUsage {
                prompt_tokens: u.prompt_token_count,
                completion_tokens: u.candidates_token_count,
                total_tokens: u.total_token_count,
            }),
            response_time: Some(elapsed),
        })
    }

    async fn test_connection(&self) -> bool {
        debug!("Probing Gemini models endpoint");
        match self
            .client
            .get(format!("{}/models", self.config.endpoint))
            .query(&[("key", self.config.api_key.as_str())])
            .send()
            .await
        {
            Ok(response) => response.status().is_success(),
            Err(e) => {
                warn!("Gemini connection test failed: {}", e);
                false
            }
        }
    }
}

/// Gemini generateContent request body
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<Content>,
    contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

#[derive(Debug, Serialize)]
struct Content {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<&'static str>,
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
struct Part {
    text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    max_output_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

/// Gemini generateContent response body
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    usage_metadata: Option<UsageMetadata>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UsageMetadata {
    #[serde(default)]
    prompt_token_count: u32,
    #[serde(default)]
    candidates_token_count: u32,
    #[serde(default)]
    total_token_count: u32,
}
