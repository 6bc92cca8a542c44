//! Data models shared across providers

use std::{fmt, str::FromStr, time::Duration};

use serde::{Deserialize, Serialize};

use crate::error::ProviderError;

/// Default transport timeout applied when none is configured
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// The supported AI backends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderType {
    /// OpenAI chat completions API
    OpenAi,
    /// Anthropic messages API
    Anthropic,
    /// Google Gemini generateContent API
    Gemini,
    /// Local inference via an OpenAI-compatible Ollama server
    Ollama,
    /// Azure OpenAI deployments
    Azure,
}

impl ProviderType {
    /// All supported provider types, in configuration-tag order
    pub fn all() -> [ProviderType; 5] {
        [
            ProviderType::OpenAi,
            ProviderType::Anthropic,
            ProviderType::Gemini,
            ProviderType::Ollama,
            ProviderType::Azure,
        ]
    }

    /// The configuration tag for this provider type
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderType::OpenAi => "openai",
            ProviderType::Anthropic => "anthropic",
            ProviderType::Gemini => "gemini",
            ProviderType::Ollama => "ollama",
            ProviderType::Azure => "azure",
        }
    }
}

impl fmt::Display for ProviderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProviderType {
    type Err = ProviderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "openai" => Ok(ProviderType::OpenAi),
            "anthropic" => Ok(ProviderType::Anthropic),
            "gemini" => Ok(ProviderType::Gemini),
            "ollama" => Ok(ProviderType::Ollama),
            "azure" => Ok(ProviderType::Azure),
            other => Err(ProviderError::UnsupportedProvider(other.to_string())),
        }
    }
}

/// Validated configuration for one AI backend
///
/// Immutable for the lifetime of the provider instance; reconfiguration
/// constructs a new provider rather than mutating this value.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// API key (may be empty only for the local-inference provider)
    pub api_key: String,
    /// Base endpoint URL; empty means "use the provider's default"
    pub endpoint: String,
    /// Model used when a request does not name one
    pub default_model: String,
    /// Transport timeout
    pub timeout: Duration,
}

impl ProviderConfig {
    pub fn new(
        api_key: impl Into<String>,
        endpoint: impl Into<String>,
        default_model: impl Into<String>,
    ) -> Self {
        Self {
            api_key: api_key.into(),
            endpoint: endpoint.into(),
            default_model: default_model.into(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Override the transport timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// A single completion request, created per call site and never persisted
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CompletionRequest {
    /// Prompt content (becomes the single user message)
    pub prompt: String,
    /// Model override; falls back to the provider's default model
    pub model: Option<String>,
    /// Maximum tokens to generate
    pub max_tokens: Option<u32>,
    /// Sampling temperature (0.0 to 2.0)
    pub temperature: Option<f32>,
    /// Optional system message prepended to the conversation
    pub system_prompt: Option<String>,
}

impl CompletionRequest {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            ..Self::default()
        }
    }
}

/// Token usage reported by a backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenUsage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

/// Normalized completion response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionResponse {
    /// Generated text, trimmed of leading and trailing whitespace
    pub text: String,
    /// Usage statistics; `None` when the backend reports none, never zeros
    pub usage: Option<TokenUsage>,
    /// Wall-clock time from just before the network call to just after parse
    pub response_time: Option<Duration>,
}
