//! Host-supplied configuration
//!
//! The host editor hands over one settings object at startup and again on
//! every configuration change. Settings never mutate an existing provider:
//! they are converted into a fresh `(ProviderType, ProviderConfig)` pair
//! and the service swaps in a new instance.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ProviderError;
use crate::models::{ProviderConfig, ProviderType};

/// Extension settings as supplied by the host
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Master toggle for inline completion
    pub enabled: bool,
    /// Provider type tag (openai, anthropic, gemini, ollama, azure)
    pub provider: String,
    /// Static API key; may be empty for ollama
    pub api_key: String,
    /// Backend endpoint; empty means the provider's default
    pub api_endpoint: String,
    /// Default model (deployment name for azure)
    pub model: String,
    /// Token budget for inline completions
    pub max_tokens: u32,
    /// Sampling temperature
    pub temperature: f32,
    /// Debounce window for the inline controller
    pub debounce_time_ms: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            enabled: true,
            provider: "ollama".to_string(),
            api_key: String::new(),
            api_endpoint: String::new(),
            model: "gpt-4".to_string(),
            max_tokens: 100,
            temperature: 0.7,
            debounce_time_ms: 300,
        }
    }
}

impl Settings {
    /// Parse settings from a YAML document
    pub fn from_yaml(content: &str) -> Result<Self, ProviderError> {
        serde_yaml::from_str(content)
            .map_err(|e| ProviderError::ConfigError(format!("Failed to parse settings: {e}")))
    }

    /// Override the API key from `{PROVIDER}_API_KEY` when set
    ///
    /// Environment takes precedence over the host-supplied value.
    pub fn apply_env_overrides(&mut self) {
        let var = format!("{}_API_KEY", self.provider.to_uppercase());
        if let Ok(api_key) = std::env::var(&var) {
            self.api_key = api_key;
        }
    }

    /// The parsed provider type; unknown tags fail with `UnsupportedProvider`
    pub fn provider_type(&self) -> Result<ProviderType, ProviderError> {
        self.provider.parse()
    }

    /// The provider configuration derived from these settings
    pub fn provider_config(&self) -> ProviderConfig {
        ProviderConfig::new(
            self.api_key.clone(),
            self.api_endpoint.clone(),
            self.model.clone(),
        )
    }

    /// Debounce window as a duration
    pub fn debounce_interval(&self) -> Duration {
        Duration::from_millis(self.debounce_time_ms)
    }
}
