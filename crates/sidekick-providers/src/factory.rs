//! Provider factory
//!
//! The single switch point on provider type: adding a backend means adding
//! one arm here and one provider module, nothing else branches on the type.

use std::sync::Arc;

use crate::error::ProviderError;
use crate::models::{ProviderConfig, ProviderType};
use crate::provider::Provider;
use crate::providers::{
    AnthropicProvider, AzureOpenAiProvider, GeminiProvider, OllamaProvider, OpenAiProvider,
};

/// Construct a provider for the given type and configuration
///
/// Fails with `ConfigError` when the configuration does not satisfy the
/// backend's requirements. Unknown type tags never reach this function:
/// `ProviderType::from_str` rejects them with `UnsupportedProvider`.
pub fn create_provider(
    provider_type: ProviderType,
    config: ProviderConfig,
) -> Result<Arc<dyn Provider>, ProviderError> {
    match provider_type {
        ProviderType::OpenAi => Ok(Arc::new(OpenAiProvider::new(config)?)),
        ProviderType::Anthropic => Ok(Arc::new(AnthropicProvider::new(config)?)),
        ProviderType::Gemini => Ok(Arc::new(GeminiProvider::new(config)?)),
        ProviderType::Ollama => Ok(Arc::new(OllamaProvider::new(config)?)),
        ProviderType::Azure => Ok(Arc::new(AzureOpenAiProvider::new(config)?)),
    }
}
