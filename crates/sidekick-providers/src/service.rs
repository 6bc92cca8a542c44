//! Completion service
//!
//! Owns the single active provider and exposes the high-level operations.
//! Reconfiguration swaps the provider reference atomically: readers always
//! see either the old or the new fully-constructed instance.

use std::sync::Arc;

use parking_lot::RwLock;
use tracing::debug;

use crate::error::ProviderError;
use crate::factory::create_provider;
use crate::models::{CompletionRequest, CompletionResponse, ProviderConfig, ProviderType};
use crate::prompts;
use crate::provider::Provider;

/// Token budget injected when a request carries none
pub const DEFAULT_MAX_TOKENS: u32 = 1000;
/// Temperature injected when a request carries none
pub const DEFAULT_TEMPERATURE: f32 = 0.7;

/// High-level AI service over the active provider
///
/// Constructed once at the composition root and passed down by reference;
/// there is no global instance.
pub struct CompletionService {
    provider: RwLock<Option<Arc<dyn Provider>>>,
}

impl CompletionService {
    /// Create a service with no active provider
    pub fn new() -> Self {
        Self {
            provider: RwLock::new(None),
        }
    }

    /// Create a service around an already-constructed provider
    ///
    /// This is the injection seam used by tests and by hosts that build
    /// providers themselves.
    pub fn with_provider(provider: Arc<dyn Provider>) -> Self {
        Self {
            provider: RwLock::new(Some(provider)),
        }
    }

    /// Construct a provider for the given type and make it active
    ///
    /// The previous provider, if any, is released; it holds no unmanaged
    /// state, so replacement is a plain reference swap.
    pub fn configure(
        &self,
        provider_type: ProviderType,
        config: ProviderConfig,
    ) -> Result<(), ProviderError> {
        let provider = create_provider(provider_type, config)?;
        debug!("Configured AI provider: {}", provider.name());
        *self.provider.write() = Some(provider);
        Ok(())
    }

    /// Whether a provider is currently active
    pub fn is_configured(&self) -> bool {
        self.provider.read().is_some()
    }

    /// Display name of the active provider
    pub fn provider_name(&self) -> Option<String> {
        self.provider
            .read()
            .as_ref()
            .map(|p| p.name().to_string())
    }

    /// The closed set of supported provider types
    pub fn supported_providers(&self) -> [ProviderType; 5] {
        ProviderType::all()
    }

    /// Probe the active provider's backend; `false` when unconfigured
    pub async fn test_connection(&self) -> bool {
        let provider = self.provider.read().clone();
        match provider {
            Some(provider) => provider.test_connection().await,
            None => false,
        }
    }

    fn active(&self) -> Result<Arc<dyn Provider>, ProviderError> {
        self.provider.read().clone().ok_or(ProviderError::NotConfigured)
    }

    /// Send a completion request through the active provider
    ///
    /// Injects the default system prompt, token budget, and temperature for
    /// any field the caller left unset, then delegates; provider errors are
    /// propagated unchanged.
    pub async fn completion(
        &self,
        mut request: CompletionRequest,
    ) -> Result<CompletionResponse, ProviderError> {
        let provider = self.active()?;

        if request.system_prompt.is_none() {
            request.system_prompt = Some(prompts::DEFAULT_SYSTEM_PROMPT.to_string());
        }
        if request.max_tokens.is_none() {
            request.max_tokens = Some(DEFAULT_MAX_TOKENS);
        }
        if request.temperature.is_none() {
            request.temperature = Some(DEFAULT_TEMPERATURE);
        }

        provider.completion(request).await
    }

    /// Complete a code fragment from its surrounding context
    ///
    /// Uses the service-level defaults; the inline controller carries its
    /// own tuning instead.
    pub async fn complete_code(&self, context: &str) -> Result<String, ProviderError> {
        let response = self
            .completion(CompletionRequest::new(prompts::completion_prompt(context)))
            .await?;
        Ok(response.text)
    }

    /// Explain a code snippet
    pub async fn explain_code(&self, code: &str) -> Result<String, ProviderError> {
        let response = self
            .completion(CompletionRequest {
                prompt: prompts::explain_prompt(code),
                max_tokens: Some(300),
                temperature: Some(0.5),
                ..CompletionRequest::default()
            })
            .await?;
        Ok(response.text)
    }

    /// Generate documentation for a code snippet
    pub async fn generate_documentation(
        &self,
        code: &str,
        language: &str,
    ) -> Result<String, ProviderError> {
        let response = self
            .completion(CompletionRequest {
                prompt: prompts::documentation_prompt(code, language),
                max_tokens: Some(400),
                temperature: Some(0.5),
                ..CompletionRequest::default()
            })
            .await?;
        Ok(response.text)
    }

    /// Suggest a refactoring for a code snippet given surrounding context
    pub async fn generate_refactoring_suggestion(
        &self,
        code: &str,
        context: &str,
    ) -> Result<String, ProviderError> {
        let response = self
            .completion(CompletionRequest {
                prompt: prompts::refactoring_prompt(code, context),
                max_tokens: Some(500),
                temperature: Some(0.5),
                ..CompletionRequest::default()
            })
            .await?;
        Ok(response.text)
    }

    /// Detect missing external imports in a code snippet
    ///
    /// The model answers with import statements one per line, or the
    /// `NO_MISSING_IMPORTS` sentinel.
    pub async fn analyze_code_for_imports(
        &self,
        code: &str,
        language: &str,
    ) -> Result<String, ProviderError> {
        let response = self
            .completion(CompletionRequest {
                prompt: prompts::import_analysis_prompt(code, language),
                max_tokens: Some(200),
                temperature: Some(0.3),
                ..CompletionRequest::default()
            })
            .await?;
        Ok(response.text)
    }
}

impl Default for CompletionService {
    fn default() -> Self {
        Self::new()
    }
}
