//! Sidekick AI providers - unified abstraction over multiple AI completion backends
//!
//! This crate provides a consistent completion interface for different AI providers
//! (OpenAI, Anthropic, Gemini, Ollama, Azure OpenAI) behind a single trait, plus a
//! service layer that injects defaults and exposes the higher-level code operations
//! (explain, document, refactor, import analysis).

pub mod error;
pub mod factory;
pub mod models;
pub mod prompts;
pub mod provider;
pub mod providers;
pub mod service;
pub mod settings;

// Re-export commonly used types
pub use error::ProviderError;
pub use factory::create_provider;
pub use models::{
    CompletionRequest, CompletionResponse, ProviderConfig, ProviderType, TokenUsage,
};
pub use provider::Provider;
pub use providers::{
    AnthropicProvider, AzureOpenAiProvider, GeminiProvider, OllamaProvider, OpenAiProvider,
};
pub use service::CompletionService;
pub use settings::Settings;
