//! Provider implementations
//!
//! One module per backend. Each provider is a free-standing struct holding
//! its validated config and an HTTP client built with the configured
//! timeout; backend wire formats stay private to their module.

pub mod anthropic;
pub mod azure_openai;
pub mod gemini;
pub mod ollama;
pub mod openai;

pub use anthropic::AnthropicProvider;
pub use azure_openai::AzureOpenAiProvider;
pub use gemini::GeminiProvider;
pub use ollama::OllamaProvider;
pub use openai::OpenAiProvider;
