//! Error types for the providers crate

use thiserror::Error;

/// Errors that can occur when configuring or calling providers
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ProviderError {
    /// Required credential or endpoint missing or invalid
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// No active provider has been configured
    #[error("No AI provider configured")]
    NotConfigured,

    /// Provider type tag outside the supported set
    #[error("Unsupported provider type: {0}")]
    UnsupportedProvider(String),

    /// Transport failure, non-success HTTP status, or malformed response
    /// from a backend. Always carries the provider's display name; the
    /// status is absent for pure transport failures.
    #[error("{provider} API error: {message}")]
    Api {
        provider: String,
        status: Option<u16>,
        message: String,
    },
}

impl ProviderError {
    /// Upstream HTTP status, when the backend answered at all
    pub fn status(&self) -> Option<u16> {
        match self {
            ProviderError::Api { status, .. } => *status,
            _ => None,
        }
    }
}
