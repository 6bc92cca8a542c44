//! Provider trait

use async_trait::async_trait;

use crate::{
    error::ProviderError,
    models::{CompletionRequest, CompletionResponse},
};

/// Common contract implemented by every AI backend adapter
///
/// Each implementation is a free-standing value holding its own validated
/// config; there is no shared base state.
#[async_trait]
pub trait Provider: Send + Sync {
    /// The provider's human-readable display name
    fn name(&self) -> &str;

    /// Send a completion request and return the normalized response
    async fn completion(
        &self,
        request: CompletionRequest,
    ) -> Result<CompletionResponse, ProviderError>;

    /// Cheap connectivity probe; returns `false` on any failure, never errors
    async fn test_connection(&self) -> bool;
}
