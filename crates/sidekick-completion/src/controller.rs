//! Inline completion controller
//!
//! Two effective states, Idle and Cooldown: the rolling debounce gate
//! suppresses any request arriving within the configured interval of the
//! last one that produced a completion. Failed, cancelled, and empty
//! completions do not consume a debounce window, so the next keystroke may
//! retry immediately.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

use parking_lot::{Mutex, RwLock};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error};

use sidekick_providers::{prompts, CompletionRequest, CompletionService};

use crate::config::ControllerConfig;
use crate::context;
use crate::types::{InlineSuggestion, Position};

/// Produces at most one inline suggestion per keystroke burst
pub struct InlineCompletionController {
    service: Arc<CompletionService>,
    config: RwLock<ControllerConfig>,
    // Written only by calls that yield a non-empty completion; overlapping
    // calls are allowed and the last writer wins.
    last_request: Mutex<Option<Instant>>,
    disposed: AtomicBool,
}

impl InlineCompletionController {
    pub fn new(service: Arc<CompletionService>, config: ControllerConfig) -> Self {
        Self {
            service,
            config: RwLock::new(config),
            last_request: Mutex::new(None),
            disposed: AtomicBool::new(false),
        }
    }

    /// Replace the controller configuration (host configuration change)
    pub fn update_config(&self, config: ControllerConfig) {
        *self.config.write() = config;
    }

    /// Explicit external toggle; not a timed transition
    pub fn set_enabled(&self, enabled: bool) {
        self.config.write().enabled = enabled;
    }

    pub fn is_enabled(&self) -> bool {
        self.config.read().enabled
    }

    /// Tear down the controller; repeated calls are safe no-ops
    pub fn dispose(&self) {
        if !self.disposed.swap(true, Ordering::SeqCst) {
            debug!("Inline completion controller disposed");
        }
    }

    /// Request a suggestion for the cursor position
    ///
    /// Returns `None` whenever the suggestion is suppressed: controller
    /// disabled or disposed, service unconfigured, debounce window still
    /// open, request cancelled, provider failure, empty completion, or a
    /// completion duplicating the text already after the cursor.
    pub async fn provide(
        &self,
        document_text: &str,
        position: Position,
        cancel: &CancellationToken,
    ) -> Option<InlineSuggestion> {
        if self.disposed.load(Ordering::SeqCst) {
            return None;
        }

        let config = *self.config.read();
        let interval = config.debounce_interval;
        if !config.enabled || !self.service.is_configured() {
            return None;
        }

        {
            let last_request = self.last_request.lock();
            if let Some(last) = *last_request {
                if last.elapsed() < interval {
                    return None;
                }
            }
        }

        if cancel.is_cancelled() {
            return None;
        }

        let prompt =
            prompts::inline_completion_prompt(&context::extract_context(document_text, position));
        let request = CompletionRequest {
            prompt,
            max_tokens: config.max_tokens,
            temperature: config.temperature,
            ..CompletionRequest::default()
        };
        let response = match self.service.completion(request).await {
            Ok(response) => response,
            Err(e) => {
                // Suppress silently; the failed call does not start a cooldown
                error!("Inline completion failed: {}", e);
                return None;
            }
        };

        // Cancellation is advisory: checked after the call resolves, the
        // HTTP request itself is not aborted.
        if self.disposed.load(Ordering::SeqCst) || cancel.is_cancelled() {
            return None;
        }
        if response.text.is_empty() {
            return None;
        }

        *self.last_request.lock() = Some(Instant::now());

        // Only the first line is offered; the rest is discarded
        let first_line = response.text.lines().next().unwrap_or_default().to_string();

        let trailing = context::text_after_cursor(document_text, position).trim();
        if !trailing.is_empty() && first_line.starts_with(trailing) {
            debug!("Suppressing suggestion duplicating text after cursor");
            return None;
        }

        Some(InlineSuggestion {
            insert_text: first_line,
            position,
        })
    }
}
