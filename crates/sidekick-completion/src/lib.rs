//! Sidekick inline completion
//!
//! Produces at most one ephemeral suggestion per keystroke burst: a rolling
//! debounce gate throttles requests, the AI response is reduced to its first
//! line, and suggestions duplicating text already after the cursor are
//! suppressed.

pub mod config;
pub mod context;
pub mod controller;
pub mod types;

pub use config::ControllerConfig;
pub use controller::InlineCompletionController;
pub use types::{InlineSuggestion, Position};
