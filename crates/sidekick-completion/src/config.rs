//! Controller configuration

use std::time::Duration;

use sidekick_providers::Settings;

/// Default debounce window between suggestion requests
pub const DEFAULT_DEBOUNCE_INTERVAL: Duration = Duration::from_millis(300);

/// Runtime configuration for the inline completion controller
///
/// Rebuilt from host settings on every configuration change and handed to
/// the controller wholesale; the controller never reads settings itself.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControllerConfig {
    /// Whether inline completion is active
    pub enabled: bool,
    /// Rolling debounce window
    pub debounce_interval: Duration,
    /// Token budget forwarded with each inline request; `None` leaves the
    /// service default in effect
    pub max_tokens: Option<u32>,
    /// Sampling temperature forwarded with each inline request
    pub temperature: Option<f32>,
}

impl ControllerConfig {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            enabled: settings.enabled,
            debounce_interval: settings.debounce_interval(),
            max_tokens: Some(settings.max_tokens),
            temperature: Some(settings.temperature),
        }
    }
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            debounce_interval: DEFAULT_DEBOUNCE_INTERVAL,
            max_tokens: None,
            temperature: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_interval() {
        assert_eq!(
            ControllerConfig::default().debounce_interval,
            Duration::from_millis(300)
        );
    }

    #[test]
    fn test_from_settings() {
        let mut settings = Settings::default();
        settings.enabled = false;
        settings.debounce_time_ms = 500;
        settings.max_tokens = 150;
        settings.temperature = 0.2;

        let config = ControllerConfig::from_settings(&settings);
        assert!(!config.enabled);
        assert_eq!(config.debounce_interval, Duration::from_millis(500));
        assert_eq!(config.max_tokens, Some(150));
        assert_eq!(config.temperature, Some(0.2));
    }
}
