//! Engine configuration

use std::time::Duration;

use hra_domain::{DomainError, DomainResult};
use serde::{Deserialize, Serialize};

/// Default number of checks in flight.
pub const DEFAULT_CONCURRENCY: usize = 1;
/// Default pause between two dispatches, in milliseconds.
pub const DEFAULT_DELAY_MS: u64 = 100;
/// Default request timeout, in milliseconds.
pub const DEFAULT_TIMEOUT_MS: u64 = 3000;
/// Default `User-Agent`.
pub const DEFAULT_AGENT: &str = "http-response-assert";

/// Settings of a check run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Maximum number of checks with an outstanding network call.
    pub concurrency: usize,
    /// Pause after each dispatch before the next one, in milliseconds.
    pub delay_ms: u64,
    /// Request timeout used when a check does not set its own.
    pub timeout_ms: u64,
    /// `User-Agent` sent with every request.
    pub agent: String,
    /// Abort the whole run on a malformed assertion instead of failing it.
    pub strict: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            concurrency: DEFAULT_CONCURRENCY,
            delay_ms: DEFAULT_DELAY_MS,
            timeout_ms: DEFAULT_TIMEOUT_MS,
            agent: DEFAULT_AGENT.to_string(),
            strict: false,
        }
    }
}

impl EngineConfig {
    /// Sets the concurrency cap.
    #[must_use]
    pub const fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency;
        self
    }

    /// Sets the inter-dispatch delay.
    #[must_use]
    pub const fn with_delay_ms(mut self, delay_ms: u64) -> Self {
        self.delay_ms = delay_ms;
        self
    }

    /// Sets the default request timeout.
    #[must_use]
    pub const fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    /// Sets the `User-Agent`.
    #[must_use]
    pub fn with_agent(mut self, agent: impl Into<String>) -> Self {
        self.agent = agent.into();
        self
    }

    /// Enables or disables strict mode.
    #[must_use]
    pub const fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// The inter-dispatch delay as a [`Duration`].
    #[must_use]
    pub const fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }

    /// Checks the settings.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::Configuration`] for a zero concurrency, a zero
    /// timeout or an empty agent.
    pub fn validate(&self) -> DomainResult<()> {
        if self.concurrency == 0 {
            return Err(DomainError::Configuration(
                "concurrency must be at least 1".to_string(),
            ));
        }
        if self.timeout_ms == 0 {
            return Err(DomainError::Configuration(
                "timeout must be greater than 0 ms".to_string(),
            ));
        }
        if self.agent.trim().is_empty() {
            return Err(DomainError::Configuration(
                "agent must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_defaults() {
        let config = EngineConfig::default();
        assert_eq!(config.concurrency, 1);
        assert_eq!(config.delay(), Duration::from_millis(100));
        assert_eq!(config.timeout_ms, 3000);
        assert_eq!(config.agent, "http-response-assert");
        assert!(!config.strict);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_settings_keep_defaults() {
        let config: EngineConfig = serde_json::from_str(r#"{"concurrency": 4}"#).unwrap();
        assert_eq!(config.concurrency, 4);
        assert_eq!(config.delay_ms, 100);
    }

    #[test]
    fn test_validation() {
        assert!(EngineConfig::default().with_concurrency(0).validate().is_err());
        assert!(EngineConfig::default().with_timeout_ms(0).validate().is_err());
        assert!(EngineConfig::default().with_agent(" ").validate().is_err());
        assert!(EngineConfig::default().with_delay_ms(0).validate().is_ok());
    }
}
