// Backend connection settings, loaded as part of the GUI's JSON config.
use serde::Deserialize;
use std::time::Duration;

use crate::error::ClientError;

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct BackendSettings {
    pub base_url: String,
    pub timeout_secs: u64,
    pub retry: RetryPolicy,
}

impl Default for BackendSettings {
    fn default() -> Self {
        BackendSettings {
            base_url: "http://localhost:5000".to_string(),
            timeout_secs: 30,
            retry: RetryPolicy::default(),
        }
    }
}

impl BackendSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Joins `path` onto the base URL, tolerating stray slashes on either side.
    pub fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    pub fn validate(&self) -> Result<(), ClientError> {
        let base = self.base_url.trim();
        if !(base.starts_with("http://") || base.starts_with("https://")) {
            return Err(ClientError::Config(format!(
                "backend base_url must be an http(s) URL, got '{}'",
                self.base_url
            )));
        }
        if self.retry.max_attempts == 0 {
            return Err(ClientError::Config("retry.max_attempts must be at least 1".to_string()));
        }
        Ok(())
    }
}

/// Exponential backoff for idempotent requests that failed in transport.
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub initial_backoff_ms: u64,
    pub max_backoff_ms: u64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        RetryPolicy {
            max_attempts: 3,
            initial_backoff_ms: 200,
            max_backoff_ms: 2_000,
        }
    }
}

impl RetryPolicy {
    pub fn none() -> Self {
        RetryPolicy { max_attempts: 1, initial_backoff_ms: 0, max_backoff_ms: 0 }
    }

    /// Delay before retry number `attempt` (1-based: the wait after the first failure is `delay_for(1)`).
    pub fn delay_for(&self, attempt: u32) -> Duration {
        let exp = attempt.saturating_sub(1).min(16);
        let ms = self
            .initial_backoff_ms
            .saturating_mul(1u64 << exp)
            .min(self.max_backoff_ms);
        Duration::from_millis(ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_join() {
        let mut settings = BackendSettings::default();
        assert_eq!(settings.endpoint("/patterns"), "http://localhost:5000/patterns");
        settings.base_url = "http://sim.local:8080/".to_string();
        assert_eq!(settings.endpoint("simulate"), "http://sim.local:8080/simulate");
    }

    #[test]
    fn test_backoff_doubles_and_caps() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.delay_for(1), Duration::from_millis(200));
        assert_eq!(policy.delay_for(2), Duration::from_millis(400));
        assert_eq!(policy.delay_for(3), Duration::from_millis(800));
        assert_eq!(policy.delay_for(10), Duration::from_millis(2_000));
    }

    #[test]
    fn test_validate_rejects_bad_settings() {
        let mut settings = BackendSettings::default();
        assert!(settings.validate().is_ok());
        settings.base_url = "localhost:5000".to_string();
        assert!(settings.validate().is_err());
        settings = BackendSettings { retry: RetryPolicy { max_attempts: 0, ..RetryPolicy::default() }, ..BackendSettings::default() };
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let settings: BackendSettings =
            serde_json::from_str(r#"{"base_url": "http://10.0.0.2:5000"}"#).unwrap();
        assert_eq!(settings.timeout_secs, 30);
        assert_eq!(settings.retry, RetryPolicy::default());
    }
}
