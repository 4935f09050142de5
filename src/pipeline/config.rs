//! Pipeline configuration.

use super::Interceptor;
use crate::interceptors::{
    BearerAuthInterceptor, CacheInterceptor, LoggingInterceptor, RetryInterceptor,
    SetHeaderInterceptor, StatusErrorInterceptor, TimeoutInterceptor, TokenStore,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;

/// Configuration selecting which stock interceptors a pipeline runs.
///
/// Expanded by [`PipelineConfig::interceptors`] in this order, outermost
/// first: logging, retry, timeout, user agent, debug header, bearer auth,
/// cache, status errors. The cache sits inside bearer auth so it sees the
/// `Authorization` header it keys on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Whether to log every request and its outcome.
    pub log_requests: bool,
    /// `User-Agent` header attached to every request.
    pub user_agent: Option<String>,
    /// Extra `(name, value)` header attached to every request.
    pub debug_header: Option<(String, String)>,
    /// Static bearer token attached as `Authorization`.
    pub bearer_token: Option<String>,
    /// Request timeout in seconds, 0 disables it.
    pub request_timeout: u64,
    /// Retries for retryable failures.
    pub max_retries: u32,
    /// Base delay between retries in milliseconds.
    pub retry_backoff_ms: u64,
    /// Lifetime of cached `GET` responses in seconds, 0 disables caching.
    pub cache_ttl: u64,
    /// Whether non-2xx responses surface as failures.
    pub error_for_status: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            log_requests: true,
            user_agent: None,
            debug_header: None,
            bearer_token: None,
            request_timeout: 30,
            max_retries: 0,
            retry_backoff_ms: 100,
            cache_ttl: 0,
            error_for_status: false,
        }
    }
}

impl PipelineConfig {
    /// Create a new config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a config from a JSON document. Missing fields take defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Enable or disable request logging.
    pub fn log_requests(mut self, enabled: bool) -> Self {
        self.log_requests = enabled;
        self
    }

    /// Set the user agent.
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = Some(agent.into());
        self
    }

    /// Set the debug header.
    pub fn debug_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.debug_header = Some((name.into(), value.into()));
        self
    }

    /// Set the bearer token.
    pub fn bearer_token(mut self, token: impl Into<String>) -> Self {
        self.bearer_token = Some(token.into());
        self
    }

    /// Set the request timeout in seconds.
    pub fn request_timeout(mut self, secs: u64) -> Self {
        self.request_timeout = secs;
        self
    }

    /// Set the retry count.
    pub fn max_retries(mut self, retries: u32) -> Self {
        self.max_retries = retries;
        self
    }

    /// Set the base retry delay in milliseconds.
    pub fn retry_backoff_ms(mut self, ms: u64) -> Self {
        self.retry_backoff_ms = ms;
        self
    }

    /// Set the cache lifetime in seconds.
    pub fn cache_ttl(mut self, secs: u64) -> Self {
        self.cache_ttl = secs;
        self
    }

    /// Enable or disable status errors.
    pub fn error_for_status(mut self, enabled: bool) -> Self {
        self.error_for_status = enabled;
        self
    }

    /// Expand into the ordered interceptor list.
    pub fn interceptors(&self) -> Vec<Arc<dyn Interceptor>> {
        let mut interceptors: Vec<Arc<dyn Interceptor>> = Vec::new();

        if self.log_requests {
            interceptors.push(Arc::new(LoggingInterceptor::new()));
        }
        if self.max_retries > 0 {
            interceptors.push(Arc::new(
                RetryInterceptor::new(self.max_retries)
                    .backoff(Duration::from_millis(self.retry_backoff_ms)),
            ));
        }
        if self.request_timeout > 0 {
            interceptors.push(Arc::new(TimeoutInterceptor::from_secs(self.request_timeout)));
        }
        if let Some(agent) = &self.user_agent {
            interceptors.push(Arc::new(SetHeaderInterceptor::user_agent(agent)));
        }
        if let Some((name, value)) = &self.debug_header {
            interceptors.push(Arc::new(SetHeaderInterceptor::new(name, value)));
        }
        if let Some(token) = &self.bearer_token {
            let store = Arc::new(TokenStore::with_token(token));
            interceptors.push(Arc::new(BearerAuthInterceptor::new(store)));
        }
        if self.cache_ttl > 0 {
            interceptors.push(Arc::new(CacheInterceptor::new(Duration::from_secs(
                self.cache_ttl,
            ))));
        }
        if self.error_for_status {
            interceptors.push(Arc::new(StatusErrorInterceptor::new()));
        }

        interceptors
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(config: &PipelineConfig) -> Vec<String> {
        config
            .interceptors()
            .iter()
            .map(|i| i.name().to_string())
            .collect()
    }

    #[test]
    fn test_default_config() {
        let config = PipelineConfig::default();
        assert_eq!(names(&config), vec!["logging", "timeout"]);
    }

    #[test]
    fn test_everything_enabled_order() {
        let config = PipelineConfig::new()
            .user_agent("chainfetch/0.1")
            .debug_header("X-DEBUG", "TESTING")
            .bearer_token("secret")
            .max_retries(2)
            .cache_ttl(60)
            .error_for_status(true);

        assert_eq!(
            names(&config),
            vec![
                "logging",
                "retry",
                "timeout",
                "set-header:user-agent",
                "set-header:x-debug",
                "bearer-auth",
                "cache",
                "status-error",
            ]
        );
    }

    #[test]
    fn test_everything_disabled() {
        let config = PipelineConfig::new().log_requests(false).request_timeout(0);
        assert!(config.interceptors().is_empty());
    }

    #[test]
    fn test_from_json_fills_defaults() {
        let config = PipelineConfig::from_json(
            r#"{"debug_header": ["X-DEBUG", "TESTING"], "max_retries": 3}"#,
        )
        .unwrap();

        assert_eq!(
            config.debug_header,
            Some(("X-DEBUG".to_string(), "TESTING".to_string()))
        );
        assert_eq!(config.max_retries, 3);
        assert_eq!(config.request_timeout, 30);
        assert!(config.log_requests);
    }

    #[test]
    fn test_retry_backoff_setter() {
        let config = PipelineConfig::new().retry_backoff_ms(250);
        assert_eq!(config.retry_backoff_ms, 250);
    }

    #[test]
    fn test_from_json_rejects_garbage() {
        assert!(PipelineConfig::from_json("not json").is_err());
    }
}
