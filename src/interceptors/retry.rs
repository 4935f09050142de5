//! Retries for transient failures.

use crate::error::FetchError;
use crate::http::{FetchRequest, FetchResponse};
use crate::pipeline::{Interceptor, Next};
use async_trait::async_trait;
use std::time::Duration;
use tracing::{debug, warn};

/// Re-runs the rest of the chain when it fails with a retryable error.
///
/// The delay before attempt `n` is `backoff * n`. Non-retryable failures and
/// the last failure once retries are exhausted propagate unchanged.
#[derive(Debug, Clone)]
pub struct RetryInterceptor {
    max_retries: u32,
    backoff: Duration,
}

impl RetryInterceptor {
    pub fn new(max_retries: u32) -> Self {
        Self {
            max_retries,
            backoff: Duration::from_millis(100),
        }
    }

    /// Set the base delay between attempts.
    pub fn backoff(mut self, backoff: Duration) -> Self {
        self.backoff = backoff;
        self
    }
}

#[async_trait]
impl Interceptor for RetryInterceptor {
    async fn intercept(
        &self,
        request: FetchRequest,
        next: Next,
    ) -> Result<FetchResponse, FetchError> {
        let mut attempt = 0;
        loop {
            match next.clone().run(request.clone()).await {
                Err(e) if e.is_retryable() && attempt < self.max_retries => {
                    attempt += 1;
                    warn!(
                        "Retrying {} {} ({}/{}) after: {}",
                        request.method(),
                        request.url(),
                        attempt,
                        self.max_retries,
                        e
                    );
                    tokio::time::sleep(self.backoff * attempt).await;
                }
                result => {
                    if attempt > 0 {
                        debug!("{} finished after {} retries", request.url(), attempt);
                    }
                    return result;
                }
            }
        }
    }

    fn name(&self) -> &str {
        "retry"
    }
}
