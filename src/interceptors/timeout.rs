//! Deadline for the rest of the chain.

use crate::error::{FetchError, TransportErrorKind};
use crate::http::{FetchRequest, FetchResponse};
use crate::pipeline::{Interceptor, Next};
use async_trait::async_trait;
use std::time::Duration;
use tracing::warn;

/// Fails with a timeout when the rest of the chain takes longer than the
/// configured duration. The in-flight call is dropped on expiry.
#[derive(Debug, Clone)]
pub struct TimeoutInterceptor {
    duration: Duration,
}

impl TimeoutInterceptor {
    pub fn new(duration: Duration) -> Self {
        Self { duration }
    }

    /// Create a timeout interceptor from whole seconds.
    pub fn from_secs(secs: u64) -> Self {
        Self::new(Duration::from_secs(secs))
    }
}

#[async_trait]
impl Interceptor for TimeoutInterceptor {
    async fn intercept(
        &self,
        request: FetchRequest,
        next: Next,
    ) -> Result<FetchResponse, FetchError> {
        let url = request.url().to_string();
        match tokio::time::timeout(self.duration, next.run(request)).await {
            Ok(result) => result,
            Err(_) => {
                warn!("Request to {} timed out after {:?}", url, self.duration);
                Err(FetchError::transport(
                    TransportErrorKind::Timeout,
                    format!("no response within {:?}", self.duration),
                ))
            }
        }
    }

    fn name(&self) -> &str {
        "timeout"
    }
}
