//! Non-2xx responses as typed failures.

use crate::error::FetchError;
use crate::http::{FetchRequest, FetchResponse};
use crate::pipeline::{Interceptor, Next};
use async_trait::async_trait;
use tracing::debug;

/// Turns every non-2xx response into [`FetchError::Application`].
#[derive(Debug, Clone, Copy, Default)]
pub struct StatusErrorInterceptor;

impl StatusErrorInterceptor {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Interceptor for StatusErrorInterceptor {
    async fn intercept(
        &self,
        request: FetchRequest,
        next: Next,
    ) -> Result<FetchResponse, FetchError> {
        let response = next.run(request).await?;
        if response.status.is_success() {
            Ok(response)
        } else {
            debug!("Converting status {} into a failure", response.status);
            Err(FetchError::application(response))
        }
    }

    fn name(&self) -> &str {
        "status-error"
    }
}
