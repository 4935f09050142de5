//! Request/response logging.

use crate::error::FetchError;
use crate::http::{FetchRequest, FetchResponse};
use crate::pipeline::{Interceptor, Next};
use async_trait::async_trait;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Logs every outgoing request and the outcome that comes back.
#[derive(Debug, Clone, Default)]
pub struct LoggingInterceptor {
    log_headers: bool,
}

impl LoggingInterceptor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Also log request headers at debug level.
    pub fn with_headers(mut self) -> Self {
        self.log_headers = true;
        self
    }
}

#[async_trait]
impl Interceptor for LoggingInterceptor {
    async fn intercept(
        &self,
        request: FetchRequest,
        next: Next,
    ) -> Result<FetchResponse, FetchError> {
        let method = request.method();
        let url = request.url().to_string();
        let started = Instant::now();

        info!("[Outgoing Request] {} {}", method, url);
        if self.log_headers {
            debug!("Request headers: {:?}", request.headers());
        }

        let result = next.run(request).await;

        match &result {
            Ok(response) => info!(
                "[Incoming Response] {} {} -> {} in {:?}",
                method,
                url,
                response.status,
                started.elapsed()
            ),
            Err(e) => warn!(
                "[Failed Request] {} {} -> {} after {:?}",
                method,
                url,
                e,
                started.elapsed()
            ),
        }

        result
    }

    fn name(&self) -> &str {
        "logging"
    }
}
