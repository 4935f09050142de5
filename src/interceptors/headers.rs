//! Fixed header injection.

use crate::error::FetchError;
use crate::http::{FetchRequest, FetchResponse};
use crate::pipeline::{Interceptor, Next};
use async_trait::async_trait;

/// Forwards a copy of each request carrying a fixed header.
///
/// An existing value under the same name is replaced.
#[derive(Debug, Clone)]
pub struct SetHeaderInterceptor {
    label: String,
    header: String,
    value: String,
}

impl SetHeaderInterceptor {
    pub fn new(header: impl Into<String>, value: impl Into<String>) -> Self {
        let header = header.into();
        Self {
            label: format!("set-header:{}", header.to_ascii_lowercase()),
            header,
            value: value.into(),
        }
    }

    /// The `X-DEBUG: TESTING` marker header.
    pub fn debug() -> Self {
        Self::new("X-DEBUG", "TESTING")
    }

    /// Set the `User-Agent` header.
    pub fn user_agent(agent: impl Into<String>) -> Self {
        Self::new("User-Agent", agent)
    }
}

#[async_trait]
impl Interceptor for SetHeaderInterceptor {
    async fn intercept(
        &self,
        request: FetchRequest,
        next: Next,
    ) -> Result<FetchResponse, FetchError> {
        next.run(request.with_header(&self.header, &self.value)).await
    }

    fn name(&self) -> &str {
        &self.label
    }
}
