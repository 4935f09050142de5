//! Terminal handlers: the last link of a pipeline, performing real I/O.

mod client;

pub use client::HyperTransport;

use crate::error::FetchError;
use crate::http::{FetchRequest, FetchResponse};
use async_trait::async_trait;
use std::future::Future;

/// The terminal handler of a pipeline.
///
/// Implementations perform the actual network transmission. They see the
/// request exactly as the innermost interceptor forwarded it.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send a request and wait for its response.
    async fn send(&self, request: FetchRequest) -> Result<FetchResponse, FetchError>;
}

/// Transport backed by an async closure. See [`transport_fn`].
pub struct FnTransport<F> {
    f: F,
}

/// Build a transport from an async closure.
///
/// Useful for hosts that already own an HTTP client, and for tests.
pub fn transport_fn<F, Fut>(f: F) -> FnTransport<F>
where
    F: Fn(FetchRequest) -> Fut + Send + Sync,
    Fut: Future<Output = Result<FetchResponse, FetchError>> + Send + 'static,
{
    FnTransport { f }
}

#[async_trait]
impl<F, Fut> Transport for FnTransport<F>
where
    F: Fn(FetchRequest) -> Fut + Send + Sync,
    Fut: Future<Output = Result<FetchResponse, FetchError>> + Send + 'static,
{
    async fn send(&self, request: FetchRequest) -> Result<FetchResponse, FetchError> {
        (self.f)(request).await
    }
}
