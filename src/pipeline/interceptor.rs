//! The interceptor trait and its continuation.

use crate::error::FetchError;
use crate::http::{FetchRequest, FetchResponse};
use crate::transport::Transport;
use async_trait::async_trait;
use futures::FutureExt;
use std::any::Any;
use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use tracing::{error, trace};

/// A unit of request/response interception.
///
/// An interceptor receives the outgoing request together with [`Next`], the
/// rest of the pipeline. It may forward the request unchanged, forward a
/// modified copy, or return a response of its own without calling `next`
/// at all. Whatever `next` returns travels back through the interceptor,
/// which may observe or replace it.
#[async_trait]
pub trait Interceptor: Send + Sync {
    /// Handle a request, usually by delegating to `next`.
    async fn intercept(
        &self,
        request: FetchRequest,
        next: Next,
    ) -> Result<FetchResponse, FetchError>;

    /// Get the interceptor name, used in logs and failure reports.
    fn name(&self) -> &str;
}

/// Interceptors and terminal transport shared by a pipeline and every
/// continuation it hands out.
pub(crate) struct Chain {
    pub(crate) interceptors: Vec<Arc<dyn Interceptor>>,
    pub(crate) transport: Arc<dyn Transport>,
}

/// The rest of the pipeline, from one interceptor's point of view.
///
/// `run` consumes the continuation. Interceptors that deliberately re-issue
/// a request (retries) clone it first.
#[derive(Clone)]
pub struct Next {
    chain: Arc<Chain>,
    index: usize,
}

impl Next {
    pub(crate) fn start(chain: Arc<Chain>) -> Self {
        Self { chain, index: 0 }
    }

    /// Number of interceptors still ahead of the transport.
    pub fn remaining(&self) -> usize {
        self.chain.interceptors.len().saturating_sub(self.index)
    }

    /// Pass the request to the next interceptor, or to the transport once
    /// every interceptor has run.
    pub async fn run(self, request: FetchRequest) -> Result<FetchResponse, FetchError> {
        let Some(interceptor) = self.chain.interceptors.get(self.index).cloned() else {
            trace!("Sending {} {} to transport", request.method(), request.url());
            return self.chain.transport.send(request).await;
        };

        let next = Next {
            chain: Arc::clone(&self.chain),
            index: self.index + 1,
        };

        trace!("Entering interceptor '{}'", interceptor.name());
        let outcome = AssertUnwindSafe(interceptor.intercept(request, next))
            .catch_unwind()
            .await;

        match outcome {
            Ok(result) => result,
            Err(payload) => {
                let message = panic_message(payload.as_ref());
                error!("Interceptor '{}' panicked: {}", interceptor.name(), message);
                Err(FetchError::interceptor(interceptor.name(), message))
            }
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "panic".to_string()
    }
}

/// Interceptor backed by an async closure. See [`interceptor_fn`].
pub struct FnInterceptor<F> {
    name: String,
    f: F,
}

/// Build an interceptor from an async closure.
///
/// ```rust,no_run
/// use chainfetch::prelude::*;
///
/// let debug = interceptor_fn("debug-header", |request: FetchRequest, next: Next| async move {
///     next.run(request.with_header("X-DEBUG", "TESTING")).await
/// });
/// ```
pub fn interceptor_fn<F, Fut>(name: impl Into<String>, f: F) -> FnInterceptor<F>
where
    F: Fn(FetchRequest, Next) -> Fut + Send + Sync,
    Fut: Future<Output = Result<FetchResponse, FetchError>> + Send + 'static,
{
    FnInterceptor {
        name: name.into(),
        f,
    }
}

#[async_trait]
impl<F, Fut> Interceptor for FnInterceptor<F>
where
    F: Fn(FetchRequest, Next) -> Fut + Send + Sync,
    Fut: Future<Output = Result<FetchResponse, FetchError>> + Send + 'static,
{
    async fn intercept(
        &self,
        request: FetchRequest,
        next: Next,
    ) -> Result<FetchResponse, FetchError> {
        (self.f)(request, next).await
    }

    fn name(&self) -> &str {
        &self.name
    }
}
