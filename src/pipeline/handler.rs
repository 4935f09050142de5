//! The composed handler presented to application code.

use super::interceptor::{Chain, Interceptor, Next};
use super::PipelineConfig;
use crate::error::FetchError;
use crate::http::{FetchRequest, FetchResponse};
use crate::transport::Transport;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

/// An ordered interceptor chain folded onto a terminal transport.
///
/// `interceptors[0]` sees the request first and the response last. Cloning a
/// pipeline is cheap; clones share the same interceptors and transport, and
/// concurrent calls to [`Pipeline::fetch`] do not interfere with each other.
#[derive(Clone)]
pub struct Pipeline {
    chain: Arc<Chain>,
}

impl Pipeline {
    /// Compose `interceptors` onto `transport`.
    pub fn new(interceptors: Vec<Arc<dyn Interceptor>>, transport: Arc<dyn Transport>) -> Self {
        Self {
            chain: Arc::new(Chain {
                interceptors,
                transport,
            }),
        }
    }

    /// Start building a pipeline.
    pub fn builder() -> PipelineBuilder {
        PipelineBuilder::new()
    }

    /// Build the pipeline described by `config`.
    pub fn from_config(config: &PipelineConfig, transport: Arc<dyn Transport>) -> Self {
        Self::new(config.interceptors(), transport)
    }

    /// Number of interceptors in front of the transport.
    pub fn len(&self) -> usize {
        self.chain.interceptors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chain.interceptors.is_empty()
    }

    /// Interceptor names in execution order.
    pub fn interceptor_names(&self) -> Vec<&str> {
        self.chain.interceptors.iter().map(|i| i.name()).collect()
    }

    /// Send a request through every interceptor and the transport.
    ///
    /// Dropping the returned future cancels the in-flight transport call; no
    /// further interceptors run.
    pub async fn fetch(&self, request: FetchRequest) -> Result<FetchResponse, FetchError> {
        debug!(
            "Dispatching {} {} through {} interceptors",
            request.method(),
            request.url(),
            self.len()
        );
        Next::start(Arc::clone(&self.chain)).run(request).await
    }

    /// Like [`Pipeline::fetch`], but gives up with [`FetchError::Cancelled`]
    /// as soon as `token` is cancelled.
    pub async fn fetch_with_cancel(
        &self,
        request: FetchRequest,
        token: CancellationToken,
    ) -> Result<FetchResponse, FetchError> {
        let url = request.url().to_string();
        tokio::select! {
            biased;
            _ = token.cancelled() => {
                warn!("Request to {} cancelled by caller", url);
                Err(FetchError::Cancelled)
            }
            result = self.fetch(request) => result,
        }
    }
}

impl std::fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pipeline")
            .field("interceptors", &self.interceptor_names())
            .finish()
    }
}

/// Builder collecting interceptors in execution order.
#[derive(Default)]
pub struct PipelineBuilder {
    interceptors: Vec<Arc<dyn Interceptor>>,
}

impl PipelineBuilder {
    /// Create an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an interceptor; it runs after every interceptor added before it.
    pub fn interceptor(mut self, interceptor: impl Interceptor + 'static) -> Self {
        self.interceptors.push(Arc::new(interceptor));
        self
    }

    /// Append an interceptor that is shared with other pipelines.
    pub fn shared(mut self, interceptor: Arc<dyn Interceptor>) -> Self {
        self.interceptors.push(interceptor);
        self
    }

    /// Append the interceptors described by `config`.
    pub fn config(mut self, config: &PipelineConfig) -> Self {
        self.interceptors.extend(config.interceptors());
        self
    }

    /// Finish the pipeline with its terminal transport.
    pub fn build(self, transport: impl Transport + 'static) -> Pipeline {
        Pipeline::new(self.interceptors, Arc::new(transport))
    }
}
