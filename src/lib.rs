//! # Chainfetch - Interceptor Pipeline for HTTP Clients
//!
//! Chainfetch composes an ordered list of interceptors onto a terminal
//! transport and presents the result as a single async HTTP entry point.
//!
//! ## Architecture
//!
//! ```text
//!   Pipeline::fetch(request)
//!          │                                   ▲
//!          ▼                                   │
//! ┌─────────────────┐                 ┌─────────────────┐
//! │ interceptor[0]  │ ─── request ──▶ │ interceptor[0]  │  (returns last)
//! ├─────────────────┤                 ├─────────────────┤
//! │ interceptor[1]  │ ─── request ──▶ │ interceptor[1]  │
//! ├─────────────────┤                 ├─────────────────┤
//! │      ...        │                 │      ...        │
//! └─────────────────┘                 └─────────────────┘
//!          │                                   ▲
//!          ▼                                   │
//! ┌─────────────────────────────────────────────────────┐
//! │            Transport (network I/O)                  │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! Requests travel down the chain in list order; responses and failures
//! travel back up in reverse. Any interceptor may short-circuit by returning
//! without calling its continuation.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use chainfetch::prelude::*;
//!
//! #[interceptor(name = "debug-header")]
//! async fn debug_header(request: FetchRequest, next: Next) -> Result<FetchResponse, FetchError> {
//!     tracing::info!("[Outgoing Request] {:?}", request);
//!     next.run(request.with_header("X-DEBUG", "TESTING")).await
//! }
//!
//! #[tokio::main]
//! async fn main() -> Result<(), FetchError> {
//!     let pipeline = Pipeline::builder()
//!         .interceptor(LoggingInterceptor::new())
//!         .interceptor(DebugHeaderInterceptor::new())
//!         .build(HyperTransport::new());
//!
//!     let response = pipeline.fetch(FetchRequest::get("http://localhost:8080/")).await?;
//!     println!("{}", response.status);
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod http;
pub mod interceptors;
pub mod pipeline;
pub mod transport;

/// Re-export commonly used types.
pub mod prelude {
    pub use crate::error::{FetchError, TransportErrorKind};
    pub use crate::http::{FetchRequest, FetchResponse, Headers, Method, StatusCode};
    pub use crate::interceptors::{
        BearerAuthInterceptor, CacheInterceptor, LoggingInterceptor, RetryInterceptor,
        SetHeaderInterceptor, StatusErrorInterceptor, TimeoutInterceptor, TokenStore,
    };
    pub use crate::pipeline::{
        interceptor_fn, Interceptor, Next, Pipeline, PipelineBuilder, PipelineConfig,
    };
    pub use crate::transport::{transport_fn, HyperTransport, Transport};
    pub use async_trait::async_trait;
    pub use chainfetch_macro::interceptor;
}

// Re-export for convenience
pub use error::{FetchError, TransportErrorKind};
pub use http::{FetchRequest, FetchResponse};
pub use pipeline::{Interceptor, Next, Pipeline, PipelineConfig};
pub use transport::{HyperTransport, Transport};
