//! Interceptor pipeline: composition, continuation and configuration.

mod config;
mod handler;
mod interceptor;

pub use config::PipelineConfig;
pub use handler::{Pipeline, PipelineBuilder};
pub use interceptor::{interceptor_fn, FnInterceptor, Interceptor, Next};
