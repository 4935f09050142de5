//! Stock interceptors for common cross-cutting concerns.

mod auth;
mod cache;
mod headers;
mod logging;
mod retry;
mod status;
mod timeout;

pub use auth::{BearerAuthInterceptor, TokenStore};
pub use cache::CacheInterceptor;
pub use headers::SetHeaderInterceptor;
pub use logging::LoggingInterceptor;
pub use retry::RetryInterceptor;
pub use status::StatusErrorInterceptor;
pub use timeout::TimeoutInterceptor;
