//! Fetch-like HTTP value types that flow through the pipeline.

mod headers;
mod request;
mod response;

pub use headers::Headers;
pub use request::{FetchRequest, Method};
pub use response::{FetchResponse, StatusCode};
