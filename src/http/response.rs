//! Response returned to the caller of a pipeline.

use super::Headers;
use bytes::Bytes;

/// HTTP status code as reported by the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StatusCode(pub u16);

impl StatusCode {
    pub const OK: StatusCode = StatusCode(200);
    pub const NOT_FOUND: StatusCode = StatusCode(404);
    pub const BAD_GATEWAY: StatusCode = StatusCode(502);
    pub const SERVICE_UNAVAILABLE: StatusCode = StatusCode(503);
    pub const GATEWAY_TIMEOUT: StatusCode = StatusCode(504);

    /// Check if the status code indicates success (2xx).
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.0)
    }
}

impl std::fmt::Display for StatusCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u16> for StatusCode {
    fn from(code: u16) -> Self {
        StatusCode(code)
    }
}

impl From<hyper::StatusCode> for StatusCode {
    fn from(code: hyper::StatusCode) -> Self {
        StatusCode(code.as_u16())
    }
}

/// Response produced by a transport, or by an interceptor that answers on
/// its behalf.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchResponse {
    pub status: StatusCode,
    pub headers: Headers,
    /// `None` when the server sent an empty body.
    pub body: Option<Bytes>,
}

impl FetchResponse {
    /// Create an empty response with the given status code.
    pub fn new(status: impl Into<StatusCode>) -> Self {
        Self {
            status: status.into(),
            headers: Headers::new(),
            body: None,
        }
    }

    /// Create an empty `200 OK` response.
    pub fn ok() -> Self {
        Self::new(StatusCode::OK)
    }

    /// Create a `200 OK` plain-text response, for interceptors that answer
    /// without reaching the network.
    pub fn text(content: impl Into<String>) -> Self {
        Self::ok()
            .header("Content-Type", "text/plain")
            .body(content.into())
    }

    /// Copy of this response with a header set or replaced.
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key, value);
        self
    }

    /// Replace the body.
    pub fn body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = Some(body.into());
        self
    }

    pub fn get_header(&self, key: &str) -> Option<&str> {
        self.headers.get(key)
    }

    /// Get the body as text if present.
    pub fn text_body(&self) -> Option<String> {
        self.body
            .as_ref()
            .map(|b| String::from_utf8_lossy(b).to_string())
    }

    /// Parse the body as JSON if present.
    pub fn json_body<T: serde::de::DeserializeOwned>(
        &self,
    ) -> Option<Result<T, serde_json::Error>> {
        self.body.as_ref().map(|b| serde_json::from_slice(b))
    }
}
