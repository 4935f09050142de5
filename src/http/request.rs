//! Fetch-like HTTP request passed through the interceptor pipeline.

use super::Headers;
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// HTTP method enumeration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Method {
    #[default]
    Get,
    Post,
    Put,
    Delete,
    Patch,
    Head,
    Options,
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Method::Get => write!(f, "GET"),
            Method::Post => write!(f, "POST"),
            Method::Put => write!(f, "PUT"),
            Method::Delete => write!(f, "DELETE"),
            Method::Patch => write!(f, "PATCH"),
            Method::Head => write!(f, "HEAD"),
            Method::Options => write!(f, "OPTIONS"),
        }
    }
}

impl From<Method> for hyper::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::Get => hyper::Method::GET,
            Method::Post => hyper::Method::POST,
            Method::Put => hyper::Method::PUT,
            Method::Delete => hyper::Method::DELETE,
            Method::Patch => hyper::Method::PATCH,
            Method::Head => hyper::Method::HEAD,
            Method::Options => hyper::Method::OPTIONS,
        }
    }
}

/// Immutable HTTP request.
///
/// Interceptors never change a request in place. The `with_*` methods borrow
/// the request and return a modified copy; headers are shared behind an
/// [`Arc`] and only duplicated when a copy actually changes them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FetchRequest {
    method: Method,
    url: String,
    headers: Arc<Headers>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    body: Option<Bytes>,
}

impl FetchRequest {
    /// Create a new FetchRequest.
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            headers: Arc::new(Headers::new()),
            body: None,
        }
    }

    /// Shorthand for a `GET` request.
    pub fn get(url: impl Into<String>) -> Self {
        Self::new(Method::Get, url)
    }

    /// Shorthand for a `POST` request.
    pub fn post(url: impl Into<String>) -> Self {
        Self::new(Method::Post, url)
    }

    /// Add a header while building the request.
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        Arc::make_mut(&mut self.headers).insert(key, value);
        self
    }

    /// Set the request body while building the request.
    pub fn body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = Some(body.into());
        self
    }

    pub fn method(&self) -> Method {
        self.method
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn headers(&self) -> &Headers {
        &self.headers
    }

    /// Get a header value.
    pub fn get_header(&self, key: &str) -> Option<&str> {
        self.headers.get(key)
    }

    pub fn body_bytes(&self) -> Option<&Bytes> {
        self.body.as_ref()
    }

    /// Copy of this request with a header set or replaced.
    pub fn with_header(&self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.clone().header(key, value)
    }

    /// Copy of this request with a header removed.
    pub fn without_header(&self, key: &str) -> Self {
        let mut copy = self.clone();
        if copy.headers.contains(key) {
            Arc::make_mut(&mut copy.headers).remove(key);
        }
        copy
    }

    /// Copy of this request targeting another URL.
    pub fn with_url(&self, url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..self.clone()
        }
    }

    /// Copy of this request with another method.
    pub fn with_method(&self, method: Method) -> Self {
        Self {
            method,
            ..self.clone()
        }
    }

    /// Copy of this request with the body replaced.
    pub fn with_body(&self, body: impl Into<Bytes>) -> Self {
        self.clone().body(body)
    }

    /// Get the body as text if present.
    pub fn text(&self) -> Option<String> {
        self.body
            .as_ref()
            .map(|b| String::from_utf8_lossy(b).to_string())
    }

    /// Parse the body as JSON if present.
    pub fn json<T: serde::de::DeserializeOwned>(&self) -> Option<Result<T, serde_json::Error>> {
        self.body
            .as_ref()
            .map(|b| serde_json::from_slice(b))
    }
}

impl Default for FetchRequest {
    fn default() -> Self {
        Self::new(Method::Get, "/")
    }
}
