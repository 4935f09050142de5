//! Plain-HTTP transport over the hyper client.

use super::Transport;
use crate::error::{FetchError, TransportErrorKind};
use crate::http::{FetchRequest, FetchResponse, Headers, StatusCode};
use async_trait::async_trait;
use bytes::Bytes;
use http_body_util::{BodyExt, Full, LengthLimitError, Limited};
use hyper_util::client::legacy::connect::HttpConnector;
use hyper_util::client::legacy::Client;
use hyper_util::rt::TokioExecutor;
use std::error::Error as StdError;
use tracing::{debug, warn};

/// Transport that sends requests with `hyper_util`'s pooled client.
///
/// Only `http://` URLs are supported; TLS is left to hosts that plug in their
/// own [`Transport`].
#[derive(Clone)]
pub struct HyperTransport {
    client: Client<HttpConnector, Full<Bytes>>,
    max_body_size: usize,
}

impl HyperTransport {
    /// Create a transport with a fresh connection pool.
    pub fn new() -> Self {
        let client = Client::builder(TokioExecutor::new()).build_http();
        Self {
            client,
            max_body_size: 10 * 1024 * 1024, // 10MB
        }
    }

    /// Set the largest response body accepted, in bytes.
    pub fn max_body_size(mut self, max_body_size: usize) -> Self {
        self.max_body_size = max_body_size;
        self
    }
}

impl Default for HyperTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Transport for HyperTransport {
    async fn send(&self, request: FetchRequest) -> Result<FetchResponse, FetchError> {
        let hyper_request = build_request(&request)?;

        debug!("Transmitting {} {}", request.method(), request.url());

        let response = self.client.request(hyper_request).await.map_err(|e| {
            let kind = classify(&e);
            warn!("Transport failure for {}: {} ({})", request.url(), e, kind);
            FetchError::transport(kind, e.to_string())
        })?;

        let status = StatusCode::from(response.status());
        let headers = Headers::from(response.headers());

        let limit = self.max_body_size;
        let body = Limited::new(response.into_body(), limit)
            .collect()
            .await
            .map_err(|e| {
                if e.is::<LengthLimitError>() {
                    warn!("Response from {} exceeds {} bytes", request.url(), limit);
                    FetchError::transport(
                        TransportErrorKind::Other,
                        format!("Response body exceeds limit of {} bytes", limit),
                    )
                } else {
                    FetchError::transport(TransportErrorKind::Other, e.to_string())
                }
            })?
            .to_bytes();

        Ok(FetchResponse {
            status,
            headers,
            body: if body.is_empty() { None } else { Some(body) },
        })
    }
}

/// Convert a FetchRequest into a hyper Request.
fn build_request(request: &FetchRequest) -> Result<hyper::Request<Full<Bytes>>, FetchError> {
    let mut builder = hyper::Request::builder()
        .method(hyper::Method::from(request.method()))
        .uri(request.url());

    for (name, value) in request.headers().iter() {
        builder = builder.header(name, value);
    }

    let body = request.body_bytes().cloned().unwrap_or_default();
    builder
        .body(Full::new(body))
        .map_err(|e| FetchError::transport(TransportErrorKind::InvalidRequest, e.to_string()))
}

/// Map a client error onto the transport failure taxonomy.
fn classify(err: &hyper_util::client::legacy::Error) -> TransportErrorKind {
    let mut source = err.source();
    while let Some(cause) = source {
        if let Some(io) = cause.downcast_ref::<std::io::Error>() {
            match io.kind() {
                std::io::ErrorKind::ConnectionRefused => {
                    return TransportErrorKind::ConnectionRefused
                }
                std::io::ErrorKind::TimedOut => return TransportErrorKind::Timeout,
                _ => {}
            }
        }
        if cause.to_string().contains("dns error") {
            return TransportErrorKind::Dns;
        }
        source = cause.source();
    }

    if err.is_connect() {
        TransportErrorKind::ConnectionRefused
    } else {
        TransportErrorKind::Other
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::Method;

    #[test]
    fn test_build_request_copies_parts() {
        let request = FetchRequest::new(Method::Post, "http://localhost:9/items")
            .header("X-DEBUG", "TESTING")
            .body("{}");

        let built = build_request(&request).unwrap();
        assert_eq!(built.method(), hyper::Method::POST);
        assert_eq!(built.uri(), "http://localhost:9/items");
        assert_eq!(built.headers()["x-debug"], "TESTING");
    }

    #[test]
    fn test_build_request_rejects_bad_header() {
        let request = FetchRequest::get("http://localhost/").header("Bad Header", "x");
        let err = build_request(&request).unwrap_err();
        assert!(matches!(
            err,
            FetchError::Transport {
                kind: TransportErrorKind::InvalidRequest,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn test_endless_body_hits_size_limit() {
        use tokio::io::{AsyncReadExt, AsyncWriteExt};

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            let (mut stream, _) = listener.accept().await.unwrap();
            let mut buf = [0u8; 1024];
            let _ = stream.read(&mut buf).await;
            let head = "HTTP/1.1 200 OK\r\nTransfer-Encoding: chunked\r\n\r\n";
            if stream.write_all(head.as_bytes()).await.is_err() {
                return;
            }
            let chunk = format!("400\r\n{}\r\n", "x".repeat(1024));
            // Stream until the client hangs up.
            while stream.write_all(chunk.as_bytes()).await.is_ok() {}
        });

        let transport = HyperTransport::new().max_body_size(1024);
        let result = tokio::time::timeout(
            std::time::Duration::from_secs(5),
            transport.send(FetchRequest::get(format!("http://{}/stream", addr))),
        )
        .await
        .expect("body limit did not stop the transfer");

        match result.unwrap_err() {
            FetchError::Transport { kind, message } => {
                assert_eq!(kind, TransportErrorKind::Other);
                assert!(message.contains("exceeds limit"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_refused_connection_is_classified() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let transport = HyperTransport::new();
        let err = transport
            .send(FetchRequest::get(format!("http://{}/", addr)))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            FetchError::Transport {
                kind: TransportErrorKind::ConnectionRefused,
                ..
            }
        ));
    }
}
