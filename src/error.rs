//! Failure values surfaced by the pipeline.

use crate::http::{FetchResponse, StatusCode};
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Network-level failure classes reported by a transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransportErrorKind {
    Timeout,
    ConnectionRefused,
    Dns,
    /// The request could not be turned into a wire request (bad URL, header).
    InvalidRequest,
    Other,
}

impl std::fmt::Display for TransportErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransportErrorKind::Timeout => write!(f, "timeout"),
            TransportErrorKind::ConnectionRefused => write!(f, "connection refused"),
            TransportErrorKind::Dns => write!(f, "dns failure"),
            TransportErrorKind::InvalidRequest => write!(f, "invalid request"),
            TransportErrorKind::Other => write!(f, "transport error"),
        }
    }
}

/// Pipeline error type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// The terminal transport failed.
    #[error("{kind}: {message}")]
    Transport {
        kind: TransportErrorKind,
        message: String,
    },

    /// An interceptor failed or panicked.
    #[error("interceptor '{name}' failed: {message}")]
    Interceptor { name: String, message: String },

    /// A non-2xx response surfaced as a failure.
    #[error("request failed with status {status}")]
    Application { status: StatusCode, body: Option<Bytes> },

    /// The caller cancelled the request.
    #[error("request cancelled")]
    Cancelled,
}

impl FetchError {
    /// Create a transport failure.
    pub fn transport(kind: TransportErrorKind, message: impl Into<String>) -> Self {
        FetchError::Transport {
            kind,
            message: message.into(),
        }
    }

    /// Create an interceptor failure.
    pub fn interceptor(name: impl Into<String>, message: impl Into<String>) -> Self {
        FetchError::Interceptor {
            name: name.into(),
            message: message.into(),
        }
    }

    /// Create an application failure from a response.
    pub fn application(response: FetchResponse) -> Self {
        FetchError::Application {
            status: response.status,
            body: response.body,
        }
    }

    /// Whether repeating the same request could plausibly succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            FetchError::Transport { kind, .. } => matches!(
                kind,
                TransportErrorKind::Timeout | TransportErrorKind::ConnectionRefused
            ),
            FetchError::Application { status, .. } => matches!(
                *status,
                StatusCode::BAD_GATEWAY | StatusCode::SERVICE_UNAVAILABLE | StatusCode::GATEWAY_TIMEOUT
            ),
            FetchError::Interceptor { .. } | FetchError::Cancelled => false,
        }
    }

    /// Status code carried by an application failure.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            FetchError::Application { status, .. } => Some(*status),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retryable_classification() {
        assert!(FetchError::transport(TransportErrorKind::Timeout, "slow").is_retryable());
        assert!(FetchError::transport(TransportErrorKind::ConnectionRefused, "down").is_retryable());
        assert!(!FetchError::transport(TransportErrorKind::Dns, "nx").is_retryable());
        assert!(!FetchError::interceptor("auth", "boom").is_retryable());
        assert!(!FetchError::Cancelled.is_retryable());

        let unavailable = FetchError::application(FetchResponse::new(503));
        assert!(unavailable.is_retryable());
        assert_eq!(unavailable.status(), Some(StatusCode::SERVICE_UNAVAILABLE));
        assert!(!FetchError::application(FetchResponse::new(404)).is_retryable());
    }

    #[test]
    fn test_display() {
        let err = FetchError::transport(TransportErrorKind::Timeout, "after 30s");
        assert_eq!(err.to_string(), "timeout: after 30s");

        let err = FetchError::interceptor("auth", "no token");
        assert_eq!(err.to_string(), "interceptor 'auth' failed: no token");
    }
}
