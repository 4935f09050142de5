//! Bearer token attachment.

use crate::error::FetchError;
use crate::http::{FetchRequest, FetchResponse};
use crate::pipeline::{Interceptor, Next};
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info};

/// Shared access token, owned outside the pipeline.
///
/// The host updates it (after a login or refresh); every pipeline holding
/// the store reads the current value per request.
#[derive(Debug, Default)]
pub struct TokenStore {
    token: RwLock<Option<String>>,
}

impl TokenStore {
    /// Create an empty token store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store holding `token`.
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: RwLock::new(Some(token.into())),
        }
    }

    /// Replace the current token.
    pub async fn set(&self, token: impl Into<String>) {
        *self.token.write().await = Some(token.into());
        info!("Access token updated");
    }

    /// Forget the current token.
    pub async fn clear(&self) {
        *self.token.write().await = None;
        info!("Access token cleared");
    }

    /// Get a copy of the current token.
    pub async fn get(&self) -> Option<String> {
        self.token.read().await.clone()
    }
}

/// Attaches `Authorization: Bearer <token>` from a [`TokenStore`].
///
/// Requests that already carry an `Authorization` header, and requests made
/// while the store is empty, are forwarded unchanged.
#[derive(Debug, Clone)]
pub struct BearerAuthInterceptor {
    store: Arc<TokenStore>,
}

impl BearerAuthInterceptor {
    pub fn new(store: Arc<TokenStore>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &Arc<TokenStore> {
        &self.store
    }
}

#[async_trait]
impl Interceptor for BearerAuthInterceptor {
    async fn intercept(
        &self,
        request: FetchRequest,
        next: Next,
    ) -> Result<FetchResponse, FetchError> {
        if request.headers().contains("Authorization") {
            return next.run(request).await;
        }

        match self.store.get().await {
            Some(token) => {
                debug!("Attaching bearer token to {}", request.url());
                let authorized = request.with_header("Authorization", format!("Bearer {}", token));
                next.run(authorized).await
            }
            None => next.run(request).await,
        }
    }

    fn name(&self) -> &str {
        "bearer-auth"
    }
}
