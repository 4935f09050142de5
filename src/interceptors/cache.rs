//! In-memory response cache for `GET` requests.

use crate::error::FetchError;
use crate::http::{FetchRequest, FetchResponse, Method};
use crate::pipeline::{Interceptor, Next};
use async_trait::async_trait;
use std::collections::HashMap;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;
use tracing::debug;

/// Entries are per URL and per credential.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct CacheKey {
    url: String,
    authorization: Option<String>,
}

impl CacheKey {
    fn for_request(request: &FetchRequest) -> Self {
        Self {
            url: request.url().to_string(),
            authorization: request.get_header("Authorization").map(str::to_string),
        }
    }
}

/// Cached response with its insertion time.
struct CacheEntry {
    response: FetchResponse,
    stored_at: Instant,
}

/// Serves repeated `GET` requests from memory.
///
/// A fresh hit short-circuits the chain: nothing behind the cache runs.
/// Only successful responses are stored, keyed by URL and `Authorization`
/// value, so a changed token never sees another credential's response.
/// Place it inside any auth interceptor. Any other method sent to a URL
/// evicts that URL's entries before being forwarded.
pub struct CacheInterceptor {
    ttl: Duration,
    entries: RwLock<HashMap<CacheKey, CacheEntry>>,
}

impl CacheInterceptor {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Drop every entry for `url`, whatever credential stored it.
    pub async fn invalidate(&self, url: &str) {
        self.entries.write().await.retain(|key, _| key.url != url);
    }

    /// Drop every entry.
    pub async fn clear(&self) {
        self.entries.write().await.clear();
    }

    /// Number of stored entries, fresh or not.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    async fn lookup(&self, key: &CacheKey) -> Option<FetchResponse> {
        let entries = self.entries.read().await;
        entries
            .get(key)
            .filter(|entry| entry.stored_at.elapsed() < self.ttl)
            .map(|entry| entry.response.clone())
    }
}

#[async_trait]
impl Interceptor for CacheInterceptor {
    async fn intercept(
        &self,
        request: FetchRequest,
        next: Next,
    ) -> Result<FetchResponse, FetchError> {
        if request.method() != Method::Get {
            self.invalidate(request.url()).await;
            return next.run(request).await;
        }

        let key = CacheKey::for_request(&request);
        if let Some(response) = self.lookup(&key).await {
            debug!("Cache hit for {}", key.url);
            return Ok(response);
        }

        let response = next.run(request).await?;

        if response.status.is_success() {
            debug!("Caching response for {}", key.url);
            self.entries.write().await.insert(
                key,
                CacheEntry {
                    response: response.clone(),
                    stored_at: Instant::now(),
                },
            );
        }

        Ok(response)
    }

    fn name(&self) -> &str {
        "cache"
    }
}
