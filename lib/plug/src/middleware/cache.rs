//! In-memory response cache.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use tracing::debug;

use crate::{Middleware, Request, RequestNext, Response, ResponseNext, Result};

/// Caches successful responses to safe requests in memory.
///
/// A hit short-circuits the chain: middleware registered after the cache,
/// the transport and every response hook are skipped, and the stored
/// response is delivered as is. Only `GET`, `HEAD` and `OPTIONS` requests
/// with a 2xx answer are stored.
///
/// Entries are keyed by method, full URL and the request's `Authorization`
/// values, so callers with different credentials never share an entry. No
/// other header is part of the key: requests that differ only in `Accept`
/// or similar negotiation headers get the same response. Entries never
/// expire and are not evicted; call [`Cache::clear`] to drop them.
#[derive(Debug, Default)]
pub struct Cache {
    entries: Mutex<HashMap<String, Response>>,
}

impl Cache {
    /// Create an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored responses.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries().len()
    }

    /// Returns `true` if nothing is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries().is_empty()
    }

    /// Drop every stored response.
    pub fn clear(&self) {
        self.entries().clear();
    }

    fn entries(&self) -> MutexGuard<'_, HashMap<String, Response>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn key(request: &Request) -> Option<String> {
        request.method().is_safe().then(|| {
            request.headers().get_all("authorization").fold(
                format!("{} {}", request.method(), request.url()),
                |mut key, credentials| {
                    key.push('\n');
                    key.push_str(credentials);
                    key
                },
            )
        })
    }
}

impl Middleware for Cache {
    fn name(&self) -> &str {
        "cache"
    }

    fn on_request(&self, request: Request, next: RequestNext<'_>) -> Result<()> {
        let hit = Self::key(&request).and_then(|key| self.entries().get(&key).cloned());
        match hit {
            Some(response) => {
                debug!(method = %request.method(), url = %request.url(), "cache hit");
                next.short_circuit(request, response)
            }
            None => next.run(request),
        }
    }

    fn on_response(&self, request: Request, response: Response, next: ResponseNext<'_>) -> Result<()> {
        if response.is_success()
            && let Some(key) = Self::key(&request)
        {
            debug!(
                method = %request.method(),
                url = %request.url(),
                status = response.status(),
                "caching response"
            );
            self.entries().insert(key, response.clone());
        }
        next.run(request, response)
    }
}
