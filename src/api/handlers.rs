//! API Handlers
//!
//! HTTP request handlers for the cache server endpoints. The serve handler is
//! the request orchestrator: store lookup, fetch fallback, store population,
//! response emission.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::{Path, State},
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use tokio::sync::RwLock;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::cache::CacheStore;
use crate::config::Config;
use crate::models::{HealthResponse, StatsResponse};
use crate::upstream::UpstreamFetcher;

/// Application state shared across all handlers.
///
/// The cache store is the only shared mutable resource; a single `RwLock`
/// shields the whole map, so lookups overlap and writes are exclusive.
#[derive(Clone)]
pub struct AppState {
    /// Thread-safe cache store
    pub cache: Arc<RwLock<CacheStore>>,
    /// Upstream fetch path
    pub fetcher: Arc<UpstreamFetcher>,
    /// Deadline applied to upstream fetches, if any
    pub fetch_timeout: Option<Duration>,
}

impl AppState {
    /// Creates a new AppState from its parts.
    pub fn new(
        cache: CacheStore,
        fetcher: UpstreamFetcher,
        fetch_timeout: Option<Duration>,
    ) -> Self {
        Self {
            cache: Arc::new(RwLock::new(cache)),
            fetcher: Arc::new(fetcher),
            fetch_timeout,
        }
    }

    /// Creates a new AppState from configuration.
    pub fn from_config(config: &Config) -> Self {
        Self::new(
            CacheStore::new(),
            UpstreamFetcher::new(config.upstream_host.clone()),
            config.fetch_timeout,
        )
    }
}

/// Handler for GET /serve/*key
///
/// Read-through lookup:
/// 1. Store hit: respond 200 with the cached payload.
/// 2. Miss: fetch from the upstream under the configured deadline.
/// 3. Fetch success: populate the store, respond 200 with the payload.
/// 4. Fetch failure of any kind: respond 404 with an empty body.
///
/// No retries and no per-key coalescing: concurrent misses on the same key
/// each issue their own upstream fetch, all racing to populate the same entry.
pub async fn serve_handler(State(state): State<AppState>, Path(key): Path<String>) -> Response {
    {
        let cache = state.cache.read().await;
        if let Ok(payload) = cache.get(&key) {
            debug!(key = %key, "cache hit");
            return payload_response(payload);
        }
    }

    debug!(key = %key, "cache miss, fetching from upstream");

    // Arm the deadline, if one is configured. The timer task only owns a
    // clone of the token and is dropped once the fetch resolves.
    let cancel = CancellationToken::new();
    let deadline = state.fetch_timeout.map(|timeout| {
        let token = cancel.clone();
        tokio::spawn(async move {
            tokio::time::sleep(timeout).await;
            token.cancel();
        })
    });

    let result = state.fetcher.fetch(&key, cancel).await;

    if let Some(timer) = deadline {
        timer.abort();
    }

    match result {
        Ok(payload) => {
            state.cache.write().await.set(key, payload.clone());
            payload_response(payload)
        }
        // The failure was already logged by the fetcher; the caller just
        // sees a bare 404.
        Err(err) => err.into_response(),
    }
}

/// Handler for GET /stats
///
/// Returns hit/miss counters and the current entry count.
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    let cache = state.cache.read().await;
    let stats = cache.stats();

    Json(StatsResponse::new(stats.hits(), stats.misses(), cache.len()))
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}

/// Builds the 200 response carrying a cached or freshly fetched payload.
fn payload_response(payload: Vec<u8>) -> Response {
    ([(header::CONTENT_TYPE, "application/json")], payload).into_response()
}
