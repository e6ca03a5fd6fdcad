//! Upstream Fetcher Module
//!
//! Issues the single outbound call behind a cache miss and races it against
//! the caller's cancellation token.

use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use tokio::sync::oneshot;
use tokio_util::sync::CancellationToken;
use tracing::warn;

use crate::error::{CacheError, Result};

// == Upstream Fetcher ==
/// Fetches payloads from the configured upstream data service.
///
/// One outbound `GET http://{upstream_host}/serve/{key}` per invocation, no
/// retries. The response is accepted only if its declared content type
/// contains `application/json`.
#[derive(Debug, Clone)]
pub struct UpstreamFetcher {
    /// host:port of the upstream data service
    upstream_host: String,
    /// Shared HTTP client (connection pooling across fetches)
    client: Client,
}

impl UpstreamFetcher {
    // == Constructor ==
    /// Creates a new UpstreamFetcher for the given upstream host:port.
    pub fn new(upstream_host: impl Into<String>) -> Self {
        Self {
            upstream_host: upstream_host.into(),
            client: Client::new(),
        }
    }

    /// The configured upstream host:port.
    pub fn upstream_host(&self) -> &str {
        &self.upstream_host
    }

    // == Fetch ==
    /// Fetches the payload for `key`, racing the request against `cancel`.
    ///
    /// The request runs in a spawned worker that hands its outcome back
    /// through a oneshot channel. If the token fires first this returns
    /// [`CacheError::Timeout`] immediately; the worker still runs to
    /// completion in the background, and since the oneshot slot holds its
    /// result without a listening receiver the handoff never blocks.
    ///
    /// Cancellation is cooperative: it releases the caller, it does not abort
    /// the outbound request itself.
    ///
    /// Every failure is logged here before being returned.
    pub async fn fetch(&self, key: &str, cancel: CancellationToken) -> Result<Vec<u8>> {
        let url = format!("http://{}/serve/{}", self.upstream_host, key);
        let client = self.client.clone();
        let (tx, rx) = oneshot::channel();

        tokio::spawn(async move {
            let _ = tx.send(request(client, url).await);
        });

        let outcome = tokio::select! {
            _ = cancel.cancelled() => Err(CacheError::Timeout),
            result = rx => match result {
                Ok(outcome) => outcome,
                Err(_) => Err(CacheError::Network(
                    "fetch worker dropped its result channel".to_string(),
                )),
            },
        };

        if let Err(err) = &outcome {
            warn!(key = %key, error = %err, "upstream fetch failed");
        }

        outcome
    }
}

// == Request ==
/// Performs the single upstream GET and validates the response shape.
///
/// Only the declared content type is checked; the numeric status code is not
/// consulted, so any response declaring `application/json` is accepted
/// verbatim.
async fn request(client: Client, url: String) -> Result<Vec<u8>> {
    let response = client
        .get(&url)
        .send()
        .await
        .map_err(|e| CacheError::Network(e.to_string()))?;

    let content_type = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned);

    match content_type.as_deref() {
        Some(ct) if ct.contains("application/json") => {}
        _ => return Err(CacheError::InvalidContentType(content_type)),
    }

    let body = response
        .bytes()
        .await
        .map_err(|e| CacheError::Network(e.to_string()))?;

    Ok(body.to_vec())
}
