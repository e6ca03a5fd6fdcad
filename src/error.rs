//! Error types for the cache server
//!
//! Provides unified error handling using thiserror.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

// == Cache Error Enum ==
/// Unified error type for the cache server.
///
/// The variants distinguish failure causes for logging and tests; toward the
/// HTTP caller every variant collapses to a bare 404 (see the [`IntoResponse`]
/// impl below).
#[derive(Error, Debug)]
pub enum CacheError {
    /// Key not found in cache
    #[error("key not found: {0}")]
    NotFound(String),

    /// Upstream unreachable or I/O failure while reading the response
    #[error("upstream request failed: {0}")]
    Network(String),

    /// Upstream responded with a non-JSON declared content type (or none at all)
    #[error("invalid content type: {}", .0.as_deref().unwrap_or("<missing>"))]
    InvalidContentType(Option<String>),

    /// Caller deadline elapsed before the upstream responded
    #[error("timed out waiting for upstream response")]
    Timeout,
}

// == IntoResponse Implementation ==
impl IntoResponse for CacheError {
    /// Every fetch-path failure is indistinguishable to the caller: 404 with an
    /// empty body. The cause is logged at the failure site, not surfaced here.
    fn into_response(self) -> Response {
        StatusCode::NOT_FOUND.into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the cache server.
pub type Result<T> = std::result::Result<T, CacheError>;
