//! Read-Through Cache - an HTTP cache fronting a single upstream data service
//!
//! Serves cached payloads by key and populates the cache on demand from the
//! configured upstream.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod upstream;

pub use api::AppState;
pub use config::Config;
