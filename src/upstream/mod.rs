//! Upstream Module
//!
//! Outbound fetch path toward the upstream data service.

mod fetcher;

pub use fetcher::UpstreamFetcher;
