//! Cache Module
//!
//! Provides the concurrency-safe in-memory key-value store.

mod stats;
mod store;


// Re-export public types
pub use stats::CacheStats;
pub use store::CacheStore;
