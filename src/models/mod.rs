//! Models Module
//!
//! DTOs for the cache server API. Cached payloads themselves are opaque bytes
//! and have no DTO; only the auxiliary endpoints carry JSON bodies.

pub mod responses;

pub use responses::*;
