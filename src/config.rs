//! Configuration Module
//!
//! Handles loading and managing server configuration from environment variables.

use std::env;
use std::time::Duration;

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// host:port of the upstream data service
    pub upstream_host: String,
    /// HTTP server port
    pub server_port: u16,
    /// Optional deadline applied to upstream fetches.
    ///
    /// `None` means no deadline at all: a miss waits as long as the upstream
    /// takes (or until the client goes away).
    pub fetch_timeout: Option<Duration>,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `UPSTREAM_HOST` - host:port of the upstream data service (default: localhost:4000)
    /// - `SERVER_PORT` - HTTP server port (default: 4001)
    /// - `FETCH_TIMEOUT_MS` - upstream fetch deadline in milliseconds (default: unset)
    pub fn from_env() -> Self {
        Self {
            upstream_host: env::var("UPSTREAM_HOST")
                .ok()
                .unwrap_or_else(|| "localhost:4000".to_string()),
            server_port: env::var("SERVER_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(4001),
            fetch_timeout: env::var("FETCH_TIMEOUT_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .map(Duration::from_millis),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            upstream_host: "localhost:4000".to_string(),
            server_port: 4001,
            fetch_timeout: None,
        }
    }
}
