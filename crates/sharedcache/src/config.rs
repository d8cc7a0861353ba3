use std::env;

/// Default number of worker threads for the stress command.
pub const DEFAULT_THREADS: usize = 8;

/// Default number of keys each stress worker inserts.
pub const DEFAULT_KEYS_PER_THREAD: usize = 100;

/// Default tracing filter when `RUST_LOG` is not set.
pub const DEFAULT_LOG_FILTER: &str = "sharedcache=info";

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Worker threads used by the stress command (default: 8)
    pub threads: usize,
    /// Keys inserted by each stress worker (default: 100)
    pub keys_per_thread: usize,
    /// Tracing filter used when `RUST_LOG` is unset (default: "sharedcache=info")
    pub log_filter: String,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `SHAREDCACHE_THREADS` - Stress worker threads (default: 8)
    /// - `SHAREDCACHE_KEYS_PER_THREAD` - Keys per stress worker (default: 100)
    /// - `SHAREDCACHE_LOG` - Fallback tracing filter (default: "sharedcache=info")
    pub fn from_env() -> Self {
        Self {
            threads: env::var("SHAREDCACHE_THREADS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_THREADS),
            keys_per_thread: env::var("SHAREDCACHE_KEYS_PER_THREAD")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_KEYS_PER_THREAD),
            log_filter: env::var("SHAREDCACHE_LOG")
                .unwrap_or_else(|_| DEFAULT_LOG_FILTER.to_string()),
        }
    }
}
