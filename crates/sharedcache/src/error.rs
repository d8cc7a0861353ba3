//! Errors for the cache and the commands built on top of it.

use thiserror::Error;

pub use sharedcache_core::cache::{CacheError, Result};

/// Errors raised while running a CLI command against the shared cache.
#[derive(Error, Debug)]
pub enum CommandError {
    #[error(transparent)]
    Cache(#[from] CacheError),

    #[error("Invalid entry '{0}': expected KEY=VALUE")]
    InvalidEntry(String),

    #[error("Worker count must be at least 1")]
    InvalidThreadCount,

    #[error("Too many keys: {threads} threads x {keys_per_thread} keys overflows")]
    TooManyKeys {
        threads: usize,
        keys_per_thread: usize,
    },

    #[error("Lost update for '{key}': expected {expected}, found {found}")]
    LostUpdate {
        key: String,
        expected: String,
        found: String,
    },

    #[error("Expected {expected} entries after stress run, found {found}")]
    SizeMismatch { expected: usize, found: usize },

    #[error("Stress worker panicked")]
    WorkerPanicked,
}
