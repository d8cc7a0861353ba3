//! sharedcache - one key/value cache shared by the whole process.
//!
//! Every caller that asks for the cache gets the same instance. The instance
//! is built on first use behind a double-checked guard and lives until the
//! process exits. All reads and writes go through a single lock, so readers
//! only ever see a store before or after a mutation, never in between.
//!
//! # Example
//!
//! ```
//! use sharedcache::SharedCache;
//!
//! let cache = SharedCache::instance();
//! cache.put("doc:user:123", "Alice").unwrap();
//!
//! let same = sharedcache::instance();
//! assert!(std::ptr::eq(cache, same));
//! assert_eq!(same.get("doc:user:123").unwrap(), Some("Alice".into()));
//! ```

pub mod cache;
pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
mod instance;
pub mod output;

pub use cache::SharedCache;
pub use config::Config;
pub use error::{CacheError, CommandError, Result};
pub use instance::instance;

// Re-export core types for convenience
pub use sharedcache_core::cache::{CacheKey, CacheValue, KeyValueCache};
