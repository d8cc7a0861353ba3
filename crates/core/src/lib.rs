//! Pure cache logic - no I/O, no global state, no locking.
//!
//! This crate provides:
//! - Key validation that rejects the absent key before any store is touched
//! - The value type stored by the cache
//! - Diagnostic rendering of cache contents
//! - The `KeyValueCache` trait implemented by the process-wide cache
//!
//! # Example
//!
//! ```
//! use sharedcache_core::cache::{render_entries, CacheKey, CacheValue};
//!
//! let key = CacheKey::parse(Some("user:123")).unwrap();
//! let value = CacheValue::from("Alice");
//!
//! let report = render_entries([(&key, &value)]);
//! assert_eq!(report, "Cache Contents:\n  Key: user:123, Value: Alice");
//! ```

pub mod cache;
