use super::{CacheValue, Result};

/// Trait for basic cache operations.
///
/// Implementations must be safe to share between threads: every method
/// takes `&self` and synchronizes internally.
pub trait KeyValueCache: Send + Sync {
    /// Inserts or silently overwrites the value for `key`.
    fn put(&self, key: Option<&str>, value: CacheValue) -> Result<()>;

    /// Gets a copy of the value for `key`, or `None` when it is not cached.
    fn get(&self, key: Option<&str>) -> Result<Option<CacheValue>>;

    /// Removes every entry.
    fn clear(&self);

    /// Returns the number of entries.
    fn size(&self) -> usize;

    /// Renders the contents as a diagnostic report.
    fn render(&self) -> String;
}
