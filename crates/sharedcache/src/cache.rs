//! The process-wide key/value store.
//!
//! A single `RwLock` guards the map. Mutations (`put`, `clear`) hold it
//! exclusively; reads (`get`, `size`, `render`, `snapshot`) hold it shared,
//! so a reader sees the store either before or after a mutation.
//!
//! Keys are validated before the lock is taken: a rejected key never enters
//! a critical section and never mutates the store.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use sharedcache_core::cache::{render_entries, CacheKey, CacheValue, KeyValueCache, Result};

type Store = BTreeMap<CacheKey, CacheValue>;

/// Thread-safe key/value cache shared by the whole process.
///
/// There is no public constructor: the only way to reach a `SharedCache` is
/// [`SharedCache::instance`], which always returns the same value.
#[derive(Debug)]
pub struct SharedCache {
    /// Entries ordered by key, which keeps rendering deterministic.
    store: RwLock<Store>,
}

impl SharedCache {
    /// Creates an empty cache. Only the accessor and tests build one.
    pub(crate) fn new() -> Self {
        Self {
            store: RwLock::new(BTreeMap::new()),
        }
    }

    /// Inserts or overwrites the value for `key`.
    ///
    /// Overwrites are silent and the prior value is dropped. Fails with
    /// [`CacheError::InvalidKey`](crate::CacheError::InvalidKey) when `key`
    /// is `None` or empty, in which case the store is left untouched.
    ///
    /// # Examples
    ///
    /// ```
    /// use sharedcache::{CacheError, SharedCache};
    ///
    /// let cache = SharedCache::instance();
    /// cache.put("doc:put:k", "a").unwrap();
    /// cache.put("doc:put:k", 7).unwrap();
    /// assert_eq!(cache.get("doc:put:k").unwrap(), Some(serde_json::json!(7)));
    ///
    /// assert_eq!(cache.put(None::<&str>, "v"), Err(CacheError::InvalidKey));
    /// ```
    pub fn put<'a>(
        &self,
        key: impl Into<Option<&'a str>>,
        value: impl Into<CacheValue>,
    ) -> Result<()> {
        let key = CacheKey::parse(key.into())?;
        let value = value.into();

        tracing::trace!(key = %key, "cache put");
        self.write_store().insert(key, value);
        Ok(())
    }

    /// Returns a copy of the value for `key`, or `None` if it is not cached.
    ///
    /// Fails with [`CacheError::InvalidKey`](crate::CacheError::InvalidKey)
    /// when `key` is `None` or empty.
    pub fn get<'a>(&self, key: impl Into<Option<&'a str>>) -> Result<Option<CacheValue>> {
        let key = CacheKey::parse(key.into())?;

        let value = self.read_store().get(&key).cloned();
        tracing::trace!(key = %key, hit = value.is_some(), "cache get");
        Ok(value)
    }

    /// Removes every entry. Clearing an empty cache is a no-op.
    pub fn clear(&self) {
        let mut store = self.write_store();
        let removed = store.len();
        store.clear();
        tracing::trace!(removed, "cache cleared");
    }

    /// Returns the number of entries.
    pub fn size(&self) -> usize {
        self.read_store().len()
    }

    /// Returns true if the cache holds no entries.
    pub fn is_empty(&self) -> bool {
        self.read_store().is_empty()
    }

    /// Renders the contents as a multi-line diagnostic report.
    ///
    /// The report starts with a `Cache Contents:` header followed by one
    /// `Key: .., Value: ..` line per entry in key order, or `(empty)`.
    pub fn render(&self) -> String {
        render_entries(&*self.read_store())
    }

    /// Returns a consistent copy of every entry, taken under the lock.
    pub fn snapshot(&self) -> BTreeMap<CacheKey, CacheValue> {
        self.read_store().clone()
    }

    fn read_store(&self) -> RwLockReadGuard<'_, Store> {
        self.store.read().unwrap_or_else(|poisoned| {
            tracing::warn!("cache lock poisoned, recovering for read");
            PoisonError::into_inner(poisoned)
        })
    }

    // Every critical section is a single map call, so a panic while the lock
    // is held cannot leave the map half-updated.
    fn write_store(&self) -> RwLockWriteGuard<'_, Store> {
        self.store.write().unwrap_or_else(|poisoned| {
            tracing::warn!("cache lock poisoned, recovering for write");
            PoisonError::into_inner(poisoned)
        })
    }
}

impl fmt::Display for SharedCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

impl KeyValueCache for SharedCache {
    fn put(&self, key: Option<&str>, value: CacheValue) -> Result<()> {
        SharedCache::put(self, key, value)
    }

    fn get(&self, key: Option<&str>) -> Result<Option<CacheValue>> {
        SharedCache::get(self, key)
    }

    fn clear(&self) {
        SharedCache::clear(self)
    }

    fn size(&self) -> usize {
        SharedCache::size(self)
    }

    fn render(&self) -> String {
        SharedCache::render(self)
    }
}
