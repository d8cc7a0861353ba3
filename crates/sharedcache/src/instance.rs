//! Lazy, process-wide construction of the shared cache.
//!
//! The accessor uses double-checked initialization. The fast path reads the
//! publication cell without touching the init guard. The slow path takes the
//! guard, checks the cell again (another thread may have finished while this
//! one waited), and only then builds and publishes the cache. Publication is
//! a single write to a `OnceLock`, so no thread can see a partially built cache.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, OnceLock, PoisonError};

use crate::cache::SharedCache;

/// Publication cell for the one instance.
static INSTANCE: OnceLock<SharedCache> = OnceLock::new();

/// Guard held only while the instance is being built.
static INIT_GUARD: Mutex<()> = Mutex::new(());

/// Number of caches built by the accessor. Never exceeds 1.
static CONSTRUCTIONS: AtomicUsize = AtomicUsize::new(0);

impl SharedCache {
    /// Returns the process-wide cache, building it on first use.
    ///
    /// Every call, from any thread, returns the same instance. Never fails.
    ///
    /// # Examples
    ///
    /// ```
    /// use sharedcache::SharedCache;
    ///
    /// let first = SharedCache::instance();
    /// let second = SharedCache::instance();
    /// assert!(std::ptr::eq(first, second));
    /// assert_eq!(SharedCache::constructions(), 1);
    /// ```
    pub fn instance() -> &'static SharedCache {
        if let Some(cache) = INSTANCE.get() {
            return cache;
        }
        initialize()
    }

    /// Returns how many caches the accessor has built: 0 before the first
    /// call to [`SharedCache::instance`], 1 afterwards.
    pub fn constructions() -> usize {
        CONSTRUCTIONS.load(Ordering::Acquire)
    }
}

/// Returns the process-wide cache. Shorthand for [`SharedCache::instance`].
pub fn instance() -> &'static SharedCache {
    SharedCache::instance()
}

#[cold]
fn initialize() -> &'static SharedCache {
    get_or_build(&INSTANCE, &INIT_GUARD, &CONSTRUCTIONS, || {
        let cache = SharedCache::new();
        tracing::debug!("Shared cache constructed");
        cache
    })
}

/// Slow path of the double-checked protocol.
///
/// Takes `guard`, checks `cell` again, and only if it is still empty runs
/// `build`, bumps `built` and publishes the value with a single write.
fn get_or_build<'a, T>(
    cell: &'a OnceLock<T>,
    guard: &Mutex<()>,
    built: &AtomicUsize,
    build: impl FnOnce() -> T,
) -> &'a T {
    // Released on every return path when `_guard` drops. A poisoned guard
    // protects no data, so it is safe to keep using.
    let _guard = guard.lock().unwrap_or_else(PoisonError::into_inner);

    if let Some(value) = cell.get() {
        return value;
    }

    let value = build();
    built.fetch_add(1, Ordering::AcqRel);

    cell.get_or_init(|| value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::global_lock;
    use serde_json::json;
    use std::sync::Barrier;
    use std::thread;
    use std::time::Duration;

    #[test]
    fn test_instance_is_stable() {
        let first = SharedCache::instance();
        let second = instance();

        assert!(std::ptr::eq(first, second));
        assert_eq!(SharedCache::constructions(), 1);
    }

    #[test]
    fn test_concurrent_first_use_builds_once() {
        const THREADS: usize = 32;

        let barrier = Barrier::new(THREADS);
        let addresses: Vec<usize> = thread::scope(|s| {
            let handles: Vec<_> = (0..THREADS)
                .map(|_| {
                    let barrier = &barrier;
                    s.spawn(move || {
                        barrier.wait();
                        SharedCache::instance() as *const SharedCache as usize
                    })
                })
                .collect();

            handles
                .into_iter()
                .map(|h| h.join().unwrap())
                .collect()
        });

        assert!(addresses.windows(2).all(|w| w[0] == w[1]));
        assert_eq!(SharedCache::constructions(), 1);
    }

    #[test]
    fn test_racing_first_use_builds_once() {
        const THREADS: usize = 32;

        let cell: OnceLock<Vec<u8>> = OnceLock::new();
        let guard = Mutex::new(());
        let built = AtomicUsize::new(0);
        let barrier = Barrier::new(THREADS);

        let addresses: Vec<usize> = thread::scope(|s| {
            let handles: Vec<_> = (0..THREADS)
                .map(|_| {
                    s.spawn(|| {
                        barrier.wait();
                        let value = match cell.get() {
                            Some(value) => value,
                            None => get_or_build(&cell, &guard, &built, || {
                                thread::sleep(Duration::from_millis(20));
                                vec![1, 2, 3]
                            }),
                        };
                        value as *const Vec<u8> as usize
                    })
                })
                .collect();

            handles
                .into_iter()
                .map(|h| h.join().unwrap())
                .collect()
        });

        assert_eq!(built.load(Ordering::Acquire), 1);
        assert!(addresses.windows(2).all(|w| w[0] == w[1]));
        assert_eq!(cell.get(), Some(&vec![1, 2, 3]));
    }

    #[test]
    fn test_published_value_skips_build() {
        let cell = OnceLock::new();
        let guard = Mutex::new(());
        let built = AtomicUsize::new(0);
        cell.set(7).unwrap();

        let value = get_or_build(&cell, &guard, &built, || 8);

        assert_eq!(*value, 7);
        assert_eq!(built.load(Ordering::Acquire), 0);
    }

    #[test]
    fn test_handles_share_one_store() {
        let _lock = global_lock();
        let first = SharedCache::instance();
        let second = SharedCache::instance();
        first.clear();

        first.put("user:123", "Alice Smith").unwrap();
        first.put("config:theme", "dark").unwrap();
        second.put("user:456", "Bob Jones").unwrap();

        assert_eq!(first.size(), 3);
        assert_eq!(second.get("user:123").unwrap(), Some(json!("Alice Smith")));

        second.clear();
        assert_eq!(first.size(), 0);
        assert_eq!(first.render(), "Cache Contents:\n  (empty)");
    }

    #[test]
    fn test_concurrent_puts_through_accessor() {
        const THREADS: usize = 8;

        let _lock = global_lock();
        SharedCache::instance().clear();

        thread::scope(|s| {
            for i in 0..THREADS {
                s.spawn(move || {
                    let key = format!("k{i}");
                    instance().put(key.as_str(), i).unwrap();
                });
            }
        });

        let cache = SharedCache::instance();
        assert_eq!(cache.size(), THREADS);
        for i in 0..THREADS {
            let key = format!("k{i}");
            assert_eq!(cache.get(key.as_str()).unwrap(), Some(json!(i)));
        }
        cache.clear();
    }
}
