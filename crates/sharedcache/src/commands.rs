//! Command runners for the `sharedcache` binary.
//!
//! Each runner works against the process-wide instance and returns a
//! serializable report; printing is left to `output`.

use std::collections::BTreeMap;
use std::sync::Barrier;
use std::thread::{self, ScopedJoinHandle};
use std::time::{Duration, Instant};

use serde::Serialize;

use crate::error::CommandError;
use crate::{CacheKey, CacheValue, SharedCache};

/// Result of the two-handle walkthrough.
#[derive(Debug, Clone, Serialize)]
pub struct DemoReport {
    /// Contents after the first handle stored two entries.
    pub after_first_handle: String,
    /// Contents seen through the first handle after the second one wrote.
    pub after_second_handle: String,
    /// Value of `user:123` read back through the first handle.
    pub retrieved: Option<CacheValue>,
    /// Whether both handles point at the same instance.
    pub same_instance: bool,
    /// Contents seen through the first handle after the second one cleared.
    pub after_clear: String,
}

/// Result of a concurrent insert run.
#[derive(Debug, Clone, Serialize)]
pub struct StressReport {
    pub threads: usize,
    pub keys_per_thread: usize,
    pub entries: usize,
    #[serde(serialize_with = "serialize_millis")]
    pub elapsed: Duration,
}

/// Stores entries through one handle, adds more through a second handle,
/// and shows that both observe the same store.
pub fn run_demo() -> Result<DemoReport, CommandError> {
    let first = SharedCache::instance();
    first.put("user:123", "Alice Smith")?;
    first.put("config:theme", "dark")?;
    let after_first_handle = first.render();

    let second = SharedCache::instance();
    second.put("user:456", "Bob Jones")?;
    let after_second_handle = first.render();

    let retrieved = first.get("user:123")?;
    let same_instance = std::ptr::eq(first, second);

    second.clear();
    let after_clear = first.render();

    Ok(DemoReport {
        after_first_handle,
        after_second_handle,
        retrieved,
        same_instance,
        after_clear,
    })
}

/// Clears the cache, then inserts `keys_per_thread` distinct keys from each
/// of `threads` workers released together, and verifies every value.
pub fn run_stress(threads: usize, keys_per_thread: usize) -> Result<StressReport, CommandError> {
    if threads == 0 {
        return Err(CommandError::InvalidThreadCount);
    }
    let expected = stress_total(threads, keys_per_thread)?;

    let cache = SharedCache::instance();
    cache.clear();

    let barrier = Barrier::new(threads);
    let start = Instant::now();

    thread::scope(|s| {
        let handles: Vec<_> = (0..threads)
            .map(|worker| {
                let barrier = &barrier;
                s.spawn(move || -> Result<(), CommandError> {
                    barrier.wait();
                    for i in 0..keys_per_thread {
                        let n = worker * keys_per_thread + i;
                        cache.put(stress_key(n).as_str(), n)?;
                    }
                    Ok(())
                })
            })
            .collect();

        join_workers(handles)
    })?;

    let elapsed = start.elapsed();

    let found = cache.size();
    if found != expected {
        return Err(CommandError::SizeMismatch { expected, found });
    }

    for n in 0..expected {
        let key = stress_key(n);
        let value = cache.get(key.as_str())?;
        if value != Some(CacheValue::from(n)) {
            return Err(CommandError::LostUpdate {
                key,
                expected: n.to_string(),
                found: value.map_or_else(|| "nothing".to_string(), |v| v.to_string()),
            });
        }
    }

    tracing::info!(
        threads,
        keys_per_thread,
        entries = expected,
        elapsed_ms = elapsed.as_millis() as u64,
        "Stress run verified"
    );

    Ok(StressReport {
        threads,
        keys_per_thread,
        entries: expected,
        elapsed,
    })
}

/// Parses `KEY=VALUE` entries and stores them in order.
///
/// Returns the snapshot taken after the last insert.
pub fn run_put(entries: &[String]) -> Result<BTreeMap<CacheKey, CacheValue>, CommandError> {
    let parsed = entries
        .iter()
        .map(|entry| parse_entry(entry))
        .collect::<Result<Vec<_>, _>>()?;

    let cache = SharedCache::instance();
    for (key, value) in parsed {
        cache.put(key, value)?;
    }

    Ok(cache.snapshot())
}

/// Splits `KEY=VALUE` on the first `=`. The value is parsed as JSON when it
/// is valid JSON and kept as a string otherwise.
pub fn parse_entry(entry: &str) -> Result<(&str, CacheValue), CommandError> {
    let (key, raw) = entry
        .split_once('=')
        .ok_or_else(|| CommandError::InvalidEntry(entry.to_string()))?;

    let value = serde_json::from_str(raw).unwrap_or_else(|_| CacheValue::from(raw));
    Ok((key, value))
}

/// Total number of keys a stress run inserts, or `TooManyKeys` when it does
/// not fit in a `usize`.
pub fn stress_total(threads: usize, keys_per_thread: usize) -> Result<usize, CommandError> {
    threads
        .checked_mul(keys_per_thread)
        .ok_or(CommandError::TooManyKeys {
            threads,
            keys_per_thread,
        })
}

/// Joins every worker, then returns the first failure in spawn order.
///
/// All handles are joined before any result is inspected, so a panicking
/// worker becomes `WorkerPanicked` instead of panicking the scope.
fn join_workers(
    handles: Vec<ScopedJoinHandle<'_, Result<(), CommandError>>>,
) -> Result<(), CommandError> {
    let results: Vec<_> = handles
        .into_iter()
        .map(|handle| handle.join().map_err(|_| CommandError::WorkerPanicked))
        .collect();

    results.into_iter().try_for_each(|result| result?)
}

fn stress_key(n: usize) -> String {
    format!("stress:{n}")
}

fn serialize_millis<S: serde::Serializer>(
    duration: &Duration,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.serialize_u64(duration.as_millis() as u64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::global_lock;
    use crate::CacheError;
    use serde_json::json;

    #[test]
    fn test_parse_entry_string_value() {
        let (key, value) = parse_entry("user:123=Alice Smith").unwrap();
        assert_eq!(key, "user:123");
        assert_eq!(value, json!("Alice Smith"));
    }

    #[test]
    fn test_parse_entry_json_value() {
        let (key, value) = parse_entry(r#"config={"theme":"dark"}"#).unwrap();
        assert_eq!(key, "config");
        assert_eq!(value, json!({"theme": "dark"}));

        let (_, number) = parse_entry("count=3").unwrap();
        assert_eq!(number, json!(3));
    }

    #[test]
    fn test_parse_entry_splits_on_first_equals() {
        let (key, value) = parse_entry("expr=a=b").unwrap();
        assert_eq!(key, "expr");
        assert_eq!(value, json!("a=b"));
    }

    #[test]
    fn test_parse_entry_without_separator() {
        assert!(matches!(
            parse_entry("novalue"),
            Err(CommandError::InvalidEntry(_))
        ));
    }

    #[test]
    fn test_demo_walkthrough() {
        let _lock = global_lock();
        SharedCache::instance().clear();

        let report = run_demo().unwrap();

        assert!(report.same_instance);
        assert_eq!(report.retrieved, Some(json!("Alice Smith")));
        assert_eq!(
            report.after_first_handle,
            "Cache Contents:\n  Key: config:theme, Value: dark\n  Key: user:123, Value: Alice Smith"
        );
        assert!(report
            .after_second_handle
            .contains("Key: user:456, Value: Bob Jones"));
        assert_eq!(report.after_clear, "Cache Contents:\n  (empty)");
    }

    #[test]
    fn test_stress_verifies_every_key() {
        let _lock = global_lock();

        let report = run_stress(4, 25).unwrap();

        assert_eq!(report.entries, 100);
        assert_eq!(SharedCache::instance().size(), 100);
        assert_eq!(
            SharedCache::instance().get("stress:99").unwrap(),
            Some(json!(99))
        );
        SharedCache::instance().clear();
    }

    #[test]
    fn test_stress_rejects_zero_threads() {
        assert!(matches!(
            run_stress(0, 10),
            Err(CommandError::InvalidThreadCount)
        ));
    }

    #[test]
    fn test_stress_rejects_overflowing_key_count() {
        assert!(matches!(
            run_stress(2, usize::MAX),
            Err(CommandError::TooManyKeys {
                threads: 2,
                keys_per_thread: usize::MAX
            })
        ));
    }

    #[test]
    fn test_join_workers_reports_error_after_joining_all() {
        let result = thread::scope(|s| {
            let handles = vec![
                s.spawn(|| Err(CommandError::InvalidThreadCount)),
                s.spawn(|| -> Result<(), CommandError> {
                    thread::sleep(Duration::from_millis(20));
                    panic!("worker failed")
                }),
                s.spawn(|| Ok(())),
            ];
            join_workers(handles)
        });

        assert!(matches!(result, Err(CommandError::InvalidThreadCount)));
    }

    #[test]
    fn test_join_workers_maps_panic() {
        let result = thread::scope(|s| {
            let handles = vec![
                s.spawn(|| -> Result<(), CommandError> { panic!("worker failed") }),
                s.spawn(|| Ok(())),
            ];
            join_workers(handles)
        });

        assert!(matches!(result, Err(CommandError::WorkerPanicked)));
    }

    #[test]
    fn test_stress_total() {
        assert_eq!(stress_total(8, 100).unwrap(), 800);
        assert!(stress_total(usize::MAX, 2).is_err());
    }

    #[test]
    fn test_put_rejects_empty_key_after_valid_ones() {
        let _lock = global_lock();
        SharedCache::instance().clear();

        let result = run_put(&["a=1".to_string(), "=2".to_string()]);

        assert!(matches!(
            result,
            Err(CommandError::Cache(CacheError::InvalidKey))
        ));
        assert_eq!(SharedCache::instance().get("a").unwrap(), Some(json!(1)));
        SharedCache::instance().clear();
    }

    #[test]
    fn test_put_returns_snapshot() {
        let _lock = global_lock();
        SharedCache::instance().clear();

        let snapshot = run_put(&["user:123=Alice".to_string(), "n=5".to_string()]).unwrap();

        assert_eq!(snapshot.len(), 2);
        let key = CacheKey::parse(Some("n")).unwrap();
        assert_eq!(snapshot.get(&key), Some(&json!(5)));
        SharedCache::instance().clear();
    }
}
