//! Pure rendering of cache contents for logs and terminals.

use super::{display_value, CacheKey, CacheValue};

/// First line of every report.
pub const REPORT_HEADER: &str = "Cache Contents:";

/// Line emitted in place of entries when the cache is empty.
pub const EMPTY_MARKER: &str = "  (empty)";

/// Renders entries as a multi-line report.
///
/// Entries are written in the order the iterator yields them, one per line.
/// The report has no trailing newline.
///
/// # Examples
///
/// ```
/// use sharedcache_core::cache::{render_entries, CacheKey, CacheValue};
///
/// let empty: [(&CacheKey, &CacheValue); 0] = [];
/// assert_eq!(render_entries(empty), "Cache Contents:\n  (empty)");
/// ```
pub fn render_entries<'a, I>(entries: I) -> String
where
    I: IntoIterator<Item = (&'a CacheKey, &'a CacheValue)>,
{
    let mut lines = vec![REPORT_HEADER.to_string()];
    lines.extend(
        entries
            .into_iter()
            .map(|(key, value)| format!("  Key: {}, Value: {}", key, display_value(value))),
    );

    if lines.len() == 1 {
        lines.push(EMPTY_MARKER.to_string());
    }

    lines.join("\n")
}
