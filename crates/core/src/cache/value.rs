/// A value of arbitrary shape stored in the cache.
///
/// Anything convertible into a JSON value can be cached: strings, numbers,
/// booleans, arrays and objects.
pub type CacheValue = serde_json::Value;

/// Renders a value as text for diagnostics.
///
/// Strings are written raw, without quotes. Every other value uses its
/// compact JSON form.
pub fn display_value(value: &CacheValue) -> String {
    match value {
        CacheValue::String(s) => s.clone(),
        other => other.to_string(),
    }
}
