use thiserror::Error;

/// Errors that can occur during cache operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CacheError {
    /// The caller supplied the absent key (`None` or an empty string).
    #[error("Cache key cannot be null or empty")]
    InvalidKey,
}

/// Result type for cache operations.
pub type Result<T> = std::result::Result<T, CacheError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_key_display() {
        let error = CacheError::InvalidKey;
        assert_eq!(error.to_string(), "Cache key cannot be null or empty");
    }

    #[test]
    fn test_errors_compare_equal() {
        assert_eq!(CacheError::InvalidKey, CacheError::InvalidKey.clone());
    }
}
