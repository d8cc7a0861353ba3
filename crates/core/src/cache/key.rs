use std::fmt;

use serde::{Deserialize, Serialize};

use super::{CacheError, Result};

/// A validated cache key.
///
/// A `CacheKey` can only be built through [`CacheKey::parse`], so a store
/// keyed by `CacheKey` can never hold an entry for the absent key.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CacheKey(String);

impl CacheKey {
    /// Validates a raw key.
    ///
    /// `None` and the empty string are the absent key and fail with
    /// [`CacheError::InvalidKey`]. Anything else is kept verbatim.
    ///
    /// # Examples
    ///
    /// ```
    /// use sharedcache_core::cache::{CacheError, CacheKey};
    ///
    /// assert_eq!(CacheKey::parse(Some("config:theme")).unwrap().as_str(), "config:theme");
    /// assert_eq!(CacheKey::parse(None), Err(CacheError::InvalidKey));
    /// assert_eq!(CacheKey::parse(Some("")), Err(CacheError::InvalidKey));
    /// ```
    pub fn parse(raw: Option<&str>) -> Result<Self> {
        match raw {
            Some(key) if !key.is_empty() => Ok(Self(key.to_owned())),
            _ => Err(CacheError::InvalidKey),
        }
    }

    /// Returns the key as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for CacheKey {
    type Error = CacheError;

    fn try_from(value: String) -> Result<Self> {
        if value.is_empty() {
            return Err(CacheError::InvalidKey);
        }
        Ok(Self(value))
    }
}

impl From<CacheKey> for String {
    fn from(key: CacheKey) -> Self {
        key.0
    }
}
