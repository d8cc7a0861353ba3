mod error;
mod key;
mod render;
mod traits;
mod value;

pub use error::{CacheError, Result};
pub use key::CacheKey;
pub use render::{render_entries, EMPTY_MARKER, REPORT_HEADER};
pub use traits::KeyValueCache;
pub use value::{display_value, CacheValue};
