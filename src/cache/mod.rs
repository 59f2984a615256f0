//! Session-scoped response cache.

mod memory;

pub use memory::{CacheEntry, CacheKey, EntryKind, ResponseCache};
