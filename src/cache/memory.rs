use image::DynamicImage;
use std::collections::HashMap;
use std::sync::Arc;

/// What a cache entry holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryKind {
    Summary,
    Image,
}

/// Identifies one lookup: the kind of result, the locale and the topic.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub kind: EntryKind,
    pub locale: String,
    pub topic: String,
}

impl CacheKey {
    pub fn new(kind: EntryKind, locale: &str, topic: &str) -> Self {
        Self {
            kind,
            locale: locale.to_string(),
            topic: topic.to_string(),
        }
    }

    pub fn summary(locale: &str, topic: &str) -> Self {
        Self::new(EntryKind::Summary, locale, topic)
    }

    pub fn image(locale: &str, topic: &str) -> Self {
        Self::new(EntryKind::Image, locale, topic)
    }
}

/// A previously fetched result.
#[derive(Debug, Clone)]
pub enum CacheEntry {
    Summary(String),
    Image(Arc<DynamicImage>),
}

impl CacheEntry {
    pub fn as_summary(&self) -> Option<&str> {
        match self {
            Self::Summary(text) => Some(text),
            Self::Image(_) => None,
        }
    }

    pub fn as_image(&self) -> Option<Arc<DynamicImage>> {
        match self {
            Self::Image(image) => Some(Arc::clone(image)),
            Self::Summary(_) => None,
        }
    }
}

/// In-memory cache owned by the session. Lives until the process exits or
/// the user clears it.
#[derive(Debug, Default)]
pub struct ResponseCache {
    entries: HashMap<CacheKey, CacheEntry>,
}

impl ResponseCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &CacheKey) -> Option<&CacheEntry> {
        self.entries.get(key)
    }

    /// Stores `entry`, replacing any previous value for `key`.
    pub fn put(&mut self, key: CacheKey, entry: CacheEntry) {
        self.entries.insert(key, entry);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
