//! Style caching for performance.

use std::collections::HashMap;
use std::hash::{DefaultHasher, Hash, Hasher};

use super::Dependencies;
use crate::rules::{LayerOrigin, StyleLayer};
use crate::selector::ActiveClasses;
use crate::types::{InlineStyles, ResolvedStyle};

/// Cache key for resolved styles.
///
/// The key identifies the static inputs of a resolution: the active
/// classes (order and duplicates do not matter), the content of the three
/// layers and the inline overrides. Dynamic inputs are checked separately
/// through the entry's fingerprint.
///
/// Lookups are bucketed by a precomputed hash, but equality compares the
/// class set, each layer's origin and content hash, and the inline
/// overrides themselves.
#[derive(Debug, Clone)]
pub struct StyleCacheKey {
    hash: u64,
    classes: Vec<String>,
    layers: [(LayerOrigin, u64); 3],
    inline: InlineStyles,
}

impl StyleCacheKey {
    /// Create a new cache key.
    pub fn new(classes: &ActiveClasses, layers: [&StyleLayer; 3], inline: &InlineStyles) -> Self {
        let classes: Vec<String> = classes.iter().map(str::to_string).collect();
        let layers = layers.map(|layer| (layer.origin(), layer.content_hash()));

        let mut hasher = DefaultHasher::new();
        classes.hash(&mut hasher);
        layers.hash(&mut hasher);
        inline.hash(&mut hasher);

        Self {
            hash: hasher.finish(),
            classes,
            layers,
            inline: inline.clone(),
        }
    }

    /// The raw hash value.
    pub fn value(&self) -> u64 {
        self.hash
    }
}

impl PartialEq for StyleCacheKey {
    fn eq(&self, other: &Self) -> bool {
        self.hash == other.hash
            && self.layers == other.layers
            && self.classes == other.classes
            && self.inline == other.inline
    }
}

// Inline numbers are never NaN in practice; a NaN key only ever misses.
impl Eq for StyleCacheKey {}

impl Hash for StyleCacheKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.hash.hash(state);
    }
}

/// A cached resolution.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    /// Fingerprint of the dynamic inputs when the value was computed.
    pub fingerprint: u64,
    /// What the value depends on.
    pub dependencies: Dependencies,
    /// The resolved style.
    pub value: ResolvedStyle,
}

/// Cache hit/miss counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Lookups served from the cache.
    pub hits: u64,
    /// Lookups with no entry for the key.
    pub misses: u64,
    /// Lookups whose entry was stale and got recomputed.
    pub refreshes: u64,
}

/// LRU-like cache for resolved styles.
#[derive(Debug)]
pub struct StyleCache {
    /// Cached resolutions.
    cache: HashMap<StyleCacheKey, CacheEntry>,
    /// Maximum cache entries.
    max_size: usize,
    stats: CacheStats,
}

impl StyleCache {
    /// Create a new style cache.
    pub fn new() -> Self {
        Self::with_capacity(1024)
    }

    /// Create a cache with specific capacity.
    pub fn with_capacity(max_size: usize) -> Self {
        Self {
            cache: HashMap::with_capacity(max_size),
            max_size,
            stats: CacheStats::default(),
        }
    }

    /// Get a cached entry.
    pub fn get(&self, key: &StyleCacheKey) -> Option<&CacheEntry> {
        self.cache.get(key)
    }

    /// Insert or replace an entry.
    pub fn insert(&mut self, key: StyleCacheKey, entry: CacheEntry) {
        if self.max_size == 0 {
            return;
        }
        // Simple eviction: clear half when full
        if self.cache.len() >= self.max_size && !self.cache.contains_key(&key) {
            self.evict_half();
        }
        self.cache.insert(key, entry);
    }

    /// Invalidate all cached styles.
    pub fn invalidate_all(&mut self) {
        self.cache.clear();
    }

    /// Get the number of cached entries.
    pub fn len(&self) -> usize {
        self.cache.len()
    }

    /// Check if the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }

    /// Hit/miss counters since creation.
    pub fn stats(&self) -> CacheStats {
        self.stats
    }

    pub(crate) fn record_hit(&mut self) {
        self.stats.hits += 1;
    }

    pub(crate) fn record_miss(&mut self) {
        self.stats.misses += 1;
    }

    pub(crate) fn record_refresh(&mut self) {
        self.stats.refreshes += 1;
    }

    /// Evict half the entries (simple LRU approximation).
    fn evict_half(&mut self) {
        let target = (self.cache.len() / 2).max(1);
        let keys: Vec<_> = self.cache.keys().take(target).cloned().collect();
        for key in keys {
            self.cache.remove(&key);
        }
    }
}

impl Default for StyleCache {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::selector::ClassSelector;
    use crate::types::{PropertyValue, props};

    fn layers() -> [StyleLayer; 3] {
        [
            StyleLayer::builder(LayerOrigin::File)
                .rule(ClassSelector::class("root"), props([("color", PropertyValue::from("red"))]))
                .build(),
            StyleLayer::empty(LayerOrigin::Global),
            StyleLayer::empty(LayerOrigin::Local),
        ]
    }

    fn key(classes: &str, inline: &InlineStyles) -> StyleCacheKey {
        let [file, global, local] = layers();
        StyleCacheKey::new(&ActiveClasses::parse(classes), [&file, &global, &local], inline)
    }

    /// A key with a fixed hash, standing in for arbitrary inputs.
    fn raw(hash: u64, class: &str) -> StyleCacheKey {
        StyleCacheKey {
            hash,
            classes: vec![class.to_string()],
            layers: [(LayerOrigin::File, 0), (LayerOrigin::Global, 0), (LayerOrigin::Local, 0)],
            inline: InlineStyles::new(),
        }
    }

    fn raw_key(i: u64) -> StyleCacheKey {
        raw(i, &format!("c{}", i))
    }

    fn entry(fingerprint: u64) -> CacheEntry {
        CacheEntry {
            fingerprint,
            dependencies: Dependencies::default(),
            value: ResolvedStyle::new(),
        }
    }

    #[test]
    fn key_ignores_class_order() {
        let inline = InlineStyles::new();
        assert_eq!(key("root active", &inline), key("active  root root", &inline));
        assert_ne!(key("root", &inline), key("root active", &inline));
    }

    #[test]
    fn key_covers_inline_overrides() {
        let plain = InlineStyles::new();
        let styled = InlineStyles::new().with("style", props([("color", PropertyValue::from("blue"))]));
        assert_ne!(key("root", &plain), key("root", &styled));
    }

    #[test]
    fn cache_basic_operations() {
        let mut cache = StyleCache::new();
        let k = key("root", &InlineStyles::new());

        assert!(cache.get(&k).is_none());
        cache.insert(k.clone(), entry(1));
        assert_eq!(cache.get(&k).map(|e| e.fingerprint), Some(1));

        cache.insert(k.clone(), entry(2));
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get(&k).map(|e| e.fingerprint), Some(2));
    }

    #[test]
    fn colliding_hashes_do_not_share_entries() {
        let mut cache = StyleCache::new();
        let first = raw(7, "root");
        let second = raw(7, "card");
        assert_ne!(first, second);

        cache.insert(first.clone(), entry(1));
        assert!(cache.get(&second).is_none());

        cache.insert(second.clone(), entry(2));
        assert_eq!(cache.len(), 2);
        assert_eq!(cache.get(&first).map(|e| e.fingerprint), Some(1));
        assert_eq!(cache.get(&second).map(|e| e.fingerprint), Some(2));
    }

    #[test]
    fn cache_evicts_when_full() {
        let mut cache = StyleCache::with_capacity(4);
        for i in 0..4u64 {
            cache.insert(raw_key(i), entry(i));
        }
        assert_eq!(cache.len(), 4);

        cache.insert(raw_key(99), entry(99));
        assert_eq!(cache.len(), 3);
        assert!(cache.get(&raw_key(99)).is_some());
    }

    #[test]
    fn zero_capacity_disables_caching() {
        let mut cache = StyleCache::with_capacity(0);
        cache.insert(raw_key(1), entry(1));
        assert!(cache.is_empty());
    }

    #[test]
    fn cache_invalidate_all() {
        let mut cache = StyleCache::new();
        for i in 0..10u64 {
            cache.insert(raw_key(i), entry(i));
        }

        assert!(!cache.is_empty());
        cache.invalidate_all();
        assert!(cache.is_empty());
    }
}
