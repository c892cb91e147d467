//! Main style resolution engine.

use std::sync::Arc;

use cssx_core::logging::{ResolveSpan, span_names, targets};
use cssx_core::{NoopTracker, ReadTracker};
use parking_lot::Mutex;

use crate::config::EngineConfig;
use crate::environment::StyleEnvironment;
use crate::normalize::NormalizeContext;
use crate::resolve::Dependencies;
use crate::resolve::cache::{CacheEntry, CacheStats, StyleCache, StyleCacheKey};
use crate::resolve::cascade::{CascadeContext, cascade};
use crate::rules::StyleLayer;
use crate::selector::{ActiveClasses, LayerMatch, SelectorMatcher};
use crate::types::{InlineStyles, ResolvedStyle};
use crate::Result;

/// The main style resolution engine.
///
/// The engine matches a class string against three style layers (file,
/// global, local), cascades the matched rules, applies inline overrides,
/// substitutes variables and normalizes units.
///
/// Reads of dynamic state (viewport, variables) are reported to the
/// injected [`ReadTracker`] so a host can re-render when they change.
///
/// ```
/// use std::sync::Arc;
/// use cssx_style::prelude::*;
///
/// let env = Arc::new(StyleEnvironment::default());
/// let engine = StyleEngine::new(env, EngineConfig::default());
///
/// let file = StyleLayer::builder(LayerOrigin::File)
///     .rule(ClassSelector::class("root"), props([("padding", "2u".into())]))
///     .build();
/// let global = StyleLayer::empty(LayerOrigin::Global);
/// let local = StyleLayer::empty(LayerOrigin::Local);
///
/// let style = engine
///     .resolve_cached("root", &file, &global, &local, &InlineStyles::new())
///     .unwrap();
/// assert_eq!(style["style"]["padding"], PropertyValue::Number(16.0));
/// ```
pub struct StyleEngine {
    env: Arc<StyleEnvironment>,
    config: EngineConfig,
    cache: Mutex<StyleCache>,
    tracker: Arc<dyn ReadTracker>,
}

impl StyleEngine {
    /// Create a new engine over a shared environment.
    pub fn new(env: Arc<StyleEnvironment>, config: EngineConfig) -> Self {
        Self {
            cache: Mutex::new(StyleCache::with_capacity(config.cache_capacity)),
            env,
            config,
            tracker: Arc::new(NoopTracker),
        }
    }

    /// Report dynamic reads to `tracker`.
    pub fn with_tracker(mut self, tracker: Arc<dyn ReadTracker>) -> Self {
        self.tracker = tracker;
        self
    }

    /// The shared environment.
    pub fn environment(&self) -> &Arc<StyleEnvironment> {
        &self.env
    }

    /// The engine configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Resolve styles without the cache.
    pub fn resolve(
        &self,
        classes: &str,
        file: &StyleLayer,
        global: &StyleLayer,
        local: &StyleLayer,
        inline: &InlineStyles,
    ) -> Result<ResolvedStyle> {
        let _span = ResolveSpan::new(span_names::RESOLVE, classes);
        let active = ActiveClasses::parse(classes);
        let matches = self.match_layers(&active, [file, global, local]);

        Dependencies::collect(&matches, inline).fingerprint(&self.env, self.tracker.as_ref());
        self.compute(&matches, inline)
    }

    /// Resolve styles through the dependency-aware cache.
    ///
    /// Output is identical to [`resolve`](Self::resolve). A cached value is
    /// reused only while the viewport and variables it depends on still
    /// hold the values they had when it was computed.
    pub fn resolve_cached(
        &self,
        classes: &str,
        file: &StyleLayer,
        global: &StyleLayer,
        local: &StyleLayer,
        inline: &InlineStyles,
    ) -> Result<ResolvedStyle> {
        let _span = ResolveSpan::new(span_names::RESOLVE_CACHED, classes);
        let active = ActiveClasses::parse(classes);
        let key = StyleCacheKey::new(&active, [file, global, local], inline);

        let stale = {
            let mut cache = self.cache.lock();
            match cache.get(&key) {
                Some(entry) => {
                    let fingerprint = entry.dependencies.fingerprint(&self.env, self.tracker.as_ref());
                    if fingerprint == entry.fingerprint {
                        let value = entry.value.clone();
                        cache.record_hit();
                        tracing::trace!(target: targets::CACHE, key = key.value(), "cache hit");
                        return Ok(value);
                    }
                    cache.record_refresh();
                    true
                }
                None => {
                    cache.record_miss();
                    false
                }
            }
        };

        let matches = self.match_layers(&active, [file, global, local]);
        let dependencies = Dependencies::collect(&matches, inline);
        // A stale entry already recorded its reads during the check
        let tracker: &dyn ReadTracker = if stale { &NoopTracker } else { self.tracker.as_ref() };
        let fingerprint = dependencies.fingerprint(&self.env, tracker);
        let value = self.compute(&matches, inline)?;

        tracing::debug!(
            target: targets::CACHE,
            key = key.value(),
            stale,
            viewport = dependencies.viewport,
            variables = dependencies.variables.len(),
            "cache {}",
            if stale { "refresh" } else { "miss" }
        );

        self.cache.lock().insert(
            key,
            CacheEntry {
                fingerprint,
                dependencies,
                value: value.clone(),
            },
        );
        Ok(value)
    }

    /// Drop every cached resolution.
    pub fn clear_cache(&self) {
        self.cache.lock().invalidate_all();
    }

    /// Get the number of cached resolutions.
    pub fn cache_len(&self) -> usize {
        self.cache.lock().len()
    }

    /// Cache hit/miss counters.
    pub fn cache_stats(&self) -> CacheStats {
        self.cache.lock().stats()
    }

    fn match_layers<'a>(&self, active: &ActiveClasses, layers: [&'a StyleLayer; 3]) -> [LayerMatch<'a>; 3] {
        let dimensions = self.env.dimensions();
        layers.map(|layer| SelectorMatcher::match_layer(layer, active, &dimensions))
    }

    fn compute(&self, matches: &[LayerMatch<'_>; 3], inline: &InlineStyles) -> Result<ResolvedStyle> {
        let ctx = CascadeContext {
            variables: self.env.variables(),
            strict_variables: self.config.strict_variables,
            normalize: NormalizeContext {
                platform: self.env.platform(),
                dimensions: self.env.dimensions(),
                unit_px: self.config.unit_px,
            },
        };
        let resolved = cascade(matches, inline, &ctx)?;

        tracing::debug!(
            target: targets::RESOLVE,
            matched = matches.iter().map(LayerMatch::matched_count).sum::<usize>(),
            parts = resolved.len(),
            "resolved styles"
        );
        Ok(resolved)
    }
}

impl std::fmt::Debug for StyleEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StyleEngine")
            .field("config", &self.config)
            .field("cache_len", &self.cache_len())
            .finish_non_exhaustive()
    }
}

/// Resolve styles once, without an engine or cache.
#[allow(clippy::too_many_arguments)]
pub fn resolve(
    env: &Arc<StyleEnvironment>,
    config: &EngineConfig,
    tracker: Arc<dyn ReadTracker>,
    classes: &str,
    file: &StyleLayer,
    global: &StyleLayer,
    local: &StyleLayer,
    inline: &InlineStyles,
) -> Result<ResolvedStyle> {
    StyleEngine::new(Arc::clone(env), config.clone().cache_capacity(0))
        .with_tracker(tracker)
        .resolve(classes, file, global, local, inline)
}
