//! Style resolution engine.

mod cache;
mod cascade;
mod dependencies;
mod engine;

pub use cache::{CacheEntry, CacheStats, StyleCache, StyleCacheKey};
pub use cascade::{CascadeContext, cascade, cascade_properties, finalize_parts, merge_parts};
pub use dependencies::Dependencies;
pub use engine::{StyleEngine, resolve};
