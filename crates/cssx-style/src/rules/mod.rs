//! Style rules and layers.

mod layer;
mod rule;

pub use layer::{LayerBuilder, LayerOrigin, StyleLayer};
pub use rule::StyleRule;
