//! Compiled stylesheet parsing.

mod layer;
mod media;
mod selector;

pub use layer::parse_layer;
pub use media::parse_media_prelude;
pub use selector::parse_selector;
