//! Style value types.

mod inline;
mod value;

pub use inline::{InlineStyle, InlineStyles};
pub use value::{
    PropertyMap, PropertyValue, ROOT_STYLE_KEY, ResolvedStyle, part_result_key, props,
};
