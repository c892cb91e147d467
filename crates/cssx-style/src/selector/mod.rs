//! Class selectors, specificity and matching.

mod matcher;
mod specificity;
mod types;

pub use matcher::{LayerMatch, MatchedRule, SelectorMatcher};
pub use specificity::{Specificity, SpecificityWithOrder};
pub use types::{ActiveClasses, ClassSelector};
