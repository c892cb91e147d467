//! Selector specificity.

use super::ClassSelector;

/// Specificity of a class selector: the number of required classes.
///
/// More classes means a more specific selector. There is no ID or
/// pseudo-class axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Specificity(pub u32);

impl Specificity {
    /// Zero specificity (no classes).
    pub const ZERO: Self = Self(0);

    /// Calculate specificity of a selector.
    pub fn of_selector(selector: &ClassSelector) -> Self {
        Self(selector.classes().len() as u32)
    }

    /// Get the class count.
    pub fn classes(&self) -> u32 {
        self.0
    }

    /// Combine with source order for complete ordering.
    pub fn with_order(self, order: u32) -> SpecificityWithOrder {
        SpecificityWithOrder {
            specificity: self,
            order,
        }
    }
}

impl std::fmt::Display for Specificity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({})", self.0)
    }
}

/// Specificity combined with source order for tie-breaking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SpecificityWithOrder {
    /// The selector specificity.
    pub specificity: Specificity,
    /// Declaration index within the layer (higher = later).
    pub order: u32,
}
