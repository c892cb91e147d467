//! Single style rule definition.

use std::hash::{Hash, Hasher};

use crate::media::MediaQuery;
use crate::selector::{ClassSelector, Specificity, SpecificityWithOrder};
use crate::types::PropertyMap;

/// A style rule mapping a selector to properties.
///
/// Each rule has:
/// - A class selector, optionally scoped to a part
/// - An optional media query gating the whole rule
/// - Properties to apply when the rule matches
/// - Pre-computed specificity for efficient sorting
/// - Source order for tie-breaking
#[derive(Debug, Clone, PartialEq)]
pub struct StyleRule {
    /// The selector for matching active classes.
    pub selector: ClassSelector,
    /// Media query that must hold for the rule to apply.
    pub media: Option<MediaQuery>,
    /// The style properties to apply.
    pub properties: PropertyMap,
    /// Pre-computed specificity.
    pub specificity: Specificity,
    /// Declaration index within the layer.
    pub order: u32,
}

impl StyleRule {
    /// Create a new style rule.
    pub fn new(selector: ClassSelector, properties: PropertyMap, order: u32) -> Self {
        let specificity = Specificity::of_selector(&selector);
        Self {
            selector,
            media: None,
            properties,
            specificity,
            order,
        }
    }

    /// Gate the rule behind a media query.
    pub fn with_media(mut self, media: MediaQuery) -> Self {
        self.media = Some(media);
        self
    }

    /// Get the specificity with source order for comparison.
    pub fn specificity_with_order(&self) -> SpecificityWithOrder {
        self.specificity.with_order(self.order)
    }
}

impl Hash for StyleRule {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.selector.hash(state);
        self.media.hash(state);
        self.properties.hash(state);
        self.order.hash(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::media::MediaFeature;
    use crate::types::{PropertyValue, props};

    #[test]
    fn rule_creation() {
        let rule = StyleRule::new(
            ClassSelector::new(["root", "active"]),
            props([("color", PropertyValue::from("#008000"))]),
            3,
        );

        assert_eq!(rule.specificity, Specificity(2));
        assert_eq!(rule.order, 3);
        assert!(rule.media.is_none());
    }

    #[test]
    fn rule_specificity_comparison() {
        let single = StyleRule::new(ClassSelector::class("root"), PropertyMap::new(), 5);
        let compound = StyleRule::new(ClassSelector::new(["root", "active"]), PropertyMap::new(), 0);

        assert!(compound.specificity_with_order() > single.specificity_with_order());
    }

    #[test]
    fn media_does_not_change_specificity() {
        let rule = StyleRule::new(ClassSelector::class("root"), PropertyMap::new(), 0)
            .with_media(MediaQuery::new(vec![MediaFeature::MinWidth(768.0)]));
        assert_eq!(rule.specificity, Specificity(1));
        assert!(rule.media.is_some());
    }
}
