//! Selector matching algorithm.

use std::collections::BTreeMap;

use super::{ActiveClasses, ClassSelector, SpecificityWithOrder};
use crate::environment::Dimensions;
use crate::rules::{LayerOrigin, StyleLayer, StyleRule};

/// A rule that matched, with its cascade rank.
#[derive(Debug, Clone, Copy)]
pub struct MatchedRule<'a> {
    /// The matched rule.
    pub rule: &'a StyleRule,
    /// Specificity and declaration order.
    pub rank: SpecificityWithOrder,
}

/// The result of matching one layer against the active classes.
#[derive(Debug, Clone)]
pub struct LayerMatch<'a> {
    /// Origin of the matched layer.
    pub origin: LayerOrigin,
    /// Matched rules per part (`""` is the root part), ascending by rank.
    pub parts: BTreeMap<&'a str, Vec<MatchedRule<'a>>>,
    /// Rules whose classes matched, whether or not their media query did.
    pub candidates: Vec<&'a StyleRule>,
}

impl<'a> LayerMatch<'a> {
    /// An empty match for `origin`.
    pub fn empty(origin: LayerOrigin) -> Self {
        Self {
            origin,
            parts: BTreeMap::new(),
            candidates: vec![],
        }
    }

    /// Matched rules for a part, in cascade order.
    pub fn rules_for(&self, part: &str) -> &[MatchedRule<'a>] {
        self.parts.get(part).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Total number of matched rules across all parts.
    pub fn matched_count(&self) -> usize {
        self.parts.values().map(Vec::len).sum()
    }
}

/// Selector matching engine.
pub struct SelectorMatcher;

impl SelectorMatcher {
    /// Check if a selector matches the active classes.
    pub fn matches(selector: &ClassSelector, active: &ActiveClasses) -> bool {
        active.satisfies(selector)
    }

    /// Check if a rule applies: its classes match and its media query, if
    /// any, holds for `dimensions`.
    pub fn rule_applies(rule: &StyleRule, active: &ActiveClasses, dimensions: &Dimensions) -> bool {
        Self::matches(&rule.selector, active)
            && rule.media.as_ref().is_none_or(|m| m.matches(dimensions))
    }

    /// Match every rule of a layer and bucket the hits by part.
    ///
    /// Each bucket is sorted ascending by specificity, then declaration
    /// order, so merging a bucket front to back lets the strongest rule win.
    pub fn match_layer<'a>(
        layer: &'a StyleLayer,
        active: &ActiveClasses,
        dimensions: &Dimensions,
    ) -> LayerMatch<'a> {
        let mut result = LayerMatch::empty(layer.origin());

        for rule in layer.iter() {
            if !Self::matches(&rule.selector, active) {
                continue;
            }
            result.candidates.push(rule);

            if rule.media.as_ref().is_some_and(|m| !m.matches(dimensions)) {
                continue;
            }

            result
                .parts
                .entry(rule.selector.part())
                .or_default()
                .push(MatchedRule {
                    rule,
                    rank: rule.specificity_with_order(),
                });
        }

        for bucket in result.parts.values_mut() {
            bucket.sort_by_key(|m| m.rank);
        }

        result
    }
}
