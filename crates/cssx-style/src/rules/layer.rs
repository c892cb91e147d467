//! Style layers.

use std::hash::{DefaultHasher, Hash, Hasher};

use crate::media::MediaQuery;
use crate::rules::StyleRule;
use crate::selector::ClassSelector;
use crate::types::PropertyMap;

/// Origin of a style layer.
///
/// Later origins override earlier ones regardless of selector specificity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum LayerOrigin {
    /// Styles from an external stylesheet file (lowest precedence).
    File = 0,
    /// Styles declared globally in the component module.
    Global = 1,
    /// Styles declared locally in the component (highest layer precedence).
    Local = 2,
}

impl LayerOrigin {
    /// Short name for logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            LayerOrigin::File => "file",
            LayerOrigin::Global => "global",
            LayerOrigin::Local => "local",
        }
    }
}

/// An immutable, ordered collection of rules from one origin.
///
/// Layers are built once (with [`LayerBuilder`] or from compiled JSON) and
/// never change afterwards. A content hash computed at build time gives the
/// layer a cheap identity for cache keys.
#[derive(Debug, Clone)]
pub struct StyleLayer {
    origin: LayerOrigin,
    rules: Vec<StyleRule>,
    content_hash: u64,
}

impl StyleLayer {
    /// Create an empty layer.
    pub fn empty(origin: LayerOrigin) -> Self {
        LayerBuilder::new(origin).build()
    }

    /// Start building a layer.
    pub fn builder(origin: LayerOrigin) -> LayerBuilder {
        LayerBuilder::new(origin)
    }

    /// The layer's origin.
    pub fn origin(&self) -> LayerOrigin {
        self.origin
    }

    /// The rules in declaration order.
    pub fn rules(&self) -> &[StyleRule] {
        &self.rules
    }

    /// Iterate over rules.
    pub fn iter(&self) -> impl Iterator<Item = &StyleRule> {
        self.rules.iter()
    }

    /// Get the number of rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Check if the layer is empty.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Whether any rule carries a media query.
    pub fn has_media(&self) -> bool {
        self.rules.iter().any(|r| r.media.is_some())
    }

    /// Hash of the layer's full content, computed at build time.
    pub fn content_hash(&self) -> u64 {
        self.content_hash
    }
}

impl PartialEq for StyleLayer {
    fn eq(&self, other: &Self) -> bool {
        self.content_hash == other.content_hash
            && self.origin == other.origin
            && self.rules == other.rules
    }
}

/// Builder for [`StyleLayer`].
///
/// Rules receive their declaration order automatically.
///
/// ```
/// use cssx_style::prelude::*;
///
/// let layer = StyleLayer::builder(LayerOrigin::File)
///     .rule(ClassSelector::class("root"), props([("color", "#f00".into())]))
///     .rule(
///         ClassSelector::class("root").with_part("header"),
///         props([("fontSize", 20.into())]),
///     )
///     .build();
///
/// assert_eq!(layer.len(), 2);
/// assert_eq!(layer.rules()[1].order, 1);
/// ```
#[derive(Debug, Clone)]
pub struct LayerBuilder {
    origin: LayerOrigin,
    rules: Vec<StyleRule>,
}

impl LayerBuilder {
    /// Create a builder for a layer of the given origin.
    pub fn new(origin: LayerOrigin) -> Self {
        Self {
            origin,
            rules: vec![],
        }
    }

    /// Add a rule.
    pub fn rule(mut self, selector: ClassSelector, properties: PropertyMap) -> Self {
        self.push(selector, None, properties);
        self
    }

    /// Add a rule gated by a media query.
    pub fn media_rule(
        mut self,
        media: MediaQuery,
        selector: ClassSelector,
        properties: PropertyMap,
    ) -> Self {
        self.push(selector, Some(media), properties);
        self
    }

    /// Add a rule in place.
    pub fn push(
        &mut self,
        selector: ClassSelector,
        media: Option<MediaQuery>,
        properties: PropertyMap,
    ) {
        let order = self.rules.len() as u32;
        let rule = StyleRule::new(selector, properties, order);
        self.rules.push(match media {
            Some(media) => rule.with_media(media),
            None => rule,
        });
    }

    /// Finish the layer and compute its content hash.
    pub fn build(self) -> StyleLayer {
        let mut hasher = DefaultHasher::new();
        self.origin.hash(&mut hasher);
        self.rules.hash(&mut hasher);

        StyleLayer {
            origin: self.origin,
            rules: self.rules,
            content_hash: hasher.finish(),
        }
    }
}
