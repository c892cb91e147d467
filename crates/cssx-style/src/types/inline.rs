//! Inline style overrides.
//!
//! Inline styles are keyed by result key (`style`, `headerStyle`, ...), not
//! by part name. They always win over every stylesheet layer.

use std::collections::BTreeMap;
use std::hash::{Hash, Hasher};

use serde::Deserialize;

use super::value::PropertyMap;
use crate::Result;

/// One inline style entry.
///
/// Upstream composition can hand over nested lists of style objects
/// (`[base, [hover, pressed]]`); they are flattened left to right.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum InlineStyle {
    /// A single property mapping.
    Map(PropertyMap),
    /// A (possibly nested) list of style objects.
    List(Vec<InlineStyle>),
}

impl InlineStyle {
    /// Deep-flatten and merge into one mapping; later entries override earlier ones.
    pub fn flatten(&self) -> PropertyMap {
        let mut out = PropertyMap::new();
        self.flatten_into(&mut out);
        out
    }

    fn flatten_into(&self, out: &mut PropertyMap) {
        match self {
            InlineStyle::Map(map) => {
                for (key, value) in map {
                    out.insert(key.clone(), value.clone());
                }
            }
            InlineStyle::List(items) => {
                for item in items {
                    item.flatten_into(out);
                }
            }
        }
    }
}

impl From<PropertyMap> for InlineStyle {
    fn from(value: PropertyMap) -> Self {
        InlineStyle::Map(value)
    }
}

impl Hash for InlineStyle {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            InlineStyle::Map(map) => map.hash(state),
            InlineStyle::List(items) => items.hash(state),
        }
    }
}

/// Inline overrides for one resolution, by result key.
#[derive(Debug, Clone, Default, PartialEq, Hash, Deserialize)]
#[serde(transparent)]
pub struct InlineStyles {
    entries: BTreeMap<String, InlineStyle>,
}

impl InlineStyles {
    /// Create empty inline styles.
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode inline styles from a JSON object.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Builder-style insert.
    pub fn with(mut self, key: impl Into<String>, style: impl Into<InlineStyle>) -> Self {
        self.insert(key, style);
        self
    }

    /// Insert or replace the entry for `key`.
    pub fn insert(&mut self, key: impl Into<String>, style: impl Into<InlineStyle>) {
        self.entries.insert(key.into(), style.into());
    }

    /// Get the entry for a result key.
    pub fn get(&self, key: &str) -> Option<&InlineStyle> {
        self.entries.get(key)
    }

    /// Iterate over `(result key, style)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &InlineStyle)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Check if there are no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }
}
