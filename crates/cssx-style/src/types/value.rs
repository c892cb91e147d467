//! Style property value types.
//!
//! Values arrive from the stylesheet compiler either as bare numbers or as
//! strings that may still carry `var()` references, custom `u` units or
//! viewport units. Structured values (`transform` lists, `shadowOffset`
//! maps) nest further values.
//!
//! # Example
//!
//! ```
//! use cssx_style::prelude::*;
//!
//! let padding = PropertyValue::from(16);
//! assert_eq!(padding.as_number(), Some(16.0));
//!
//! let color = PropertyValue::from("var(--primary, #f00)");
//! assert_eq!(color.as_text(), Some("var(--primary, #f00)"));
//! ```

use std::collections::BTreeMap;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize, Serializer};

use crate::Result;

/// A flat, deterministically ordered property mapping.
pub type PropertyMap = BTreeMap<String, PropertyValue>;

/// Final style: result key (`style`, `headerStyle`, ...) to flat properties.
pub type ResolvedStyle = BTreeMap<String, PropertyMap>;

/// Result key of the root part.
pub const ROOT_STYLE_KEY: &str = "style";

/// Map a part name to its result key.
///
/// The root part (`""`) maps to `style`; named parts map to `<name>Style`.
pub fn part_result_key(part: &str) -> String {
    if part.is_empty() {
        ROOT_STYLE_KEY.to_string()
    } else {
        format!("{}Style", part)
    }
}

/// A single property value.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum PropertyValue {
    /// A bare number (pixels, where a length is expected).
    Number(f64),
    /// A string value, possibly with `var()` or unit tokens.
    Text(String),
    /// A list of values (e.g. `transform`).
    List(Vec<PropertyValue>),
    /// A nested mapping (e.g. `shadowOffset`).
    Map(PropertyMap),
}

impl PropertyValue {
    /// Get the number if this is a `Number`.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            PropertyValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Get the string if this is a `Text`.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            PropertyValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Visit every text leaf in the value tree.
    pub fn for_each_text<F>(&self, f: &mut F)
    where
        F: FnMut(&str),
    {
        match self {
            PropertyValue::Number(_) => {}
            PropertyValue::Text(s) => f(s),
            PropertyValue::List(items) => {
                for item in items {
                    item.for_each_text(f);
                }
            }
            PropertyValue::Map(map) => {
                for value in map.values() {
                    value.for_each_text(f);
                }
            }
        }
    }

    /// Whether any text leaf satisfies `predicate`.
    pub fn any_text<F>(&self, predicate: F) -> bool
    where
        F: Fn(&str) -> bool,
    {
        let mut found = false;
        self.for_each_text(&mut |s| found = found || predicate(s));
        found
    }

    /// Rebuild the value tree, replacing every text leaf with the output of `f`.
    ///
    /// `f` receives the map key the leaf sits under (the property name for
    /// top-level values) so that property-specific rules can apply.
    pub fn try_map_text<F>(self, key: &str, f: &mut F) -> Result<PropertyValue>
    where
        F: FnMut(&str, String) -> Result<PropertyValue>,
    {
        match self {
            PropertyValue::Number(n) => Ok(PropertyValue::Number(n)),
            PropertyValue::Text(s) => f(key, s),
            PropertyValue::List(items) => items
                .into_iter()
                .map(|item| item.try_map_text(key, f))
                .collect::<Result<Vec<_>>>()
                .map(PropertyValue::List),
            PropertyValue::Map(map) => map
                .into_iter()
                .map(|(k, v)| {
                    let v = v.try_map_text(&k, f)?;
                    Ok((k, v))
                })
                .collect::<Result<PropertyMap>>()
                .map(PropertyValue::Map),
        }
    }
}

impl Serialize for PropertyValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            // Integral numbers serialize as integers so `16` round-trips as `16`, not `16.0`.
            PropertyValue::Number(n) if n.fract() == 0.0 && n.abs() < 9_007_199_254_740_992.0 => {
                serializer.serialize_i64(*n as i64)
            }
            PropertyValue::Number(n) => serializer.serialize_f64(*n),
            PropertyValue::Text(s) => serializer.serialize_str(s),
            PropertyValue::List(items) => items.serialize(serializer),
            PropertyValue::Map(map) => map.serialize(serializer),
        }
    }
}

impl Hash for PropertyValue {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            PropertyValue::Number(n) => n.to_bits().hash(state),
            PropertyValue::Text(s) => s.hash(state),
            PropertyValue::List(items) => items.hash(state),
            PropertyValue::Map(map) => map.hash(state),
        }
    }
}

impl From<f64> for PropertyValue {
    fn from(value: f64) -> Self {
        PropertyValue::Number(value)
    }
}

impl From<i32> for PropertyValue {
    fn from(value: i32) -> Self {
        PropertyValue::Number(value as f64)
    }
}

impl From<&str> for PropertyValue {
    fn from(value: &str) -> Self {
        PropertyValue::Text(value.to_string())
    }
}

impl From<String> for PropertyValue {
    fn from(value: String) -> Self {
        PropertyValue::Text(value)
    }
}

impl From<Vec<PropertyValue>> for PropertyValue {
    fn from(value: Vec<PropertyValue>) -> Self {
        PropertyValue::List(value)
    }
}

impl From<PropertyMap> for PropertyValue {
    fn from(value: PropertyMap) -> Self {
        PropertyValue::Map(value)
    }
}

/// Build a [`PropertyMap`] from `(name, value)` pairs.
///
/// ```
/// use cssx_style::prelude::*;
///
/// let props = props([("color", "#f00".into()), ("opacity", 0.5.into())]);
/// assert_eq!(props.len(), 2);
/// ```
pub fn props<I, K>(pairs: I) -> PropertyMap
where
    I: IntoIterator<Item = (K, PropertyValue)>,
    K: Into<String>,
{
    pairs.into_iter().map(|(k, v)| (k.into(), v)).collect()
}
