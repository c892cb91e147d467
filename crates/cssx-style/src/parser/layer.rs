//! Compiled layer documents.
//!
//! The stylesheet compiler emits a JSON object per layer:
//!
//! ```json
//! {
//!   "root": { "padding": "2u" },
//!   "root::part(header)": { "fontSize": 20 },
//!   "@media (max-width: 600px)": {
//!     "root": { "padding": "1u" }
//!   }
//! }
//! ```
//!
//! Rules keep document order. Keys starting with `__` are compiler
//! metadata and are skipped.

use cssx_core::logging::targets;
use serde::Deserialize;
use serde_json::Value;

use super::media::parse_media_prelude;
use super::selector::parse_selector;
use crate::rules::{LayerBuilder, LayerOrigin, StyleLayer};
use crate::types::PropertyMap;
use crate::{Error, Result};

const MEDIA_PREFIX: &str = "@media";

/// Build a layer from a decoded JSON document.
pub fn parse_layer(origin: LayerOrigin, document: &Value) -> Result<StyleLayer> {
    let entries = document
        .as_object()
        .ok_or_else(|| Error::invalid_layer("layer document must be a JSON object"))?;
    let mut builder = LayerBuilder::new(origin);

    for (key, body) in entries {
        if key.starts_with("__") {
            tracing::trace!(target: targets::RESOLVE, key = %key, "skipping compiler metadata");
            continue;
        }

        if let Some(prelude) = key.strip_prefix(MEDIA_PREFIX) {
            let queries = parse_media_prelude(prelude);
            let rules = body.as_object().ok_or_else(|| {
                Error::invalid_layer(format!("'{}' must map selectors to properties", key))
            })?;
            for (selector, properties) in rules {
                let parsed = parse_selector(selector)?;
                let properties = parse_properties(selector, properties)?;
                for query in &queries {
                    builder.push(parsed.clone(), Some(query.clone()), properties.clone());
                }
            }
        } else {
            builder.push(parse_selector(key)?, None, parse_properties(key, body)?);
        }
    }

    let layer = builder.build();
    tracing::debug!(
        target: targets::RESOLVE,
        origin = origin.as_str(),
        rules = layer.len(),
        "parsed layer"
    );
    Ok(layer)
}

fn parse_properties(selector: &str, body: &Value) -> Result<PropertyMap> {
    if !body.is_object() {
        return Err(Error::invalid_layer(format!(
            "rule '{}' must be an object of properties",
            selector
        )));
    }
    PropertyMap::deserialize(body)
        .map_err(|e| Error::invalid_layer(format!("rule '{}': {}", selector, e)))
}

impl StyleLayer {
    /// Decode a compiled layer from JSON text.
    pub fn from_json(origin: LayerOrigin, json: &str) -> Result<Self> {
        let document: Value = serde_json::from_str(json)?;
        parse_layer(origin, &document)
    }
}
