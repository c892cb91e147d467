//! Property cascading logic.

use std::collections::BTreeMap;

use crate::normalize::{NormalizeContext, normalize_value};
use crate::selector::LayerMatch;
use crate::types::{InlineStyles, PropertyMap, ResolvedStyle, part_result_key};
use crate::variables::{VariableStore, substitute};
use crate::Result;

/// Inputs for the value passes that run after merging.
#[derive(Debug, Clone, Copy)]
pub struct CascadeContext<'a> {
    /// Variable registry for `var()` substitution.
    pub variables: &'a VariableStore,
    /// Fail on undefined variables without a fallback.
    pub strict_variables: bool,
    /// Unit normalization settings.
    pub normalize: NormalizeContext,
}

/// Cascade source properties onto target.
///
/// Every property in `source` overwrites the same property in `target`.
/// This is the core of CSS cascading - later rules override earlier ones.
pub fn cascade_properties(target: &mut PropertyMap, source: &PropertyMap) {
    for (name, value) in source {
        target.insert(name.clone(), value.clone());
    }
}

/// Merge matched rules and inline overrides into raw (unresolved) parts.
///
/// `matches` must be in cascade order (file, global, local). Within a layer
/// rules apply by ascending specificity then declaration order; a later
/// layer overrides an earlier one whatever the specificities. Inline
/// overrides apply last, keyed by result key.
pub fn merge_parts(matches: &[LayerMatch<'_>], inline: &InlineStyles) -> BTreeMap<String, PropertyMap> {
    let mut merged: BTreeMap<String, PropertyMap> = BTreeMap::new();

    for layer in matches {
        for (part, rules) in &layer.parts {
            let target = merged.entry(part_result_key(part)).or_default();
            for matched in rules {
                cascade_properties(target, &matched.rule.properties);
            }
        }
    }

    for (key, style) in inline.iter() {
        cascade_properties(merged.entry(key.to_string()).or_default(), &style.flatten());
    }

    merged
}

/// Substitute variables and normalize units in every merged part.
///
/// Empty parts are dropped. Any error fails the whole resolution.
pub fn finalize_parts(
    merged: BTreeMap<String, PropertyMap>,
    ctx: &CascadeContext<'_>,
) -> Result<ResolvedStyle> {
    let mut resolved = ResolvedStyle::new();

    for (key, properties) in merged {
        if properties.is_empty() {
            continue;
        }
        let mut part = PropertyMap::new();
        for (name, value) in properties {
            let value = substitute(value, ctx.variables, ctx.strict_variables)?;
            let value = normalize_value(&name, value, &ctx.normalize);
            part.insert(name, value);
        }
        resolved.insert(key, part);
    }

    Ok(resolved)
}

/// Run the full cascade: merge the three layers and inline overrides, then
/// resolve values.
pub fn cascade(
    matches: &[LayerMatch<'_>; 3],
    inline: &InlineStyles,
    ctx: &CascadeContext<'_>,
) -> Result<ResolvedStyle> {
    finalize_parts(merge_parts(matches, inline), ctx)
}
