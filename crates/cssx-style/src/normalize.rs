//! Unit and value normalization.
//!
//! The target UI layer treats bare numbers as pixels, so resolved values
//! are cleaned up before they leave the engine:
//!
//! - `2u` (the custom 8px unit) becomes `16`
//! - `50vw` and friends become pixels of the current viewport
//! - wrapping parentheses left by the stylesheet compiler are removed
//! - `16px` becomes `16`
//! - `lineHeight` keeps an explicit `px` suffix on the pure (DOM) platform
//!
//! A value that is exactly one unit token becomes a number. Tokens embedded
//! in longer values (`0 2u`, `rgba(0, 0, 0, .5)`) are rewritten in place.

use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::environment::{Dimensions, Platform};
use crate::types::PropertyValue;

/// Pixels per custom `u` unit.
pub const DEFAULT_UNIT_PX: f64 = 8.0;

const NUMBER: &str = r"-?(?:\d+(?:\.\d+)?|\.\d+)";

static CUSTOM_UNIT_TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"(^|[(,\s])({})u($|[),\s])", NUMBER)).expect("valid unit pattern")
});

static CUSTOM_UNIT_WHOLE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"^({})u$", NUMBER)).expect("valid unit pattern")
});

static VIEWPORT_UNIT_TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"(^|[(,\s])({})(vw|vh|vmin|vmax)($|[),\s])", NUMBER))
        .expect("valid viewport unit pattern")
});

/// Inputs the normalizer depends on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NormalizeContext {
    /// Rendering target.
    pub platform: Platform,
    /// Current viewport, for viewport units.
    pub dimensions: Dimensions,
    /// Pixels per `u`.
    pub unit_px: f64,
}

impl Default for NormalizeContext {
    fn default() -> Self {
        Self {
            platform: Platform::Native,
            dimensions: Dimensions::default(),
            unit_px: DEFAULT_UNIT_PX,
        }
    }
}

/// Parse a numeric-looking string.
pub fn parse_number(text: &str) -> Option<f64> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    text.parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Remove N leading and N trailing parentheses, where N is the number of
/// leading ones, if the inner text stays balanced.
pub fn strip_wrapping_parens(text: &str) -> &str {
    let leading = text.chars().take_while(|c| *c == '(').count();
    if leading == 0 || text.len() < leading * 2 {
        return text;
    }
    let trailing = text.chars().rev().take_while(|c| *c == ')').count();
    if trailing < leading {
        return text;
    }

    let inner = &text[leading..text.len() - leading];
    let mut depth = 0i32;
    for c in inner.chars() {
        match c {
            '(' => depth += 1,
            ')' => {
                depth -= 1;
                if depth < 0 {
                    return text;
                }
            }
            _ => {}
        }
    }
    if depth == 0 { inner } else { text }
}

/// Whether a string uses viewport units.
pub fn has_viewport_units(text: &str) -> bool {
    VIEWPORT_UNIT_TOKEN.is_match(text)
}

fn replace_until_stable<F>(re: &Regex, text: String, mut replace: F) -> String
where
    F: FnMut(&Captures<'_>) -> String,
{
    let mut text = text;
    // Delimiters are consumed with each match, so adjacent tokens need another pass.
    while re.is_match(&text) {
        text = re.replace_all(&text, |caps: &Captures<'_>| replace(caps)).into_owned();
    }
    text
}

fn expand_custom_units(text: String, unit_px: f64) -> String {
    replace_until_stable(&CUSTOM_UNIT_TOKEN, text, |caps| {
        let n = caps[2].parse::<f64>().unwrap_or_default();
        format!("{}{}{}", &caps[1], n * unit_px, &caps[3])
    })
}

fn expand_viewport_units(text: String, dimensions: &Dimensions) -> String {
    replace_until_stable(&VIEWPORT_UNIT_TOKEN, text, |caps| {
        let n = caps[2].parse::<f64>().unwrap_or_default();
        let basis = match &caps[3] {
            "vw" => dimensions.width,
            "vh" => dimensions.height,
            "vmin" => dimensions.width.min(dimensions.height),
            _ => dimensions.width.max(dimensions.height),
        };
        format!("{}{}{}", &caps[1], n * basis / 100.0, &caps[4])
    })
}

/// Normalize one text value.
///
/// Numeric strings that no pass touched (`fontWeight: "700"`) stay strings.
pub fn normalize_text(text: String, ctx: &NormalizeContext) -> PropertyValue {
    let trimmed = text.trim();
    if let Some(caps) = CUSTOM_UNIT_WHOLE.captures(trimmed) {
        if let Some(n) = parse_number(&caps[1]) {
            return PropertyValue::Number(n * ctx.unit_px);
        }
    }

    let original = trimmed.to_string();
    let expanded = expand_viewport_units(expand_custom_units(original.clone(), ctx.unit_px), &ctx.dimensions);
    let unwrapped = strip_wrapping_parens(&expanded);

    if let Some(n) = unwrapped.strip_suffix("px").and_then(parse_number) {
        return PropertyValue::Number(n);
    }
    if unwrapped != original {
        if let Some(n) = parse_number(unwrapped) {
            return PropertyValue::Number(n);
        }
        return PropertyValue::Text(unwrapped.to_string());
    }
    PropertyValue::Text(text)
}

/// Normalize a property value.
///
/// `key` is the property name; it selects the `lineHeight` exception.
pub fn normalize_value(key: &str, value: PropertyValue, ctx: &NormalizeContext) -> PropertyValue {
    let value = normalize_tree(value, ctx);
    match value {
        PropertyValue::Number(n) if key == "lineHeight" && ctx.platform == Platform::Pure => {
            PropertyValue::Text(format!("{}px", n))
        }
        other => other,
    }
}

fn normalize_tree(value: PropertyValue, ctx: &NormalizeContext) -> PropertyValue {
    match value {
        PropertyValue::Text(text) => normalize_text(text, ctx),
        PropertyValue::List(items) => {
            PropertyValue::List(items.into_iter().map(|v| normalize_tree(v, ctx)).collect())
        }
        PropertyValue::Map(map) => PropertyValue::Map(
            map.into_iter()
                .map(|(k, v)| {
                    let v = normalize_value(&k, v, ctx);
                    (k, v)
                })
                .collect(),
        ),
        number => number,
    }
}
