//! `var()` reference scanning and substitution.
//!
//! Substitution walks the value tree and rewrites text leaves in place.
//! Fallbacks may contain nested parentheses, commas and further `var()`
//! references, so references are located with a small bracket-aware
//! scanner rather than a single pattern.

use std::collections::BTreeSet;
use std::sync::LazyLock;

use cssx_core::logging::targets;
use regex::Regex;

use super::VariableStore;
use crate::normalize::{parse_number, strip_wrapping_parens};
use crate::types::PropertyValue;
use crate::{Error, Result};

/// Value substituted for an undefined variable without a fallback.
///
/// This is the CSS `unset` keyword: the declaration is treated as if it had
/// never been written. Strict mode reports
/// [`Error::UnresolvedVariable`] instead.
pub const UNRESOLVED_VARIABLE: &str = "unset";

const MAX_DEPTH: usize = 16;

static VARIABLE_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^--[A-Za-z0-9_-]+$").expect("valid variable name pattern"));

/// One `var()` reference located in a string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VarReference<'a> {
    /// Byte offset of `var(`.
    pub start: usize,
    /// Byte offset one past the closing `)`.
    pub end: usize,
    /// The variable name, including `--`.
    pub name: &'a str,
    /// The fallback text (trimmed), if a comma was present.
    pub fallback: Option<&'a str>,
}

/// Whether `text` contains any `var(` token.
pub fn has_variables(text: &str) -> bool {
    text.contains("var(")
}

fn is_ident_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-' || c == '_'
}

/// Locate the top-level `var()` references in `text`.
///
/// References nested inside a fallback are not returned separately; they are
/// resolved when the fallback is.
pub fn find_references(text: &str) -> Result<Vec<VarReference<'_>>> {
    let mut refs = vec![];
    let mut search_from = 0;

    while let Some(offset) = text[search_from..].find("var(") {
        let start = search_from + offset;
        let preceded_by_ident = text[..start].chars().next_back().is_some_and(is_ident_char);
        if preceded_by_ident {
            search_from = start + 4;
            continue;
        }

        let body_start = start + 4;
        let mut depth = 1usize;
        let mut comma = None;
        let mut close = None;
        let mut quote: Option<char> = None;
        let mut escaped = false;
        for (i, c) in text[body_start..].char_indices() {
            if let Some(q) = quote {
                match c {
                    _ if escaped => escaped = false,
                    '\\' => escaped = true,
                    _ if c == q => quote = None,
                    _ => {}
                }
                continue;
            }
            match c {
                '"' | '\'' => quote = Some(c),
                '(' => depth += 1,
                ')' => {
                    depth -= 1;
                    if depth == 0 {
                        close = Some(body_start + i);
                        break;
                    }
                }
                ',' if depth == 1 && comma.is_none() => comma = Some(body_start + i),
                _ => {}
            }
        }

        let Some(close) = close else {
            if quote.is_some() {
                return Err(Error::malformed_variable(text, "unterminated string in 'var('"));
            }
            return Err(Error::malformed_variable(text, "unclosed 'var('"));
        };
        let token = &text[start..=close];
        if token.contains("${") {
            return Err(Error::interpolated(text));
        }

        let name_end = comma.unwrap_or(close);
        let name = text[body_start..name_end].trim();
        if !VARIABLE_NAME.is_match(name) {
            return Err(Error::malformed_variable(
                text,
                format!("invalid variable name '{}'", name),
            ));
        }
        let fallback = comma.map(|c| text[c + 1..close].trim());

        refs.push(VarReference {
            start,
            end: close + 1,
            name,
            fallback,
        });
        search_from = close + 1;
    }

    Ok(refs)
}

/// Collect every variable name referenced by `value`, including names that
/// appear only inside fallbacks.
///
/// Malformed references are skipped here; resolution reports them.
pub fn collect_variable_names(value: &PropertyValue, names: &mut BTreeSet<String>) {
    value.for_each_text(&mut |text| collect_from_text(text, names, 0));
}

fn collect_from_text(text: &str, names: &mut BTreeSet<String>, depth: usize) {
    if depth > MAX_DEPTH || !has_variables(text) {
        return;
    }
    let Ok(refs) = find_references(text) else {
        return;
    };
    for reference in refs {
        names.insert(reference.name.to_string());
        if let Some(fallback) = reference.fallback {
            collect_from_text(fallback, names, depth + 1);
        }
    }
}

/// Replace every `var()` reference in a value tree.
///
/// A text leaf that consists of exactly one reference takes on the resolved
/// value's type: numeric-looking results (after trimming wrapping
/// parentheses and a `px` suffix) become numbers. References embedded in
/// longer text are substituted textually.
pub fn substitute(value: PropertyValue, store: &VariableStore, strict: bool) -> Result<PropertyValue> {
    value.try_map_text("", &mut |_, text| substitute_leaf(text, store, strict))
}

fn substitute_leaf(text: String, store: &VariableStore, strict: bool) -> Result<PropertyValue> {
    if !has_variables(&text) {
        return Ok(PropertyValue::Text(text));
    }

    let trimmed = text.trim();
    let refs = find_references(trimmed)?;
    if let [only] = refs.as_slice() {
        if only.start == 0 && only.end == trimmed.len() {
            let resolved = resolve_reference(only, store, strict, 0)?;
            return Ok(coerce_resolved(&resolved));
        }
    }

    substitute_text(&text, store, strict).map(PropertyValue::Text)
}

/// Replace every `var()` reference in a string with its resolved text.
pub fn substitute_text(text: &str, store: &VariableStore, strict: bool) -> Result<String> {
    substitute_text_at(text, store, strict, 0)
}

fn substitute_text_at(text: &str, store: &VariableStore, strict: bool, depth: usize) -> Result<String> {
    if depth > MAX_DEPTH {
        return Err(Error::malformed_variable(text, "variable references nest too deeply"));
    }
    if !has_variables(text) {
        return Ok(text.to_string());
    }

    let mut out = String::with_capacity(text.len());
    let mut cursor = 0;
    for reference in find_references(text)? {
        out.push_str(&text[cursor..reference.start]);
        out.push_str(&resolve_reference(&reference, store, strict, depth)?);
        cursor = reference.end;
    }
    out.push_str(&text[cursor..]);
    Ok(out)
}

fn resolve_reference(
    reference: &VarReference<'_>,
    store: &VariableStore,
    strict: bool,
    depth: usize,
) -> Result<String> {
    if let Some(value) = store.get(reference.name) {
        return substitute_text_at(value.trim(), store, strict, depth + 1);
    }
    if let Some(fallback) = reference.fallback {
        return substitute_text_at(fallback, store, strict, depth + 1);
    }
    if strict {
        return Err(Error::unresolved_variable(reference.name));
    }
    tracing::warn!(
        target: targets::VARIABLES,
        name = reference.name,
        "variable is not defined and has no fallback; using '{}'",
        UNRESOLVED_VARIABLE
    );
    Ok(UNRESOLVED_VARIABLE.to_string())
}

fn coerce_resolved(resolved: &str) -> PropertyValue {
    let inner = strip_wrapping_parens(resolved.trim());
    let numeric = inner.strip_suffix("px").unwrap_or(inner);
    match parse_number(numeric) {
        Some(n) => PropertyValue::Number(n),
        None => PropertyValue::Text(inner.to_string()),
    }
}
