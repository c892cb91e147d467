//! Layered variable registry.

use std::collections::HashMap;

use parking_lot::RwLock;

/// Two-layer store of CSS custom properties.
///
/// - **runtime** values are set by the application at any time and take
///   precedence
/// - **default** values act as configuration and are consulted next
///
/// Names are stored with their leading `--`; setters add it when missing.
/// All mutators take `&self` so the store can live inside a shared
/// [`StyleEnvironment`](crate::environment::StyleEnvironment).
#[derive(Debug, Default)]
pub struct VariableStore {
    runtime: RwLock<HashMap<String, String>>,
    defaults: RwLock<HashMap<String, String>>,
}

fn normalize_name(name: impl Into<String>) -> String {
    let name = name.into();
    if name.starts_with("--") {
        name
    } else {
        format!("--{}", name)
    }
}

fn lookup_key(name: &str) -> std::borrow::Cow<'_, str> {
    if name.starts_with("--") {
        std::borrow::Cow::Borrowed(name)
    } else {
        std::borrow::Cow::Owned(format!("--{}", name))
    }
}

impl VariableStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a runtime variable.
    pub fn set(&self, name: impl Into<String>, value: impl Into<String>) {
        self.runtime.write().insert(normalize_name(name), value.into());
    }

    /// Remove a runtime variable, returning its previous value.
    pub fn remove(&self, name: &str) -> Option<String> {
        self.runtime.write().remove(lookup_key(name).as_ref())
    }

    /// Remove all runtime variables.
    pub fn clear(&self) {
        self.runtime.write().clear();
    }

    /// Set a single default variable.
    pub fn set_default(&self, name: impl Into<String>, value: impl Into<String>) {
        self.defaults.write().insert(normalize_name(name), value.into());
    }

    /// Replace the whole default layer.
    pub fn set_defaults<I, K, V>(&self, defaults: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let defaults = defaults
            .into_iter()
            .map(|(k, v)| (normalize_name(k), v.into()))
            .collect();
        *self.defaults.write() = defaults;
    }

    /// Resolve a variable: runtime value, else default value.
    pub fn get(&self, name: &str) -> Option<String> {
        let key = lookup_key(name);
        if let Some(value) = self.runtime.read().get(key.as_ref()) {
            return Some(value.clone());
        }
        self.defaults.read().get(key.as_ref()).cloned()
    }

    /// The runtime value only.
    pub fn runtime(&self, name: &str) -> Option<String> {
        self.runtime.read().get(lookup_key(name).as_ref()).cloned()
    }

    /// The default value only.
    pub fn default_value(&self, name: &str) -> Option<String> {
        self.defaults.read().get(lookup_key(name).as_ref()).cloned()
    }

    /// Check if a variable exists in either layer.
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn variables_set_get() {
        let vars = VariableStore::new();
        vars.set("primary-color", "#007AFF");

        assert_eq!(vars.get("primary-color").as_deref(), Some("#007AFF"));
        assert_eq!(vars.get("--primary-color").as_deref(), Some("#007AFF"));
    }

    #[test]
    fn runtime_precedes_defaults() {
        let vars = VariableStore::new();
        vars.set_defaults([("--color", "#00f")]);
        assert_eq!(vars.get("--color").as_deref(), Some("#00f"));

        vars.set("--color", "#800080");
        assert_eq!(vars.get("--color").as_deref(), Some("#800080"));
        assert_eq!(vars.default_value("--color").as_deref(), Some("#00f"));

        assert_eq!(vars.remove("--color").as_deref(), Some("#800080"));
        assert_eq!(vars.get("--color").as_deref(), Some("#00f"));
    }

    #[test]
    fn set_defaults_replaces_layer() {
        let vars = VariableStore::new();
        vars.set_default("--a", "1");
        vars.set_defaults([("--b", "2")]);

        assert!(!vars.contains("--a"));
        assert!(vars.contains("--b"));
        assert_eq!(vars.runtime("--b"), None);
    }
}
