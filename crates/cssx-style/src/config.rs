//! Engine configuration.

use serde::{Deserialize, Serialize};

use crate::normalize::DEFAULT_UNIT_PX;

/// Configuration for a [`StyleEngine`](crate::StyleEngine).
///
/// ```
/// use cssx_style::EngineConfig;
///
/// let config = EngineConfig::new().cache_capacity(64).strict_variables(true);
/// assert_eq!(config.cache_capacity, 64);
/// assert_eq!(config.unit_px, 8.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Maximum number of cached resolutions. Half are evicted when full.
    pub cache_capacity: usize,
    /// Fail on undefined variables without a fallback instead of
    /// substituting `unset`.
    pub strict_variables: bool,
    /// Pixels per custom `u` unit.
    pub unit_px: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            cache_capacity: 1024,
            strict_variables: false,
            unit_px: DEFAULT_UNIT_PX,
        }
    }
}

impl EngineConfig {
    /// Create a configuration with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the cache capacity.
    pub fn cache_capacity(mut self, capacity: usize) -> Self {
        self.cache_capacity = capacity;
        self
    }

    /// Enable or disable strict variable resolution.
    pub fn strict_variables(mut self, enabled: bool) -> Self {
        self.strict_variables = enabled;
        self
    }

    /// Set the pixel size of the custom unit.
    pub fn unit_px(mut self, px: f64) -> Self {
        self.unit_px = px;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = EngineConfig::default();
        assert_eq!(config.cache_capacity, 1024);
        assert!(!config.strict_variables);
        assert_eq!(config.unit_px, 8.0);
    }

    #[test]
    fn partial_json_fills_defaults() {
        let config: EngineConfig = serde_json::from_str(r#"{"strict_variables": true}"#).unwrap();
        assert!(config.strict_variables);
        assert_eq!(config.cache_capacity, 1024);
    }

    #[test]
    fn builder_chain() {
        let config = EngineConfig::new().unit_px(4.0).cache_capacity(2);
        assert_eq!(config.unit_px, 4.0);
        assert_eq!(config.cache_capacity, 2);
    }
}
