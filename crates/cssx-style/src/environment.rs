//! Process-wide dynamic state that styles depend on.
//!
//! A [`StyleEnvironment`] bundles the viewport dimensions, the variable
//! store and the rendering platform. One instance is shared (through an
//! `Arc`) between the style engine and the platform hooks that update it.

use std::hash::{Hash, Hasher};

use cssx_core::Property;
use cssx_core::logging::targets;
use serde::{Deserialize, Serialize};

use crate::variables::VariableStore;

/// Viewport size in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Dimensions {
    /// Viewport width.
    pub width: f64,
    /// Viewport height.
    pub height: f64,
}

impl Dimensions {
    /// Size used when the platform cannot report one (no window yet).
    pub const FALLBACK: Self = Self::new(1024.0, 768.0);

    /// Create dimensions.
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Width divided by height.
    pub fn aspect_ratio(&self) -> f64 {
        self.width / self.height
    }
}

impl Default for Dimensions {
    fn default() -> Self {
        Self::FALLBACK
    }
}

impl Hash for Dimensions {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.width.to_bits().hash(state);
        self.height.to_bits().hash(state);
    }
}

/// Rendering target.
///
/// The two targets disagree on one implicit unit: a unitless `lineHeight`
/// is pixels on native but a multiplier on the web.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    /// Native views; unitless numbers are pixels everywhere.
    #[default]
    Native,
    /// Pure (DOM) rendering; `lineHeight` needs an explicit `px` suffix.
    Pure,
}

/// Source of viewport size and platform information.
pub trait PlatformAdapter {
    /// Current viewport dimensions.
    fn dimensions(&self) -> Dimensions;

    /// The rendering target.
    fn platform(&self) -> Platform;
}

/// A platform adapter with fixed values.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct StaticPlatform {
    /// Reported dimensions.
    pub dimensions: Dimensions,
    /// Reported platform.
    pub platform: Platform,
}

impl StaticPlatform {
    /// Create a fixed adapter.
    pub fn new(dimensions: Dimensions, platform: Platform) -> Self {
        Self {
            dimensions,
            platform,
        }
    }
}

impl PlatformAdapter for StaticPlatform {
    fn dimensions(&self) -> Dimensions {
        self.dimensions
    }

    fn platform(&self) -> Platform {
        self.platform
    }
}

/// Shared dynamic state for style resolution.
#[derive(Debug, Default)]
pub struct StyleEnvironment {
    dimensions: Property<Dimensions>,
    variables: VariableStore,
    platform: Platform,
}

impl StyleEnvironment {
    /// Create an environment with explicit dimensions and platform.
    pub fn new(dimensions: Dimensions, platform: Platform) -> Self {
        Self {
            dimensions: Property::new(dimensions),
            variables: VariableStore::new(),
            platform,
        }
    }

    /// Create an environment from a platform adapter.
    pub fn from_platform(adapter: &dyn PlatformAdapter) -> Self {
        Self::new(adapter.dimensions(), adapter.platform())
    }

    /// Current viewport dimensions.
    pub fn dimensions(&self) -> Dimensions {
        self.dimensions.get()
    }

    /// Replace the viewport dimensions. Returns `true` if they changed.
    pub fn set_dimensions(&self, dimensions: Dimensions) -> bool {
        match self.dimensions.replace(dimensions) {
            Some(old) => {
                tracing::debug!(
                    target: targets::ENVIRONMENT,
                    from = ?old,
                    to = ?dimensions,
                    "viewport dimensions changed"
                );
                true
            }
            None => false,
        }
    }

    /// Resize/orientation hook: pull fresh dimensions from the platform.
    pub fn refresh(&self, adapter: &dyn PlatformAdapter) -> bool {
        self.set_dimensions(adapter.dimensions())
    }

    /// The variable store.
    pub fn variables(&self) -> &VariableStore {
        &self.variables
    }

    /// The rendering platform.
    pub fn platform(&self) -> Platform {
        self.platform
    }
}
