//! Style cascade resolution for class-based components.
//!
//! Given a string of active class names, three layers of compiled style
//! rules (file, global, local) and optional inline overrides, this crate
//! produces a map of resolved style objects keyed by result name (`style`,
//! `headerStyle`, ...). It provides:
//!
//! - **Selectors**: compound class selectors scoped to the root or a part
//! - **Cascading**: layer origin first, then specificity, then source order
//! - **Media Queries**: rules gated on the current viewport
//! - **Variables**: `var(--name, fallback)` with runtime and default layers
//! - **Units**: the custom `u` unit, viewport units and `px` stripping
//! - **Caching**: results reused until a viewport or variable they depend
//!   on changes
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use cssx_style::prelude::*;
//!
//! let env = Arc::new(StyleEnvironment::default());
//! let engine = StyleEngine::new(env.clone(), EngineConfig::default());
//!
//! let file = StyleLayer::from_json(
//!     LayerOrigin::File,
//!     r#"{
//!         "root": { "color": "var(--primary, #f00)", "padding": "1u" },
//!         "root::part(header)": { "fontSize": "20px" }
//!     }"#,
//! )?;
//! let global = StyleLayer::empty(LayerOrigin::Global);
//! let local = StyleLayer::empty(LayerOrigin::Local);
//!
//! let style = engine.resolve_cached("root", &file, &global, &local, &InlineStyles::new())?;
//! assert_eq!(style["style"]["color"], PropertyValue::from("#f00"));
//! assert_eq!(style["style"]["padding"], PropertyValue::Number(8.0));
//! assert_eq!(style["headerStyle"]["fontSize"], PropertyValue::Number(20.0));
//!
//! env.variables().set("--primary", "#00f");
//! let style = engine.resolve_cached("root", &file, &global, &local, &InlineStyles::new())?;
//! assert_eq!(style["style"]["color"], PropertyValue::from("#00f"));
//! # Ok::<(), cssx_style::Error>(())
//! ```

pub mod config;
pub mod environment;
pub mod media;
pub mod normalize;
pub mod parser;
pub mod resolve;
pub mod rules;
pub mod selector;
pub mod types;
pub mod variables;

mod error;

pub use config::EngineConfig;
pub use error::{Error, Result};
pub use resolve::{StyleEngine, resolve};

/// Prelude module with commonly used types.
pub mod prelude {
    pub use crate::config::EngineConfig;
    pub use crate::environment::{Dimensions, Platform, PlatformAdapter, StaticPlatform, StyleEnvironment};
    pub use crate::media::{MediaFeature, MediaQuery, Orientation};
    pub use crate::resolve::{CacheStats, StyleEngine};
    pub use crate::rules::{LayerOrigin, StyleLayer, StyleRule};
    pub use crate::selector::{ActiveClasses, ClassSelector, Specificity};
    pub use crate::types::{
        InlineStyle, InlineStyles, PropertyMap, PropertyValue, ResolvedStyle, props,
    };
    pub use crate::variables::VariableStore;
    pub use crate::{Error, Result};
}
