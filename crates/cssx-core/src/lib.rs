//! Core primitives for the cssx style engine.
//!
//! This crate provides the small reactive layer the style engine builds on:
//!
//! - **Property System**: change-detecting cells for process-wide state
//!   such as viewport dimensions
//! - **Read Tracking**: a capability interface through which the engine
//!   reports which dynamic values a resolution depended on
//! - **Logging**: `tracing` target and span names shared across crates
//!
//! # Property Example
//!
//! ```
//! use cssx_core::Property;
//!
//! let width = Property::new(1024u32);
//! assert!(!width.set(1024));
//! assert!(width.set(800));
//! assert_eq!(width.get(), 800);
//! ```
//!
//! # Read Tracking Example
//!
//! ```
//! use cssx_core::{ObservedKey, ReadTracker, RecordingTracker};
//!
//! let tracker = RecordingTracker::new();
//! tracker.record_read(&ObservedKey::Viewport);
//! tracker.record_read(&ObservedKey::variable("--primary"));
//!
//! assert!(tracker.has_read(&ObservedKey::Viewport));
//! assert_eq!(tracker.len(), 2);
//! ```

pub mod logging;
pub mod observe;
pub mod property;

pub use observe::{NoopTracker, ObservedKey, ReadTracker, RecordingTracker};
pub use property::Property;
