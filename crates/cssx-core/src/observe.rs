//! Read tracking for reactive re-invocation.
//!
//! The style engine never talks to a reactivity system directly. Whenever a
//! resolution depends on a dynamic value it calls
//! [`ReadTracker::record_read`] with the key of that value. A host that wants
//! components to re-render when the value changes implements the trait and
//! subscribes the current observer to the key.

use std::fmt;

use parking_lot::Mutex;

use crate::logging::targets;

/// A dynamic value a style resolution can depend on.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ObservedKey {
    /// The viewport dimensions (width and height).
    Viewport,
    /// A single custom property, by its `--name`.
    Variable(String),
}

impl ObservedKey {
    /// Create a variable key.
    pub fn variable(name: impl Into<String>) -> Self {
        Self::Variable(name.into())
    }
}

impl fmt::Display for ObservedKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ObservedKey::Viewport => f.write_str("viewport"),
            ObservedKey::Variable(name) => write!(f, "var({})", name),
        }
    }
}

/// Capability for recording reads of dynamic values.
pub trait ReadTracker: Send + Sync {
    /// Record that the current computation read `key`.
    fn record_read(&self, key: &ObservedKey);
}

/// A tracker that ignores every read.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopTracker;

impl ReadTracker for NoopTracker {
    fn record_read(&self, _key: &ObservedKey) {}
}

/// A tracker that stores every read in order.
///
/// Useful for hosts that collect dependencies per render pass, and in tests.
#[derive(Debug, Default)]
pub struct RecordingTracker {
    reads: Mutex<Vec<ObservedKey>>,
}

impl RecordingTracker {
    /// Create an empty tracker.
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all reads recorded so far.
    pub fn reads(&self) -> Vec<ObservedKey> {
        self.reads.lock().clone()
    }

    /// Remove and return all recorded reads.
    pub fn take(&self) -> Vec<ObservedKey> {
        std::mem::take(&mut *self.reads.lock())
    }

    /// Whether `key` has been read at least once.
    pub fn has_read(&self, key: &ObservedKey) -> bool {
        self.reads.lock().iter().any(|k| k == key)
    }

    /// Number of times `key` has been read.
    pub fn count(&self, key: &ObservedKey) -> usize {
        self.reads.lock().iter().filter(|k| *k == key).count()
    }

    /// Total number of recorded reads.
    pub fn len(&self) -> usize {
        self.reads.lock().len()
    }

    /// Whether no reads were recorded.
    pub fn is_empty(&self) -> bool {
        self.reads.lock().is_empty()
    }

    /// Forget all recorded reads.
    pub fn clear(&self) {
        self.reads.lock().clear();
    }
}

impl ReadTracker for RecordingTracker {
    fn record_read(&self, key: &ObservedKey) {
        tracing::trace!(target: targets::TRACKING, key = %key, "recorded read");
        self.reads.lock().push(key.clone());
    }
}
