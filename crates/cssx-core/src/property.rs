//! Change-detecting properties.
//!
//! Process-wide dynamic state that styles depend on (viewport dimensions in
//! particular) is stored in a [`Property`]. A property compares every new
//! value with the current one so that callers only react to real changes.
//!
//! # Example
//!
//! ```
//! use cssx_core::Property;
//!
//! let prop = Property::new((1024u32, 768u32));
//! assert_eq!(prop.get(), (1024, 768));
//!
//! // Setting the same value reports no change
//! assert!(!prop.set((1024, 768)));
//!
//! // A rotated viewport does
//! assert_eq!(prop.replace((768, 1024)), Some((1024, 768)));
//! ```

use std::fmt;

use parking_lot::RwLock;

/// A property cell that tracks changes.
///
/// `Property<T>` wraps a value and provides change detection. When `set()` is
/// called, it compares the new value with the current one and returns whether
/// the value actually changed.
///
/// # Thread Safety
///
/// `Property<T>` uses interior mutability with `RwLock` and is `Send + Sync`
/// whenever `T` is.
pub struct Property<T> {
    value: RwLock<T>,
}

impl<T: Clone> Property<T> {
    /// Create a new property with an initial value.
    pub fn new(value: T) -> Self {
        Self {
            value: RwLock::new(value),
        }
    }

    /// Get the current value.
    pub fn get(&self) -> T {
        self.value.read().clone()
    }
}

impl<T: Clone + PartialEq> Property<T> {
    /// Set the value, returning `true` if the value changed.
    pub fn set(&self, value: T) -> bool {
        self.replace(value).is_some()
    }

    /// Set the value, returning the old value if it changed.
    pub fn replace(&self, value: T) -> Option<T> {
        let mut current = self.value.write();
        if *current != value {
            Some(std::mem::replace(&mut *current, value))
        } else {
            None
        }
    }
}

impl<T: Clone + Default> Default for Property<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: Clone + fmt::Debug> fmt::Debug for Property<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Property")
            .field("value", &self.get())
            .finish()
    }
}
