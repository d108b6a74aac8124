//! Reactive properties for Lattice Gallery.
//!
//! A [`Property`] stores one configuration value and reports whether a write
//! actually changed it. Pairing a property with a [`crate::Signal`] gives the
//! attribute-with-change-callback behavior widgets need:
//!
//! ```
//! use lattice_gallery_core::{Property, Signal};
//!
//! struct RowPolicy {
//!     min_items: Property<usize>,
//!     min_items_changed: Signal<usize>,
//!     dirty: bool,
//! }
//!
//! impl RowPolicy {
//!     fn set_min_items(&mut self, value: usize) {
//!         if self.min_items.set(value) {
//!             self.dirty = true;
//!             self.min_items_changed.emit(value);
//!         }
//!     }
//! }
//!
//! let mut policy = RowPolicy {
//!     min_items: Property::new(0),
//!     min_items_changed: Signal::new(),
//!     dirty: false,
//! };
//! policy.set_min_items(0);
//! assert!(!policy.dirty);
//! policy.set_min_items(3);
//! assert!(policy.dirty);
//! ```

use std::fmt;

use parking_lot::RwLock;

/// A reactive property that tracks changes.
///
/// `set()` compares the new value with the current one and returns whether
/// the value actually changed, so callers emit notifications (and mark layout
/// state dirty) only on real changes.
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

    /// Access the value through a closure without cloning.
    pub fn with<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&T) -> R,
    {
        f(&self.value.read())
    }
}

impl<T: Clone + PartialEq> Property<T> {
    /// Set the value, returning `true` if the value changed.
    ///
    /// The caller should emit the associated notification signal when this
    /// returns `true`.
    pub fn set(&self, value: T) -> bool {
        let mut current = self.value.write();
        if *current != value {
            *current = value;
            true
        } else {
            false
        }
    }
}

impl<T: Clone> Clone for Property<T> {
    fn clone(&self) -> Self {
        Self::new(self.get())
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

static_assertions::assert_impl_all!(Property<Option<f32>>: Send, Sync);
