//! Signal/slot notifications for Lattice Gallery.
//!
//! Widgets announce configuration changes through [`Signal`]s. Layout runs on
//! a single UI thread, so every connection is invoked directly, in connection
//! order, on the emitting thread.
//!
//! # Example
//!
//! ```
//! use lattice_gallery_core::Signal;
//!
//! let max_items_changed = Signal::<Option<usize>>::new();
//!
//! max_items_changed.connect(|value| {
//!     println!("max items per row is now {:?}", value);
//! });
//!
//! max_items_changed.emit(Some(5));
//! ```

use std::sync::Arc;

use parking_lot::Mutex;

use crate::logging::targets;

type Slot<Args> = Arc<dyn Fn(&Args) + Send + Sync>;

/// A type-safe signal that can have multiple connected slots.
///
/// Use `()` for signals with no arguments, or a tuple for several.
pub struct Signal<Args> {
    connections: Mutex<Vec<Slot<Args>>>,
}

impl<Args: 'static> Default for Signal<Args> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Args: 'static> Signal<Args> {
    /// Create a new signal with no connections.
    pub fn new() -> Self {
        Self {
            connections: Mutex::new(Vec::new()),
        }
    }

    /// Connect a slot (closure) to this signal.
    pub fn connect<F>(&self, slot: F)
    where
        F: Fn(&Args) + Send + Sync + 'static,
    {
        self.connections.lock().push(Arc::new(slot));
    }

    /// Emit the signal, invoking all connected slots.
    ///
    /// The connection list is snapshotted before any slot runs, so a slot may
    /// connect to this same signal without deadlocking.
    pub fn emit(&self, args: Args) {
        let slots: Vec<Slot<Args>> = self.connections.lock().clone();
        tracing::trace!(target: targets::SIGNAL, connection_count = slots.len(), "emitting signal");
        for slot in slots {
            slot(&args);
        }
    }
}

impl<Args> std::fmt::Debug for Signal<Args> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Signal")
            .field("connections", &self.connections.lock().len())
            .finish()
    }
}

static_assertions::assert_impl_all!(Signal<Option<usize>>: Send, Sync);
