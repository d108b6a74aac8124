//! Thread affinity checks for Lattice Gallery.
//!
//! Layout passes run synchronously on one UI thread. Widgets record the thread
//! they were created on with [`ThreadAffinity`] and assert on it at the top of
//! each layout hook:
//!
//! ```
//! use lattice_gallery_core::thread_check::ThreadAffinity;
//!
//! struct Gallery {
//!     affinity: ThreadAffinity,
//! }
//!
//! impl Gallery {
//!     fn on_layout_pass(&mut self) {
//!         self.affinity.debug_assert_same_thread();
//!         // ... layout work ...
//!     }
//! }
//!
//! let mut gallery = Gallery { affinity: ThreadAffinity::current() };
//! gallery.on_layout_pass();
//! ```

use std::thread::ThreadId;

/// Thread affinity tracker for objects.
///
/// Records the thread on which an object was created and verifies that
/// subsequent operations occur on the same thread.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThreadAffinity {
    thread_id: ThreadId,
}

impl ThreadAffinity {
    /// Capture the current thread.
    pub fn current() -> Self {
        Self {
            thread_id: std::thread::current().id(),
        }
    }

    /// The thread this affinity is bound to.
    #[inline]
    pub fn thread_id(&self) -> ThreadId {
        self.thread_id
    }

    /// Whether the calling thread is the bound thread.
    #[inline]
    pub fn is_same_thread(&self) -> bool {
        std::thread::current().id() == self.thread_id
    }

    /// Panics if called from a thread other than the bound thread.
    #[track_caller]
    pub fn assert_same_thread(&self) {
        if !self.is_same_thread() {
            panic_wrong_thread(self.thread_id);
        }
    }

    /// Debug-only version of [`assert_same_thread`](Self::assert_same_thread).
    #[inline]
    #[track_caller]
    pub fn debug_assert_same_thread(&self) {
        #[cfg(debug_assertions)]
        self.assert_same_thread();
    }
}

#[cold]
#[inline(never)]
#[track_caller]
fn panic_wrong_thread(expected: ThreadId) -> ! {
    let current = std::thread::current();
    panic!(
        "THREAD AFFINITY VIOLATION: layout state was created on thread {:?} but \
         accessed from thread \"{}\" ({:?}). Layout passes must run on the UI thread.",
        expected,
        current.name().unwrap_or("<unnamed>"),
        current.id()
    )
}
