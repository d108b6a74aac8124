//! Object identity for Lattice Gallery.
//!
//! Every node in a visual tree is addressed by an [`ObjectId`]. IDs are
//! versioned slotmap keys: when a node is removed and another node later takes
//! its slot, the new node receives a *different* `ObjectId`. This makes an
//! `ObjectId` safe to hold as a non-owning identity handle. Comparing a cached
//! ID against a freshly looked-up one reliably detects that a node was
//! replaced, and holding the ID never keeps a node alive.

use slotmap::new_key_type;

new_key_type! {
    /// A unique identifier for an object in a visual tree.
    ///
    /// `ObjectId`s are stable handles that remain valid even as the tree
    /// changes. They become invalid when the object is removed, and are never
    /// handed out again for a different object.
    ///
    /// # Related Types
    ///
    /// - [`crate::tree::TreeAccess`] - Walks children by `ObjectId`
    /// - [`crate::ObjectError::InvalidObjectId`] - Returned for stale IDs
    pub struct ObjectId;
}
