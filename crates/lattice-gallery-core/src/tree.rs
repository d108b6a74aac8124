//! Toolkit-independent tree traversal.
//!
//! Anything that can list the children of a node by [`ObjectId`] implements
//! [`TreeAccess`] and gets depth-first traversal for free. Widgets use
//! [`find_first_descendant`] to locate template parts (such as the panel that
//! hosts their items) without knowing the concrete node type.

use crate::object::ObjectId;

/// Read access to the shape of a tree.
pub trait TreeAccess {
    /// The children of `id` in order. Unknown IDs have no children.
    fn children(&self, id: ObjectId) -> &[ObjectId];

    /// A short human-readable label for `id`, used by debug output.
    fn describe(&self, id: ObjectId) -> String {
        format!("{id:?}")
    }
}

/// Pre-order depth-first iterator over the strict descendants of a node.
///
/// Created by [`descendants`]. The root itself is not yielded.
pub struct Descendants<'a, T: TreeAccess + ?Sized> {
    tree: &'a T,
    stack: Vec<ObjectId>,
}

impl<T: TreeAccess + ?Sized> Iterator for Descendants<'_, T> {
    type Item = ObjectId;

    fn next(&mut self) -> Option<ObjectId> {
        let id = self.stack.pop()?;
        // Reversed so the first child is visited first.
        self.stack.extend(self.tree.children(id).iter().rev().copied());
        Some(id)
    }
}

/// Iterate the descendants of `root` in depth-first pre-order.
pub fn descendants<T: TreeAccess + ?Sized>(tree: &T, root: ObjectId) -> Descendants<'_, T> {
    Descendants {
        tree,
        stack: tree.children(root).iter().rev().copied().collect(),
    }
}

/// Find the first descendant of `root` (depth-first, pre-order) that matches
/// `predicate`.
///
/// # Example
///
/// ```
/// use std::collections::HashMap;
/// use slotmap::SlotMap;
/// use lattice_gallery_core::ObjectId;
/// use lattice_gallery_core::tree::{find_first_descendant, TreeAccess};
///
/// struct Adjacency(HashMap<ObjectId, Vec<ObjectId>>);
///
/// impl TreeAccess for Adjacency {
///     fn children(&self, id: ObjectId) -> &[ObjectId] {
///         self.0.get(&id).map(Vec::as_slice).unwrap_or(&[])
///     }
/// }
///
/// let mut ids: SlotMap<ObjectId, ()> = SlotMap::with_key();
/// let (root, panel) = (ids.insert(()), ids.insert(()));
/// let tree = Adjacency(HashMap::from([(root, vec![panel])]));
/// assert_eq!(find_first_descendant(&tree, root, |id| id == panel), Some(panel));
/// ```
pub fn find_first_descendant<T, P>(tree: &T, root: ObjectId, mut predicate: P) -> Option<ObjectId>
where
    T: TreeAccess + ?Sized,
    P: FnMut(ObjectId) -> bool,
{
    descendants(tree, root).find(|&id| predicate(id))
}
