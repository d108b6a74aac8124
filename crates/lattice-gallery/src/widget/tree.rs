//! Arena storage for visual nodes.
//!
//! [`VisualTree`] owns every visual in a gallery and the parent/child links
//! between them. Nodes are addressed by [`ObjectId`]; a removed node's ID is
//! never handed out again, so a stale ID simply stops resolving.

use std::any::Any;

use lattice_gallery_core::logging::{span_names, targets};
use lattice_gallery_core::{ObjectError, ObjectId, ObjectResult, TreeAccess};
use slotmap::SlotMap;

use super::geometry::Size;
use super::traits::{ItemsPanel, Visual};

struct VisualNode {
    visual: Box<dyn Visual>,
    parent: Option<ObjectId>,
    children: Vec<ObjectId>,
}

/// An arena of visual nodes with parent/child links.
///
/// # Example
///
/// ```
/// use lattice_gallery::widget::{ItemContainer, Size, VisualTree, WrapPanel};
///
/// let mut tree = VisualTree::new();
/// let panel = tree.insert(WrapPanel::new().with_items_host(true));
/// let item = tree.insert_child(panel, ItemContainer::new(Size::new(40.0, 30.0))).unwrap();
///
/// assert_eq!(tree.parent(item), Some(panel));
/// assert_eq!(tree.measure(item, Size::UNBOUNDED), Some(Size::new(40.0, 30.0)));
/// ```
#[derive(Default)]
pub struct VisualTree {
    nodes: SlotMap<ObjectId, VisualNode>,
}

impl VisualTree {
    /// Create an empty tree.
    pub fn new() -> Self {
        Self::default()
    }

    // =========================================================================
    // Structure
    // =========================================================================

    /// Insert a parentless visual.
    pub fn insert<V: Visual + 'static>(&mut self, visual: V) -> ObjectId {
        self.insert_boxed(Box::new(visual))
    }

    /// Insert an already boxed parentless visual.
    pub fn insert_boxed(&mut self, visual: Box<dyn Visual>) -> ObjectId {
        self.nodes.insert(VisualNode {
            visual,
            parent: None,
            children: Vec::new(),
        })
    }

    /// Insert a visual as the last child of `parent`.
    pub fn insert_child<V: Visual + 'static>(
        &mut self,
        parent: ObjectId,
        visual: V,
    ) -> ObjectResult<ObjectId> {
        self.insert_child_boxed(parent, Box::new(visual))
    }

    /// Insert an already boxed visual as the last child of `parent`.
    pub fn insert_child_boxed(
        &mut self,
        parent: ObjectId,
        visual: Box<dyn Visual>,
    ) -> ObjectResult<ObjectId> {
        if !self.nodes.contains_key(parent) {
            return Err(ObjectError::InvalidObjectId(parent));
        }
        let id = self.nodes.insert(VisualNode {
            visual,
            parent: Some(parent),
            children: Vec::new(),
        });
        if let Some(parent_node) = self.nodes.get_mut(parent) {
            parent_node.children.push(id);
        }
        self.invalidate_measure(parent);
        Ok(id)
    }

    /// Remove `id` and its whole subtree.
    pub fn remove(&mut self, id: ObjectId) -> ObjectResult<()> {
        let parent = self
            .nodes
            .get(id)
            .ok_or(ObjectError::InvalidObjectId(id))?
            .parent;

        if let Some(parent_id) = parent {
            if let Some(parent_node) = self.nodes.get_mut(parent_id) {
                parent_node.children.retain(|&child| child != id);
            }
            self.invalidate_measure(parent_id);
        }

        let mut pending = vec![id];
        while let Some(current) = pending.pop() {
            if let Some(node) = self.nodes.remove(current) {
                pending.extend(node.children);
            }
        }

        tracing::trace!(target: targets::TREE, ?id, "removed subtree");
        Ok(())
    }

    /// Move `id` under `new_parent`, or detach it with `None`.
    ///
    /// # Errors
    ///
    /// Returns [`ObjectError::CircularParentage`] if `new_parent` is `id` or
    /// one of its descendants.
    pub fn set_parent(&mut self, id: ObjectId, new_parent: Option<ObjectId>) -> ObjectResult<()> {
        if !self.nodes.contains_key(id) {
            return Err(ObjectError::InvalidObjectId(id));
        }
        if let Some(parent_id) = new_parent {
            if !self.nodes.contains_key(parent_id) {
                return Err(ObjectError::InvalidObjectId(parent_id));
            }
            if self.is_ancestor_of(id, parent_id) {
                return Err(ObjectError::CircularParentage);
            }
        }

        let old_parent = self.nodes.get(id).and_then(|node| node.parent);
        if let Some(old_parent_id) = old_parent {
            if let Some(parent_node) = self.nodes.get_mut(old_parent_id) {
                parent_node.children.retain(|&child| child != id);
            }
            self.invalidate_measure(old_parent_id);
        }

        if let Some(node) = self.nodes.get_mut(id) {
            node.parent = new_parent;
        }

        if let Some(parent_id) = new_parent {
            if let Some(parent_node) = self.nodes.get_mut(parent_id) {
                parent_node.children.push(id);
            }
            self.invalidate_measure(parent_id);
        }

        Ok(())
    }

    fn is_ancestor_of(&self, potential_ancestor: ObjectId, id: ObjectId) -> bool {
        let mut current = Some(id);
        while let Some(current_id) = current {
            if current_id == potential_ancestor {
                return true;
            }
            current = self.nodes.get(current_id).and_then(|node| node.parent);
        }
        false
    }

    /// Whether `id` resolves to a live node.
    #[inline]
    pub fn contains(&self, id: ObjectId) -> bool {
        self.nodes.contains_key(id)
    }

    /// The parent of `id`.
    pub fn parent(&self, id: ObjectId) -> Option<ObjectId> {
        self.nodes.get(id).and_then(|node| node.parent)
    }

    /// Number of live nodes.
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the tree has no nodes.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    // =========================================================================
    // Node Access
    // =========================================================================

    /// Borrow the visual at `id`.
    pub fn get(&self, id: ObjectId) -> Option<&dyn Visual> {
        self.nodes.get(id).map(|node| node.visual.as_ref())
    }

    /// Mutably borrow the visual at `id`.
    pub fn get_mut(&mut self, id: ObjectId) -> Option<&mut dyn Visual> {
        self.nodes.get_mut(id).map(|node| node.visual.as_mut())
    }

    /// Borrow the visual at `id` as its concrete type.
    pub fn get_as<T: Visual + 'static>(&self, id: ObjectId) -> Option<&T> {
        let visual: &dyn Any = self.nodes.get(id)?.visual.as_ref();
        visual.downcast_ref::<T>()
    }

    /// Mutably borrow the visual at `id` as its concrete type.
    ///
    /// The node's measure is invalidated, since the caller may change
    /// anything that affects its desired size.
    pub fn get_as_mut<T: Visual + 'static>(&mut self, id: ObjectId) -> Option<&mut T> {
        self.get_as::<T>(id)?;
        self.invalidate_measure(id);
        let visual: &mut dyn Any = self.nodes.get_mut(id)?.visual.as_mut();
        visual.downcast_mut::<T>()
    }

    /// Borrow the visual at `id` as an items panel.
    pub fn items_panel(&self, id: ObjectId) -> Option<&dyn ItemsPanel> {
        self.get(id)?.as_items_panel()
    }

    /// Mutably borrow the visual at `id` as an items panel.
    pub fn items_panel_mut(&mut self, id: ObjectId) -> Option<&mut dyn ItemsPanel> {
        self.get_mut(id)?.as_items_panel_mut()
    }

    // =========================================================================
    // Measure
    // =========================================================================

    /// Measure the subtree rooted at `id` under `available`.
    ///
    /// Children are measured first, then the node itself. A node whose
    /// previous measure ran under the same constraint and has not been
    /// invalidated returns its cached desired size. Returns `None` for an
    /// unknown ID.
    pub fn measure(&mut self, id: ObjectId, available: Size) -> Option<Size> {
        let node = self.nodes.get(id)?;
        let base = node.visual.visual_base();
        if !base.needs_measure(available) {
            return Some(base.desired_size());
        }

        let _span = tracing::trace_span!(
            target: targets::TREE,
            span_names::MEASURE,
            node = node.visual.name()
        )
        .entered();

        let constraint = node.visual.child_constraint(available);
        let children = node.children.clone();
        let child_sizes: Vec<Size> = children
            .into_iter()
            .filter_map(|child| self.measure(child, constraint))
            .collect();

        let visual = &mut self.nodes.get_mut(id)?.visual;
        let desired = visual.measure_override(available, &child_sizes);
        visual.visual_base_mut().record_measure(available, desired);
        Some(desired)
    }

    /// Mark `id` and all of its ancestors for re-measure.
    pub fn invalidate_measure(&mut self, id: ObjectId) {
        let mut current = Some(id);
        while let Some(current_id) = current {
            let Some(node) = self.nodes.get_mut(current_id) else {
                break;
            };
            node.visual.visual_base_mut().invalidate_measure();
            current = node.parent;
        }
    }

    /// Desired size from the last measure of `id`.
    pub fn desired_size(&self, id: ObjectId) -> Option<Size> {
        self.get(id).map(|visual| visual.visual_base().desired_size())
    }
}

impl TreeAccess for VisualTree {
    fn children(&self, id: ObjectId) -> &[ObjectId] {
        self.nodes
            .get(id)
            .map(|node| node.children.as_slice())
            .unwrap_or(&[])
    }

    fn describe(&self, id: ObjectId) -> String {
        match self.nodes.get(id) {
            Some(node) => node.visual.name().to_string(),
            None => "<removed>".to_string(),
        }
    }
}

impl std::fmt::Debug for VisualTree {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VisualTree")
            .field("len", &self.nodes.len())
            .finish()
    }
}

static_assertions::assert_impl_all!(VisualTree: Send, Sync);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::widget::base::VisualBase;
    use lattice_gallery_core::find_first_descendant;

    /// Stacks its children vertically.
    struct Column {
        base: VisualBase,
    }

    impl Column {
        fn new() -> Self {
            Self {
                base: VisualBase::new::<Self>(),
            }
        }
    }

    impl Visual for Column {
        fn visual_base(&self) -> &VisualBase {
            &self.base
        }

        fn visual_base_mut(&mut self) -> &mut VisualBase {
            &mut self.base
        }

        fn measure_override(&mut self, _available: Size, children: &[Size]) -> Size {
            children.iter().fold(Size::ZERO, |acc, child| {
                Size::new(acc.width.max(child.width), acc.height + child.height)
            })
        }
    }

    struct Fixed {
        base: VisualBase,
        size: Size,
    }

    impl Fixed {
        fn new(width: f32, height: f32) -> Self {
            Self {
                base: VisualBase::new::<Self>(),
                size: Size::new(width, height),
            }
        }
    }

    impl Visual for Fixed {
        fn visual_base(&self) -> &VisualBase {
            &self.base
        }

        fn visual_base_mut(&mut self) -> &mut VisualBase {
            &mut self.base
        }

        fn measure_override(&mut self, _available: Size, _children: &[Size]) -> Size {
            self.size
        }
    }

    #[test]
    fn test_measure_children_first() {
        let mut tree = VisualTree::new();
        let root = tree.insert(Column::new());
        tree.insert_child(root, Fixed::new(30.0, 10.0)).unwrap();
        tree.insert_child(root, Fixed::new(50.0, 20.0)).unwrap();

        let size = tree.measure(root, Size::new(200.0, 200.0)).unwrap();
        assert_eq!(size, Size::new(50.0, 30.0));
    }

    #[test]
    fn test_measure_is_cached() {
        let mut tree = VisualTree::new();
        let root = tree.insert(Column::new());
        let leaf = tree.insert_child(root, Fixed::new(30.0, 10.0)).unwrap();
        let available = Size::new(200.0, 200.0);

        tree.measure(root, available);
        tree.measure(root, available);
        assert_eq!(tree.get(leaf).unwrap().visual_base().measure_count(), 1);

        tree.invalidate_measure(leaf);
        assert!(tree.get(root).unwrap().visual_base().is_measure_dirty());
        tree.measure(root, available);
        assert_eq!(tree.get(leaf).unwrap().visual_base().measure_count(), 2);
    }

    #[test]
    fn test_remove_subtree() {
        let mut tree = VisualTree::new();
        let root = tree.insert(Column::new());
        let inner = tree.insert_child(root, Column::new()).unwrap();
        let leaf = tree.insert_child(inner, Fixed::new(1.0, 1.0)).unwrap();

        tree.remove(inner).unwrap();
        assert!(!tree.contains(inner));
        assert!(!tree.contains(leaf));
        assert!(tree.children(root).is_empty());
        assert_eq!(tree.remove(inner), Err(ObjectError::InvalidObjectId(inner)));
    }

    #[test]
    fn test_set_parent_rejects_cycles() {
        let mut tree = VisualTree::new();
        let root = tree.insert(Column::new());
        let child = tree.insert_child(root, Column::new()).unwrap();

        assert_eq!(
            tree.set_parent(root, Some(child)),
            Err(ObjectError::CircularParentage)
        );
        assert_eq!(
            tree.set_parent(root, Some(root)),
            Err(ObjectError::CircularParentage)
        );

        let other = tree.insert(Column::new());
        tree.set_parent(child, Some(other)).unwrap();
        assert_eq!(tree.parent(child), Some(other));
        assert!(tree.children(root).is_empty());
    }

    #[test]
    fn test_insert_child_of_unknown_parent() {
        let mut tree = VisualTree::new();
        let gone = tree.insert(Column::new());
        tree.remove(gone).unwrap();
        assert!(tree.insert_child(gone, Column::new()).is_err());
    }

    #[test]
    fn test_typed_access_and_search() {
        let mut tree = VisualTree::new();
        let root = tree.insert(Column::new());
        let leaf = tree.insert_child(root, Fixed::new(4.0, 4.0)).unwrap();

        assert!(tree.get_as::<Fixed>(leaf).is_some());
        assert!(tree.get_as::<Column>(leaf).is_none());
        tree.get_as_mut::<Fixed>(leaf).unwrap().size = Size::new(8.0, 8.0);
        assert_eq!(tree.measure(leaf, Size::UNBOUNDED), Some(Size::new(8.0, 8.0)));

        let found = find_first_descendant(&tree, root, |id| tree.describe(id) == "Fixed");
        assert_eq!(found, Some(leaf));
    }
}
