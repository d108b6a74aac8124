//! Core traits for visual nodes.
//!
//! Every node stored in a [`VisualTree`](super::tree::VisualTree) implements
//! [`Visual`]. Panels that can host the items of a gallery additionally expose
//! themselves through [`ItemsPanel`], which is how a container finds the panel
//! to write its extent bounds onto without knowing the concrete panel type.

use std::any::Any;

use super::base::VisualBase;
use super::geometry::{ExtentBounds, Orientation, Size};

/// The core trait for all visual nodes.
///
/// # Required Methods
///
/// - [`visual_base()`](Self::visual_base) / [`visual_base_mut()`](Self::visual_base_mut):
///   access to the shared [`VisualBase`]
/// - [`measure_override()`](Self::measure_override): the node's desired size
///
/// # Measure Protocol
///
/// The tree measures children before their parent. Each child is offered
/// [`child_constraint()`](Self::child_constraint) of the parent's available
/// space, and the parent then receives the children's desired sizes in order.
///
/// ```ignore
/// struct Swatch {
///     base: VisualBase,
/// }
///
/// impl Visual for Swatch {
///     fn visual_base(&self) -> &VisualBase { &self.base }
///     fn visual_base_mut(&mut self) -> &mut VisualBase { &mut self.base }
///
///     fn measure_override(&mut self, available: Size, _children: &[Size]) -> Size {
///         Size::new(available.width.min(24.0), available.height.min(24.0))
///     }
/// }
/// ```
pub trait Visual: Any + Send + Sync {
    /// Get a reference to the visual base.
    fn visual_base(&self) -> &VisualBase;

    /// Get a mutable reference to the visual base.
    fn visual_base_mut(&mut self) -> &mut VisualBase;

    /// Compute the desired size of this node.
    ///
    /// `children` holds the desired sizes of the node's children, already
    /// measured against [`child_constraint()`](Self::child_constraint).
    fn measure_override(&mut self, available: Size, children: &[Size]) -> Size;

    /// The space offered to each child when this node is measured with
    /// `available`.
    fn child_constraint(&self, available: Size) -> Size {
        available
    }

    /// This node as an items panel, if it is one.
    fn as_items_panel(&self) -> Option<&dyn ItemsPanel> {
        None
    }

    /// This node as a mutable items panel, if it is one.
    fn as_items_panel_mut(&mut self) -> Option<&mut dyn ItemsPanel> {
        None
    }

    /// The node's label in debug output.
    fn name(&self) -> &str {
        self.visual_base().name()
    }
}

/// A panel that lays out generated item containers.
///
/// Only a panel whose [`is_items_host()`](Self::is_items_host) returns `true`
/// is treated as the host of a gallery's items.
pub trait ItemsPanel {
    /// Whether this panel hosts the items of its owning container.
    fn is_items_host(&self) -> bool;

    /// The panel's current extent bounds.
    fn extent_bounds(&self) -> ExtentBounds;

    /// Replace the minimum and maximum extent along `axis`.
    ///
    /// Returns `true` if the bounds changed.
    fn set_extent_bounds(&mut self, axis: Orientation, min: f32, max: f32) -> bool;

    /// Reset `axis` to unconstrained. Returns `true` if the bounds changed.
    fn clear_extent_bounds(&mut self, axis: Orientation) -> bool;
}
