//! Wrapping panel for gallery items.
//!
//! `WrapPanel` places its children along the flow axis, starting a new line
//! when the next child would overflow the available extent. With a
//! horizontal orientation this reads like text in a paragraph; with a
//! vertical orientation children fill columns top to bottom.
//!
//! # Example
//!
//! ```
//! use lattice_gallery::widget::{ItemContainer, Orientation, Size, VisualTree, WrapPanel};
//! use lattice_gallery::widget::ItemsPanel;
//!
//! let mut tree = VisualTree::new();
//! let panel = tree.insert(WrapPanel::new().with_items_host(true));
//! for _ in 0..5 {
//!     tree.insert_child(panel, ItemContainer::new(Size::new(40.0, 30.0))).unwrap();
//! }
//!
//! // At most three 40px items per row.
//! tree.items_panel_mut(panel).unwrap().set_extent_bounds(Orientation::Horizontal, 0.1, 120.1);
//! let size = tree.measure(panel, Size::new(1000.0, 1000.0)).unwrap();
//! assert_eq!(size, Size::new(120.0, 60.0));
//! ```

use crate::widget::base::VisualBase;
use crate::widget::geometry::{ExtentBounds, Orientation, Size};
use crate::widget::traits::{ItemsPanel, Visual};

/// A panel that flows uniform children into wrapping lines.
///
/// # Features
///
/// - Horizontal (rows) or vertical (columns) flow
/// - Optional fixed item slot size overriding each child's desired size
/// - Minimum and maximum extents on both axes, where a minimum always wins
///   over a smaller maximum
/// - Can be flagged as the items host of an enclosing gallery container
#[derive(Debug, Clone)]
pub struct WrapPanel {
    base: VisualBase,
    orientation: Orientation,
    item_width: Option<f32>,
    item_height: Option<f32>,
    bounds: ExtentBounds,
    items_host: bool,
    /// Child count per line from the last measure.
    lines: Vec<usize>,
}

impl Default for WrapPanel {
    fn default() -> Self {
        Self::new()
    }
}

impl WrapPanel {
    /// Create a horizontal wrap panel with no bounds.
    pub fn new() -> Self {
        Self {
            base: VisualBase::new::<Self>(),
            orientation: Orientation::Horizontal,
            item_width: None,
            item_height: None,
            bounds: ExtentBounds::UNCONSTRAINED,
            items_host: false,
            lines: Vec::new(),
        }
    }

    /// Set the flow orientation using builder pattern.
    pub fn with_orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = orientation;
        self
    }

    /// Set a fixed slot width using builder pattern.
    pub fn with_item_width(mut self, width: f32) -> Self {
        self.item_width = Some(width);
        self
    }

    /// Set a fixed slot height using builder pattern.
    pub fn with_item_height(mut self, height: f32) -> Self {
        self.item_height = Some(height);
        self
    }

    /// Flag the panel as an items host using builder pattern.
    pub fn with_items_host(mut self, items_host: bool) -> Self {
        self.items_host = items_host;
        self
    }

    /// Get the flow orientation.
    #[inline]
    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Set the flow orientation.
    pub fn set_orientation(&mut self, orientation: Orientation) {
        if self.orientation != orientation {
            self.orientation = orientation;
            self.base.invalidate_measure();
        }
    }

    /// Get the fixed slot width, if any.
    #[inline]
    pub fn item_width(&self) -> Option<f32> {
        self.item_width
    }

    /// Set or clear the fixed slot width.
    pub fn set_item_width(&mut self, width: Option<f32>) {
        if self.item_width != width {
            self.item_width = width;
            self.base.invalidate_measure();
        }
    }

    /// Get the fixed slot height, if any.
    #[inline]
    pub fn item_height(&self) -> Option<f32> {
        self.item_height
    }

    /// Set or clear the fixed slot height.
    pub fn set_item_height(&mut self, height: Option<f32>) {
        if self.item_height != height {
            self.item_height = height;
            self.base.invalidate_measure();
        }
    }

    /// Mark or unmark the panel as an items host.
    pub fn set_items_host(&mut self, items_host: bool) {
        self.items_host = items_host;
    }

    /// Number of lines from the last measure.
    #[inline]
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Children per line from the last measure.
    #[inline]
    pub fn items_per_line(&self) -> &[usize] {
        &self.lines
    }

    fn slot_size(&self, child: Size) -> Size {
        Size::new(
            self.item_width.unwrap_or(child.width),
            self.item_height.unwrap_or(child.height),
        )
    }

    /// Flow `children` into lines no longer than `limit` along the flow axis.
    ///
    /// Returns the longest line and the summed line thickness.
    fn flow(&mut self, children: &[Size], limit: f32) -> (f32, f32) {
        let axis = self.orientation;
        self.lines.clear();

        let mut longest: f32 = 0.0;
        let mut total_across: f32 = 0.0;
        let mut line_along: f32 = 0.0;
        let mut line_across: f32 = 0.0;
        let mut line_items = 0;

        for &child in children {
            let slot = self.slot_size(child);
            let along = slot.along(axis);

            if line_items > 0 && line_along + along > limit {
                self.lines.push(line_items);
                longest = longest.max(line_along);
                total_across += line_across;
                line_along = 0.0;
                line_across = 0.0;
                line_items = 0;
            }

            line_along += along;
            line_across = line_across.max(slot.across(axis));
            line_items += 1;
        }

        if line_items > 0 {
            self.lines.push(line_items);
            longest = longest.max(line_along);
            total_across += line_across;
        }

        (longest, total_across)
    }
}

impl Visual for WrapPanel {
    fn visual_base(&self) -> &VisualBase {
        &self.base
    }

    fn visual_base_mut(&mut self) -> &mut VisualBase {
        &mut self.base
    }

    fn child_constraint(&self, available: Size) -> Size {
        self.slot_size(self.bounds.constrain(available))
    }

    fn measure_override(&mut self, available: Size, children: &[Size]) -> Size {
        let axis = self.orientation;
        let limit = self.bounds.clamp(axis, available.along(axis));
        let (along, across) = self.flow(children, limit);
        self.bounds.constrain(Size::from_flow(axis, along, across))
    }

    fn as_items_panel(&self) -> Option<&dyn ItemsPanel> {
        Some(self)
    }

    fn as_items_panel_mut(&mut self) -> Option<&mut dyn ItemsPanel> {
        Some(self)
    }
}

impl ItemsPanel for WrapPanel {
    fn is_items_host(&self) -> bool {
        self.items_host
    }

    fn extent_bounds(&self) -> ExtentBounds {
        self.bounds
    }

    fn set_extent_bounds(&mut self, axis: Orientation, min: f32, max: f32) -> bool {
        let changed = self.bounds.set(axis, min, max);
        if changed {
            self.base.invalidate_measure();
        }
        changed
    }

    fn clear_extent_bounds(&mut self, axis: Orientation) -> bool {
        let changed = self.bounds.reset(axis);
        if changed {
            self.base.invalidate_measure();
        }
        changed
    }
}
