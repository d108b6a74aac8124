//! Gallery group that limits how many items fit in one row.
//!
//! `AdaptiveRowContainer` owns no layout of its own. At the start of each
//! layout pass it finds the panel hosting its items, works out the extent of
//! a single item, and writes a minimum and maximum extent onto that panel so
//! that every row holds between `min_items_per_row` and `max_items_per_row`
//! items.
//!
//! # Example
//!
//! ```
//! use lattice_gallery::widget::{
//!     AdaptiveRowContainer, ContainerMap, ItemContainer, RowBoundsUpdate, Size, VisualTree,
//!     WrapPanel,
//! };
//!
//! let mut tree = VisualTree::new();
//! let root = tree.insert(WrapPanel::new());
//! let panel = tree.insert_child(root, WrapPanel::new().with_items_host(true)).unwrap();
//!
//! let items: Vec<u32> = (0..10).collect();
//! let mut containers = ContainerMap::new();
//! for &item in &items {
//!     let id = tree.insert_child(panel, ItemContainer::new(Size::new(40.0, 30.0))).unwrap();
//!     containers.insert(item, id);
//! }
//!
//! let mut gallery = AdaptiveRowContainer::new()
//!     .with_min_items_per_row(3)
//!     .with_max_items_per_row(Some(5));
//! gallery.set_template_root(Some(root));
//!
//! let RowBoundsUpdate::Applied(bounds) = gallery.on_layout_pass(&mut tree, &items, &containers) else {
//!     panic!("bounds should apply");
//! };
//! assert!((bounds.min - 120.1).abs() < 1e-4);
//! assert!((bounds.max - 200.1).abs() < 1e-4);
//! ```

use lattice_gallery_core::logging::{span_names, targets};
use lattice_gallery_core::{
    find_first_descendant, ObjectId, Property, Signal, ThreadAffinity, TreeDebug,
};

use crate::config::RowLayoutSettings;
use crate::widget::geometry::{Orientation, Size};
use crate::widget::items::{ItemCollection, ItemContainerGenerator};
use crate::widget::tree::VisualTree;

/// Padding added to every computed row extent.
///
/// Keeps `n * item_extent` from falling just short of `n` items after
/// floating point rounding in the panel.
pub const ROW_EXTENT_EPSILON: f32 = 0.1;

/// Extent bounds derived for one row of items.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RowBounds {
    /// The axis the bounds apply to.
    pub axis: Orientation,
    /// Minimum extent along `axis`.
    pub min: f32,
    /// Maximum extent along `axis`.
    pub max: f32,
}

impl RowBounds {
    /// Derive row bounds for `item_count` items of `item_extent` each.
    ///
    /// Each bound is computed independently, so `min_items > max_items`
    /// yields a minimum larger than the maximum. `None` for `max_items` is
    /// unbounded.
    pub fn compute(
        item_count: usize,
        item_extent: f32,
        min_items: usize,
        max_items: Option<usize>,
        axis: Orientation,
    ) -> Self {
        let span = |limit: usize| item_count.min(limit) as f32 * item_extent + ROW_EXTENT_EPSILON;
        Self {
            axis,
            min: span(min_items),
            max: span(max_items.unwrap_or(usize::MAX)),
        }
    }
}

/// Outcome of [`AdaptiveRowContainer::on_layout_pass`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RowBoundsUpdate {
    /// Nothing changed since the last recomputation.
    Unchanged,
    /// Bounds were computed and written onto the host panel.
    Applied(RowBounds),
    /// No items host panel was found.
    HostMissing,
    /// The item collection is empty.
    NoItems,
    /// The first item has no realized container, or measured to a
    /// non-finite extent. Only the unrealized case is retried on the next
    /// pass.
    ExtentUnknown,
}

impl RowBoundsUpdate {
    /// The applied bounds, if any.
    pub fn bounds(&self) -> Option<RowBounds> {
        match self {
            Self::Applied(bounds) => Some(*bounds),
            _ => None,
        }
    }

    /// Whether this pass ran a recomputation.
    pub fn is_recomputed(&self) -> bool {
        !matches!(self, Self::Unchanged)
    }
}

enum ItemExtent {
    Known(f32),
    NotRealized,
    NonFinite,
}

/// A wrapping gallery group that sizes its panel by items per row.
///
/// # Settings
///
/// | Setting | Default | Effect |
/// |---|---|---|
/// | `show_grouping` | `true` | header visibility |
/// | `orientation` | horizontal | wrap axis, and whether widths or heights are written |
/// | `item_width` / `item_height` | unset | replace the measured item extent |
/// | `min_items_per_row` | 0 | lower bound for the panel's minimum extent |
/// | `max_items_per_row` | unbounded | upper bound for the panel's maximum extent |
///
/// Changing a setting that feeds the bounds marks them dirty. Nothing is
/// recomputed until the next [`on_layout_pass`](Self::on_layout_pass).
///
/// # Signals
///
/// Every setting has a `*_changed` signal that fires only on real changes.
/// [`row_bounds_applied`](Self::row_bounds_applied) fires after bounds are
/// written.
pub struct AdaptiveRowContainer {
    header: Property<String>,
    show_grouping: Property<bool>,
    orientation: Property<Orientation>,
    item_width: Property<Option<f32>>,
    item_height: Property<Option<f32>>,
    min_items_per_row: Property<usize>,
    max_items_per_row: Property<Option<usize>>,

    /// Root of the visual subtree searched for the host panel.
    template_root: Option<ObjectId>,
    loaded: bool,
    row_bounds_dirty: bool,
    cached_panel: Option<ObjectId>,
    cached_item_count: usize,
    /// Panel and axis the last bounds were written to.
    written_to: Option<(ObjectId, Orientation)>,
    last_bounds: Option<RowBounds>,
    recompute_count: u64,
    affinity: ThreadAffinity,

    /// Signal emitted when the header text changes.
    pub header_changed: Signal<String>,
    /// Signal emitted when header visibility changes.
    pub show_grouping_changed: Signal<bool>,
    /// Signal emitted when the wrap axis changes.
    pub orientation_changed: Signal<Orientation>,
    /// Signal emitted when the explicit item width changes.
    pub item_width_changed: Signal<Option<f32>>,
    /// Signal emitted when the explicit item height changes.
    pub item_height_changed: Signal<Option<f32>>,
    /// Signal emitted when the minimum items per row changes.
    pub min_items_per_row_changed: Signal<usize>,
    /// Signal emitted when the maximum items per row changes.
    pub max_items_per_row_changed: Signal<Option<usize>>,
    /// Signal emitted after bounds are written onto the host panel.
    pub row_bounds_applied: Signal<RowBounds>,
}

impl Default for AdaptiveRowContainer {
    fn default() -> Self {
        Self::new()
    }
}

impl AdaptiveRowContainer {
    /// Create a container with default settings.
    ///
    /// The bounds start dirty, so the first layout pass always recomputes.
    pub fn new() -> Self {
        Self {
            header: Property::new(String::new()),
            show_grouping: Property::new(true),
            orientation: Property::new(Orientation::Horizontal),
            item_width: Property::new(None),
            item_height: Property::new(None),
            min_items_per_row: Property::new(0),
            max_items_per_row: Property::new(None),
            template_root: None,
            loaded: false,
            row_bounds_dirty: true,
            cached_panel: None,
            cached_item_count: 0,
            written_to: None,
            last_bounds: None,
            recompute_count: 0,
            affinity: ThreadAffinity::current(),
            header_changed: Signal::new(),
            show_grouping_changed: Signal::new(),
            orientation_changed: Signal::new(),
            item_width_changed: Signal::new(),
            item_height_changed: Signal::new(),
            min_items_per_row_changed: Signal::new(),
            max_items_per_row_changed: Signal::new(),
            row_bounds_applied: Signal::new(),
        }
    }

    /// Create a container from settings.
    pub fn from_settings(settings: &RowLayoutSettings) -> Self {
        let mut container = Self::new();
        container.apply_settings(settings);
        container
    }

    // =========================================================================
    // Builder Pattern Methods
    // =========================================================================

    /// Set the header text using builder pattern.
    pub fn with_header(mut self, header: impl Into<String>) -> Self {
        self.set_header(header);
        self
    }

    /// Set header visibility using builder pattern.
    pub fn with_show_grouping(mut self, show: bool) -> Self {
        self.set_show_grouping(show);
        self
    }

    /// Set the wrap axis using builder pattern.
    pub fn with_orientation(mut self, orientation: Orientation) -> Self {
        self.set_orientation(orientation);
        self
    }

    /// Set the explicit item width using builder pattern.
    pub fn with_item_width(mut self, width: Option<f32>) -> Self {
        self.set_item_width(width);
        self
    }

    /// Set the explicit item height using builder pattern.
    pub fn with_item_height(mut self, height: Option<f32>) -> Self {
        self.set_item_height(height);
        self
    }

    /// Set the minimum items per row using builder pattern.
    pub fn with_min_items_per_row(mut self, count: usize) -> Self {
        self.set_min_items_per_row(count);
        self
    }

    /// Set the maximum items per row using builder pattern.
    pub fn with_max_items_per_row(mut self, count: Option<usize>) -> Self {
        self.set_max_items_per_row(count);
        self
    }

    // =========================================================================
    // Settings
    // =========================================================================

    /// Get the header text.
    pub fn header(&self) -> String {
        self.header.get()
    }

    /// Set the header text.
    pub fn set_header(&mut self, header: impl Into<String>) {
        let header = header.into();
        if self.header.set(header.clone()) {
            self.header_changed.emit(header);
        }
    }

    /// Get whether the header is shown.
    pub fn show_grouping(&self) -> bool {
        self.show_grouping.get()
    }

    /// Show or hide the header. Does not affect row bounds.
    pub fn set_show_grouping(&mut self, show: bool) {
        if self.show_grouping.set(show) {
            self.show_grouping_changed.emit(show);
        }
    }

    /// Get the wrap axis.
    pub fn orientation(&self) -> Orientation {
        self.orientation.get()
    }

    /// Set the wrap axis.
    pub fn set_orientation(&mut self, orientation: Orientation) {
        if self.orientation.set(orientation) {
            self.row_bounds_dirty = true;
            self.orientation_changed.emit(orientation);
        }
    }

    /// Get the explicit item width.
    pub fn item_width(&self) -> Option<f32> {
        self.item_width.get()
    }

    /// Set or clear the explicit item width.
    ///
    /// Negative and non-finite widths clear it.
    pub fn set_item_width(&mut self, width: Option<f32>) {
        let width = usable_extent(width);
        if self.item_width.set(width) {
            self.row_bounds_dirty = true;
            self.item_width_changed.emit(width);
        }
    }

    /// Get the explicit item height.
    pub fn item_height(&self) -> Option<f32> {
        self.item_height.get()
    }

    /// Set or clear the explicit item height.
    ///
    /// Negative and non-finite heights clear it.
    pub fn set_item_height(&mut self, height: Option<f32>) {
        let height = usable_extent(height);
        if self.item_height.set(height) {
            self.row_bounds_dirty = true;
            self.item_height_changed.emit(height);
        }
    }

    /// Get the minimum items per row.
    pub fn min_items_per_row(&self) -> usize {
        self.min_items_per_row.get()
    }

    /// Set the minimum items per row.
    pub fn set_min_items_per_row(&mut self, count: usize) {
        if self.min_items_per_row.set(count) {
            self.row_bounds_dirty = true;
            self.min_items_per_row_changed.emit(count);
        }
    }

    /// Get the maximum items per row. `None` is unbounded.
    pub fn max_items_per_row(&self) -> Option<usize> {
        self.max_items_per_row.get()
    }

    /// Set the maximum items per row. `None` is unbounded.
    pub fn set_max_items_per_row(&mut self, count: Option<usize>) {
        if self.max_items_per_row.set(count) {
            self.row_bounds_dirty = true;
            self.max_items_per_row_changed.emit(count);
        }
    }

    /// Apply every value in `settings` through the setters.
    pub fn apply_settings(&mut self, settings: &RowLayoutSettings) {
        self.set_show_grouping(settings.show_grouping);
        self.set_orientation(settings.orientation);
        self.set_item_width(settings.item_width);
        self.set_item_height(settings.item_height);
        self.set_min_items_per_row(settings.min_items_per_row);
        self.set_max_items_per_row(settings.max_items_per_row);
    }

    /// Snapshot the current settings.
    pub fn settings(&self) -> RowLayoutSettings {
        RowLayoutSettings {
            show_grouping: self.show_grouping(),
            orientation: self.orientation(),
            item_width: self.item_width(),
            item_height: self.item_height(),
            min_items_per_row: self.min_items_per_row(),
            max_items_per_row: self.max_items_per_row(),
        }
    }

    // =========================================================================
    // Realization
    // =========================================================================

    /// The root of the visual subtree searched for the host panel.
    #[inline]
    pub fn template_root(&self) -> Option<ObjectId> {
        self.template_root
    }

    /// Attach or detach the visual subtree searched for the host panel.
    pub fn set_template_root(&mut self, root: Option<ObjectId>) {
        self.template_root = root;
    }

    /// Whether the container is fully realized.
    #[inline]
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// Mark the container as fully realized. Only a loaded container reports
    /// a missing host panel.
    pub fn set_loaded(&mut self, loaded: bool) {
        self.loaded = loaded;
    }

    // =========================================================================
    // Layout State
    // =========================================================================

    /// Whether a setting changed since the last recomputation.
    #[inline]
    pub fn is_row_bounds_dirty(&self) -> bool {
        self.row_bounds_dirty
    }

    /// The host panel found by the last recomputation.
    #[inline]
    pub fn host_panel(&self) -> Option<ObjectId> {
        self.cached_panel
    }

    /// The bounds most recently written onto a panel.
    #[inline]
    pub fn last_bounds(&self) -> Option<RowBounds> {
        self.last_bounds
    }

    /// How many recomputations have run.
    #[inline]
    pub fn recompute_count(&self) -> u64 {
        self.recompute_count
    }

    /// Find the first items host panel below the template root.
    pub fn find_host_panel(&self, tree: &VisualTree) -> Option<ObjectId> {
        let root = self.template_root.filter(|&root| tree.contains(root))?;
        find_first_descendant(tree, root, |id| {
            tree.items_panel(id)
                .is_some_and(|panel| panel.is_items_host())
        })
    }

    /// Whether the next layout pass would recompute.
    pub fn needs_recompute(&self, tree: &VisualTree, item_count: usize) -> bool {
        self.row_bounds_dirty
            || item_count != self.cached_item_count
            || self.find_host_panel(tree) != self.cached_panel
    }

    // =========================================================================
    // Layout Pass
    // =========================================================================

    /// Layout hook, run at the start of every layout pass.
    ///
    /// Recomputes the row bounds when the host panel changed identity, the
    /// item count changed, or a setting marked them dirty. Otherwise returns
    /// [`RowBoundsUpdate::Unchanged`] without touching the tree.
    pub fn on_layout_pass<C, G>(
        &mut self,
        tree: &mut VisualTree,
        items: &C,
        generator: &G,
    ) -> RowBoundsUpdate
    where
        C: ItemCollection + ?Sized,
        G: ItemContainerGenerator<C::Item> + ?Sized,
    {
        self.affinity.debug_assert_same_thread();

        let panel = self.find_host_panel(tree);
        let item_count = items.count();
        if !self.row_bounds_dirty
            && panel == self.cached_panel
            && item_count == self.cached_item_count
        {
            return RowBoundsUpdate::Unchanged;
        }

        self.cached_panel = panel;
        self.cached_item_count = item_count;
        self.recompute_row_bounds(tree, panel, items, generator)
    }

    fn recompute_row_bounds<C, G>(
        &mut self,
        tree: &mut VisualTree,
        panel: Option<ObjectId>,
        items: &C,
        generator: &G,
    ) -> RowBoundsUpdate
    where
        C: ItemCollection + ?Sized,
        G: ItemContainerGenerator<C::Item> + ?Sized,
    {
        let _span = tracing::debug_span!(target: targets::LAYOUT, span_names::ROW_BOUNDS).entered();
        self.recompute_count += 1;

        let Some(panel) = panel else {
            self.row_bounds_dirty = false;
            if self.loaded {
                self.report_missing_host(tree);
            }
            return RowBoundsUpdate::HostMissing;
        };

        let item_count = items.count();
        if item_count == 0 {
            self.row_bounds_dirty = false;
            return RowBoundsUpdate::NoItems;
        }

        let axis = self.orientation.get();
        let extent = match self.item_extent(tree, items, generator, axis) {
            ItemExtent::Known(extent) => extent,
            ItemExtent::NotRealized => {
                tracing::trace!(target: targets::LAYOUT, "first item not realized, retrying next pass");
                return RowBoundsUpdate::ExtentUnknown;
            }
            ItemExtent::NonFinite => {
                self.row_bounds_dirty = false;
                tracing::debug!(target: targets::LAYOUT, ?axis, "first item has no finite extent");
                return RowBoundsUpdate::ExtentUnknown;
            }
        };

        let bounds = RowBounds::compute(
            item_count,
            extent,
            self.min_items_per_row.get(),
            self.max_items_per_row.get(),
            axis,
        );

        let previous = self.written_to.replace((panel, axis));
        let Some(host) = tree.items_panel_mut(panel) else {
            return RowBoundsUpdate::HostMissing;
        };
        let mut changed = false;
        if let Some((previous_panel, previous_axis)) = previous {
            if previous_panel == panel && previous_axis != axis {
                changed |= host.clear_extent_bounds(previous_axis);
            }
        }
        changed |= host.set_extent_bounds(axis, bounds.min, bounds.max);
        if changed {
            tree.invalidate_measure(panel);
        }

        tracing::debug!(
            target: targets::LAYOUT,
            ?axis,
            item_count,
            extent,
            min = bounds.min,
            max = bounds.max,
            "row bounds applied"
        );

        self.last_bounds = Some(bounds);
        self.row_bounds_dirty = false;
        self.row_bounds_applied.emit(bounds);
        RowBoundsUpdate::Applied(bounds)
    }

    fn explicit_extent(&self, axis: Orientation) -> Option<f32> {
        match axis {
            Orientation::Horizontal => self.item_width.get(),
            Orientation::Vertical => self.item_height.get(),
        }
    }

    /// The extent of one item along `axis`, measuring the first item's
    /// container when no explicit extent is set.
    fn item_extent<C, G>(
        &self,
        tree: &mut VisualTree,
        items: &C,
        generator: &G,
        axis: Orientation,
    ) -> ItemExtent
    where
        C: ItemCollection + ?Sized,
        G: ItemContainerGenerator<C::Item> + ?Sized,
    {
        if let Some(extent) = self.explicit_extent(axis) {
            return ItemExtent::Known(extent);
        }

        let Some(container) = items.at(0).and_then(|first| generator.container_for(first)) else {
            return ItemExtent::NotRealized;
        };
        let Some(desired) = tree.measure(container, Size::UNBOUNDED) else {
            return ItemExtent::NotRealized;
        };
        // The host measures it again under real constraints.
        tree.invalidate_measure(container);

        let extent = desired.along(axis);
        if extent.is_finite() {
            ItemExtent::Known(extent)
        } else {
            ItemExtent::NonFinite
        }
    }

    fn report_missing_host(&self, tree: &VisualTree) {
        self.header.with(|header| {
            tracing::warn!(
                target: targets::LAYOUT,
                header = %header,
                "adaptive row container has no items host panel in its template; row bounds not applied"
            );
        });
        if let Some(root) = self.template_root.filter(|&root| tree.contains(root)) {
            tracing::debug!(
                target: targets::LAYOUT,
                "searched template:\n{}",
                TreeDebug::new().format_subtree(tree, root)
            );
        }
    }
}

fn usable_extent(extent: Option<f32>) -> Option<f32> {
    extent.filter(|value| value.is_finite() && *value >= 0.0)
}

impl std::fmt::Debug for AdaptiveRowContainer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdaptiveRowContainer")
            .field("settings", &self.settings())
            .field("template_root", &self.template_root)
            .field("loaded", &self.loaded)
            .field("row_bounds_dirty", &self.row_bounds_dirty)
            .field("cached_panel", &self.cached_panel)
            .field("cached_item_count", &self.cached_item_count)
            .finish()
    }
}

static_assertions::assert_impl_all!(AdaptiveRowContainer: Send, Sync);

#[cfg(test)]
mod tests {
    use std::io::Write;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    use super::*;
    use crate::widget::base::VisualBase;
    use crate::widget::geometry::ExtentBounds;
    use crate::widget::items::ContainerMap;
    use crate::widget::traits::Visual;
    use crate::widget::widgets::{ItemContainer, WrapPanel};

    fn assert_close(actual: f32, expected: f32) {
        assert!(
            (actual - expected).abs() < 1e-4,
            "expected {expected}, got {actual}"
        );
    }

    /// Stand-in for the group chrome: header and panel stacked vertically.
    struct Chrome {
        base: VisualBase,
    }

    impl Chrome {
        fn new() -> Self {
            Self {
                base: VisualBase::new::<Self>(),
            }
        }
    }

    impl Visual for Chrome {
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

    struct Gallery {
        tree: VisualTree,
        root: ObjectId,
        panel: ObjectId,
        items: Vec<u32>,
        containers: ContainerMap<u32>,
    }

    impl Gallery {
        /// `count` realized items of 40x30 inside a host panel.
        fn new(count: u32) -> Self {
            let mut tree = VisualTree::new();
            let root = tree.insert(Chrome::new());
            tree.insert_child(root, ItemContainer::new(Size::new(200.0, 20.0)))
                .unwrap();
            let panel = tree
                .insert_child(root, WrapPanel::new().with_items_host(true))
                .unwrap();
            let mut gallery = Self {
                tree,
                root,
                panel,
                items: Vec::new(),
                containers: ContainerMap::new(),
            };
            for item in 0..count {
                gallery.push(item, Size::new(40.0, 30.0));
            }
            gallery
        }

        fn push(&mut self, item: u32, size: Size) {
            let id = self
                .tree
                .insert_child(self.panel, ItemContainer::new(size))
                .unwrap();
            self.containers.insert(item, id);
            self.items.push(item);
        }

        fn pass(&mut self, container: &mut AdaptiveRowContainer) -> RowBoundsUpdate {
            let update = container.on_layout_pass(&mut self.tree, &self.items, &self.containers);
            self.tree.measure(self.root, Size::new(1000.0, 1000.0));
            update
        }

        fn bounds(&self) -> ExtentBounds {
            self.tree.items_panel(self.panel).unwrap().extent_bounds()
        }

        fn first_item_measures(&self) -> u64 {
            let first = self.containers.get(&0).unwrap();
            self.tree.get(first).unwrap().visual_base().measure_count()
        }
    }

    fn container_for(gallery: &Gallery) -> AdaptiveRowContainer {
        let mut container = AdaptiveRowContainer::new();
        container.set_template_root(Some(gallery.root));
        container.set_loaded(true);
        container
    }

    /// Collects formatted log output for one test.
    #[derive(Clone, Default)]
    struct LogBuffer(Arc<Mutex<Vec<u8>>>);

    impl Write for LogBuffer {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    impl LogBuffer {
        fn contents(&self) -> String {
            String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
        }
    }

    fn capture_warnings<R>(f: impl FnOnce() -> R) -> (R, String) {
        let buffer = LogBuffer::default();
        let writer = buffer.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_max_level(tracing::Level::WARN)
            .with_ansi(false)
            .finish();
        let result = tracing::subscriber::with_default(subscriber, f);
        (result, buffer.contents())
    }

    // =========================================================================
    // Row bounds arithmetic
    // =========================================================================

    #[test]
    fn test_compute_row_bounds() {
        let bounds = RowBounds::compute(10, 40.0, 3, Some(5), Orientation::Horizontal);
        assert_close(bounds.min, 120.1);
        assert_close(bounds.max, 200.1);

        let bounds = RowBounds::compute(2, 40.0, 3, Some(5), Orientation::Horizontal);
        assert_close(bounds.min, 80.1);
        assert_close(bounds.max, 80.1);

        let bounds = RowBounds::compute(4, 25.0, 1, None, Orientation::Horizontal);
        assert_close(bounds.min, 25.1);
        assert_close(bounds.max, 100.1);
    }

    #[test]
    fn test_compute_inverted_bounds_independent() {
        let bounds = RowBounds::compute(10, 40.0, 6, Some(2), Orientation::Vertical);
        assert_close(bounds.min, 240.1);
        assert_close(bounds.max, 80.1);
        assert_eq!(bounds.axis, Orientation::Vertical);
    }

    #[test]
    fn test_compute_zero_max() {
        let bounds = RowBounds::compute(10, 40.0, 0, Some(0), Orientation::Horizontal);
        assert_close(bounds.min, ROW_EXTENT_EPSILON);
        assert_close(bounds.max, ROW_EXTENT_EPSILON);
    }

    // =========================================================================
    // Layout pass
    // =========================================================================

    #[test]
    fn test_measured_extent_applied() {
        let mut gallery = Gallery::new(10);
        let mut container = container_for(&gallery)
            .with_min_items_per_row(3)
            .with_max_items_per_row(Some(5));

        let update = gallery.pass(&mut container);
        let bounds = update.bounds().unwrap();
        assert_close(bounds.min, 120.1);
        assert_close(bounds.max, 200.1);
        assert_close(gallery.bounds().min_width, 120.1);
        assert_close(gallery.bounds().max_width, 200.1);
        assert_eq!(gallery.bounds().max_height, f32::INFINITY);
        assert!(!container.is_row_bounds_dirty());

        let panel = gallery.tree.get_as::<WrapPanel>(gallery.panel).unwrap();
        assert_eq!(panel.items_per_line(), &[5, 5]);
    }

    #[test]
    fn test_fewer_items_than_minimum() {
        let mut gallery = Gallery::new(2);
        let mut container = container_for(&gallery)
            .with_min_items_per_row(3)
            .with_max_items_per_row(Some(5));

        gallery.pass(&mut container);
        assert_close(gallery.bounds().min_width, 80.1);
        assert_close(gallery.bounds().max_width, 80.1);
    }

    #[test]
    fn test_explicit_extent_skips_measure() {
        let mut gallery = Gallery::new(4);
        let mut container = container_for(&gallery)
            .with_item_width(Some(25.0))
            .with_min_items_per_row(1);

        let update = container.on_layout_pass(&mut gallery.tree, &gallery.items, &gallery.containers);
        let bounds = update.bounds().unwrap();
        assert_close(bounds.min, 25.1);
        assert_close(bounds.max, 100.1);
        assert_eq!(gallery.first_item_measures(), 0);
    }

    #[test]
    fn test_no_items_writes_nothing() {
        let mut gallery = Gallery::new(0);
        let mut container = container_for(&gallery).with_item_width(Some(25.0));

        assert_eq!(gallery.pass(&mut container), RowBoundsUpdate::NoItems);
        assert_eq!(gallery.bounds(), ExtentBounds::UNCONSTRAINED);
        assert!(!container.is_row_bounds_dirty());
    }

    #[test]
    fn test_unrealized_item_writes_nothing_and_stays_dirty() {
        let mut gallery = Gallery::new(0);
        gallery.items = vec![0, 1, 2];
        let mut container = container_for(&gallery);

        assert_eq!(gallery.pass(&mut container), RowBoundsUpdate::ExtentUnknown);
        assert_eq!(gallery.bounds(), ExtentBounds::UNCONSTRAINED);
        assert!(container.is_row_bounds_dirty());
        assert!(container.needs_recompute(&gallery.tree, 3));
    }

    #[test]
    fn test_infinite_item_extent_is_unknown() {
        let mut gallery = Gallery::new(0);
        gallery.push(0, Size::UNBOUNDED);
        let mut container = container_for(&gallery);

        assert_eq!(gallery.pass(&mut container), RowBoundsUpdate::ExtentUnknown);
        assert_eq!(gallery.bounds(), ExtentBounds::UNCONSTRAINED);
        assert!(!container.is_row_bounds_dirty());
    }

    #[test]
    fn test_infinite_item_extent_measured_once() {
        let mut gallery = Gallery::new(0);
        gallery.push(0, Size::UNBOUNDED);
        let mut container = container_for(&gallery);

        let expected = [
            RowBoundsUpdate::ExtentUnknown,
            RowBoundsUpdate::Unchanged,
            RowBoundsUpdate::Unchanged,
        ];
        for expected in expected {
            let update =
                container.on_layout_pass(&mut gallery.tree, &gallery.items, &gallery.containers);
            assert_eq!(update, expected);
        }
        assert_eq!(container.recompute_count(), 1);
        assert_eq!(gallery.first_item_measures(), 1);
        assert!(!container.needs_recompute(&gallery.tree, 1));

        container.set_item_width(Some(40.0));
        let update = container.on_layout_pass(&mut gallery.tree, &gallery.items, &gallery.containers);
        assert!(update.bounds().is_some());
    }

    #[test]
    fn test_second_pass_is_idempotent() {
        let mut gallery = Gallery::new(10);
        let mut container = container_for(&gallery)
            .with_min_items_per_row(3)
            .with_max_items_per_row(Some(5));

        gallery.pass(&mut container);
        let bounds = gallery.bounds();
        let measures = gallery.first_item_measures();
        assert_eq!(container.recompute_count(), 1);

        assert_eq!(gallery.pass(&mut container), RowBoundsUpdate::Unchanged);
        assert_eq!(gallery.bounds(), bounds);
        assert_eq!(gallery.first_item_measures(), measures);
        assert_eq!(container.recompute_count(), 1);
    }

    #[test]
    fn test_bound_change_recomputes_once() {
        let mut gallery = Gallery::new(10);
        let mut container = container_for(&gallery)
            .with_min_items_per_row(3)
            .with_max_items_per_row(Some(5));
        gallery.pass(&mut container);

        container.set_max_items_per_row(Some(4));
        assert!(container.is_row_bounds_dirty());
        assert!(gallery.pass(&mut container).is_recomputed());
        assert!(!gallery.pass(&mut container).is_recomputed());
        assert_eq!(container.recompute_count(), 2);
        assert_close(gallery.bounds().max_width, 160.1);

        container.set_min_items_per_row(2);
        gallery.pass(&mut container);
        gallery.pass(&mut container);
        assert_eq!(container.recompute_count(), 3);
        assert_close(gallery.bounds().min_width, 80.1);
    }

    #[test]
    fn test_setting_same_value_does_not_dirty() {
        let mut gallery = Gallery::new(3);
        let mut container = container_for(&gallery).with_min_items_per_row(2);
        gallery.pass(&mut container);

        container.set_min_items_per_row(2);
        container.set_max_items_per_row(None);
        container.set_show_grouping(false);
        container.set_header("Recent");
        assert!(!container.is_row_bounds_dirty());
        assert_eq!(gallery.pass(&mut container), RowBoundsUpdate::Unchanged);
    }

    #[test]
    fn test_item_count_change_recomputes() {
        let mut gallery = Gallery::new(2);
        let mut container = container_for(&gallery)
            .with_min_items_per_row(3)
            .with_max_items_per_row(Some(5));
        gallery.pass(&mut container);
        assert_close(gallery.bounds().min_width, 80.1);

        gallery.push(2, Size::new(40.0, 30.0));
        assert!(gallery.pass(&mut container).is_recomputed());
        assert_close(gallery.bounds().min_width, 120.1);
        assert_close(gallery.bounds().max_width, 120.1);
    }

    #[test]
    fn test_panel_replacement_recomputes_once() {
        let mut gallery = Gallery::new(3);
        let mut container = container_for(&gallery).with_max_items_per_row(Some(2));
        gallery.pass(&mut container);
        let old_panel = gallery.panel;

        gallery.tree.remove(old_panel).unwrap();
        let new_panel = gallery
            .tree
            .insert_child(gallery.root, WrapPanel::new().with_items_host(true))
            .unwrap();
        gallery.panel = new_panel;
        gallery.containers.clear();
        for item in 0..3 {
            let id = gallery
                .tree
                .insert_child(new_panel, ItemContainer::new(Size::new(40.0, 30.0)))
                .unwrap();
            gallery.containers.insert(item, id);
        }
        assert_ne!(old_panel, new_panel);

        assert!(gallery.pass(&mut container).is_recomputed());
        assert!(!gallery.pass(&mut container).is_recomputed());
        assert_eq!(container.recompute_count(), 2);
        assert_eq!(container.host_panel(), Some(new_panel));
        assert_close(gallery.bounds().max_width, 80.1);
    }

    #[test]
    fn test_vertical_writes_heights() {
        let mut gallery = Gallery::new(6);
        let mut container = container_for(&gallery)
            .with_orientation(Orientation::Vertical)
            .with_min_items_per_row(2)
            .with_max_items_per_row(Some(3));

        let bounds = gallery.pass(&mut container).bounds().unwrap();
        assert_eq!(bounds.axis, Orientation::Vertical);
        assert_close(gallery.bounds().min_height, 60.1);
        assert_close(gallery.bounds().max_height, 90.1);
        assert_eq!(gallery.bounds().min_width, 0.0);
        assert_eq!(gallery.bounds().max_width, f32::INFINITY);
    }

    #[test]
    fn test_vertical_uses_item_height() {
        let mut gallery = Gallery::new(4);
        let mut container = container_for(&gallery)
            .with_orientation(Orientation::Vertical)
            .with_item_width(Some(100.0))
            .with_item_height(Some(10.0))
            .with_max_items_per_row(Some(2));

        let bounds = gallery.pass(&mut container).bounds().unwrap();
        assert_close(bounds.max, 20.1);
    }

    #[test]
    fn test_orientation_switch_moves_bounds() {
        let mut gallery = Gallery::new(4);
        let mut container = container_for(&gallery).with_max_items_per_row(Some(2));
        gallery.pass(&mut container);
        assert_close(gallery.bounds().max_width, 80.1);

        container.set_orientation(Orientation::Vertical);
        assert!(container.is_row_bounds_dirty());
        gallery.pass(&mut container);
        assert_eq!(gallery.bounds().max_width, f32::INFINITY);
        assert_close(gallery.bounds().max_height, 60.1);
    }

    #[test]
    fn test_invalid_explicit_extent_is_unset() {
        let mut container = AdaptiveRowContainer::new();
        container.set_item_width(Some(f32::NAN));
        assert_eq!(container.item_width(), None);
        container.set_item_height(Some(-4.0));
        assert_eq!(container.item_height(), None);
        container.set_item_width(Some(12.0));
        assert_eq!(container.item_width(), Some(12.0));
    }

    #[test]
    fn test_missing_host_while_loaded_warns() {
        let mut gallery = Gallery::new(3);
        gallery.tree.remove(gallery.panel).unwrap();
        let mut container = container_for(&gallery).with_header("Recent");

        let (update, logs) = capture_warnings(|| gallery.pass(&mut container));
        assert_eq!(update, RowBoundsUpdate::HostMissing);
        assert!(logs.contains("WARN"));
        assert!(logs.contains(targets::LAYOUT));
        assert!(logs.contains("no items host panel"));
        assert!(logs.contains("Recent"));
        assert!(!container.is_row_bounds_dirty());
        assert_eq!(gallery.pass(&mut container), RowBoundsUpdate::Unchanged);
    }

    #[test]
    fn test_missing_host_before_load_is_silent() {
        let mut gallery = Gallery::new(3);
        gallery.tree.remove(gallery.panel).unwrap();
        let mut container = container_for(&gallery);
        container.set_loaded(false);

        let (update, logs) = capture_warnings(|| gallery.pass(&mut container));
        assert_eq!(update, RowBoundsUpdate::HostMissing);
        assert!(logs.is_empty());
    }

    #[test]
    fn test_no_template_root_is_missing_host() {
        let mut gallery = Gallery::new(3);
        let mut container = AdaptiveRowContainer::new();
        assert_eq!(gallery.pass(&mut container), RowBoundsUpdate::HostMissing);
    }

    #[test]
    fn test_non_host_panel_ignored() {
        let mut gallery = Gallery::new(3);
        gallery
            .tree
            .get_as_mut::<WrapPanel>(gallery.panel)
            .unwrap()
            .set_items_host(false);
        let mut container = container_for(&gallery);
        assert_eq!(container.find_host_panel(&gallery.tree), None);

        let nested = gallery
            .tree
            .insert_child(gallery.panel, WrapPanel::new().with_items_host(true))
            .unwrap();
        assert_eq!(container.find_host_panel(&gallery.tree), Some(nested));
        assert!(gallery.pass(&mut container).is_recomputed());
        assert_eq!(container.host_panel(), Some(nested));
        let written = gallery.tree.items_panel(nested).unwrap().extent_bounds();
        assert_close(written.max_width, 120.1);
        assert_eq!(gallery.bounds(), ExtentBounds::UNCONSTRAINED);
    }

    // =========================================================================
    // Signals and settings
    // =========================================================================

    #[test]
    fn test_signals_fire_on_change_only() {
        let mut container = AdaptiveRowContainer::new();
        let fired = Arc::new(AtomicUsize::new(0));
        let counter = fired.clone();
        container.min_items_per_row_changed.connect(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        container.set_min_items_per_row(0);
        assert_eq!(fired.load(Ordering::SeqCst), 0);
        container.set_min_items_per_row(4);
        container.set_min_items_per_row(4);
        assert_eq!(fired.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_row_bounds_applied_signal() {
        let mut gallery = Gallery::new(5);
        let mut container = container_for(&gallery).with_max_items_per_row(Some(2));
        let applied = Arc::new(Mutex::new(Vec::new()));
        let sink = applied.clone();
        container
            .row_bounds_applied
            .connect(move |bounds| sink.lock().unwrap().push(*bounds));

        gallery.pass(&mut container);
        gallery.pass(&mut container);
        let applied = applied.lock().unwrap();
        assert_eq!(applied.len(), 1);
        assert_close(applied[0].max, 80.1);
    }

    #[test]
    fn test_apply_settings_marks_dirty() {
        let mut gallery = Gallery::new(10);
        let mut container = container_for(&gallery);
        gallery.pass(&mut container);

        let settings = RowLayoutSettings {
            min_items_per_row: 3,
            max_items_per_row: Some(5),
            ..Default::default()
        };
        container.apply_settings(&settings);
        assert!(container.is_row_bounds_dirty());
        assert_eq!(container.settings(), settings);

        gallery.pass(&mut container);
        assert_close(gallery.bounds().min_width, 120.1);
    }

    #[test]
    fn test_from_settings() {
        let settings = RowLayoutSettings {
            show_grouping: false,
            orientation: Orientation::Vertical,
            item_height: Some(32.0),
            ..Default::default()
        };
        let container = AdaptiveRowContainer::from_settings(&settings);
        assert_eq!(container.settings(), settings);
        assert!(container.is_row_bounds_dirty());
    }
}
