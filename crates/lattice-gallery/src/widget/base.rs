//! Visual base implementation.
//!
//! [`VisualBase`] holds the measure state every visual shares: the last
//! desired size, the constraint it was computed under, and whether it must be
//! recomputed.

use super::geometry::Size;

/// The base implementation for all visuals.
///
/// Visual implementations include this as a field and hand it out through
/// [`Visual::visual_base`](super::Visual::visual_base). The tree reads and
/// updates it around each call to `measure_override`.
#[derive(Debug, Clone)]
pub struct VisualBase {
    /// Label used in debug output.
    name: String,

    /// Desired size from the last measure.
    desired_size: Size,

    /// The available size the last measure ran under.
    last_available: Option<Size>,

    /// Whether the next measure must recompute.
    measure_dirty: bool,

    /// How many times the node has actually been measured.
    measure_count: u64,
}

impl VisualBase {
    /// Create a new visual base labelled with the short type name of `T`.
    pub fn new<T: ?Sized>() -> Self {
        let full = std::any::type_name::<T>();
        let short = full.rsplit("::").next().unwrap_or(full);
        Self::named(short)
    }

    /// Create a new visual base with an explicit label.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            desired_size: Size::ZERO,
            last_available: None,
            measure_dirty: true,
            measure_count: 0,
        }
    }

    /// The node's label.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Set the node's label.
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Desired size from the last measure.
    #[inline]
    pub fn desired_size(&self) -> Size {
        self.desired_size
    }

    /// Number of measures actually performed (cache hits excluded).
    #[inline]
    pub fn measure_count(&self) -> u64 {
        self.measure_count
    }

    /// Whether the node is marked for re-measure.
    #[inline]
    pub fn is_measure_dirty(&self) -> bool {
        self.measure_dirty
    }

    /// Whether a measure under `available` must recompute.
    pub fn needs_measure(&self, available: Size) -> bool {
        self.measure_dirty || self.last_available != Some(available)
    }

    /// Store the result of a measure.
    pub fn record_measure(&mut self, available: Size, desired: Size) {
        self.desired_size = desired;
        self.last_available = Some(available);
        self.measure_dirty = false;
        self.measure_count += 1;
    }

    /// Force the next measure to recompute.
    #[inline]
    pub fn invalidate_measure(&mut self) {
        self.measure_dirty = true;
    }
}
