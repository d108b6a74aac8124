//! Sizes, orientations and extent bounds for gallery layout.
//!
//! A wrapping gallery flows its items along one axis and wraps onto a new
//! line when that axis runs out of room. [`Orientation`] names the flow axis;
//! helpers on [`Size`] read and build sizes relative to it so layout code can
//! be written once for both directions.

use serde::{Deserialize, Serialize};

/// Direction in which items flow before wrapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    /// Items flow left to right and wrap into rows. Extents are widths.
    #[default]
    Horizontal,
    /// Items flow top to bottom and wrap into columns. Extents are heights.
    Vertical,
}

impl Orientation {
    /// Returns true for [`Orientation::Horizontal`].
    #[inline]
    pub fn is_horizontal(self) -> bool {
        matches!(self, Self::Horizontal)
    }

    /// The other orientation.
    #[inline]
    pub fn flipped(self) -> Self {
        match self {
            Self::Horizontal => Self::Vertical,
            Self::Vertical => Self::Horizontal,
        }
    }
}

/// A 2D size.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    /// Width.
    pub width: f32,
    /// Height.
    pub height: f32,
}

impl Size {
    /// Create a new size.
    #[inline]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Zero size.
    pub const ZERO: Self = Self::new(0.0, 0.0);

    /// Unconstrained space, used to ask a visual for its natural size.
    pub const UNBOUNDED: Self = Self::new(f32::INFINITY, f32::INFINITY);

    /// Build a size from an extent along `orientation` and one across it.
    #[inline]
    pub fn from_flow(orientation: Orientation, along: f32, across: f32) -> Self {
        match orientation {
            Orientation::Horizontal => Self::new(along, across),
            Orientation::Vertical => Self::new(across, along),
        }
    }

    /// The extent along `orientation` (width when horizontal).
    #[inline]
    pub fn along(&self, orientation: Orientation) -> f32 {
        match orientation {
            Orientation::Horizontal => self.width,
            Orientation::Vertical => self.height,
        }
    }

    /// The extent across `orientation` (height when horizontal).
    #[inline]
    pub fn across(&self, orientation: Orientation) -> f32 {
        self.along(orientation.flipped())
    }

    /// Check if the size has zero area.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }
}

impl From<(f32, f32)> for Size {
    fn from((width, height): (f32, f32)) -> Self {
        Self { width, height }
    }
}

/// Minimum and maximum extents a panel accepts on each axis.
///
/// When a maximum is smaller than its minimum, the minimum wins. Whoever
/// writes the bounds does not have to keep them ordered.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExtentBounds {
    /// Minimum width.
    pub min_width: f32,
    /// Maximum width.
    pub max_width: f32,
    /// Minimum height.
    pub min_height: f32,
    /// Maximum height.
    pub max_height: f32,
}

impl Default for ExtentBounds {
    fn default() -> Self {
        Self::UNCONSTRAINED
    }
}

impl ExtentBounds {
    /// No constraint on either axis.
    pub const UNCONSTRAINED: Self = Self {
        min_width: 0.0,
        max_width: f32::INFINITY,
        min_height: 0.0,
        max_height: f32::INFINITY,
    };

    /// Minimum extent along `axis`.
    #[inline]
    pub fn min(&self, axis: Orientation) -> f32 {
        match axis {
            Orientation::Horizontal => self.min_width,
            Orientation::Vertical => self.min_height,
        }
    }

    /// Maximum extent along `axis`.
    #[inline]
    pub fn max(&self, axis: Orientation) -> f32 {
        match axis {
            Orientation::Horizontal => self.max_width,
            Orientation::Vertical => self.max_height,
        }
    }

    /// Replace both bounds along `axis`, returning whether anything changed.
    pub fn set(&mut self, axis: Orientation, min: f32, max: f32) -> bool {
        let (min_slot, max_slot) = match axis {
            Orientation::Horizontal => (&mut self.min_width, &mut self.max_width),
            Orientation::Vertical => (&mut self.min_height, &mut self.max_height),
        };
        if *min_slot == min && *max_slot == max {
            return false;
        }
        *min_slot = min;
        *max_slot = max;
        true
    }

    /// Reset `axis` to unconstrained, returning whether anything changed.
    pub fn reset(&mut self, axis: Orientation) -> bool {
        let defaults = Self::UNCONSTRAINED;
        self.set(axis, defaults.min(axis), defaults.max(axis))
    }

    /// Clamp `value` into the bounds along `axis`. The minimum wins over an
    /// inverted maximum.
    #[inline]
    pub fn clamp(&self, axis: Orientation, value: f32) -> f32 {
        value.min(self.max(axis)).max(self.min(axis))
    }

    /// Clamp both dimensions of `size`.
    pub fn constrain(&self, size: Size) -> Size {
        Size::new(
            self.clamp(Orientation::Horizontal, size.width),
            self.clamp(Orientation::Vertical, size.height),
        )
    }
}
