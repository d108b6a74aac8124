//! Visual system for Lattice Gallery.
//!
//! This module provides the pieces a wrapping gallery is built from:
//!
//! - [`Visual`] trait: The base trait for every node in the tree
//! - [`VisualBase`]: Shared measure state for visuals
//! - [`VisualTree`]: Arena owning the visuals and their parent/child links
//! - [`ItemCollection`] and [`ItemContainerGenerator`]: How items and their
//!   rendered containers are looked up
//! - [`AdaptiveRowContainer`]: Sizes its host panel by items per row
//!
//! # Overview
//!
//! A gallery group is a small subtree: some chrome (a header, borders) and,
//! somewhere below it, a [`WrapPanel`] flagged as the items host. The panel
//! holds one [`ItemContainer`] per realized item.
//!
//! ```text
//! GalleryGroup            <- template root of the container
//! ├── Header
//! └── WrapPanel (host)    <- receives min/max extents
//!     ├── ItemContainer
//!     └── ItemContainer
//! ```
//!
//! The [`AdaptiveRowContainer`] does not own this subtree. It only keeps the
//! template root's [`ObjectId`](lattice_gallery_core::ObjectId), searches it
//! for the host panel on each layout pass, and writes the row bounds.
//!
//! # Creating a Visual
//!
//! ```
//! use lattice_gallery::widget::{Size, Visual, VisualBase};
//!
//! struct Badge {
//!     base: VisualBase,
//! }
//!
//! impl Visual for Badge {
//!     fn visual_base(&self) -> &VisualBase { &self.base }
//!     fn visual_base_mut(&mut self) -> &mut VisualBase { &mut self.base }
//!
//!     fn measure_override(&mut self, available: Size, _children: &[Size]) -> Size {
//!         Size::new(available.width.min(16.0), available.height.min(16.0))
//!     }
//! }
//! ```

mod base;
mod geometry;
mod items;
pub mod layout;
mod traits;
mod tree;
pub mod widgets;

pub use base::VisualBase;
pub use geometry::{ExtentBounds, Orientation, Size};
pub use items::{ContainerMap, ItemCollection, ItemContainerGenerator};
pub use layout::{LayoutDriver, LayoutReport};
pub use traits::{ItemsPanel, Visual};
pub use tree::VisualTree;

// Re-export widgets for convenience
pub use widgets::{
    AdaptiveRowContainer, ItemContainer, ROW_EXTENT_EPSILON, RowBounds, RowBoundsUpdate, WrapPanel,
};
