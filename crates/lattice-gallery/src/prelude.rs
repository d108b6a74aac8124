//! Prelude module for Lattice Gallery.
//!
//! This module re-exports the most commonly used types for convenient importing:
//!
//! ```ignore
//! use lattice_gallery::prelude::*;
//! ```

// ============================================================================
// Signal/Slot and Property System
// ============================================================================

pub use crate::{Property, Signal};

// ============================================================================
// Object System
// ============================================================================

pub use crate::ObjectId;

// ============================================================================
// Visual Foundation
// ============================================================================

pub use crate::widget::{
    ExtentBounds, ItemsPanel, Orientation, Size, Visual, VisualBase, VisualTree,
};

// ============================================================================
// Items
// ============================================================================

pub use crate::widget::{ContainerMap, ItemCollection, ItemContainerGenerator};

// ============================================================================
// Gallery Widgets
// ============================================================================

pub use crate::widget::{
    AdaptiveRowContainer, ItemContainer, RowBounds, RowBoundsUpdate, WrapPanel,
};

// ============================================================================
// Layout and Settings
// ============================================================================

pub use crate::widget::{LayoutDriver, LayoutReport};
pub use crate::{GalleryError, RowLayoutSettings};
