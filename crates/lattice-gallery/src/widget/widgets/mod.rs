//! Standard gallery widgets.
//!
//! This module provides:
//!
//! - [`AdaptiveRowContainer`]: Gallery group that bounds items per row
//! - [`WrapPanel`]: Wrapping items host panel
//! - [`ItemContainer`]: Leaf visual for one realized item

mod adaptive_row_container;
mod item_container;
mod wrap_panel;

pub use adaptive_row_container::{
    AdaptiveRowContainer, ROW_EXTENT_EPSILON, RowBounds, RowBoundsUpdate,
};
pub use item_container::ItemContainer;
pub use wrap_panel::WrapPanel;
