//! Lattice Gallery - adaptive row sizing for wrapping item galleries.
//!
//! A gallery group arranges uniformly sized items into wrapping rows. This
//! crate keeps the number of items per row between a configured minimum and
//! maximum by measuring one item and writing matching extent bounds onto the
//! panel that hosts the items.
//!
//! The core building blocks (object IDs, properties, signals, tree traversal)
//! live in `lattice-gallery-core` and are re-exported here.
//!
//! # Example
//!
//! ```
//! use lattice_gallery::prelude::*;
//!
//! fn main() -> lattice_gallery::Result<()> {
//!     let mut tree = VisualTree::new();
//!     let root = tree.insert(WrapPanel::new());
//!     tree.insert_child(root, WrapPanel::new().with_items_host(true))?;
//!
//!     let mut gallery = AdaptiveRowContainer::new()
//!         .with_min_items_per_row(2)
//!         .with_max_items_per_row(Some(4));
//!     gallery.set_template_root(Some(root));
//!
//!     let items: Vec<u32> = (0..9).collect();
//!     let mut containers = ContainerMap::with_factory(|_: &u32| {
//!         Box::new(ItemContainer::new(Size::new(64.0, 48.0))) as Box<dyn Visual>
//!     });
//!
//!     let report = LayoutDriver::new().run(
//!         &mut gallery,
//!         &mut tree,
//!         &items,
//!         &mut containers,
//!         Size::new(800.0, 600.0),
//!     )?;
//!     assert!(report.passes <= 2);
//!     Ok(())
//! }
//! ```

pub use lattice_gallery_core::*;

pub mod config;
mod error;
pub mod prelude;
pub mod widget;

pub use config::{RowLayoutSettings, SettingsFormat};
pub use error::{GalleryError, Result};
