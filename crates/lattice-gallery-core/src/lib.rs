//! Core systems for Lattice Gallery.
//!
//! This crate provides the toolkit-independent building blocks the gallery
//! layout is written against:
//!
//! - **Object identity**: [`ObjectId`], versioned handles for tree nodes
//! - **Property system**: [`Property`], values that report real changes
//! - **Signal/slot system**: [`Signal`], change notification
//! - **Tree traversal**: [`tree::TreeAccess`] and depth-first search
//! - **Thread affinity**: [`thread_check::ThreadAffinity`] for UI-thread checks
//! - **Logging**: tracing targets, [`TreeDebug`] and [`PerfSpan`]
//!
//! # Property + Signal Example
//!
//! ```
//! use lattice_gallery_core::{Property, Signal};
//!
//! let orientation_vertical = Property::new(false);
//! let orientation_changed = Signal::<bool>::new();
//! orientation_changed.connect(|vertical| println!("vertical: {vertical}"));
//!
//! if orientation_vertical.set(true) {
//!     orientation_changed.emit(true);
//! }
//! ```

mod error;
pub mod logging;
pub mod object;
pub mod property;
pub mod signal;
pub mod thread_check;
pub mod tree;

pub use error::{ObjectError, ObjectResult};
pub use logging::{PerfSpan, TreeDebug, TreeFormatOptions, TreeStyle};
pub use object::ObjectId;
pub use property::Property;
pub use signal::Signal;
pub use thread_check::ThreadAffinity;
pub use tree::{descendants, find_first_descendant, TreeAccess};
