//! Layout passes for gallery containers.
//!
//! A layout pass has two halves. First every [`AdaptiveRowContainer`] runs its
//! hook and writes row bounds onto its host panel. Then the visual tree is
//! measured bottom-up, children before parents, and the panel flows its items
//! inside those bounds.
//!
//! Writing bounds can make another pass necessary, for example when the
//! first item had no realized container yet. [`LayoutDriver`] repeats the
//! pass a bounded number of times.
//!
//! [`AdaptiveRowContainer`]: super::widgets::AdaptiveRowContainer

mod driver;

pub use driver::{DEFAULT_MAX_LAYOUT_PASSES, LayoutDriver, LayoutReport};
