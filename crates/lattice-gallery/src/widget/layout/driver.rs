//! Bounded layout loop.
//!
//! Writing row bounds onto a panel can change what the next pass sees: item
//! containers get realized, so the item extent becomes measurable. The
//! [`LayoutDriver`] repeats the pass until the container is satisfied, and
//! gives up with [`GalleryError::LayoutNotConverged`] after a fixed number of
//! passes.

use lattice_gallery_core::logging::{span_names, targets};
use lattice_gallery_core::PerfSpan;

use crate::error::{GalleryError, Result};
use crate::widget::geometry::Size;
use crate::widget::items::{ItemCollection, ItemContainerGenerator};
use crate::widget::tree::VisualTree;
use crate::widget::widgets::{AdaptiveRowContainer, RowBoundsUpdate};

/// Default pass limit of a [`LayoutDriver`].
pub const DEFAULT_MAX_LAYOUT_PASSES: usize = 2;

/// Summary of one [`LayoutDriver::run`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutReport {
    /// Passes performed.
    pub passes: usize,
    /// What the container's hook did on the final pass.
    pub last_update: RowBoundsUpdate,
    /// Desired size of the template root after the final pass.
    pub desired_size: Size,
}

/// Runs layout passes for one adaptive row container.
///
/// Each pass:
///
/// 1. runs [`AdaptiveRowContainer::on_layout_pass`]
/// 2. lets the generator realize item containers into the host panel
/// 3. measures the container's template root
///
/// Another pass follows only while the container still wants to recompute
/// and the last pass made progress.
#[derive(Debug, Clone, Copy)]
pub struct LayoutDriver {
    max_passes: usize,
}

impl Default for LayoutDriver {
    fn default() -> Self {
        Self::new()
    }
}

impl LayoutDriver {
    /// Create a driver with [`DEFAULT_MAX_LAYOUT_PASSES`].
    pub fn new() -> Self {
        Self {
            max_passes: DEFAULT_MAX_LAYOUT_PASSES,
        }
    }

    /// Set the pass limit using builder pattern. Zero is treated as one.
    pub fn with_max_passes(mut self, max_passes: usize) -> Self {
        self.max_passes = max_passes.max(1);
        self
    }

    /// The pass limit.
    #[inline]
    pub fn max_passes(&self) -> usize {
        self.max_passes
    }

    /// Lay out `container` against `available`.
    ///
    /// # Errors
    ///
    /// Returns [`GalleryError::Object`] if the generator fails to realize
    /// containers, and [`GalleryError::LayoutNotConverged`] if the container
    /// still requests work after the pass limit.
    pub fn run<C, G>(
        &self,
        container: &mut AdaptiveRowContainer,
        tree: &mut VisualTree,
        items: &C,
        generator: &mut G,
        available: Size,
    ) -> Result<LayoutReport>
    where
        C: ItemCollection + ?Sized,
        G: ItemContainerGenerator<C::Item> + ?Sized,
    {
        let _perf = PerfSpan::new(span_names::LAYOUT_PASS);
        let mut passes = 0;

        loop {
            passes += 1;
            let update = container.on_layout_pass(tree, items, &*generator);

            let realized = match container.host_panel() {
                Some(panel) => generator.realize(tree, panel, items)?,
                None => 0,
            };

            let desired_size = container
                .template_root()
                .and_then(|root| tree.measure(root, available))
                .unwrap_or(Size::ZERO);

            tracing::debug!(
                target: targets::LAYOUT,
                pass = passes,
                ?update,
                realized,
                width = desired_size.width,
                height = desired_size.height,
                "layout pass"
            );

            let stalled = update == RowBoundsUpdate::ExtentUnknown && realized == 0;
            if stalled || !container.needs_recompute(tree, items.count()) {
                return Ok(LayoutReport {
                    passes,
                    last_update: update,
                    desired_size,
                });
            }

            if passes >= self.max_passes {
                tracing::warn!(
                    target: targets::LAYOUT,
                    passes,
                    "layout did not converge"
                );
                return Err(GalleryError::LayoutNotConverged { passes });
            }
        }
    }
}
