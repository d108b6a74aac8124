//! Leaf visual for a realized gallery item.

use crate::widget::base::VisualBase;
use crate::widget::geometry::Size;
use crate::widget::traits::Visual;

/// The visual generated for one item.
///
/// Its desired size is its content size clamped to the space it is offered.
#[derive(Debug, Clone)]
pub struct ItemContainer {
    base: VisualBase,
    content_size: Size,
}

impl Default for ItemContainer {
    fn default() -> Self {
        Self::new(Size::ZERO)
    }
}

impl ItemContainer {
    /// Create a container whose content has the given natural size.
    pub fn new(content_size: Size) -> Self {
        Self {
            base: VisualBase::new::<Self>(),
            content_size,
        }
    }

    /// The natural size of the content.
    #[inline]
    pub fn content_size(&self) -> Size {
        self.content_size
    }

    /// Change the natural size of the content.
    pub fn set_content_size(&mut self, size: Size) {
        if self.content_size != size {
            self.content_size = size;
            self.base.invalidate_measure();
        }
    }
}

impl Visual for ItemContainer {
    fn visual_base(&self) -> &VisualBase {
        &self.base
    }

    fn visual_base_mut(&mut self) -> &mut VisualBase {
        &mut self.base
    }

    fn measure_override(&mut self, available: Size, _children: &[Size]) -> Size {
        Size::new(
            self.content_size.width.min(available.width),
            self.content_size.height.min(available.height),
        )
    }
}
