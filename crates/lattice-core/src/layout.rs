//! The computed layout output for a single node.

use crate::geometry::{Point, Rect, Size};

/// The final result of layout for one node.
///
/// All coordinates are relative to the parent's border box top-left corner.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Layout {
    /// Paint/z ordering index: a topological rank within the parent, not
    /// necessarily the insertion order. Higher orders paint on top.
    pub order: u32,
    /// The top-left corner of the border box
    pub location: Point<f32>,
    /// The border box size
    pub size: Size<f32>,
    /// The size of the node's content; may exceed `size` when content
    /// overflows
    pub content_size: Size<f32>,
    /// Space reserved for scrollbars; non-zero only for `Overflow::Scroll`
    pub scrollbar_size: Size<f32>,
    /// Resolved border widths
    pub border: Rect<f32>,
    /// Resolved padding
    pub padding: Rect<f32>,
    /// Resolved margins
    pub margin: Rect<f32>,
}

impl Default for Layout {
    fn default() -> Self {
        Self::new()
    }
}

impl Layout {
    /// A zeroed layout with order 0.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            order: 0,
            location: Point::ZERO,
            size: Size::<f32>::ZERO,
            content_size: Size::<f32>::ZERO,
            scrollbar_size: Size::<f32>::ZERO,
            border: Rect::<f32>::ZERO,
            padding: Rect::<f32>::ZERO,
            margin: Rect::<f32>::ZERO,
        }
    }

    /// A zeroed layout with the given paint order.
    #[must_use]
    pub const fn with_order(order: u32) -> Self {
        Self {
            order,
            location: Point::ZERO,
            size: Size::<f32>::ZERO,
            content_size: Size::<f32>::ZERO,
            scrollbar_size: Size::<f32>::ZERO,
            border: Rect::<f32>::ZERO,
            padding: Rect::<f32>::ZERO,
            margin: Rect::<f32>::ZERO,
        }
    }

    /// The size of the content box: the border box minus padding, border,
    /// and scrollbar reservations.
    pub fn content_box_size(&self) -> Size<f32> {
        Size {
            width: self.size.width
                - self.padding.horizontal_axis_sum()
                - self.border.horizontal_axis_sum()
                - self.scrollbar_size.width,
            height: self.size.height
                - self.padding.vertical_axis_sum()
                - self.border.vertical_axis_sum()
                - self.scrollbar_size.height,
        }
    }

    /// Horizontal distance between the tracked content's right edge and the
    /// border box's right edge, clamped to zero.
    pub fn scroll_width(&self) -> f32 {
        (self.content_size.width - self.size.width + self.border.right).max(0.0)
    }

    /// Vertical equivalent of [`Layout::scroll_width`].
    pub fn scroll_height(&self) -> f32 {
        (self.content_size.height - self.size.height + self.border.bottom).max(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_box_size() {
        let layout = Layout {
            size: Size::new(100.0, 50.0),
            padding: Rect { left: 5.0, right: 5.0, top: 2.0, bottom: 2.0 },
            border: Rect { left: 1.0, right: 1.0, top: 1.0, bottom: 1.0 },
            ..Layout::new()
        };
        assert_eq!(layout.content_box_size(), Size::new(88.0, 44.0));
    }
}
