//! Geometric primitives for layout computation.
//!
//! All of the container types here are generic over their component type:
//! concrete layout math uses `f32`, optional values use `Option<f32>`, and
//! style resolution uses the dimension types from [`crate::style`].

use glam::Vec2;

use crate::math::MaybeMath;
use crate::style::FlexDirection;

/// The two absolute screen axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AbsoluteAxis {
    /// The horizontal (x, width) axis
    Horizontal,
    /// The vertical (y, height) axis
    Vertical,
}

impl AbsoluteAxis {
    /// Get the other axis.
    pub const fn other(self) -> Self {
        match self {
            Self::Horizontal => Self::Vertical,
            Self::Vertical => Self::Horizontal,
        }
    }
}

/// A 2D point. `x` is the horizontal component, `y` the vertical component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point<T> {
    pub x: T,
    pub y: T,
}

impl Point<f32> {
    /// The origin.
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    /// Convert to a glam vector.
    pub fn as_vec2(self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }
}

impl Point<Option<f32>> {
    /// A point with neither component set.
    pub const NONE: Self = Self { x: None, y: None };
}

impl From<Vec2> for Point<f32> {
    fn from(v: Vec2) -> Self {
        Self { x: v.x, y: v.y }
    }
}

impl<T> Point<T> {
    /// Apply a function to both components.
    pub fn map<R, F: Fn(T) -> R>(self, f: F) -> Point<R> {
        Point { x: f(self.x), y: f(self.y) }
    }

    /// Get the component on the given absolute axis.
    pub fn get_abs(self, axis: AbsoluteAxis) -> T {
        match axis {
            AbsoluteAxis::Horizontal => self.x,
            AbsoluteAxis::Vertical => self.y,
        }
    }

    /// Swap the two components.
    pub fn transpose(self) -> Point<T> {
        Point { x: self.y, y: self.x }
    }
}

impl<T: Copy> Point<T> {
    /// Get the component on the main axis of `direction`.
    pub fn main(self, direction: FlexDirection) -> T {
        if direction.is_row() {
            self.x
        } else {
            self.y
        }
    }

    /// Get the component on the cross axis of `direction`.
    pub fn cross(self, direction: FlexDirection) -> T {
        if direction.is_row() {
            self.y
        } else {
            self.x
        }
    }

    /// Set the component on the main axis of `direction`.
    pub fn set_main(&mut self, direction: FlexDirection, value: T) {
        if direction.is_row() {
            self.x = value
        } else {
            self.y = value
        }
    }

    /// Set the component on the cross axis of `direction`.
    pub fn set_cross(&mut self, direction: FlexDirection, value: T) {
        if direction.is_row() {
            self.y = value
        } else {
            self.x = value
        }
    }
}

impl<T: std::ops::Add<Output = T>> std::ops::Add for Point<T> {
    type Output = Point<T>;

    fn add(self, rhs: Self) -> Self {
        Point { x: self.x + rhs.x, y: self.y + rhs.y }
    }
}

/// A 2D size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Size<T> {
    pub width: T,
    pub height: T,
}

impl Size<f32> {
    /// A zero size.
    pub const ZERO: Self = Self { width: 0.0, height: 0.0 };

    /// Create a size from width and height.
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// A zero size.
    pub const fn zero() -> Self {
        Self::ZERO
    }

    /// Component-wise maximum of two sizes.
    pub fn f32_max(self, rhs: Size<f32>) -> Size<f32> {
        Size { width: self.width.max(rhs.width), height: self.height.max(rhs.height) }
    }

    /// Component-wise clamp against optional bounds.
    pub fn maybe_clamp(self, min: Size<Option<f32>>, max: Size<Option<f32>>) -> Size<f32> {
        Size {
            width: self.width.maybe_clamp(min.width, max.width),
            height: self.height.maybe_clamp(min.height, max.height),
        }
    }

    /// Convert to a glam vector.
    pub fn as_vec2(self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }
}

impl From<Vec2> for Size<f32> {
    fn from(v: Vec2) -> Self {
        Self { width: v.x, height: v.y }
    }
}

impl Size<Option<f32>> {
    /// A size with neither dimension set.
    pub const NONE: Self = Self { width: None, height: None };

    /// Return `self` with unset dimensions filled in from `alt`.
    pub fn or(self, alt: Size<Option<f32>>) -> Size<Option<f32>> {
        Size { width: self.width.or(alt.width), height: self.height.or(alt.height) }
    }

    /// Fill unset dimensions from a concrete size.
    pub fn unwrap_or(self, alt: Size<f32>) -> Size<f32> {
        Size { width: self.width.unwrap_or(alt.width), height: self.height.unwrap_or(alt.height) }
    }

    /// True if both dimensions are set.
    pub fn both_axis_defined(self) -> bool {
        self.width.is_some() && self.height.is_some()
    }

    /// Component-wise clamp of set dimensions against optional bounds.
    pub fn maybe_clamp(self, min: Size<Option<f32>>, max: Size<Option<f32>>) -> Size<Option<f32>> {
        Size {
            width: self.width.maybe_clamp(min.width, max.width),
            height: self.height.maybe_clamp(min.height, max.height),
        }
    }

    /// Component-wise add a concrete size to any set dimensions.
    pub fn maybe_add(self, rhs: Size<f32>) -> Size<Option<f32>> {
        Size { width: self.width.maybe_add(rhs.width), height: self.height.maybe_add(rhs.height) }
    }

    /// Component-wise subtract a concrete size from any set dimensions.
    pub fn maybe_sub(self, rhs: Size<f32>) -> Size<Option<f32>> {
        Size { width: self.width.maybe_sub(rhs.width), height: self.height.maybe_sub(rhs.height) }
    }

    /// Component-wise maximum of any set dimensions with a concrete size.
    pub fn maybe_max(self, rhs: Size<f32>) -> Size<Option<f32>> {
        Size { width: self.width.maybe_max(rhs.width), height: self.height.maybe_max(rhs.height) }
    }

    /// If exactly one dimension is set and an aspect ratio (width / height)
    /// is given, derive the other dimension from it.
    pub fn maybe_apply_aspect_ratio(self, aspect_ratio: Option<f32>) -> Size<Option<f32>> {
        match aspect_ratio {
            Some(ratio) => match (self.width, self.height) {
                (Some(width), None) => Size { width: Some(width), height: Some(width / ratio) },
                (None, Some(height)) => Size { width: Some(height * ratio), height: Some(height) },
                _ => self,
            },
            None => self,
        }
    }
}

impl<T> Size<T> {
    /// Apply a function to both dimensions.
    pub fn map<R, F: Fn(T) -> R>(self, f: F) -> Size<R> {
        Size { width: f(self.width), height: f(self.height) }
    }

    /// Apply a function to the width only.
    pub fn map_width<F: Fn(T) -> T>(self, f: F) -> Size<T> {
        Size { width: f(self.width), height: self.height }
    }

    /// Apply a function to the height only.
    pub fn map_height<F: Fn(T) -> T>(self, f: F) -> Size<T> {
        Size { width: self.width, height: f(self.height) }
    }

    /// Combine two sizes component-wise.
    pub fn zip_map<U, R, F: Fn(T, U) -> R>(self, rhs: Size<U>, f: F) -> Size<R> {
        Size { width: f(self.width, rhs.width), height: f(self.height, rhs.height) }
    }

    /// Get the dimension on the given absolute axis.
    pub fn get_abs(self, axis: AbsoluteAxis) -> T {
        match axis {
            AbsoluteAxis::Horizontal => self.width,
            AbsoluteAxis::Vertical => self.height,
        }
    }
}

impl<T: Copy> Size<T> {
    /// Set the dimension on the given absolute axis.
    pub fn set_abs(&mut self, axis: AbsoluteAxis, value: T) {
        match axis {
            AbsoluteAxis::Horizontal => self.width = value,
            AbsoluteAxis::Vertical => self.height = value,
        }
    }

    /// Get the dimension on the main axis of `direction`.
    pub fn main(self, direction: FlexDirection) -> T {
        if direction.is_row() {
            self.width
        } else {
            self.height
        }
    }

    /// Get the dimension on the cross axis of `direction`.
    pub fn cross(self, direction: FlexDirection) -> T {
        if direction.is_row() {
            self.height
        } else {
            self.width
        }
    }

    /// Set the dimension on the main axis of `direction`.
    pub fn set_main(&mut self, direction: FlexDirection, value: T) {
        if direction.is_row() {
            self.width = value
        } else {
            self.height = value
        }
    }

    /// Set the dimension on the cross axis of `direction`.
    pub fn set_cross(&mut self, direction: FlexDirection, value: T) {
        if direction.is_row() {
            self.height = value
        } else {
            self.width = value
        }
    }

    /// Return a copy with the main-axis dimension replaced.
    pub fn with_main(self, direction: FlexDirection, value: T) -> Size<T> {
        let mut new = self;
        new.set_main(direction, value);
        new
    }

    /// Return a copy with the cross-axis dimension replaced.
    pub fn with_cross(self, direction: FlexDirection, value: T) -> Size<T> {
        let mut new = self;
        new.set_cross(direction, value);
        new
    }
}

impl<T: std::ops::Add<Output = T>> std::ops::Add for Size<T> {
    type Output = Size<T>;

    fn add(self, rhs: Self) -> Self {
        Size { width: self.width + rhs.width, height: self.height + rhs.height }
    }
}

impl<T: std::ops::Sub<Output = T>> std::ops::Sub for Size<T> {
    type Output = Size<T>;

    fn sub(self, rhs: Self) -> Self {
        Size { width: self.width - rhs.width, height: self.height - rhs.height }
    }
}

/// An axis-aligned group of four edge values: margins, padding, borders, or
/// insets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rect<T> {
    pub left: T,
    pub right: T,
    pub top: T,
    pub bottom: T,
}

impl Rect<f32> {
    /// A rect with all edges zero.
    pub const ZERO: Self = Self { left: 0.0, right: 0.0, top: 0.0, bottom: 0.0 };

    /// The sum of the left and right edges.
    pub fn horizontal_axis_sum(&self) -> f32 {
        self.left + self.right
    }

    /// The sum of the top and bottom edges.
    pub fn vertical_axis_sum(&self) -> f32 {
        self.top + self.bottom
    }

    /// Both axis sums as a size.
    pub fn sum_axes(&self) -> Size<f32> {
        Size { width: self.horizontal_axis_sum(), height: self.vertical_axis_sum() }
    }

    /// The sum of the two edges on the given absolute axis.
    pub fn axis_sum(&self, axis: AbsoluteAxis) -> f32 {
        match axis {
            AbsoluteAxis::Horizontal => self.horizontal_axis_sum(),
            AbsoluteAxis::Vertical => self.vertical_axis_sum(),
        }
    }

    /// The sum of the edges on the main axis of `direction`.
    pub fn main_axis_sum(&self, direction: FlexDirection) -> f32 {
        if direction.is_row() {
            self.horizontal_axis_sum()
        } else {
            self.vertical_axis_sum()
        }
    }

    /// The sum of the edges on the cross axis of `direction`.
    pub fn cross_axis_sum(&self, direction: FlexDirection) -> f32 {
        if direction.is_row() {
            self.vertical_axis_sum()
        } else {
            self.horizontal_axis_sum()
        }
    }
}

impl<T> Rect<T> {
    /// Apply a function to all four edges.
    pub fn map<R, F: Fn(T) -> R>(self, f: F) -> Rect<R> {
        Rect { left: f(self.left), right: f(self.right), top: f(self.top), bottom: f(self.bottom) }
    }
}

impl<T: Copy> Rect<T> {
    /// Create a rect with the same value on every edge.
    pub fn uniform(value: T) -> Self {
        Self { left: value, right: value, top: value, bottom: value }
    }

    /// The edge at the start of the main axis of `direction`
    /// (left for rows, top for columns).
    pub fn main_start(&self, direction: FlexDirection) -> T {
        if direction.is_row() {
            self.left
        } else {
            self.top
        }
    }

    /// The edge at the end of the main axis of `direction`.
    pub fn main_end(&self, direction: FlexDirection) -> T {
        if direction.is_row() {
            self.right
        } else {
            self.bottom
        }
    }

    /// The edge at the start of the cross axis of `direction`.
    pub fn cross_start(&self, direction: FlexDirection) -> T {
        if direction.is_row() {
            self.top
        } else {
            self.left
        }
    }

    /// The edge at the end of the cross axis of `direction`.
    pub fn cross_end(&self, direction: FlexDirection) -> T {
        if direction.is_row() {
            self.bottom
        } else {
            self.right
        }
    }
}

impl<T: std::ops::Add<Output = T>> std::ops::Add for Rect<T> {
    type Output = Rect<T>;

    fn add(self, rhs: Self) -> Self {
        Rect {
            left: self.left + rhs.left,
            right: self.right + rhs.right,
            top: self.top + rhs.top,
            bottom: self.bottom + rhs.bottom,
        }
    }
}

/// A pair of values on one axis: a start and an end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InlinePair<T> {
    pub start: T,
    pub end: T,
}

impl<T> InlinePair<T> {
    /// Apply a function to both values.
    pub fn map<R, F: Fn(T) -> R>(self, f: F) -> InlinePair<R> {
        InlinePair { start: f(self.start), end: f(self.end) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_size_axis_accessors() {
        let mut size = Size::new(10.0, 20.0);
        assert_eq!(size.main(FlexDirection::Row), 10.0);
        assert_eq!(size.main(FlexDirection::Column), 20.0);
        assert_eq!(size.cross(FlexDirection::RowReverse), 20.0);
        size.set_main(FlexDirection::Column, 30.0);
        assert_eq!(size.height, 30.0);
    }

    #[test]
    fn test_maybe_apply_aspect_ratio() {
        let size = Size { width: Some(100.0), height: None };
        let applied = size.maybe_apply_aspect_ratio(Some(2.0));
        assert_eq!(applied.height, Some(50.0));

        let size = Size { width: None, height: Some(50.0) };
        let applied = size.maybe_apply_aspect_ratio(Some(2.0));
        assert_eq!(applied.width, Some(100.0));

        let both = Size { width: Some(10.0), height: Some(10.0) };
        assert_eq!(both.maybe_apply_aspect_ratio(Some(2.0)), both);
    }

    #[test]
    fn test_rect_sums() {
        let rect = Rect { left: 1.0, right: 2.0, top: 3.0, bottom: 4.0 };
        assert!((rect.horizontal_axis_sum() - 3.0).abs() < 0.001);
        assert!((rect.vertical_axis_sum() - 7.0).abs() < 0.001);
        assert_eq!(rect.sum_axes(), Size::new(3.0, 7.0));
        assert_eq!(rect.main_start(FlexDirection::Column), 3.0);
    }

    #[test]
    fn test_vec2_conversions() {
        let size = Size::new(3.0, 4.0);
        let v = size.as_vec2();
        assert_eq!(Size::from(v), size);

        let point = Point { x: 1.0, y: 2.0 };
        assert_eq!(Point::from(point.as_vec2()), point);
    }
}
