//! Plain geometry value types in view-local coordinates.
//!
//! # Coordinate System
//!
//! - Origin is the top-left corner of the view
//! - X grows to the right, Y grows downwards
//! - Rectangles are stored as edges (left, top, right, bottom)

use serde::{Deserialize, Serialize};

/// A point in view coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PointF {
    pub x: f32,
    pub y: f32,
}

impl PointF {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Return this point moved by (dx, dy).
    pub fn offset(self, dx: f32, dy: f32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

/// A width/height pair, used for the viewport and the image drawable.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SizeF {
    pub width: f32,
    pub height: f32,
}

impl SizeF {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// True when either dimension is zero, negative or not a number.
    pub fn is_empty(&self) -> bool {
        !(self.width > 0.0 && self.height > 0.0)
    }

    /// Center point of a box of this size anchored at the origin.
    pub fn center(&self) -> PointF {
        PointF::new(self.width / 2.0, self.height / 2.0)
    }

    /// Width and height exchanged.
    pub fn swapped(&self) -> Self {
        Self::new(self.height, self.width)
    }
}

/// Axis-aligned rectangle with float edges.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RectF {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl RectF {
    pub const fn new(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Rectangle covering a box of `size` anchored at the origin.
    pub fn from_size(size: SizeF) -> Self {
        Self::new(0.0, 0.0, size.width, size.height)
    }

    /// Rectangle of the given dimensions centered on `center`.
    pub fn centered(center: PointF, width: f32, height: f32) -> Self {
        Self::new(
            center.x - width / 2.0,
            center.y - height / 2.0,
            center.x + width / 2.0,
            center.y + height / 2.0,
        )
    }

    /// Smallest rectangle containing both points.
    pub fn from_points(a: PointF, b: PointF) -> Self {
        Self::new(a.x.min(b.x), a.y.min(b.y), a.x.max(b.x), a.y.max(b.y))
    }

    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    pub fn height(&self) -> f32 {
        self.bottom - self.top
    }

    pub fn size(&self) -> SizeF {
        SizeF::new(self.width(), self.height())
    }

    pub fn center(&self) -> PointF {
        PointF::new(
            (self.left + self.right) / 2.0,
            (self.top + self.bottom) / 2.0,
        )
    }

    /// True when the rectangle has no area.
    pub fn is_empty(&self) -> bool {
        !(self.right > self.left && self.bottom > self.top)
    }

    /// Half-open containment test: left and top edges are inside,
    /// right and bottom edges are outside.
    pub fn contains(&self, point: PointF) -> bool {
        !self.is_empty()
            && point.x >= self.left
            && point.x < self.right
            && point.y >= self.top
            && point.y < self.bottom
    }

    /// Return this rectangle moved by (dx, dy).
    pub fn offset(&self, dx: f32, dy: f32) -> Self {
        Self::new(
            self.left + dx,
            self.top + dy,
            self.right + dx,
            self.bottom + dy,
        )
    }

    /// Return this rectangle shrunk by `amount` on every side.
    pub fn inset(&self, amount: f32) -> Self {
        Self::new(
            self.left + amount,
            self.top + amount,
            self.right - amount,
            self.bottom - amount,
        )
    }

    /// Corners in clockwise order starting at the top-left.
    pub fn corners(&self) -> [PointF; 4] {
        [
            PointF::new(self.left, self.top),
            PointF::new(self.right, self.top),
            PointF::new(self.right, self.bottom),
            PointF::new(self.left, self.bottom),
        ]
    }
}

/// Integer rectangle in original image pixel coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IntRect {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl IntRect {
    pub const fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    pub fn width(&self) -> i32 {
        self.right - self.left
    }

    pub fn height(&self) -> i32 {
        self.bottom - self.top
    }

    pub fn is_empty(&self) -> bool {
        self.right <= self.left || self.bottom <= self.top
    }

    /// True when the rectangle lies inside a `width`x`height` image.
    pub fn fits_within(&self, width: u32, height: u32) -> bool {
        !self.is_empty()
            && self.left >= 0
            && self.top >= 0
            && i64::from(self.right) <= i64::from(width)
            && i64::from(self.bottom) <= i64::from(height)
    }
}
