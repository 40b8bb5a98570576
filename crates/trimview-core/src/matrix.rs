//! Quarter-turn rotations and the affine matrix handed to renderers.
//!
//! Angles are in degrees, positive = clockwise on screen (Y grows
//! downwards). Only multiples of 90° occur, so rotations use exact
//! integer cosines and sines rather than trigonometry: a rotated frame
//! must land on the same float edges every time.
//!
//! For rotation by θ about pivot `p`:
//! ```text
//! x' = p.x + (x - p.x) * cos θ - (y - p.y) * sin θ
//! y' = p.y + (x - p.x) * sin θ + (y - p.y) * cos θ
//! ```

use crate::geometry::{PointF, RectF};
use serde::{Deserialize, Serialize};

/// A rotation by a whole number of clockwise quarter turns (0-3).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct QuarterTurn(u8);

impl QuarterTurn {
    pub const IDENTITY: Self = Self(0);
    pub const CLOCKWISE: Self = Self(1);
    pub const HALF: Self = Self(2);
    pub const ANTICLOCKWISE: Self = Self(3);

    /// Snap an angle in degrees to the nearest quarter turn.
    ///
    /// Negative angles map to their clockwise equivalent, so -90° and 270°
    /// are the same turn.
    pub fn from_degrees(angle: f32) -> Self {
        if !angle.is_finite() {
            return Self::IDENTITY;
        }
        let quarters = (angle / 90.0).round() as i64;
        Self(quarters.rem_euclid(4) as u8)
    }

    /// Number of clockwise quarter turns (0-3).
    pub fn quarters(self) -> u8 {
        self.0
    }

    /// Equivalent clockwise angle in `[0, 360)`.
    pub fn degrees(self) -> f32 {
        f32::from(self.0) * 90.0
    }

    pub fn inverse(self) -> Self {
        Self((4 - self.0) % 4)
    }

    /// True for 90° and 270°, where width and height trade places.
    pub fn swaps_axes(self) -> bool {
        self.0 % 2 == 1
    }

    fn cos_sin(self) -> (f32, f32) {
        match self.0 {
            1 => (0.0, 1.0),
            2 => (-1.0, 0.0),
            3 => (0.0, -1.0),
            _ => (1.0, 0.0),
        }
    }

    /// Rotate a displacement vector.
    pub fn rotate_vector(self, dx: f32, dy: f32) -> (f32, f32) {
        let (cos, sin) = self.cos_sin();
        (cos * dx - sin * dy, sin * dx + cos * dy)
    }

    /// Rotate a point about `pivot`.
    pub fn rotate_point(self, point: PointF, pivot: PointF) -> PointF {
        let (dx, dy) = self.rotate_vector(point.x - pivot.x, point.y - pivot.y);
        PointF::new(pivot.x + dx, pivot.y + dy)
    }

    /// Rotate a rectangle about `pivot`. Quarter turns keep rectangles
    /// axis-aligned, so two opposite corners are enough.
    pub fn rotate_rect(self, rect: RectF, pivot: PointF) -> RectF {
        if self.0 == 0 {
            return rect;
        }
        let a = self.rotate_point(PointF::new(rect.left, rect.top), pivot);
        let b = self.rotate_point(PointF::new(rect.right, rect.bottom), pivot);
        RectF::from_points(a, b)
    }
}

/// 2D affine transform.
///
/// ```text
/// x' = a * x + b * y + tx
/// y' = c * x + d * y + ty
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Affine {
    pub a: f32,
    pub b: f32,
    pub c: f32,
    pub d: f32,
    pub tx: f32,
    pub ty: f32,
}

impl Default for Affine {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Affine {
    pub const IDENTITY: Self = Self {
        a: 1.0,
        b: 0.0,
        c: 0.0,
        d: 1.0,
        tx: 0.0,
        ty: 0.0,
    };

    pub fn scale(scale: f32) -> Self {
        Self {
            a: scale,
            d: scale,
            ..Self::IDENTITY
        }
    }

    pub fn translate(tx: f32, ty: f32) -> Self {
        Self {
            tx,
            ty,
            ..Self::IDENTITY
        }
    }

    /// Rotation by `turn` about `pivot`.
    pub fn rotate_about(turn: QuarterTurn, pivot: PointF) -> Self {
        let (cos, sin) = turn.cos_sin();
        Self {
            a: cos,
            b: -sin,
            c: sin,
            d: cos,
            tx: pivot.x - (cos * pivot.x - sin * pivot.y),
            ty: pivot.y - (sin * pivot.x + cos * pivot.y),
        }
    }

    /// Compose: apply `self` first, then `next`.
    pub fn then(&self, next: &Affine) -> Affine {
        Affine {
            a: next.a * self.a + next.b * self.c,
            b: next.a * self.b + next.b * self.d,
            c: next.c * self.a + next.d * self.c,
            d: next.c * self.b + next.d * self.d,
            tx: next.a * self.tx + next.b * self.ty + next.tx,
            ty: next.c * self.tx + next.d * self.ty + next.ty,
        }
    }

    pub fn map_point(&self, point: PointF) -> PointF {
        PointF::new(
            self.a * point.x + self.b * point.y + self.tx,
            self.c * point.x + self.d * point.y + self.ty,
        )
    }

    /// Bounding box of the mapped rectangle.
    pub fn map_rect(&self, rect: RectF) -> RectF {
        let [p0, p1, p2, p3] = rect.corners().map(|p| self.map_point(p));
        RectF::new(
            p0.x.min(p1.x).min(p2.x).min(p3.x),
            p0.y.min(p1.y).min(p2.y).min(p3.y),
            p0.x.max(p1.x).max(p2.x).max(p3.x),
            p0.y.max(p1.y).max(p2.y).max(p3.y),
        )
    }

    /// Inverse transform, or `None` when the matrix is singular.
    pub fn invert(&self) -> Option<Affine> {
        let det = self.a * self.d - self.b * self.c;
        if det.abs() < f32::EPSILON || !det.is_finite() {
            return None;
        }
        let a = self.d / det;
        let b = -self.b / det;
        let c = -self.c / det;
        let d = self.a / det;
        Some(Affine {
            a,
            b,
            c,
            d,
            tx: -(a * self.tx + b * self.ty),
            ty: -(c * self.tx + d * self.ty),
        })
    }

    /// Row-major 3x3 values in the order
    /// `[scale_x, skew_x, trans_x, skew_y, scale_y, trans_y, 0, 0, 1]`.
    pub fn to_values(&self) -> [f32; 9] {
        [
            self.a, self.b, self.tx, self.c, self.d, self.ty, 0.0, 0.0, 1.0,
        ]
    }
}
