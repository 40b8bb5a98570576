//! Conversion between a drag state and its normalized crop.
//!
//! Both directions work in unrotated space: the on-screen frame is turned
//! back about the viewport center so it lines up with the image's own
//! axes. At 0° and 180° that is the frame itself; at 90° and 270° it is
//! the same-centered rectangle with width and height exchanged.
//!
//! ```text
//! left   = (frame.left - trans_x) / frame.width
//! top    = (frame.top  - trans_y) / frame.height
//! right  = (trans_x + drawable.width  * scale - frame.right)  / frame.width
//! bottom = (trans_y + drawable.height * scale - frame.bottom) / frame.height
//! ```
//!
//! Arithmetic runs in f64 so that a state survives the round trip with
//! only the final f32 rounding.

use crate::geometry::{PointF, RectF, SizeF};
use crate::matrix::QuarterTurn;
use crate::model::{DragState, NormalizedCrop};

/// The on-screen `frame` expressed in the unrotated space of an image
/// shown at `angle` about `pivot`.
pub fn logical_rect(frame: RectF, angle: f32, pivot: PointF) -> RectF {
    QuarterTurn::from_degrees(angle)
        .inverse()
        .rotate_rect(frame, pivot)
}

/// Measure how far the image extends past each edge of `frame`.
///
/// Negative margins, where a frame edge lies outside the image, are
/// pinned to zero. Returns `None` for an empty frame or drawable.
pub fn to_normalized_crop(
    state: &DragState,
    frame: RectF,
    pivot: PointF,
    drawable: SizeF,
) -> Option<NormalizedCrop> {
    if frame.is_empty() || drawable.is_empty() {
        return None;
    }
    let real = logical_rect(frame, state.angle, pivot);
    let width = f64::from(real.width());
    let height = f64::from(real.height());
    let tx = f64::from(state.trans_x);
    let ty = f64::from(state.trans_y);
    let scale = f64::from(state.scale);

    let crop = NormalizedCrop::new(
        ((f64::from(real.left) - tx) / width) as f32,
        ((f64::from(real.top) - ty) / height) as f32,
        ((tx + f64::from(drawable.width) * scale - f64::from(real.right)) / width) as f32,
        ((ty + f64::from(drawable.height) * scale - f64::from(real.bottom)) / height) as f32,
    );
    Some(crop.clamped())
}

/// Rebuild the drag state that produces `crop` inside `frame` at `angle`.
///
/// Only the drawable width is needed: the scale follows from the
/// horizontal margins, and the bottom margin is implied by the image's
/// own aspect ratio. Returns `None` for an empty frame or drawable.
pub fn from_normalized_crop(
    crop: &NormalizedCrop,
    angle: f32,
    frame: RectF,
    pivot: PointF,
    drawable_width: f32,
) -> Option<DragState> {
    if frame.is_empty() || !(drawable_width > 0.0) {
        return None;
    }
    let real = logical_rect(frame, angle, pivot);
    let width = f64::from(real.width());
    let height = f64::from(real.height());
    let left = f64::from(crop.left);
    let right = f64::from(crop.right);

    let scale = ((left + right) * width + width) / f64::from(drawable_width);
    let trans_x = f64::from(real.left) - left * width;
    let trans_y = f64::from(real.top) - f64::from(crop.top) * height;

    Some(DragState::new(
        trans_x as f32,
        trans_y as f32,
        scale as f32,
        angle,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-4;

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() <= EPSILON * (1.0 + a.abs().max(b.abs()))
    }

    #[test]
    fn test_logical_rect_swaps_when_rotated() {
        let pivot = PointF::new(540.0, 960.0);
        let frame = RectF::centered(pivot, 1000.0, 500.0);
        assert_eq!(logical_rect(frame, 0.0, pivot), frame);
        assert_eq!(logical_rect(frame, 180.0, pivot), frame);
        assert_eq!(
            logical_rect(frame, 90.0, pivot),
            RectF::centered(pivot, 500.0, 1000.0)
        );
        assert_eq!(
            logical_rect(frame, -90.0, pivot),
            RectF::centered(pivot, 500.0, 1000.0)
        );
    }

    #[test]
    fn test_crop_of_exact_cover_is_empty() {
        let pivot = PointF::new(50.0, 50.0);
        let frame = RectF::new(0.0, 25.0, 100.0, 75.0);
        let state = DragState::new(0.0, 25.0, 0.5, 0.0);
        let crop = to_normalized_crop(&state, frame, pivot, SizeF::new(200.0, 100.0)).unwrap();
        assert!(crop.is_empty());
    }

    #[test]
    fn test_crop_margins() {
        let pivot = PointF::new(50.0, 50.0);
        let frame = RectF::new(0.0, 25.0, 100.0, 75.0);
        // Image 200x100 at scale 1: (-50, 0) to (150, 100)
        let state = DragState::new(-50.0, 0.0, 1.0, 0.0);
        let crop = to_normalized_crop(&state, frame, pivot, SizeF::new(200.0, 100.0)).unwrap();
        assert_eq!(crop, NormalizedCrop::new(0.5, 0.5, 0.5, 0.5));
    }

    #[test]
    fn test_crop_clamps_negative_margins() {
        let pivot = PointF::new(50.0, 50.0);
        let frame = RectF::new(0.0, 0.0, 100.0, 100.0);
        let state = DragState::new(10.0, 0.0, 1.0, 0.0);
        let crop = to_normalized_crop(&state, frame, pivot, SizeF::new(100.0, 100.0)).unwrap();
        assert_eq!(crop.left, 0.0);
        assert!((crop.right - 0.1).abs() < EPSILON);
    }

    #[test]
    fn test_rotated_crop_uses_image_orientation() {
        // Portrait frame on screen, image on its side
        let pivot = PointF::new(100.0, 100.0);
        let frame = RectF::centered(pivot, 50.0, 100.0);
        // In unrotated space the frame is 100 wide and 50 tall
        let state = DragState::new(0.0, 50.0, 1.0, 90.0);
        let crop = to_normalized_crop(&state, frame, pivot, SizeF::new(200.0, 100.0)).unwrap();
        assert!(approx(crop.left, 0.5));
        assert!(approx(crop.right, 0.5));
        assert!(approx(crop.top, 0.5));
        assert!(approx(crop.bottom, 0.5));
    }

    #[test]
    fn test_from_crop_inverts() {
        let pivot = PointF::new(50.0, 50.0);
        let frame = RectF::new(0.0, 25.0, 100.0, 75.0);
        let state = from_normalized_crop(
            &NormalizedCrop::new(0.5, 0.5, 0.5, 0.5),
            0.0,
            frame,
            pivot,
            200.0,
        )
        .unwrap();
        assert_eq!(state, DragState::new(-50.0, 0.0, 1.0, 0.0));
    }

    #[test]
    fn test_degenerate_geometry() {
        let state = DragState::new(0.0, 0.0, 1.0, 0.0);
        let pivot = PointF::default();
        assert!(to_normalized_crop(&state, RectF::default(), pivot, SizeF::new(1.0, 1.0)).is_none());
        assert!(to_normalized_crop(
            &state,
            RectF::new(0.0, 0.0, 1.0, 1.0),
            pivot,
            SizeF::default()
        )
        .is_none());
        assert!(from_normalized_crop(
            &NormalizedCrop::default(),
            0.0,
            RectF::new(0.0, 0.0, 1.0, 1.0),
            pivot,
            0.0
        )
        .is_none());
    }
}
