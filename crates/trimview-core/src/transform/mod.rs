//! Transform engine: frame layout, pan, zoom and rotation of the image
//! under the trimming frame.
//!
//! Every operation is a pure function from a [`DragState`] to a new one.
//! Gesture deltas arrive in screen space; they are counter-rotated into
//! unrotated image space, applied there, and the result is drawn rotated
//! again about the viewport center. A drag to the right therefore moves
//! the image to the right on screen whatever the current angle.
//!
//! # Coordinate System
//!
//! - View-local coordinates, origin top-left, Y down
//! - Angles in degrees, positive = clockwise, multiples of 90 only
//! - The rotation pivot is the viewport center

mod crop;
mod frame;
mod gesture;
mod rotation;
mod scale;

pub use crop::{from_normalized_crop, logical_rect, to_normalized_crop};
pub use frame::{image_ratio, TrimFrame};
pub use gesture::{apply_pan, apply_zoom, correct_translation, initialize_transform, settle};
pub use rotation::{is_rotated_angle, normalize_angle, rotate_transition, turn, wrap_angle, Direction};
pub use scale::{compute_standard_scale, ScaleLimits};

use crate::geometry::{PointF, RectF, SizeF};
use crate::model::DragState;

/// Everything a transform needs to know about the current layout.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stage {
    pub viewport: SizeF,
    pub drawable: SizeF,
    pub frame: TrimFrame,
}

impl Stage {
    pub fn new(viewport: SizeF, drawable: SizeF, frame: TrimFrame) -> Self {
        Self {
            viewport,
            drawable,
            frame,
        }
    }

    /// Rotation pivot: the viewport center.
    pub fn pivot(&self) -> PointF {
        self.viewport.center()
    }

    /// The frame in the unrotated space of an image shown at `angle`.
    pub fn logical_frame(&self, angle: f32) -> RectF {
        logical_rect(self.frame.rect, angle, self.pivot())
    }

    pub fn standard_scale(&self) -> f32 {
        compute_standard_scale(self.drawable, self.frame.rect, self.frame.rotated)
    }

    pub fn limits(&self, max_scale_as: f32) -> ScaleLimits {
        ScaleLimits::new(self.standard_scale(), max_scale_as)
    }

    /// On-screen bounds of the image placed by `state`.
    pub fn image_extent(&self, state: &DragState) -> RectF {
        state.screen_bounds(self.drawable, self.pivot())
    }
}
