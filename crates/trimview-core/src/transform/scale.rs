//! Standard scale and zoom limits.

use crate::config::DragMode;
use crate::geometry::{RectF, SizeF};

/// Smallest uniform scale at which the drawable covers `frame`.
///
/// When `rotated`, the image is shown on its side, so its width is
/// compared against the frame height and vice versa. Degenerate input
/// yields 1.0.
pub fn compute_standard_scale(drawable: SizeF, frame: RectF, rotated: bool) -> f32 {
    if drawable.is_empty() || frame.is_empty() {
        return 1.0;
    }
    let effective = if rotated { drawable.swapped() } else { drawable };
    let scale = (frame.width() / effective.width).max(frame.height() / effective.height);
    if scale.is_finite() && scale > 0.0 {
        scale
    } else {
        1.0
    }
}

/// Zoom bounds for the current layout.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaleLimits {
    /// Scale at which the image exactly covers the frame
    pub standard: f32,
    /// Largest allowed scale
    pub max: f32,
}

impl Default for ScaleLimits {
    fn default() -> Self {
        Self::new(1.0, 1.0)
    }
}

impl ScaleLimits {
    pub fn new(standard: f32, max_scale_as: f32) -> Self {
        Self {
            standard,
            max: standard * max_scale_as.max(1.0),
        }
    }

    /// Lowest scale a zoom may reach under `mode`.
    ///
    /// Over-drag lets the image shrink below the frame, but only as far as
    /// the zoom range extends above it.
    pub fn min(&self, mode: DragMode) -> f32 {
        match mode {
            DragMode::OverDrag => self.standard * self.standard / self.max,
            _ => self.standard,
        }
    }

    /// Pin `scale` into `[min(mode), max]`.
    pub fn clamp(&self, scale: f32, mode: DragMode) -> f32 {
        if scale > self.max {
            self.max
        } else if scale < self.min(mode) {
            self.min(mode)
        } else {
            scale
        }
    }
}
