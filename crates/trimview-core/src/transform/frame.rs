//! Trimming frame layout.

use crate::geometry::{PointF, RectF, SizeF};
use serde::{Deserialize, Serialize};

/// The crop boundary as drawn on screen.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrimFrame {
    /// Frame edges in view coordinates
    pub rect: RectF,
    /// True when the image is shown at 90° or 270°, so the frame's
    /// on-screen aspect is the reciprocal of the configured ratio.
    pub rotated: bool,
}

impl TrimFrame {
    pub fn new(rect: RectF, rotated: bool) -> Self {
        Self { rect, rotated }
    }

    /// Lay out the largest frame with the configured aspect ratio that
    /// fits in `viewport` with at least `padding` on every side.
    ///
    /// `ratio` is width / height in image orientation. The frame fills
    /// the available width when that keeps it inside the available
    /// height, otherwise it fills the height. The result is centered in
    /// the viewport.
    ///
    /// Returns `None` when the viewport leaves no room for a frame.
    pub fn layout(viewport: SizeF, ratio: f32, padding: f32, rotated: bool) -> Option<Self> {
        if viewport.is_empty() || !(ratio.is_finite() && ratio > 0.0) {
            return None;
        }
        let aspect = if rotated { 1.0 / ratio } else { ratio };
        let available = SizeF::new(
            viewport.width - 2.0 * padding,
            viewport.height - 2.0 * padding,
        );
        if available.is_empty() {
            return None;
        }

        let (width, height) = if available.width / aspect <= available.height {
            (available.width, available.width / aspect)
        } else {
            (available.height * aspect, available.height)
        };

        Some(Self::new(
            RectF::centered(viewport.center(), width, height),
            rotated,
        ))
    }

    pub fn width(&self) -> f32 {
        self.rect.width()
    }

    pub fn height(&self) -> f32 {
        self.rect.height()
    }

    pub fn center(&self) -> PointF {
        self.rect.center()
    }

    /// Aspect ratio in image orientation.
    pub fn image_ratio(&self) -> f32 {
        image_ratio(self.rect, self.rotated)
    }
}

/// Width / height of `rect` measured in image orientation.
pub fn image_ratio(rect: RectF, rotated: bool) -> f32 {
    if rotated {
        rect.height() / rect.width()
    } else {
        rect.width() / rect.height()
    }
}
