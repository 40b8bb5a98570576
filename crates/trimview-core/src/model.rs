//! State records shared by the transform and resize engines.

use crate::error::{Result, TrimError};
use crate::geometry::{IntRect, PointF, RectF, SizeF};
use crate::matrix::{Affine, QuarterTurn};
use serde::{Deserialize, Serialize};

/// Placement of the image on screen.
///
/// The image is first scaled by `scale` and translated by
/// (`trans_x`, `trans_y`), then rotated by `angle` degrees about the
/// viewport center. Translation and scale therefore live in "unrotated"
/// space, which is where all pan/zoom arithmetic happens.
///
/// An engine with no placement yet holds `Option::<DragState>::None`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DragState {
    pub trans_x: f32,
    pub trans_y: f32,
    pub scale: f32,
    /// Multiple of 90 in (-360, 360)
    pub angle: f32,
}

impl DragState {
    pub fn new(trans_x: f32, trans_y: f32, scale: f32, angle: f32) -> Self {
        Self {
            trans_x,
            trans_y,
            scale,
            angle,
        }
    }

    pub fn turn(&self) -> QuarterTurn {
        QuarterTurn::from_degrees(self.angle)
    }

    /// True when the image is shown at 90° or 270°.
    pub fn is_rotated(&self) -> bool {
        self.turn().swaps_axes()
    }

    /// Image bounds in unrotated space.
    pub fn image_bounds(&self, drawable: SizeF) -> RectF {
        RectF::new(
            self.trans_x,
            self.trans_y,
            self.trans_x + drawable.width * self.scale,
            self.trans_y + drawable.height * self.scale,
        )
    }

    /// Image bounds as drawn on screen, after rotation about `pivot`.
    pub fn screen_bounds(&self, drawable: SizeF, pivot: PointF) -> RectF {
        self.turn().rotate_rect(self.image_bounds(drawable), pivot)
    }

    /// Full drawable-to-view matrix.
    pub fn matrix(&self, pivot: PointF) -> Affine {
        Affine::scale(self.scale)
            .then(&Affine::translate(self.trans_x, self.trans_y))
            .then(&Affine::rotate_about(self.turn(), pivot))
    }

    /// Move by a displacement given in unrotated space.
    pub fn translated(&self, dx: f32, dy: f32) -> Self {
        Self {
            trans_x: self.trans_x + dx,
            trans_y: self.trans_y + dy,
            ..*self
        }
    }

    /// Move by a displacement given in screen space.
    pub fn translated_on_screen(&self, dx: f32, dy: f32) -> Self {
        let (ux, uy) = self.turn().inverse().rotate_vector(dx, dy);
        self.translated(ux, uy)
    }
}

/// How far the image extends beyond each edge of the crop rectangle.
///
/// Left/right are fractions of the crop width and top/bottom fractions
/// of the crop height, measured in image orientation (before rotation).
/// The values are independent of screen size, so they survive layout
/// changes and map directly onto the original image's pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct NormalizedCrop {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl NormalizedCrop {
    pub fn new(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// True when the crop covers the whole image.
    pub fn is_empty(&self) -> bool {
        self.left == 0.0 && self.top == 0.0 && self.right == 0.0 && self.bottom == 0.0
    }

    /// Negative margins (frame edge outside the image) pinned to zero.
    pub fn clamped(&self) -> Self {
        Self {
            left: self.left.max(0.0),
            top: self.top.max(0.0),
            right: self.right.max(0.0),
            bottom: self.bottom.max(0.0),
        }
    }
}

/// A normalized crop together with the angle it was captured at.
///
/// This is what survives a relayout: the engine converts it back into a
/// [`DragState`] once the frame for the new layout is known.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TrimRecord {
    pub crop: NormalizedCrop,
    pub angle: f32,
}

impl TrimRecord {
    pub fn new(crop: NormalizedCrop, angle: f32) -> Self {
        Self { crop, angle }
    }

    pub fn is_rotated(&self) -> bool {
        QuarterTurn::from_degrees(self.angle).swaps_axes()
    }
}

/// Before/after snapshot of a committed rotation or frame resize.
///
/// The engine state already holds `to_frame`/`to_state` when this is
/// reported; a host that animates interpolates between the two ends
/// itself.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transition {
    pub from_frame: RectF,
    pub to_frame: RectF,
    pub from_state: DragState,
    pub to_state: DragState,
}

/// Final crop against the original image.
///
/// Serializes as exactly two fields: the pixel rectangle and the angle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrimmingResult {
    pub crop_rect: IntRect,
    pub angle: f32,
}

impl TrimmingResult {
    pub fn new(crop_rect: IntRect, angle: f32) -> Self {
        Self { crop_rect, angle }
    }

    /// Whole-image result with no rotation.
    pub fn full(width: u32, height: u32) -> Self {
        Self::new(
            IntRect::new(0, 0, clamp_dim(width), clamp_dim(height)),
            0.0,
        )
    }

    /// Check that the rectangle lies inside a `width`x`height` image.
    pub fn validate(&self, width: u32, height: u32) -> Result<()> {
        check_image_size(width, height)?;
        if !self.crop_rect.fits_within(width, height) {
            let r = self.crop_rect;
            return Err(TrimError::InvalidCropRect {
                left: r.left,
                top: r.top,
                right: r.right,
                bottom: r.bottom,
                width,
                height,
            });
        }
        Ok(())
    }

    /// Convert a normalized crop into pixel coordinates of a
    /// `width`x`height` image.
    ///
    /// Coordinates are rounded to the nearest pixel and clamped into the
    /// image, and the rectangle always keeps at least one pixel per axis.
    pub fn from_normalized(
        crop: &NormalizedCrop,
        angle: f32,
        width: u32,
        height: u32,
    ) -> Result<Self> {
        check_image_size(width, height)?;
        let crop = crop.clamped();
        let (left, right) = axis_to_pixels(crop.left, crop.right, width);
        let (top, bottom) = axis_to_pixels(crop.top, crop.bottom, height);
        Ok(Self::new(IntRect::new(left, top, right, bottom), angle))
    }

    /// Express this result as margins relative to the crop rectangle.
    pub fn to_normalized(&self, width: u32, height: u32) -> Result<NormalizedCrop> {
        self.validate(width, height)?;
        let r = self.crop_rect;
        let w = r.width() as f32;
        let h = r.height() as f32;
        Ok(NormalizedCrop::new(
            r.left as f32 / w,
            r.top as f32 / h,
            (width as f32 - r.right as f32) / w,
            (height as f32 - r.bottom as f32) / h,
        ))
    }

    /// Aspect ratio (width / height) of the crop rectangle.
    pub fn aspect_ratio(&self) -> f32 {
        let h = self.crop_rect.height();
        if h <= 0 {
            return 1.0;
        }
        self.crop_rect.width() as f32 / h as f32
    }
}

fn clamp_dim(value: u32) -> i32 {
    i32::try_from(value).unwrap_or(i32::MAX)
}

fn check_image_size(width: u32, height: u32) -> Result<()> {
    if width == 0 || height == 0 || width > i32::MAX as u32 || height > i32::MAX as u32 {
        return Err(TrimError::InvalidImageSize { width, height });
    }
    Ok(())
}

/// Map a pair of margins onto `[0, size]` pixel edges.
fn axis_to_pixels(lead: f32, trail: f32, size: u32) -> (i32, i32) {
    let size_f = size as f64;
    let span = size_f / (1.0 + f64::from(lead) + f64::from(trail));
    let max = clamp_dim(size);
    let start = ((f64::from(lead) * span).round() as i32).clamp(0, max - 1);
    let end = ((size_f - f64::from(trail) * span).round() as i32).clamp(start + 1, max);
    (start, end)
}
