//! Apply a trimming result to the original pixels.

use crate::error::Result;
use crate::matrix::QuarterTurn;
use crate::model::TrimmingResult;
use image::DynamicImage;

/// Crop `image` to `result.crop_rect`, then rotate it clockwise by
/// `result.angle` (snapped to a quarter turn).
///
/// The rectangle must lie inside the image.
///
/// # Example
/// ```ignore
/// let result = engine.get_result(image.width(), image.height())?;
/// let trimmed = apply_trimming(&image, &result)?;
/// ```
pub fn apply_trimming(image: &DynamicImage, result: &TrimmingResult) -> Result<DynamicImage> {
    result.validate(image.width(), image.height())?;
    let rect = result.crop_rect;
    // Validated above: all edges are non-negative and ordered
    let cropped = image.crop_imm(
        rect.left as u32,
        rect.top as u32,
        rect.width() as u32,
        rect.height() as u32,
    );

    let turn = QuarterTurn::from_degrees(result.angle);
    tracing::debug!(
        rect = ?rect,
        quarters = turn.quarters(),
        "applying trimming"
    );
    Ok(match turn {
        QuarterTurn::CLOCKWISE => cropped.rotate90(),
        QuarterTurn::HALF => cropped.rotate180(),
        QuarterTurn::ANTICLOCKWISE => cropped.rotate270(),
        _ => cropped,
    })
}
