//! Pan and zoom.

use super::{ScaleLimits, Stage};
use crate::config::DragMode;
use crate::geometry::PointF;
use crate::matrix::QuarterTurn;
use crate::model::DragState;

/// Scales within this fraction of the standard scale count as covering.
/// A state rebuilt from a normalized crop can land a rounding step below.
const SCALE_TOLERANCE: f32 = 1e-4;

/// Place the image at the standard scale, centered on the frame.
pub fn initialize_transform(stage: &Stage, angle: f32) -> DragState {
    let scale = stage.standard_scale();
    let center = QuarterTurn::from_degrees(angle)
        .inverse()
        .rotate_point(stage.frame.center(), stage.pivot());
    DragState::new(
        center.x - stage.drawable.width * scale / 2.0,
        center.y - stage.drawable.height * scale / 2.0,
        scale,
        angle,
    )
}

/// Move the image by a screen-space delta.
pub fn apply_pan(state: &DragState, dx: f32, dy: f32) -> DragState {
    state.translated_on_screen(dx, dy)
}

/// Scale the image by `factor` about the screen-space `focus`.
///
/// The result is pinned to `limits.max`, and under [`DragMode::Default`]
/// to no less than the standard scale, after which the translation is
/// pulled back to cover the frame. A non-positive or non-finite factor
/// leaves the state unchanged.
pub fn apply_zoom(
    stage: &Stage,
    state: &DragState,
    factor: f32,
    focus: PointF,
    limits: &ScaleLimits,
    mode: DragMode,
) -> DragState {
    if !(factor.is_finite() && factor > 0.0) || !(state.scale > 0.0) {
        return *state;
    }
    let target = limits.clamp(state.scale * factor, mode);
    let zoomed = zoom_to(stage, state, target, focus);
    if mode.keeps_covered() {
        correct_translation(stage, &zoomed)
    } else {
        zoomed
    }
}

/// Rescale to exactly `target`, keeping `focus` fixed on screen.
fn zoom_to(stage: &Stage, state: &DragState, target: f32, focus: PointF) -> DragState {
    let ratio = target / state.scale;
    let q = state.turn().inverse().rotate_point(focus, stage.pivot());
    DragState {
        trans_x: q.x + (state.trans_x - q.x) * ratio,
        trans_y: q.y + (state.trans_y - q.y) * ratio,
        scale: target,
        angle: state.angle,
    }
}

/// Nudge the translation by the smallest amount that makes the image
/// cover the frame again.
///
/// Per axis: an image narrower than the frame is centered on it,
/// otherwise any frame edge left uncovered is pulled back onto the image
/// edge. A covering state is returned unchanged, and applying this twice
/// gives the same result as applying it once.
pub fn correct_translation(stage: &Stage, state: &DragState) -> DragState {
    let frame = stage.logical_frame(state.angle);
    let span_x = stage.drawable.width * state.scale;
    let span_y = stage.drawable.height * state.scale;
    DragState {
        trans_x: fit_axis(state.trans_x, span_x, frame.left, frame.right),
        trans_y: fit_axis(state.trans_y, span_y, frame.top, frame.bottom),
        ..*state
    }
}

fn fit_axis(start: f32, span: f32, lo: f32, hi: f32) -> f32 {
    if span < hi - lo {
        (lo + hi) / 2.0 - span / 2.0
    } else {
        start.min(lo).max(hi - span)
    }
}

/// Snap back at the end of a gesture.
///
/// Only [`DragMode::Default`] snaps: an image zoomed out below the frame
/// returns to the initial placement, one zoomed past the limit shrinks
/// about the frame center, and any uncovered edge is pulled back.
pub fn settle(stage: &Stage, state: &DragState, limits: &ScaleLimits, mode: DragMode) -> DragState {
    if !mode.keeps_covered() {
        return *state;
    }
    if state.scale < limits.standard * (1.0 - SCALE_TOLERANCE) {
        tracing::trace!(scale = state.scale, "zoomed below standard, resetting");
        return initialize_transform(stage, state.angle);
    }
    let state = if state.scale > limits.max {
        zoom_to(stage, state, limits.max, stage.frame.center())
    } else {
        *state
    };
    correct_translation(stage, &state)
}
