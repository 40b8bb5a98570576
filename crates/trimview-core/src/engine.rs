//! The trimming engine: one owner for configuration, layout, image
//! placement and the frame.
//!
//! The host forwards layout passes, pointer input and commands, then reads
//! back the frame rectangle and image matrix to draw. Everything runs
//! synchronously on the caller's thread. Input that arrives before an
//! image or a usable layout is ignored, and the crop of a pending result
//! waits until both are known.

use crate::config::{DragMode, TrimConfig};
use crate::error::Result;
use crate::geometry::{PointF, RectF, SizeF};
use crate::matrix::Affine;
use crate::model::{DragState, NormalizedCrop, TrimRecord, TrimmingResult, Transition};
use crate::resize::{begin_resize, classify_hit, commit_resize, Corner, ResizeSession};
use crate::transform::{
    apply_pan, apply_zoom, correct_translation, from_normalized_crop, initialize_transform,
    is_rotated_angle, normalize_angle, rotate_transition, settle, to_normalized_crop, turn,
    Direction, ScaleLimits, Stage, TrimFrame,
};
use tracing::{debug, trace};

/// What a pointer-down landed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerTarget {
    /// A frame corner; following moves go to [`TrimmingEngine::drag_frame`].
    Frame(Corner),
    /// Anywhere else; following moves pan the image.
    Image,
}

/// How much work [`TrimmingEngine::apply_config`] had to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recompute {
    /// Only paint parameters changed
    Unchanged,
    /// Zoom limits or drag policy changed; the frame stayed put
    Limits,
    /// The frame was laid out again
    Relayout,
}

/// Image trimming engine.
///
/// # Example
/// ```ignore
/// let mut engine = TrimmingEngine::new(TrimConfig::default())?;
/// engine.set_image(4000.0, 3000.0);
/// engine.layout(1080.0, 1920.0);
/// engine.pan(-40.0, 0.0);
/// engine.zoom(1.5, 540.0, 960.0);
/// engine.end_gesture();
/// let result = engine.get_result(4000, 3000)?;
/// ```
#[derive(Debug, Clone)]
pub struct TrimmingEngine {
    config: TrimConfig,
    viewport: Option<SizeF>,
    drawable: Option<SizeF>,
    frame: Option<TrimFrame>,
    state: Option<DragState>,
    /// Crop waiting for the next complete layout
    pending: Option<TrimRecord>,
    /// Current angle, also while no state exists
    angle: f32,
    limits: ScaleLimits,
    resize: Option<ResizeSession>,
    last_transition: Option<Transition>,
}

impl TrimmingEngine {
    /// Create an engine with a validated configuration.
    pub fn new(config: TrimConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::with_config(config))
    }

    fn with_config(config: TrimConfig) -> Self {
        Self {
            config,
            viewport: None,
            drawable: None,
            frame: None,
            state: None,
            pending: None,
            angle: 0.0,
            limits: ScaleLimits::default(),
            resize: None,
            last_transition: None,
        }
    }

    pub fn config(&self) -> &TrimConfig {
        &self.config
    }

    /// Show a new image of the given intrinsic size.
    ///
    /// Any placement of the previous image is dropped; a result restored
    /// with [`set_result`](Self::set_result) is kept and applied to it.
    pub fn set_image(&mut self, width: f32, height: f32) {
        let size = SizeF::new(width, height);
        self.drawable = (!size.is_empty()).then_some(size);
        self.state = None;
        self.resize = None;
        self.last_transition = None;
        self.angle = self.pending.map_or(0.0, |record| record.angle);
        debug!(width, height, "image set");
        self.refresh();
    }

    pub fn clear_image(&mut self) {
        self.drawable = None;
        self.state = None;
        self.resize = None;
        self.last_transition = None;
    }

    pub fn has_image(&self) -> bool {
        self.drawable.is_some()
    }

    /// Report the view size. Returns `true` when the layout changed.
    ///
    /// The visible crop survives a size change: it is captured against
    /// the old frame and rebuilt inside the new one.
    pub fn layout(&mut self, width: f32, height: f32) -> bool {
        let viewport = SizeF::new(width, height);
        if self.viewport == Some(viewport) && self.frame.is_some() {
            return false;
        }
        self.capture_pending();
        self.viewport = Some(viewport);
        self.resize = None;
        self.refresh();
        debug!(width, height, frame = ?self.frame.map(|f| f.rect), "layout");
        true
    }

    /// Pan the image by a screen-space delta.
    pub fn pan(&mut self, dx: f32, dy: f32) {
        if !self.config.drag_mode.allows_gestures() || self.resize.is_some() {
            return;
        }
        let (Some(stage), Some(state)) = (self.stage(), self.state) else {
            return;
        };
        let mut next = apply_pan(&state, dx, dy);
        if self.config.drag_mode.keeps_covered() {
            next = correct_translation(&stage, &next);
        }
        trace!(dx, dy, trans_x = next.trans_x, trans_y = next.trans_y, "pan");
        self.state = Some(next);
    }

    /// Scale the image by `factor` about the screen point (`focus_x`, `focus_y`).
    pub fn zoom(&mut self, factor: f32, focus_x: f32, focus_y: f32) {
        if !self.config.drag_mode.allows_gestures() || self.resize.is_some() {
            return;
        }
        let (Some(stage), Some(state)) = (self.stage(), self.state) else {
            return;
        };
        let next = apply_zoom(
            &stage,
            &state,
            factor,
            PointF::new(focus_x, focus_y),
            &self.limits,
            self.config.drag_mode,
        );
        trace!(factor, scale = next.scale, "zoom");
        self.state = Some(next);
    }

    /// Pointer-up after a pan or zoom.
    pub fn end_gesture(&mut self) {
        let (Some(stage), Some(state)) = (self.stage(), self.state) else {
            return;
        };
        self.state = Some(settle(&stage, &state, &self.limits, self.config.drag_mode));
    }

    /// Route a pointer-down: a corner starts a frame resize when frame
    /// dragging is enabled, anything else drags the image.
    pub fn pointer_down(&mut self, x: f32, y: f32) -> PointerTarget {
        self.resize = None;
        if !self.config.frame_drag_enabled {
            return PointerTarget::Image;
        }
        let (Some(stage), Some(state)) = (self.stage(), self.state) else {
            return PointerTarget::Image;
        };
        match classify_hit(
            PointF::new(x, y),
            stage.frame.rect,
            self.config.corner_touch_size,
        ) {
            Some(corner) => {
                self.resize = Some(begin_resize(
                    corner,
                    &stage,
                    &state,
                    &self.limits,
                    &self.config,
                ));
                PointerTarget::Frame(corner)
            }
            None => PointerTarget::Image,
        }
    }

    /// Move the dragged frame corner. Returns the frame as it should be
    /// drawn, or `None` when no resize is in progress.
    pub fn drag_frame(&mut self, dx: f32, dy: f32) -> Option<RectF> {
        self.resize.as_mut().map(|session| session.update(dx, dy))
    }

    /// Pointer-up after a frame resize.
    ///
    /// The dragged rectangle becomes the new crop and its shape the new
    /// frame ratio; the frame is laid out again at full size and the image
    /// placed to show the same region.
    pub fn release_frame(&mut self) -> Option<Transition> {
        let session = self.resize.take()?;
        let viewport = self.viewport?;
        let drawable = self.drawable?;
        let (crop, ratio) = commit_resize(&session)?;

        let frame = TrimFrame::layout(
            viewport,
            ratio,
            self.config.min_padding,
            is_rotated_angle(self.angle),
        )?;
        let state = from_normalized_crop(
            &crop,
            self.angle,
            frame.rect,
            viewport.center(),
            drawable.width,
        )?;

        self.config.ratio = ratio;
        self.frame = Some(frame);
        self.state = Some(state);
        self.limits = Stage::new(viewport, drawable, frame).limits(self.config.max_scale_as);

        let transition = Transition {
            from_frame: session.rect(),
            to_frame: frame.rect,
            from_state: session.state(),
            to_state: state,
        };
        debug!(ratio, frame = ?frame.rect, scale = state.scale, "frame resized");
        self.last_transition = Some(transition);
        Some(transition)
    }

    pub fn turn_clockwise(&mut self) -> f32 {
        self.rotate(Direction::Clockwise)
    }

    pub fn turn_anticlockwise(&mut self) -> f32 {
        self.rotate(Direction::Anticlockwise)
    }

    /// Without an image nothing turns and the neutral angle 0 is returned.
    fn rotate(&mut self, direction: Direction) -> f32 {
        if self.drawable.is_none() {
            return 0.0;
        }
        self.resize = None;
        let angle = turn(self.angle, direction);
        match (self.stage(), self.state) {
            (Some(stage), Some(state)) => {
                let Some((frame, next)) = rotate_transition(
                    &stage,
                    &state,
                    angle,
                    self.config.ratio,
                    self.config.min_padding,
                ) else {
                    return self.angle;
                };
                self.frame = Some(frame);
                self.state = Some(next);
                self.limits =
                    Stage::new(stage.viewport, stage.drawable, frame).limits(self.config.max_scale_as);
                self.last_transition = Some(Transition {
                    from_frame: stage.frame.rect,
                    to_frame: frame.rect,
                    from_state: state,
                    to_state: next,
                });
                self.angle = angle;
            }
            _ => {
                // Not laid out yet: the frame follows on the next layout
                self.angle = angle;
                if let Some(record) = self.pending.as_mut() {
                    record.angle = angle;
                }
            }
        }
        debug!(angle = self.angle, "turned");
        self.angle
    }

    pub fn current_angle(&self) -> f32 {
        self.angle
    }

    /// Take the before/after snapshot of the last rotation or resize.
    pub fn take_transition(&mut self) -> Option<Transition> {
        self.last_transition.take()
    }

    /// Crop currently selected, or the pending one before layout.
    pub fn normalized_crop(&self) -> Option<NormalizedCrop> {
        match (self.stage(), self.state) {
            (Some(stage), Some(state)) => {
                to_normalized_crop(&state, stage.frame.rect, stage.pivot(), stage.drawable)
            }
            _ => self.pending.map(|record| record.crop),
        }
    }

    /// The current crop in pixels of a `width`x`height` original.
    ///
    /// Without a placement or pending crop this is the whole image.
    pub fn get_result(&self, width: u32, height: u32) -> Result<TrimmingResult> {
        let crop = self.normalized_crop().unwrap_or_default();
        TrimmingResult::from_normalized(&crop, self.angle, width, height)
    }

    /// Restore a saved result for a `width`x`height` original.
    ///
    /// The frame takes the rectangle's shape, and the crop is shown as
    /// soon as an image and a layout are available.
    pub fn set_result(&mut self, width: u32, height: u32, result: &TrimmingResult) -> Result<()> {
        let crop = result.to_normalized(width, height)?;
        let angle = normalize_angle(result.angle);
        let ratio = result.aspect_ratio();

        debug!(rect = ?result.crop_rect, angle, ratio, "result restored");
        self.config.ratio = ratio;
        self.angle = angle;
        self.pending = Some(TrimRecord::new(crop, angle));
        self.state = None;
        self.resize = None;
        self.refresh();
        Ok(())
    }

    /// Forget the placement and any pending crop and start over.
    pub fn reset(&mut self) {
        self.state = None;
        self.pending = None;
        self.resize = None;
        self.last_transition = None;
        self.angle = 0.0;
        self.refresh();
    }

    /// Replace the configuration.
    ///
    /// A new ratio lays the frame out again and resets the placement; a
    /// new padding lays it out again keeping the crop; new zoom limits or
    /// drag policy settle the image under the new rules.
    pub fn apply_config(&mut self, config: TrimConfig) -> Result<Recompute> {
        config.validate()?;
        let ratio_changed = self.config.ratio != config.ratio;
        let relayout = self.config.frame_differs(&config);
        let limits_changed = self.config.max_scale_as != config.max_scale_as
            || self.config.drag_mode != config.drag_mode;

        if relayout {
            if ratio_changed {
                self.pending = None;
            } else {
                self.capture_pending();
            }
            self.state = None;
            self.resize = None;
            self.config = config;
            self.refresh();
            debug!(ratio = self.config.ratio, "config applied, frame relaid");
            return Ok(Recompute::Relayout);
        }

        self.config = config;
        if !limits_changed {
            return Ok(Recompute::Unchanged);
        }
        if let Some(stage) = self.stage() {
            self.limits = stage.limits(self.config.max_scale_as);
            if let Some(state) = self.state {
                self.state = Some(settle(&stage, &state, &self.limits, self.config.drag_mode));
            }
        }
        debug!(max = self.limits.max, mode = ?self.config.drag_mode, "config applied, limits");
        Ok(Recompute::Limits)
    }

    /// Committed frame layout.
    pub fn frame(&self) -> Option<TrimFrame> {
        self.frame
    }

    /// Frame rectangle to draw, following an in-progress resize.
    pub fn frame_rect(&self) -> Option<RectF> {
        match &self.resize {
            Some(session) => Some(session.rect()),
            None => self.frame.map(|frame| frame.rect),
        }
    }

    /// Image placement, following an in-progress resize.
    pub fn drag_state(&self) -> Option<DragState> {
        match &self.resize {
            Some(session) => Some(session.state()),
            None => self.state,
        }
    }

    /// Drawable-to-view matrix for the renderer.
    pub fn image_matrix(&self) -> Option<Affine> {
        let viewport = self.viewport?;
        Some(self.drag_state()?.matrix(viewport.center()))
    }

    pub fn standard_scale(&self) -> Option<f32> {
        self.state.map(|_| self.limits.standard)
    }

    pub fn max_scale(&self) -> Option<f32> {
        self.state.map(|_| self.limits.max)
    }

    pub fn is_rotated(&self) -> bool {
        is_rotated_angle(self.angle)
    }

    pub fn is_resizing(&self) -> bool {
        self.resize.is_some()
    }

    pub fn drag_mode(&self) -> DragMode {
        self.config.drag_mode
    }

    fn stage(&self) -> Option<Stage> {
        Some(Stage::new(self.viewport?, self.drawable?, self.frame?))
    }

    /// Park the visible crop so the next refresh rebuilds it.
    fn capture_pending(&mut self) {
        let (Some(stage), Some(state)) = (self.stage(), self.state) else {
            return;
        };
        if let Some(crop) =
            to_normalized_crop(&state, stage.frame.rect, stage.pivot(), stage.drawable)
        {
            self.pending = Some(TrimRecord::new(crop, state.angle));
        }
        self.state = None;
    }

    /// Lay the frame out for the current viewport and angle and make sure
    /// a placement exists once an image is known.
    fn refresh(&mut self) {
        let Some(viewport) = self.viewport else {
            return;
        };
        self.frame = TrimFrame::layout(
            viewport,
            self.config.ratio,
            self.config.min_padding,
            is_rotated_angle(self.angle),
        );
        let Some(stage) = self.stage() else {
            return;
        };
        self.limits = stage.limits(self.config.max_scale_as);

        let restored = self.pending.take().and_then(|record| {
            from_normalized_crop(
                &record.crop,
                self.angle,
                stage.frame.rect,
                stage.pivot(),
                stage.drawable.width,
            )
        });
        if let Some(state) = restored {
            self.state = Some(state);
        } else if self.state.is_none() {
            self.state = Some(initialize_transform(&stage, self.angle));
        }
        trace!(state = ?self.state, standard = self.limits.standard, "refreshed");
    }
}

impl Default for TrimmingEngine {
    fn default() -> Self {
        Self::with_config(TrimConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::IntRect;

    const EPSILON: f32 = 1e-4;

    fn engine_with(config: TrimConfig) -> TrimmingEngine {
        let mut engine = TrimmingEngine::new(config).unwrap();
        engine.set_image(1334.0, 1000.0);
        engine.layout(1080.0, 1920.0);
        engine
    }

    fn assert_crop_close(a: NormalizedCrop, b: NormalizedCrop) {
        assert!((a.left - b.left).abs() < EPSILON, "{a:?} vs {b:?}");
        assert!((a.top - b.top).abs() < EPSILON, "{a:?} vs {b:?}");
        assert!((a.right - b.right).abs() < EPSILON, "{a:?} vs {b:?}");
        assert!((a.bottom - b.bottom).abs() < EPSILON, "{a:?} vs {b:?}");
    }

    fn assert_rect_within_pixel(a: IntRect, b: IntRect) {
        assert!((a.left - b.left).abs() <= 1, "{a:?} vs {b:?}");
        assert!((a.top - b.top).abs() <= 1, "{a:?} vs {b:?}");
        assert!((a.right - b.right).abs() <= 1, "{a:?} vs {b:?}");
        assert!((a.bottom - b.bottom).abs() <= 1, "{a:?} vs {b:?}");
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        let config = TrimConfig {
            ratio: -1.0,
            ..TrimConfig::default()
        };
        assert!(TrimmingEngine::new(config).is_err());
    }

    #[test]
    fn test_initial_layout() {
        let engine = engine_with(TrimConfig::default());
        let frame = engine.frame().unwrap();
        assert_eq!(frame.rect, RectF::new(10.0, 430.0, 1070.0, 1490.0));
        assert!(!frame.rotated);
        let state = engine.drag_state().unwrap();
        assert_eq!(state.scale, 1.06);
        assert_eq!(engine.standard_scale(), Some(1.06));
        assert_eq!(engine.current_angle(), 0.0);
    }

    #[test]
    fn test_widescreen_frame_ratio() {
        let config = TrimConfig::builder()
            .ratio(16.0 / 9.0)
            .min_padding(0.0)
            .drag_mode(DragMode::Default)
            .build()
            .unwrap();
        let engine = engine_with(config);
        let frame = engine.frame().unwrap();
        assert!((frame.width() / frame.height() - 16.0 / 9.0).abs() < 1e-6);
        assert_eq!(frame.width(), 1080.0);
    }

    #[test]
    fn test_result_round_trip_before_layout() {
        let mut engine = TrimmingEngine::default();
        let rect = IntRect::new(100, 50, 2000, 1500);
        engine
            .set_result(2668, 2000, &TrimmingResult::new(rect, 0.0))
            .unwrap();
        let result = engine.get_result(2668, 2000).unwrap();
        assert_rect_within_pixel(result.crop_rect, rect);
        assert_eq!(result.angle, 0.0);
    }

    #[test]
    fn test_result_round_trip_through_layout() {
        let mut engine = TrimmingEngine::default();
        let rect = IntRect::new(100, 50, 2000, 1500);
        engine
            .set_result(2668, 2000, &TrimmingResult::new(rect, 0.0))
            .unwrap();
        engine.set_image(1334.0, 1000.0);
        engine.layout(1080.0, 1920.0);

        let frame = engine.frame().unwrap();
        assert!((frame.image_ratio() - 1900.0 / 1450.0).abs() < 1e-5);
        let result = engine.get_result(2668, 2000).unwrap();
        assert_rect_within_pixel(result.crop_rect, rect);
        assert_eq!(result.angle, 0.0);
    }

    #[test]
    fn test_result_round_trip_rotated() {
        let mut engine = engine_with(TrimConfig::default());
        let rect = IntRect::new(400, 300, 1600, 1900);
        engine
            .set_result(2668, 2000, &TrimmingResult::new(rect, -90.0))
            .unwrap();
        assert!(engine.is_rotated());
        assert!(engine.frame().unwrap().rotated);
        let result = engine.get_result(2668, 2000).unwrap();
        assert_rect_within_pixel(result.crop_rect, rect);
        assert_eq!(result.angle, -90.0);
    }

    #[test]
    fn test_set_result_rejects_rect_outside_image() {
        let mut engine = engine_with(TrimConfig::default());
        let result = TrimmingResult::new(IntRect::new(0, 0, 3000, 100), 0.0);
        assert!(engine.set_result(2668, 2000, &result).is_err());
        assert!(engine.drag_state().is_some());
    }

    #[test]
    fn test_no_image_is_inert() {
        let mut engine = TrimmingEngine::default();
        engine.layout(1080.0, 1920.0);
        engine.pan(10.0, 10.0);
        engine.zoom(2.0, 0.0, 0.0);
        engine.end_gesture();
        assert_eq!(engine.turn_clockwise(), 0.0);
        assert!(engine.drag_state().is_none());
        assert!(engine.frame().is_some());
        assert_eq!(engine.pointer_down(10.0, 430.0), PointerTarget::Image);
        let result = engine.get_result(640, 480).unwrap();
        assert_eq!(result.crop_rect, IntRect::new(0, 0, 640, 480));
    }

    #[test]
    fn test_turn_without_image_reports_zero() {
        let mut engine = TrimmingEngine::default();
        let saved = TrimmingResult::new(IntRect::new(0, 0, 100, 50), 90.0);
        engine.set_result(100, 50, &saved).unwrap();
        assert_eq!(engine.turn_clockwise(), 0.0);
        assert_eq!(engine.turn_anticlockwise(), 0.0);
        // The restored angle is left alone
        assert_eq!(engine.current_angle(), 90.0);
    }

    #[test]
    fn test_degenerate_viewport_defers() {
        let mut engine = TrimmingEngine::default();
        engine.set_image(100.0, 100.0);
        engine.layout(0.0, 0.0);
        assert!(engine.frame().is_none());
        assert!(engine.drag_state().is_none());
        engine.layout(500.0, 500.0);
        assert!(engine.drag_state().is_some());
    }

    #[test]
    fn test_zoom_clamps_to_max_scale() {
        let mut engine = engine_with(TrimConfig::default());
        let standard = engine.standard_scale().unwrap();
        engine.zoom(100.0, 540.0, 960.0);
        assert_eq!(engine.drag_state().unwrap().scale, standard * 4.0);
        assert_eq!(engine.max_scale(), Some(standard * 4.0));
    }

    #[test]
    fn test_pan_is_clamped_in_default_mode() {
        let mut engine = engine_with(TrimConfig::default());
        let before = engine.drag_state().unwrap();
        // Image already fills the frame height, so vertical pan is undone
        engine.pan(0.0, 300.0);
        let after = engine.drag_state().unwrap();
        assert!((after.trans_y - before.trans_y).abs() < 1e-3);
        assert_eq!(after.trans_x, before.trans_x);
    }

    #[test]
    fn test_pan_overdrag_then_settle_keeps_position() {
        let config = TrimConfig::builder()
            .drag_mode(DragMode::OverDrag)
            .build()
            .unwrap();
        let mut engine = engine_with(config);
        let before = engine.drag_state().unwrap();
        engine.pan(0.0, 300.0);
        engine.end_gesture();
        let after = engine.drag_state().unwrap();
        assert_eq!(after.trans_y, before.trans_y + 300.0);
    }

    #[test]
    fn test_disabled_mode_ignores_gestures() {
        let config = TrimConfig::builder()
            .drag_mode(DragMode::Disabled)
            .build()
            .unwrap();
        let mut engine = engine_with(config);
        let before = engine.drag_state().unwrap();
        engine.pan(-50.0, 0.0);
        engine.zoom(3.0, 540.0, 960.0);
        assert_eq!(engine.drag_state().unwrap(), before);
    }

    #[test]
    fn test_four_clockwise_turns_restore_crop() {
        let config = TrimConfig::builder().ratio(4.0 / 3.0).build().unwrap();
        let mut engine = engine_with(config);
        engine.zoom(2.0, 300.0, 800.0);
        engine.pan(-120.0, 40.0);
        engine.end_gesture();
        let before = engine.normalized_crop().unwrap();

        let angles: Vec<f32> = (0..4).map(|_| engine.turn_clockwise()).collect();
        assert_eq!(angles, vec![90.0, 180.0, 270.0, 0.0]);
        assert_crop_close(engine.normalized_crop().unwrap(), before);
    }

    #[test]
    fn test_turn_swaps_frame_and_reports_transition() {
        let config = TrimConfig::builder().ratio(4.0 / 3.0).build().unwrap();
        let mut engine = engine_with(config);
        let old_frame = engine.frame().unwrap();
        let crop = engine.normalized_crop().unwrap();

        assert_eq!(engine.turn_anticlockwise(), -90.0);
        let frame = engine.frame().unwrap();
        assert!(frame.rotated);
        assert!(frame.height() > frame.width());
        assert_crop_close(engine.normalized_crop().unwrap(), crop);

        let transition = engine.take_transition().unwrap();
        assert_eq!(transition.from_frame, old_frame.rect);
        assert_eq!(transition.to_frame, frame.rect);
        assert_eq!(transition.to_state.angle, -90.0);
        assert!(engine.take_transition().is_none());
    }

    #[test]
    fn test_turn_before_layout_applies_on_layout() {
        let mut engine = TrimmingEngine::default();
        engine.set_image(1334.0, 1000.0);
        assert_eq!(engine.turn_clockwise(), 90.0);
        engine.layout(1080.0, 1920.0);
        assert!(engine.frame().unwrap().rotated);
        assert_eq!(engine.drag_state().unwrap().angle, 90.0);
    }

    #[test]
    fn test_layout_change_keeps_crop() {
        let mut engine = engine_with(TrimConfig::default());
        engine.zoom(2.5, 700.0, 900.0);
        engine.end_gesture();
        let before = engine.normalized_crop().unwrap();

        assert!(engine.layout(1920.0, 1080.0));
        assert!(!engine.layout(1920.0, 1080.0));
        assert_crop_close(engine.normalized_crop().unwrap(), before);
    }

    #[test]
    fn test_image_matrix_maps_drawable_onto_extent() {
        let engine = engine_with(TrimConfig::default());
        let matrix = engine.image_matrix().unwrap();
        let mapped = matrix.map_rect(RectF::new(0.0, 0.0, 1334.0, 1000.0));
        let frame = engine.frame().unwrap().rect;
        assert!((mapped.top - frame.top).abs() < 1e-3);
        assert!((mapped.bottom - frame.bottom).abs() < 1e-3);
        assert!((mapped.center().x - frame.center().x).abs() < 1e-3);
    }

    #[test]
    fn test_pointer_down_without_frame_drag() {
        let mut engine = engine_with(TrimConfig::default());
        assert_eq!(engine.pointer_down(10.0, 430.0), PointerTarget::Image);
        assert!(engine.drag_frame(10.0, 10.0).is_none());
        assert!(engine.release_frame().is_none());
    }

    #[test]
    fn test_frame_resize_commits_new_ratio() {
        let config = TrimConfig::builder()
            .frame_drag_enabled(true)
            .build()
            .unwrap();
        let mut engine = TrimmingEngine::new(config).unwrap();
        engine.set_image(1000.0, 1000.0);
        engine.layout(1000.0, 1000.0);

        assert_eq!(
            engine.pointer_down(12.0, 12.0),
            PointerTarget::Frame(Corner::TopLeft)
        );
        assert!(engine.is_resizing());
        let rect = engine.drag_frame(200.0, 0.0).unwrap();
        assert_eq!(rect, RectF::new(210.0, 10.0, 990.0, 990.0));
        assert_eq!(engine.frame_rect(), Some(rect));

        let transition = engine.release_frame().unwrap();
        assert!(!engine.is_resizing());
        assert_eq!(transition.from_frame, rect);
        assert!((engine.config().ratio - 780.0 / 980.0).abs() < 1e-6);

        let frame = engine.frame().unwrap();
        assert!((frame.height() - 980.0).abs() < 1e-3);
        assert!((frame.width() - 780.0).abs() < 1e-3);
        let state = engine.drag_state().unwrap();
        assert!((state.scale - 0.98).abs() < 1e-5);
        // Right image edge stays on the right frame edge
        assert!((state.trans_x + 1000.0 * state.scale - frame.rect.right).abs() < 1e-3);
    }

    #[test]
    fn test_rotated_frame_resize_keeps_crop() {
        let config = TrimConfig::builder()
            .frame_drag_enabled(true)
            .build()
            .unwrap();
        let mut engine = TrimmingEngine::new(config).unwrap();
        engine.set_image(1000.0, 1000.0);
        engine.layout(1000.0, 1000.0);
        assert_eq!(engine.turn_clockwise(), 90.0);

        assert_eq!(
            engine.pointer_down(12.0, 12.0),
            PointerTarget::Frame(Corner::TopLeft)
        );
        let rect = engine.drag_frame(200.0, 0.0).unwrap();
        assert_eq!(rect, RectF::new(210.0, 10.0, 990.0, 990.0));
        engine.release_frame().unwrap();

        // The on-screen ratio is 780:980, so the image-oriented ratio is its reciprocal
        assert!((engine.config().ratio - 980.0 / 780.0).abs() < 1e-5);
        let frame = engine.frame().unwrap();
        assert!(frame.rotated);
        assert!((frame.width() - 780.0).abs() < 1e-3);
        assert!((frame.height() - 980.0).abs() < 1e-3);

        // Turned clockwise, the image bottom sits at the screen left, so the
        // 200 px dragged in at scale 0.98 trims 204 px off the bottom
        let result = engine.get_result(1000, 1000).unwrap();
        assert_eq!(result.angle, 90.0);
        assert_rect_within_pixel(result.crop_rect, IntRect::new(0, 0, 1000, 796));
    }

    #[test]
    fn test_apply_config_levels() {
        let mut engine = engine_with(TrimConfig::default());
        let mut config = engine.config().clone();

        config.border_color = 0xFFFF_FFFF;
        assert_eq!(engine.apply_config(config.clone()), Ok(Recompute::Unchanged));

        config.max_scale_as = 2.0;
        assert_eq!(engine.apply_config(config.clone()), Ok(Recompute::Limits));
        assert_eq!(
            engine.max_scale(),
            Some(engine.standard_scale().unwrap() * 2.0)
        );

        config.ratio = 2.0;
        assert_eq!(engine.apply_config(config.clone()), Ok(Recompute::Relayout));
        assert!((engine.frame().unwrap().image_ratio() - 2.0).abs() < 1e-6);

        config.ratio = 0.0;
        assert!(engine.apply_config(config).is_err());
        assert_eq!(engine.config().ratio, 2.0);
    }

    #[test]
    fn test_lower_max_scale_settles_zoomed_image() {
        let mut engine = engine_with(TrimConfig::default());
        engine.zoom(4.0, 540.0, 960.0);
        let config = TrimConfig {
            max_scale_as: 2.0,
            ..engine.config().clone()
        };
        engine.apply_config(config).unwrap();
        let state = engine.drag_state().unwrap();
        assert_eq!(state.scale, engine.max_scale().unwrap());
    }

    #[test]
    fn test_reset_returns_to_initial_state() {
        let mut engine = engine_with(TrimConfig::default());
        let initial = engine.drag_state().unwrap();
        engine.zoom(2.0, 100.0, 700.0);
        engine.turn_clockwise();
        engine.reset();
        assert_eq!(engine.current_angle(), 0.0);
        assert_eq!(engine.drag_state().unwrap(), initial);
        assert!(engine.normalized_crop().unwrap().top.abs() < EPSILON);
    }

    #[test]
    fn test_set_image_drops_placement() {
        let mut engine = engine_with(TrimConfig::default());
        engine.zoom(3.0, 540.0, 960.0);
        engine.set_image(1000.0, 1000.0);
        let state = engine.drag_state().unwrap();
        assert_eq!(state.scale, 1.06);
        engine.clear_image();
        assert!(!engine.has_image());
        assert!(engine.drag_state().is_none());
    }
}
