//! WASM bindings for the interactive trimming engine.
//!
//! The host forwards view size changes and pointer input, then redraws
//! using `frame()` and `image_matrix()`. Everything is in view pixels.

use crate::types::JsTrimmingResult;
use trimview_core::{Corner, PointerTarget, Recompute, RectF, TrimConfig, TrimmingEngine};
use wasm_bindgen::prelude::*;

/// Trimming engine wrapper for JavaScript
#[wasm_bindgen]
pub struct JsTrimmingEngine {
    inner: TrimmingEngine,
}

#[wasm_bindgen]
impl JsTrimmingEngine {
    /// Create an engine from a configuration object.
    ///
    /// Missing fields take their defaults; `undefined` or `null` gives the
    /// default configuration.
    ///
    /// # Example (TypeScript)
    ///
    /// ```typescript
    /// const engine = new JsTrimmingEngine({ ratio: 16 / 9, drag_mode: 'OverDrag' });
    /// engine.set_image(bitmap.width, bitmap.height);
    /// engine.layout(canvas.width, canvas.height);
    /// ```
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue) -> Result<JsTrimmingEngine, JsValue> {
        let config = config_from_js(config)?;
        let inner = TrimmingEngine::new(config).map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(Self { inner })
    }

    /// Engine with the default configuration
    pub fn with_defaults() -> JsTrimmingEngine {
        Self {
            inner: TrimmingEngine::default(),
        }
    }

    /// Set the size of the drawable the image is shown with.
    pub fn set_image(&mut self, width: f32, height: f32) {
        self.inner.set_image(width, height);
    }

    pub fn clear_image(&mut self) {
        self.inner.clear_image();
    }

    pub fn has_image(&self) -> bool {
        self.inner.has_image()
    }

    /// Set the view size. Returns true when the layout changed; a degenerate
    /// size changes it but lays out no frame, leaving `frame()` empty.
    pub fn layout(&mut self, width: f32, height: f32) -> bool {
        self.inner.layout(width, height)
    }

    pub fn pan(&mut self, dx: f32, dy: f32) {
        self.inner.pan(dx, dy);
    }

    /// Pinch by `factor` about the view point (`focus_x`, `focus_y`).
    pub fn zoom(&mut self, factor: f32, focus_x: f32, focus_y: f32) {
        self.inner.zoom(factor, focus_x, focus_y);
    }

    /// Pointer-up after a pan or pinch.
    pub fn end_gesture(&mut self) {
        self.inner.end_gesture();
    }

    /// Route a pointer-down.
    ///
    /// Returns the grabbed corner index (0 top-left, 1 top-right,
    /// 2 bottom-right, 3 bottom-left) or -1 when the image is dragged.
    pub fn pointer_down(&mut self, x: f32, y: f32) -> i32 {
        match self.inner.pointer_down(x, y) {
            PointerTarget::Frame(corner) => corner_index(corner),
            PointerTarget::Image => -1,
        }
    }

    /// Move the grabbed corner. Returns `[left, top, right, bottom]`, or an
    /// empty array when no corner is grabbed.
    pub fn drag_frame(&mut self, dx: f32, dy: f32) -> Vec<f32> {
        self.inner.drag_frame(dx, dy).map(rect_values).unwrap_or_default()
    }

    /// Pointer-up after a corner drag. Returns true when the frame changed;
    /// the before/after snapshot is then available from `take_transition`.
    pub fn release_frame(&mut self) -> bool {
        self.inner.release_frame().is_some()
    }

    /// Rotate a quarter turn clockwise. Returns the new angle.
    pub fn turn_clockwise(&mut self) -> f32 {
        self.inner.turn_clockwise()
    }

    /// Rotate a quarter turn anticlockwise. Returns the new angle.
    pub fn turn_anticlockwise(&mut self) -> f32 {
        self.inner.turn_anticlockwise()
    }

    pub fn current_angle(&self) -> f32 {
        self.inner.current_angle()
    }

    pub fn is_rotated(&self) -> bool {
        self.inner.is_rotated()
    }

    pub fn is_resizing(&self) -> bool {
        self.inner.is_resizing()
    }

    /// Last rotation or frame resize as `{ from_frame, to_frame, from_state,
    /// to_state }`, or `null`. Taking it clears it.
    pub fn take_transition(&mut self) -> Result<JsValue, JsValue> {
        match self.inner.take_transition() {
            Some(transition) => serde_wasm_bindgen::to_value(&transition)
                .map_err(|e| JsValue::from_str(&e.to_string())),
            None => Ok(JsValue::NULL),
        }
    }

    /// Crop against a `width`x`height` original.
    pub fn get_result(&self, width: u32, height: u32) -> Result<JsTrimmingResult, JsValue> {
        self.inner
            .get_result(width, height)
            .map(JsTrimmingResult::from_result)
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Restore a saved crop for a `width`x`height` original.
    pub fn set_result(
        &mut self,
        width: u32,
        height: u32,
        result: &JsTrimmingResult,
    ) -> Result<(), JsValue> {
        self.inner
            .set_result(width, height, result.inner())
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    pub fn reset(&mut self) {
        self.inner.reset();
    }

    /// Replace the configuration.
    ///
    /// Returns 0 when nothing geometric changed, 1 when the zoom limits were
    /// recomputed and 2 when the frame was laid out again.
    pub fn apply_config(&mut self, config: JsValue) -> Result<u8, JsValue> {
        let config = config_from_js(config)?;
        let recompute = self
            .inner
            .apply_config(config)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(recompute_code(recompute))
    }

    /// Current configuration as a plain object
    pub fn config(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(self.inner.config())
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Frame to draw as `[left, top, right, bottom]`, or an empty array
    /// before layout.
    pub fn frame(&self) -> Vec<f32> {
        self.inner.frame_rect().map(rect_values).unwrap_or_default()
    }

    /// Drawable-to-view matrix as 9 values in row-major order, or an empty
    /// array before layout.
    pub fn image_matrix(&self) -> Vec<f32> {
        self.inner
            .image_matrix()
            .map(|matrix| matrix.to_values().to_vec())
            .unwrap_or_default()
    }

    pub fn standard_scale(&self) -> Option<f32> {
        self.inner.standard_scale()
    }

    pub fn max_scale(&self) -> Option<f32> {
        self.inner.max_scale()
    }
}

impl Default for JsTrimmingEngine {
    fn default() -> Self {
        Self::with_defaults()
    }
}

fn config_from_js(value: JsValue) -> Result<TrimConfig, JsValue> {
    if value.is_undefined() || value.is_null() {
        return Ok(TrimConfig::default());
    }
    serde_wasm_bindgen::from_value(value)
        .map_err(|e| JsValue::from_str(&format!("Invalid trimming config: {}", e)))
}

fn corner_index(corner: Corner) -> i32 {
    match corner {
        Corner::TopLeft => 0,
        Corner::TopRight => 1,
        Corner::BottomRight => 2,
        Corner::BottomLeft => 3,
    }
}

fn recompute_code(recompute: Recompute) -> u8 {
    match recompute {
        Recompute::Unchanged => 0,
        Recompute::Limits => 1,
        Recompute::Relayout => 2,
    }
}

fn rect_values(rect: RectF) -> Vec<f32> {
    vec![rect.left, rect.top, rect.right, rect.bottom]
}
