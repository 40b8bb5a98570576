//! WASM-compatible wrapper types for trimming results.
//!
//! The host stores a result between sessions and hands it back to restore
//! the crop, so the wrapper exposes both plain getters and a JSON form.

use trimview_core::{IntRect, TrimmingResult};
use wasm_bindgen::prelude::*;

/// A pixel crop rectangle and clockwise angle against the original image.
#[wasm_bindgen]
#[derive(Debug, Clone, Copy)]
pub struct JsTrimmingResult {
    inner: TrimmingResult,
}

#[wasm_bindgen]
impl JsTrimmingResult {
    /// Create a result from the rectangle edges (exclusive right/bottom)
    /// and an angle in degrees.
    #[wasm_bindgen(constructor)]
    pub fn new(left: i32, top: i32, right: i32, bottom: i32, angle: f32) -> JsTrimmingResult {
        Self {
            inner: TrimmingResult::new(IntRect::new(left, top, right, bottom), angle),
        }
    }

    #[wasm_bindgen(getter)]
    pub fn left(&self) -> i32 {
        self.inner.crop_rect.left
    }

    #[wasm_bindgen(getter)]
    pub fn top(&self) -> i32 {
        self.inner.crop_rect.top
    }

    #[wasm_bindgen(getter)]
    pub fn right(&self) -> i32 {
        self.inner.crop_rect.right
    }

    #[wasm_bindgen(getter)]
    pub fn bottom(&self) -> i32 {
        self.inner.crop_rect.bottom
    }

    /// Crop width in pixels
    #[wasm_bindgen(getter)]
    pub fn width(&self) -> i32 {
        self.inner.crop_rect.width()
    }

    /// Crop height in pixels
    #[wasm_bindgen(getter)]
    pub fn height(&self) -> i32 {
        self.inner.crop_rect.height()
    }

    /// Clockwise angle in degrees, a multiple of 90
    #[wasm_bindgen(getter)]
    pub fn angle(&self) -> f32 {
        self.inner.angle
    }

    /// Check the rectangle against an image of the given size.
    pub fn fits(&self, width: u32, height: u32) -> bool {
        self.inner.validate(width, height).is_ok()
    }

    /// Serialize to a plain object for storage
    pub fn to_json(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.inner).map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Deserialize from a stored object
    pub fn from_json(value: JsValue) -> Result<JsTrimmingResult, JsValue> {
        let inner: TrimmingResult =
            serde_wasm_bindgen::from_value(value).map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(Self { inner })
    }
}

impl JsTrimmingResult {
    pub(crate) fn from_result(inner: TrimmingResult) -> Self {
        Self { inner }
    }

    pub(crate) fn inner(&self) -> &TrimmingResult {
        &self.inner
    }
}
