//! Trimview WASM - WebAssembly bindings for Trimview
//!
//! This crate exposes the trimview-core trimming engine to JavaScript so a
//! canvas-based shell can drive it.
//!
//! # Module Structure
//!
//! - `engine` - The interactive trimming engine (layout, gestures, rotation)
//! - `types` - WASM-compatible wrapper for trimming results
//!
//! # Usage
//!
//! ```typescript
//! import init, { JsTrimmingEngine } from '@trimview/wasm';
//!
//! await init();
//!
//! const engine = new JsTrimmingEngine({ ratio: 1 });
//! engine.set_image(bitmap.width, bitmap.height);
//! engine.layout(canvas.width, canvas.height);
//! // ... forward pointer input, redraw from engine.frame() and engine.image_matrix()
//! const result = engine.get_result(original.width, original.height);
//! ```

use wasm_bindgen::prelude::*;

mod engine;
mod types;

pub use engine::JsTrimmingEngine;
pub use types::JsTrimmingResult;

/// Initialize the WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
