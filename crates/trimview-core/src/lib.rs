//! Trimview Core - geometry engine for an image trimming frame
//!
//! This crate provides the state machine behind an interactive crop view:
//! a fixed-ratio frame laid out in a viewport, an image that can be
//! panned, pinch-zoomed and turned in quarter steps underneath it, and
//! optional corner handles that resize the frame. The result is a pixel
//! rectangle and angle against the original image, which can be saved
//! and restored on a later session at any view size.
//!
//! Rendering and input dispatch belong to the host; the engine only
//! reports the frame rectangle and the image matrix to draw.

pub mod config;
pub mod engine;
pub mod error;
pub mod export;
pub mod geometry;
pub mod matrix;
pub mod model;
pub mod resize;
pub mod transform;

pub use config::{dp_to_px, DragMode, TrimConfig, TrimConfigBuilder};
pub use engine::{PointerTarget, Recompute, TrimmingEngine};
pub use error::{Result, TrimError};
pub use export::apply_trimming;
pub use geometry::{IntRect, PointF, RectF, SizeF};
pub use matrix::{Affine, QuarterTurn};
pub use model::{DragState, NormalizedCrop, TrimRecord, TrimmingResult, Transition};
pub use resize::{Corner, ResizeSession};
pub use transform::TrimFrame;
