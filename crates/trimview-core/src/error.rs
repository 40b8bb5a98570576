//! Error types for the trimming engine.
//!
//! Gesture operations never fail: out-of-range requests are clamped and
//! operations without an image are ignored. Errors only surface where a
//! caller hands the engine data it cannot represent, such as a saved crop
//! rectangle outside the image or a configuration with a zero ratio.

use thiserror::Error;

/// Errors raised at the configuration and result boundaries.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TrimError {
    /// Image dimensions must both be at least one pixel.
    #[error("Invalid image size: {width}x{height}")]
    InvalidImageSize { width: u32, height: u32 },

    /// The crop rectangle does not fit inside the image.
    #[error(
        "Crop rectangle ({left}, {top}, {right}, {bottom}) does not fit a {width}x{height} image"
    )]
    InvalidCropRect {
        left: i32,
        top: i32,
        right: i32,
        bottom: i32,
        width: u32,
        height: u32,
    },

    /// The frame aspect ratio must be finite and positive.
    #[error("Invalid aspect ratio: {0}")]
    InvalidRatio(f32),

    /// The zoom multiplier must be finite and at least 1.
    #[error("Invalid max scale multiplier: {0}")]
    InvalidScaleLimit(f32),

    /// Frame padding must be finite and non-negative.
    #[error("Invalid frame padding: {0}")]
    InvalidPadding(f32),

    /// The corner touch zone must be finite and positive.
    #[error("Invalid corner touch size: {0}")]
    InvalidTouchSize(f32),
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, TrimError>;
