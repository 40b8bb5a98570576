//! Declarative configuration for the trimming frame.
//!
//! The host owns the configuration and hands it to the engine. Paint
//! parameters (colors, border width, background visibility) are carried
//! for the renderer and never affect geometry.

use crate::error::{Result, TrimError};
use serde::{Deserialize, Serialize};

/// How pan and zoom gestures are constrained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DragMode {
    /// The image always covers the frame; zoom never drops below the
    /// standard scale and translation is pulled back inside the frame.
    #[default]
    Default,
    /// Free pan and zoom past the frame edges without snapping back.
    /// Zoom is still capped at the maximum scale.
    OverDrag,
    /// Pan and zoom are ignored.
    Disabled,
}

impl DragMode {
    /// Map the integer used in layout markup (0, 1, 2) to a mode.
    ///
    /// Unknown values fall back to [`DragMode::Default`].
    pub fn from_index(index: i32) -> Self {
        match index {
            1 => DragMode::OverDrag,
            2 => DragMode::Disabled,
            _ => DragMode::Default,
        }
    }

    /// True when gestures may move the image at all.
    pub fn allows_gestures(self) -> bool {
        self != DragMode::Disabled
    }

    /// True when the image snaps back to cover the frame.
    pub fn keeps_covered(self) -> bool {
        self == DragMode::Default
    }
}

/// Default corner touch zone side in density-independent pixels.
pub const DEFAULT_CORNER_TOUCH_SIZE: f32 = 50.0;

/// Default zoom multiplier over the standard scale.
pub const DEFAULT_MAX_SCALE_AS: f32 = 4.0;

/// Trimming frame configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrimConfig {
    /// Frame border color (ARGB)
    pub border_color: u32,
    /// Color of the area outside the frame (ARGB)
    pub background_color: u32,
    /// Frame border stroke width in pixels
    pub border_width: f32,
    /// Whether the area outside the frame is shaded
    pub show_background: bool,
    /// Minimum distance between the frame and the view edges, in pixels
    pub min_padding: f32,
    /// Frame aspect ratio (width / height) in image orientation
    pub ratio: f32,
    /// Maximum zoom as a multiple of the standard scale
    pub max_scale_as: f32,
    /// Pan/zoom policy
    pub drag_mode: DragMode,
    /// Whether the frame corners can be dragged to resize the frame
    pub frame_drag_enabled: bool,
    /// Whether the host animates rotations
    pub show_anim: bool,
    /// Rotation animation duration in milliseconds
    pub anim_duration_ms: u64,
    /// Whether the host animates frame resize commits
    pub show_frame_anim: bool,
    /// Frame resize animation duration in milliseconds
    pub frame_anim_duration_ms: u64,
    /// Side of the square touch zone around each frame corner, in pixels
    pub corner_touch_size: f32,
}

impl Default for TrimConfig {
    fn default() -> Self {
        Self {
            border_color: 0xFF00_0000,
            background_color: 0x8000_0000,
            border_width: 2.0,
            show_background: false,
            min_padding: 10.0,
            ratio: 1.0,
            max_scale_as: DEFAULT_MAX_SCALE_AS,
            drag_mode: DragMode::Default,
            frame_drag_enabled: false,
            show_anim: false,
            anim_duration_ms: 300,
            show_frame_anim: false,
            frame_anim_duration_ms: 200,
            corner_touch_size: DEFAULT_CORNER_TOUCH_SIZE,
        }
    }
}

impl TrimConfig {
    /// Start building a configuration from the defaults.
    pub fn builder() -> TrimConfigBuilder {
        TrimConfigBuilder::default()
    }

    /// Check the fields that feed the geometry engines.
    pub fn validate(&self) -> Result<()> {
        if !(self.ratio.is_finite() && self.ratio > 0.0) {
            return Err(TrimError::InvalidRatio(self.ratio));
        }
        if !(self.max_scale_as.is_finite() && self.max_scale_as >= 1.0) {
            return Err(TrimError::InvalidScaleLimit(self.max_scale_as));
        }
        if !(self.min_padding.is_finite() && self.min_padding >= 0.0) {
            return Err(TrimError::InvalidPadding(self.min_padding));
        }
        if !(self.corner_touch_size.is_finite() && self.corner_touch_size > 0.0) {
            return Err(TrimError::InvalidTouchSize(self.corner_touch_size));
        }
        Ok(())
    }

    /// True when `other` would lay the frame out differently.
    pub fn frame_differs(&self, other: &TrimConfig) -> bool {
        self.ratio != other.ratio || self.min_padding != other.min_padding
    }
}

/// Builder for [`TrimConfig`].
///
/// # Example
/// ```ignore
/// let config = TrimConfig::builder()
///     .ratio(16.0 / 9.0)
///     .show_background(true)
///     .show_anim(true)
///     .build()?;
/// ```
#[derive(Debug, Clone, Default)]
pub struct TrimConfigBuilder {
    config: TrimConfig,
}

impl TrimConfigBuilder {
    pub fn border_color(mut self, color: u32) -> Self {
        self.config.border_color = color;
        self
    }

    pub fn background_color(mut self, color: u32) -> Self {
        self.config.background_color = color;
        self
    }

    pub fn border_width(mut self, width: f32) -> Self {
        self.config.border_width = width;
        self
    }

    pub fn show_background(mut self, show: bool) -> Self {
        self.config.show_background = show;
        self
    }

    pub fn min_padding(mut self, padding: f32) -> Self {
        self.config.min_padding = padding;
        self
    }

    pub fn ratio(mut self, ratio: f32) -> Self {
        self.config.ratio = ratio;
        self
    }

    pub fn max_scale_as(mut self, multiplier: f32) -> Self {
        self.config.max_scale_as = multiplier;
        self
    }

    pub fn drag_mode(mut self, mode: DragMode) -> Self {
        self.config.drag_mode = mode;
        self
    }

    pub fn frame_drag_enabled(mut self, enabled: bool) -> Self {
        self.config.frame_drag_enabled = enabled;
        self
    }

    pub fn show_anim(mut self, show: bool) -> Self {
        self.config.show_anim = show;
        self
    }

    pub fn anim_duration_ms(mut self, duration: u64) -> Self {
        self.config.anim_duration_ms = duration;
        self
    }

    pub fn show_frame_anim(mut self, show: bool) -> Self {
        self.config.show_frame_anim = show;
        self
    }

    pub fn frame_anim_duration_ms(mut self, duration: u64) -> Self {
        self.config.frame_anim_duration_ms = duration;
        self
    }

    pub fn corner_touch_size(mut self, size: f32) -> Self {
        self.config.corner_touch_size = size;
        self
    }

    /// Validate and return the configuration.
    pub fn build(self) -> Result<TrimConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}

/// Convert density-independent pixels to physical pixels, rounding half up.
pub fn dp_to_px(dp: f32, density: f32) -> f32 {
    (dp * density + 0.5).floor()
}
