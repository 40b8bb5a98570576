//! Frame resize by dragging a corner.
//!
//! A resize runs as a session: [`begin_resize`] captures the limits when
//! the pointer lands on a corner, [`ResizeSession::update`] moves the
//! corner and its two edges for every pointer move, and [`commit_resize`]
//! turns the final rectangle into a normalized crop and a new frame
//! ratio. The opposite corner stays put.
//!
//! Each edge is limited on the outside by the image and the padded
//! viewport, and the moving edges are limited on the inside so that the
//! committed frame never needs more zoom than the maximum scale allows.
//! When an edge reaches the viewport while the image still extends past
//! it, the image pans along with the drag instead.

use crate::config::TrimConfig;
use crate::geometry::{PointF, RectF, SizeF};
use crate::model::{DragState, NormalizedCrop};
use crate::transform::{image_ratio, to_normalized_crop, ScaleLimits, Stage};

/// A corner of the trimming frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Corner {
    TopLeft,
    TopRight,
    BottomRight,
    BottomLeft,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HEdge {
    Left,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VEdge {
    Top,
    Bottom,
}

impl Corner {
    /// Hit-test order.
    pub const ALL: [Corner; 4] = [
        Corner::TopLeft,
        Corner::TopRight,
        Corner::BottomRight,
        Corner::BottomLeft,
    ];

    pub fn h_edge(self) -> HEdge {
        match self {
            Self::TopLeft | Self::BottomLeft => HEdge::Left,
            Self::TopRight | Self::BottomRight => HEdge::Right,
        }
    }

    pub fn v_edge(self) -> VEdge {
        match self {
            Self::TopLeft | Self::TopRight => VEdge::Top,
            Self::BottomLeft | Self::BottomRight => VEdge::Bottom,
        }
    }

    /// Position of this corner on `rect`.
    pub fn point(self, rect: RectF) -> PointF {
        let x = match self.h_edge() {
            HEdge::Left => rect.left,
            HEdge::Right => rect.right,
        };
        let y = match self.v_edge() {
            VEdge::Top => rect.top,
            VEdge::Bottom => rect.bottom,
        };
        PointF::new(x, y)
    }
}

/// Which corner zone, if any, contains `point`.
///
/// Each zone is a square of side `touch_size` centered on a corner.
/// Zones are tested top-left, top-right, bottom-right, bottom-left and
/// the first hit wins. `None` means the touch drags the image.
pub fn classify_hit(point: PointF, frame: RectF, touch_size: f32) -> Option<Corner> {
    Corner::ALL
        .into_iter()
        .find(|corner| RectF::centered(corner.point(frame), touch_size, touch_size).contains(point))
}

/// State of an in-progress corner drag.
#[derive(Debug, Clone, PartialEq)]
pub struct ResizeSession {
    corner: Corner,
    /// Frame rectangle as currently dragged
    rect: RectF,
    /// Image placement, moved when the drag pans the image
    state: DragState,
    rotated: bool,
    pivot: PointF,
    drawable: SizeF,
    /// On-screen image bounds
    extent: RectF,
    /// Padded viewport
    bounds: RectF,
    /// Innermost positions for the moving edges
    inner: RectF,
    pan_along: bool,
}

/// Start dragging `corner` of the frame in `stage`.
pub fn begin_resize(
    corner: Corner,
    stage: &Stage,
    state: &DragState,
    limits: &ScaleLimits,
    config: &TrimConfig,
) -> ResizeSession {
    let frame = stage.frame.rect;
    let bounds = RectF::from_size(stage.viewport).inset(config.min_padding);

    // A frame this small fills the viewport again at the maximum scale
    let zoom_room = if limits.max > 0.0 {
        (state.scale / limits.max).min(1.0)
    } else {
        1.0
    };
    let max_dx = (frame.width() - bounds.width() * zoom_room).max(0.0);
    let max_dy = (frame.height() - bounds.height() * zoom_room).max(0.0);
    let inner = RectF::new(
        frame.left + max_dx,
        frame.top + max_dy,
        frame.right - max_dx,
        frame.bottom - max_dy,
    );

    let session = ResizeSession {
        corner,
        rect: frame,
        state: *state,
        rotated: stage.frame.rotated,
        pivot: stage.pivot(),
        drawable: stage.drawable,
        extent: stage.image_extent(state),
        bounds,
        inner,
        pan_along: config.drag_mode.allows_gestures(),
    };
    tracing::debug!(?corner, ?inner, extent = ?session.extent, "frame resize started");
    session
}

impl ResizeSession {
    pub fn corner(&self) -> Corner {
        self.corner
    }

    pub fn rect(&self) -> RectF {
        self.rect
    }

    pub fn state(&self) -> DragState {
        self.state
    }

    /// On-screen image bounds, after any pan-along.
    pub fn extent(&self) -> RectF {
        self.extent
    }

    /// Innermost positions the moving edges may reach.
    pub fn inner(&self) -> RectF {
        self.inner
    }

    /// Move the dragged corner by (dx, dy) and return the new frame.
    pub fn update(&mut self, dx: f32, dy: f32) -> RectF {
        let h_edge = self.corner.h_edge();
        let v_edge = self.corner.v_edge();
        let mut r = self.rect;
        match h_edge {
            HEdge::Left => r.left += dx,
            HEdge::Right => r.right += dx,
        }
        match v_edge {
            VEdge::Top => r.top += dy,
            VEdge::Bottom => r.bottom += dy,
        }

        if self.pan_along {
            self.pan_horizontal(&mut r, h_edge, dx);
            self.pan_vertical(&mut r, v_edge, dy);
        }

        // Where the image stops short of the frame, the outer limit is the
        // current edge, so an edge is never pushed past its opposite
        let prev = self.rect;
        let outer = RectF::new(
            self.extent.left.max(self.bounds.left).min(prev.left),
            self.extent.top.max(self.bounds.top).min(prev.top),
            self.extent.right.min(self.bounds.right).max(prev.right),
            self.extent.bottom.min(self.bounds.bottom).max(prev.bottom),
        );
        if h_edge == HEdge::Left {
            r.left = r.left.min(self.inner.left);
        } else {
            r.right = r.right.max(self.inner.right);
        }
        if v_edge == VEdge::Top {
            r.top = r.top.min(self.inner.top);
        } else {
            r.bottom = r.bottom.max(self.inner.bottom);
        }
        r.left = r.left.max(outer.left);
        r.top = r.top.max(outer.top);
        r.right = r.right.min(outer.right);
        r.bottom = r.bottom.min(outer.bottom);

        tracing::trace!(dx, dy, rect = ?r, "frame resize");
        self.rect = r;
        r
    }

    /// Pan the image right (or left) when the moving left (or right) edge
    /// is pushed past the viewport while image remains beyond it.
    fn pan_horizontal(&mut self, r: &mut RectF, edge: HEdge, dx: f32) {
        let shift = match edge {
            HEdge::Left if dx < 0.0 => {
                let overflow = self.bounds.left - r.left;
                let hidden = self.bounds.left - self.extent.left;
                let room = self.bounds.right - r.right;
                overflow.min(hidden).min(room).max(0.0)
            }
            HEdge::Right if dx > 0.0 => {
                let overflow = r.right - self.bounds.right;
                let hidden = self.extent.right - self.bounds.right;
                let room = r.left - self.bounds.left;
                -overflow.min(hidden).min(room).max(0.0)
            }
            _ => 0.0,
        };
        if shift != 0.0 {
            self.state = self.state.translated_on_screen(shift, 0.0);
            self.extent = self.extent.offset(shift, 0.0);
            match edge {
                HEdge::Left => r.right += shift,
                HEdge::Right => r.left += shift,
            }
        }
    }

    fn pan_vertical(&mut self, r: &mut RectF, edge: VEdge, dy: f32) {
        let shift = match edge {
            VEdge::Top if dy < 0.0 => {
                let overflow = self.bounds.top - r.top;
                let hidden = self.bounds.top - self.extent.top;
                let room = self.bounds.bottom - r.bottom;
                overflow.min(hidden).min(room).max(0.0)
            }
            VEdge::Bottom if dy > 0.0 => {
                let overflow = r.bottom - self.bounds.bottom;
                let hidden = self.extent.bottom - self.bounds.bottom;
                let room = r.top - self.bounds.top;
                -overflow.min(hidden).min(room).max(0.0)
            }
            _ => 0.0,
        };
        if shift != 0.0 {
            self.state = self.state.translated_on_screen(0.0, shift);
            self.extent = self.extent.offset(0.0, shift);
            match edge {
                VEdge::Top => r.bottom += shift,
                VEdge::Bottom => r.top += shift,
            }
        }
    }
}

/// Move the dragged corner of `session` by (dx, dy).
pub fn update_resize(session: &mut ResizeSession, dx: f32, dy: f32) -> RectF {
    session.update(dx, dy)
}

/// Finish a resize: the crop selected by the dragged rectangle and the
/// rectangle's aspect ratio in image orientation.
///
/// Returns `None` if the rectangle collapsed to nothing.
pub fn commit_resize(session: &ResizeSession) -> Option<(NormalizedCrop, f32)> {
    let crop = to_normalized_crop(&session.state, session.rect, session.pivot, session.drawable)?;
    let ratio = image_ratio(session.rect, session.rotated);
    if !(ratio.is_finite() && ratio > 0.0) {
        return None;
    }
    tracing::debug!(?crop, ratio, "frame resize committed");
    Some((crop, ratio))
}
