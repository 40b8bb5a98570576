//! Quarter-turn rotation state machine.
//!
//! The angle lives in (-360, 360) and steps by ±90. Reaching ±360 wraps
//! back to 0, so clockwise turns go 0, 90, 180, 270, 0 and anticlockwise
//! turns go 0, -90, -180, -270, 0.

use super::{from_normalized_crop, to_normalized_crop, Stage, TrimFrame};
use crate::matrix::QuarterTurn;
use crate::model::DragState;

/// Direction of a quarter turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Clockwise,
    Anticlockwise,
}

impl Direction {
    fn degrees(self) -> f32 {
        match self {
            Direction::Clockwise => 90.0,
            Direction::Anticlockwise => -90.0,
        }
    }
}

/// Fold ±360 and beyond back to 0.
pub fn wrap_angle(angle: f32) -> f32 {
    if angle >= 360.0 || angle <= -360.0 {
        0.0
    } else {
        angle
    }
}

/// Snap an arbitrary angle to the nearest multiple of 90 in (-360, 360),
/// keeping its sign.
pub fn normalize_angle(angle: f32) -> f32 {
    if !angle.is_finite() {
        return 0.0;
    }
    let snapped = (angle / 90.0).round() * 90.0 % 360.0;
    // -0.0 reads as 0
    snapped + 0.0
}

/// True when `angle` shows the image on its side (angle % 180 != 0).
pub fn is_rotated_angle(angle: f32) -> bool {
    QuarterTurn::from_degrees(angle).swaps_axes()
}

/// Step `angle` by one quarter turn.
pub fn turn(angle: f32, direction: Direction) -> f32 {
    wrap_angle(angle + direction.degrees())
}

/// Carry `state` over to `angle`.
///
/// The crop is captured against the current frame, the frame is laid out
/// again for the new orientation, and the state is rebuilt from the crop
/// inside it. The selected region is therefore the same before and after
/// the turn. Returns `None` when the viewport has no room for a frame.
pub fn rotate_transition(
    stage: &Stage,
    state: &DragState,
    angle: f32,
    ratio: f32,
    padding: f32,
) -> Option<(TrimFrame, DragState)> {
    let frame = TrimFrame::layout(stage.viewport, ratio, padding, is_rotated_angle(angle))?;
    let crop = to_normalized_crop(state, stage.frame.rect, stage.pivot(), stage.drawable)?;
    let rotated = from_normalized_crop(&crop, angle, frame.rect, stage.pivot(), stage.drawable.width)?;
    tracing::debug!(
        from = state.angle,
        to = angle,
        rotated = frame.rotated,
        "rotation transition"
    );
    Some((frame, rotated))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::SizeF;
    use crate::transform::{initialize_transform, to_normalized_crop};

    #[test]
    fn test_clockwise_cycle() {
        let mut angle = 0.0;
        let mut seen = Vec::new();
        for _ in 0..4 {
            angle = turn(angle, Direction::Clockwise);
            seen.push(angle);
        }
        assert_eq!(seen, vec![90.0, 180.0, 270.0, 0.0]);
    }

    #[test]
    fn test_anticlockwise_cycle() {
        let mut angle = 0.0;
        let mut seen = Vec::new();
        for _ in 0..4 {
            angle = turn(angle, Direction::Anticlockwise);
            seen.push(angle);
        }
        assert_eq!(seen, vec![-90.0, -180.0, -270.0, 0.0]);
    }

    #[test]
    fn test_mixed_turns_stay_in_range() {
        let angle = turn(turn(0.0, Direction::Anticlockwise), Direction::Clockwise);
        assert_eq!(angle, 0.0);
        assert_eq!(turn(270.0, Direction::Anticlockwise), 180.0);
    }

    #[test]
    fn test_normalize_angle() {
        assert_eq!(normalize_angle(0.0), 0.0);
        assert_eq!(normalize_angle(89.0), 90.0);
        assert_eq!(normalize_angle(-95.0), -90.0);
        assert_eq!(normalize_angle(360.0), 0.0);
        assert_eq!(normalize_angle(450.0), 90.0);
        assert_eq!(normalize_angle(-360.0), 0.0);
        assert_eq!(normalize_angle(f32::NAN), 0.0);
    }

    #[test]
    fn test_is_rotated_angle() {
        assert!(!is_rotated_angle(0.0));
        assert!(is_rotated_angle(90.0));
        assert!(is_rotated_angle(-90.0));
        assert!(!is_rotated_angle(-180.0));
        assert!(is_rotated_angle(270.0));
    }

    #[test]
    fn test_transition_keeps_crop() {
        let viewport = SizeF::new(1080.0, 1920.0);
        let drawable = SizeF::new(1334.0, 1000.0);
        let frame = TrimFrame::layout(viewport, 4.0 / 3.0, 10.0, false).unwrap();
        let stage = Stage::new(viewport, drawable, frame);
        let state = initialize_transform(&stage, 0.0);
        let zoomed = DragState {
            scale: state.scale * 2.0,
            ..state
        };
        let zoomed = crate::transform::correct_translation(&stage, &zoomed);
        let before = to_normalized_crop(&zoomed, frame.rect, stage.pivot(), drawable).unwrap();

        let (new_frame, rotated) = rotate_transition(&stage, &zoomed, 90.0, 4.0 / 3.0, 10.0).unwrap();
        assert!(new_frame.rotated);
        assert_eq!(rotated.angle, 90.0);
        let after = to_normalized_crop(&rotated, new_frame.rect, stage.pivot(), drawable).unwrap();
        assert!((after.left - before.left).abs() < 1e-4);
        assert!((after.top - before.top).abs() < 1e-4);
        assert!((after.right - before.right).abs() < 1e-4);
        assert!((after.bottom - before.bottom).abs() < 1e-4);
    }

    #[test]
    fn test_transition_without_room() {
        let viewport = SizeF::new(10.0, 10.0);
        let frame = TrimFrame::new(crate::geometry::RectF::new(0.0, 0.0, 10.0, 10.0), false);
        let stage = Stage::new(viewport, SizeF::new(100.0, 100.0), frame);
        let state = DragState::new(0.0, 0.0, 0.1, 0.0);
        assert!(rotate_transition(&stage, &state, 90.0, 1.0, 20.0).is_none());
    }
}
