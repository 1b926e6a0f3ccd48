//! Per-gesture input state

use glam::{Vec2, Vec3};
use vnav_core::PickingSuppression;

use crate::actions::ActionKind;

/// Pivot points used by orbit and pan gestures
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PivotState {
    /// Orbit pivot; persists across gestures
    pub examine_point: Vec3,
    /// Panning pivot; only set during a Panning gesture
    pub drag_point: Option<Vec3>,
}

impl PivotState {
    /// Create pivot state with an initial examine point
    pub fn new(examine_point: Vec3) -> Self {
        Self {
            examine_point,
            drag_point: None,
        }
    }
}

/// Input device state across one press-to-release span
#[derive(Debug)]
pub struct GestureState {
    pub(crate) current: Option<ActionKind>,
    pub(crate) prev_pointer: Vec2,
    pub(crate) prev_touches: Vec<Vec2>,
    pub(crate) pivots: PivotState,
    /// Held while a gesture is active; dropping it restores hover picking
    pub(crate) suppression: Option<PickingSuppression>,
}

impl GestureState {
    /// Idle state with the given examine point
    pub fn new(examine_point: Vec3) -> Self {
        Self {
            current: None,
            prev_pointer: Vec2::ZERO,
            prev_touches: Vec::new(),
            pivots: PivotState::new(examine_point),
            suppression: None,
        }
    }

    /// Action of the active gesture
    pub fn current_action(&self) -> Option<ActionKind> {
        self.current
    }

    /// Pointer position at the last event of the gesture
    pub fn prev_pointer(&self) -> Vec2 {
        self.prev_pointer
    }

    /// Touch positions at the last touch event
    pub fn prev_touches(&self) -> &[Vec2] {
        &self.prev_touches
    }

    /// Pivot points
    pub fn pivots(&self) -> &PivotState {
        &self.pivots
    }

    /// Whether hover picking is currently suppressed by this gesture
    pub fn is_suppressing_picking(&self) -> bool {
        self.suppression.is_some()
    }
}
