//! Camera actions
//!
//! Actions are stateless. [`ActionKind`] names the action and dispatches to
//! its handlers; everything mutable lives in the [`ActionContext`] the
//! navigator builds for each call.
//!
//! | Action     | start                  | move                          | end             |
//! |------------|------------------------|-------------------------------|-----------------|
//! | Translate  |                        | pan in the local XY plane     |                 |
//! | Dolly      |                        | move along local Z            |                 |
//! | Rotate     | re-pick examine point¹ | orbit the examine point       |                 |
//! | LookAround |                        | first-person yaw and pitch    |                 |
//! | Panning    | pick drag point        | keep drag point under cursor  | clear drag point|
//! | Orbit      | re-pick examine point¹ | orbit with pole and height guard |              |
//!
//! ¹ only with `updateExaminePoint`

mod orbit;
mod pan;

use glam::{Vec2, Vec3};
use vnav_core::{NavigationOptions, SceneHost, Transform};

use crate::gesture::PivotState;

/// A named camera action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionKind {
    /// Lateral pan in the camera plane
    Translate,
    /// Move along the view axis
    Dolly,
    /// Orbit around the examine point
    Rotate,
    /// First-person look
    LookAround,
    /// Ground-plane drag
    Panning,
    /// Guarded orbit around the examine point
    Orbit,
}

impl ActionKind {
    /// All actions
    pub const ALL: [ActionKind; 6] = [
        Self::Translate,
        Self::Dolly,
        Self::Rotate,
        Self::LookAround,
        Self::Panning,
        Self::Orbit,
    ];

    /// Display name
    pub fn name(&self) -> &'static str {
        match self {
            Self::Translate => "translate",
            Self::Dolly => "dolly",
            Self::Rotate => "rotate",
            Self::LookAround => "lookaround",
            Self::Panning => "panning",
            Self::Orbit => "orbit",
        }
    }

    /// Whether the action has a start handler
    pub fn has_start(&self) -> bool {
        matches!(self, Self::Rotate | Self::Panning | Self::Orbit)
    }

    /// Whether the action has an end handler
    pub fn has_end(&self) -> bool {
        matches!(self, Self::Panning)
    }

    pub(crate) fn start<H: SceneHost>(self, ctx: &mut ActionContext<'_, H>, position: Vec2) {
        match self {
            Self::Rotate | Self::Orbit => orbit::refresh_examine_point(ctx, position),
            Self::Panning => pan::panning_start(ctx, position),
            Self::Translate | Self::Dolly | Self::LookAround => {}
        }
    }

    pub(crate) fn move_by<H: SceneHost>(
        self,
        ctx: &mut ActionContext<'_, H>,
        position: Vec2,
        delta: Vec2,
    ) {
        match self {
            Self::Translate => pan::translate(ctx, delta),
            Self::Dolly => pan::dolly(ctx, delta),
            Self::Panning => pan::panning_move(ctx, position),
            Self::Rotate => orbit::rotate(ctx, delta),
            Self::Orbit => orbit::orbit(ctx, delta),
            Self::LookAround => orbit::look_around(ctx, delta),
        }
    }

    pub(crate) fn end<H: SceneHost>(self, ctx: &mut ActionContext<'_, H>, _position: Vec2) {
        if self == Self::Panning {
            ctx.pivots.drag_point = None;
        }
    }
}

impl std::fmt::Display for ActionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Everything an action handler may read or change
pub(crate) struct ActionContext<'a, H: SceneHost> {
    pub host: &'a H,
    pub transform: &'a mut Transform<H::Node>,
    pub options: &'a NavigationOptions,
    /// Resolved up vector
    pub up: Vec3,
    pub pivots: &'a mut PivotState,
}

impl<H: SceneHost> ActionContext<'_, H> {
    /// Viewport size, or `None` when it cannot scale a pixel delta
    fn viewport(&self) -> Option<Vec2> {
        let size = self.host.viewport_size();
        if size.x > 0.0 && size.y > 0.0 && size.is_finite() {
            Some(size)
        } else {
            tracing::warn!(?size, "degenerate viewport, camera update skipped");
            None
        }
    }
}
