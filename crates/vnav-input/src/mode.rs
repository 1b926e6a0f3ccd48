//! Mode tables
//!
//! Each navigation mode maps mouse buttons (0, 1, 2) and touch counts
//! (1, 2, 3) to an action. An empty slot means the input is ignored.

use vnav_core::NavigationMode;

use crate::actions::ActionKind;

/// Action tables for one navigation mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModeTable {
    /// Indexed by mouse button
    pub mouse: [Option<ActionKind>; 3],
    /// Indexed by touch count - 1
    pub touch: [Option<ActionKind>; 3],
}

impl ModeTable {
    /// Table for a mode
    pub const fn for_mode(mode: NavigationMode) -> Self {
        use ActionKind::*;

        match mode {
            NavigationMode::Examine => Self {
                mouse: [Some(Rotate), Some(Translate), Some(Dolly)],
                touch: [Some(Rotate), Some(Dolly), Some(Translate)],
            },
            NavigationMode::Panning => Self {
                mouse: [Some(Panning), Some(Orbit), Some(Dolly)],
                touch: [Some(Panning), Some(Orbit), Some(Dolly)],
            },
            NavigationMode::LookAround => Self {
                mouse: [Some(LookAround), Some(Translate), Some(Dolly)],
                touch: [Some(LookAround), Some(Dolly), None],
            },
        }
    }

    /// Action for a mouse button, `None` for unmapped buttons
    pub fn mouse_action(&self, button: usize) -> Option<ActionKind> {
        self.mouse.get(button).copied().flatten()
    }

    /// Action for a number of active touches, `None` for unmapped counts
    pub fn touch_action(&self, touches: usize) -> Option<ActionKind> {
        touches
            .checked_sub(1)
            .and_then(|index| self.touch.get(index).copied().flatten())
    }
}

impl From<NavigationMode> for ModeTable {
    fn from(mode: NavigationMode) -> Self {
        Self::for_mode(mode)
    }
}
