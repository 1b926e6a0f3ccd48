//! Keyboard movement keys

use serde::{Deserialize, Serialize};

/// Keys handled when keyboard movement is enabled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    /// Move forward
    W,
    /// Strafe left
    A,
    /// Move backward
    S,
    /// Strafe right
    D,
    /// Same as `W`
    ArrowUp,
    /// Same as `S`
    ArrowDown,
    /// Same as `A`
    ArrowLeft,
    /// Same as `D`
    ArrowRight,
}

/// Direction a key moves the camera in, relative to its view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyMotion {
    /// Along the view direction
    Forward,
    /// Against the view direction
    Backward,
    /// Against the right axis
    Left,
    /// Along the right axis
    Right,
}

impl Key {
    /// Camera motion bound to the key
    pub fn motion(&self) -> KeyMotion {
        match self {
            Key::W | Key::ArrowUp => KeyMotion::Forward,
            Key::S | Key::ArrowDown => KeyMotion::Backward,
            Key::A | Key::ArrowLeft => KeyMotion::Left,
            Key::D | Key::ArrowRight => KeyMotion::Right,
        }
    }
}
