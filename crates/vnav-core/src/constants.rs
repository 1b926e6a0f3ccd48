//! Global constants for vnav-core

/// Default vertical field of view in degrees
pub const DEFAULT_FOV_DEGREES: f32 = 45.0;

/// Default rotation speed multiplier
pub const DEFAULT_ROTATE_SPEED: f32 = 1.5;

/// Default zoom speed multiplier
pub const DEFAULT_ZOOM_SPEED: f32 = 20.0;

/// Keyboard move speed as a fraction of the zoom speed
pub const MOVE_SPEED_FACTOR: f32 = 0.05;

/// Look-around suppresses the vertical rotation once `|up · forward|` would exceed this
pub const LOOK_AROUND_POLE_LIMIT: f32 = 0.95;

/// Lower bound of the orbit band for the downward view component
pub const ORBIT_POLE_MIN: f32 = 0.05;

/// Upper bound of the orbit band for the downward view component
pub const ORBIT_POLE_MAX: f32 = 0.95;

/// Threshold below which a cross product is treated as degenerate
pub const DEGENERATE_LENGTH: f32 = 1e-6;
