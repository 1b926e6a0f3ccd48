//! Navigation configuration
//!
//! Construction-time options for the gesture engine. Options are plain serde
//! structures with camelCase keys so they can be loaded from RON files, the
//! same way project files are.

use std::path::Path;
use std::str::FromStr;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_ROTATE_SPEED, DEFAULT_ZOOM_SPEED, LOOK_AROUND_POLE_LIMIT, MOVE_SPEED_FACTOR,
    ORBIT_POLE_MAX, ORBIT_POLE_MIN,
};
use crate::error::NavError;

/// Navigation mode, selecting the action tables
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NavigationMode {
    /// Orbit around a pivot, pan and dolly
    #[default]
    Examine,
    /// Ground-plane panning with orbit
    Panning,
    /// First-person look
    LookAround,
}

impl NavigationMode {
    /// All modes
    pub const ALL: [NavigationMode; 3] = [Self::Examine, Self::Panning, Self::LookAround];

    /// Configuration name
    pub fn name(&self) -> &'static str {
        match self {
            Self::Examine => "examine",
            Self::Panning => "panning",
            Self::LookAround => "lookaround",
        }
    }
}

impl FromStr for NavigationMode {
    type Err = NavError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|mode| mode.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| NavError::invalid_option("mode", format!("unknown mode `{s}`")))
    }
}

/// Open interval a value must stay within
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PoleBand {
    /// Exclusive lower bound
    pub min: f32,
    /// Exclusive upper bound
    pub max: f32,
}

impl Default for PoleBand {
    fn default() -> Self {
        Self {
            min: ORBIT_POLE_MIN,
            max: ORBIT_POLE_MAX,
        }
    }
}

impl PoleBand {
    /// Returns true if `value` lies strictly inside the band
    pub fn contains(&self, value: f32) -> bool {
        value > self.min && value < self.max
    }

    /// Distance from `value` to the band (zero inside)
    pub fn distance(&self, value: f32) -> f32 {
        if value <= self.min {
            self.min - value
        } else if value >= self.max {
            value - self.max
        } else {
            0.0
        }
    }
}

/// Construction-time navigation options
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct NavigationOptions {
    /// Navigation mode
    pub mode: NavigationMode,
    /// Rotation speed multiplier
    pub rotate_speed: f32,
    /// Zoom speed multiplier
    pub zoom_speed: f32,
    /// Keyboard move speed; `zoom_speed * 0.05` when unset
    pub move_speed: Option<f32>,
    /// Enable WASD / arrow key movement
    pub use_keys: bool,
    /// Re-pick the orbit pivot at every gesture start
    pub update_examine_point: bool,
    /// Resolve pivots against scene geometry, not just the ground plane
    pub dragging: bool,
    /// Up vector; the node's current up when unset
    pub up_vector: Option<Vec3>,
    /// Initial orbit pivot; derived from the parent node when unset
    pub examine_point: Option<Vec3>,
    /// Band for the downward view component during orbit
    pub orbit_pole_guard: PoleBand,
    /// `|up · forward|` limit for look-around
    pub look_around_pole_limit: f32,
    /// Minimum camera height during orbit
    pub orbit_min_height: Option<f32>,
    /// Dolly on mouse wheel
    pub wheel_zoom: bool,
}

impl Default for NavigationOptions {
    fn default() -> Self {
        Self {
            mode: NavigationMode::default(),
            rotate_speed: DEFAULT_ROTATE_SPEED,
            zoom_speed: DEFAULT_ZOOM_SPEED,
            move_speed: None,
            use_keys: false,
            update_examine_point: false,
            dragging: true,
            up_vector: None,
            examine_point: None,
            orbit_pole_guard: PoleBand::default(),
            look_around_pole_limit: LOOK_AROUND_POLE_LIMIT,
            orbit_min_height: None,
            wheel_zoom: true,
        }
    }
}

impl NavigationOptions {
    /// Default options for a mode
    pub fn with_mode(mode: NavigationMode) -> Self {
        Self {
            mode,
            ..Default::default()
        }
    }

    /// Effective keyboard move speed
    pub fn move_speed(&self) -> f32 {
        self.move_speed.unwrap_or(self.zoom_speed * MOVE_SPEED_FACTOR)
    }

    /// Check option values
    pub fn validate(&self) -> Result<(), NavError> {
        positive("rotateSpeed", self.rotate_speed)?;
        positive("zoomSpeed", self.zoom_speed)?;
        if let Some(speed) = self.move_speed {
            positive("moveSpeed", speed)?;
        }

        if let Some(up) = self.up_vector
            && (!up.is_finite() || up.length_squared() == 0.0)
        {
            return Err(NavError::invalid_option(
                "upVector",
                "must be a finite, non-zero vector",
            ));
        }

        if let Some(point) = self.examine_point
            && !point.is_finite()
        {
            return Err(NavError::invalid_option("examinePoint", "must be finite"));
        }

        let band = self.orbit_pole_guard;
        if !(0.0..=1.0).contains(&band.min)
            || !(0.0..=1.0).contains(&band.max)
            || band.min >= band.max
        {
            return Err(NavError::invalid_option(
                "orbitPoleGuard",
                format!("expected 0 <= min < max <= 1, got ({}, {})", band.min, band.max),
            ));
        }

        if !(self.look_around_pole_limit > 0.0 && self.look_around_pole_limit <= 1.0) {
            return Err(NavError::invalid_option(
                "lookAroundPoleLimit",
                format!("expected a value in (0, 1], got {}", self.look_around_pole_limit),
            ));
        }

        if let Some(height) = self.orbit_min_height
            && !height.is_finite()
        {
            return Err(NavError::invalid_option("orbitMinHeight", "must be finite"));
        }

        Ok(())
    }

    /// Parse options from RON and validate them
    pub fn from_ron_str(content: &str) -> Result<Self, ConfigError> {
        let options: NavigationOptions =
            ron::from_str(content).map_err(|e| ConfigError::Deserialize(e.to_string()))?;
        options.validate()?;
        Ok(options)
    }

    /// Load options from a RON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io(e.to_string()))?;
        Self::from_ron_str(&content)
    }

    /// Serialize options to pretty RON
    pub fn to_ron_string(&self) -> Result<String, ConfigError> {
        ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
            .map_err(|e| ConfigError::Serialize(e.to_string()))
    }
}

fn positive(key: &str, value: f32) -> Result<(), NavError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(NavError::invalid_option(
            key,
            format!("expected a finite positive value, got {value}"),
        ))
    }
}

/// Configuration loading errors
#[derive(Debug, Clone, thiserror::Error)]
pub enum ConfigError {
    /// The file could not be read
    #[error("IO error: {0}")]
    Io(String),
    /// The content could not be serialized
    #[error("Serialization error: {0}")]
    Serialize(String),
    /// The content is not valid RON for the options
    #[error("Deserialization error: {0}")]
    Deserialize(String),
    /// A value failed validation
    #[error(transparent)]
    Invalid(#[from] NavError),
}
