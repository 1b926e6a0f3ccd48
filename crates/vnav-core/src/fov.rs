//! Field-of-view resolution from scene metadata

use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_FOV_DEGREES;

/// Field-of-view metadata reported by a scene node
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FovMetadata {
    /// Explicit horizontal field of view in radians
    pub horizontal: Option<f32>,
    /// Explicit vertical field of view in radians
    pub vertical: Option<f32>,
    /// Viewport height divided by width
    pub aspect: f32,
}

impl Default for FovMetadata {
    fn default() -> Self {
        Self {
            horizontal: None,
            vertical: None,
            aspect: 1.0,
        }
    }
}

impl FovMetadata {
    /// Metadata carrying only a vertical field of view
    pub fn vertical(fov: f32) -> Self {
        Self {
            vertical: Some(fov),
            ..Default::default()
        }
    }

    /// Metadata carrying a horizontal field of view and the viewport aspect
    pub fn horizontal(fov: f32, aspect: f32) -> Self {
        Self {
            horizontal: Some(fov),
            aspect,
            ..Default::default()
        }
    }
}

/// Vertical field of view in radians
///
/// Prefers a horizontal value converted through the aspect ratio
/// (`2 * atan(tan(h / 2) * aspect)`), then an explicit vertical value, then 45°.
pub fn field_of_view(meta: &FovMetadata) -> f32 {
    if let Some(h) = meta.horizontal {
        return 2.0 * ((h * 0.5).tan() * meta.aspect).atan();
    }
    meta.vertical.unwrap_or_else(|| DEFAULT_FOV_DEGREES.to_radians())
}
