//! Pivot resolution under the cursor

use glam::Vec3;
use vnav_core::SceneHost;
use vnav_core::ray::{Ray, is_valid_hit};

/// Resolve the world point a gesture should pivot on
///
/// With `dragging` enabled the first scene hit is used if it is numerically
/// valid. Otherwise, or over empty regions of the scene, the ray falls back to
/// the ground plane (y = 0). Non-finite results count as no hit.
pub fn resolve_pick<H: SceneHost>(host: &H, ray: &Ray, dragging: bool) -> Option<Vec3> {
    if dragging
        && let Some(hit) = host.intersect_scene(ray)
        && is_valid_hit(hit)
    {
        return Some(hit);
    }

    ray.intersect_ground().filter(|hit| is_valid_hit(*hit))
}
