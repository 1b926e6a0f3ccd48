//! Rays and ray-plane intersection
//!
//! Used for pivot resolution by the pan and orbit gestures, and as the
//! fallback whenever the scene itself reports no hit.

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// A ray with an origin and a (not necessarily normalized) direction
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ray {
    /// Starting point of the ray
    pub origin: Vec3,
    /// Direction of the ray
    pub direction: Vec3,
}

impl Ray {
    /// Create a new ray
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self { origin, direction }
    }

    /// Point at parameter `t` along the ray
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }

    /// Ray-plane intersection.
    ///
    /// # Algorithm
    ///
    /// ```text
    /// divisor = d · n
    /// divisor == 0  ->  origin if (p - o) · n == 0, otherwise no hit
    /// t = ((p - o) · n) / divisor
    /// t < 0         ->  no hit (plane is behind the origin)
    /// ```
    ///
    /// The comparisons against zero are exact: a ray lying in the plane
    /// returns its own origin.
    pub fn intersect_plane(&self, plane_point: Vec3, plane_normal: Vec3) -> Option<Vec3> {
        let divisor = self.direction.dot(plane_normal);
        let offset = (plane_point - self.origin).dot(plane_normal);

        if divisor == 0.0 {
            return (offset == 0.0).then_some(self.origin);
        }

        let t = offset / divisor;
        if t < 0.0 {
            return None;
        }

        Some(self.at(t))
    }

    /// Intersection with the horizontal plane through the world origin (y = 0)
    ///
    /// A horizontal ray at height zero returns its origin. A ray starting at or
    /// below the ground that does not point downwards has no solution.
    pub fn intersect_ground(&self) -> Option<Vec3> {
        let Ray { origin, direction } = *self;

        if direction.y == 0.0 && origin.y == 0.0 {
            return Some(origin);
        }
        if origin.y <= 0.0 && direction.y >= 0.0 {
            return None;
        }
        if direction.y == 0.0 {
            return None;
        }

        let t = -origin.y / direction.y;
        if t < 0.0 {
            return None;
        }

        Some(self.at(t))
    }
}

/// Returns true if a scene hit is usable (finite length)
pub fn is_valid_hit(point: Vec3) -> bool {
    point.length().is_finite()
}
