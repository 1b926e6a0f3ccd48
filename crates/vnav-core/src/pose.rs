//! Camera pose and pure pose transforms
//!
//! Every transform here returns a new [`Pose`] instead of mutating in place.
//! The facade in [`crate::transform`] computes the complete result first and
//! writes it to the scene node afterwards, so a skipped update never leaves a
//! half-applied pose behind.

use glam::{Mat3, Quat, Vec3};
use serde::{Deserialize, Serialize};

use crate::constants::DEGENERATE_LENGTH;

/// View direction of an orientation (local -Z)
pub fn direction(orientation: Quat) -> Vec3 {
    orientation * Vec3::NEG_Z
}

/// Up axis of an orientation (local +Y)
pub fn up(orientation: Quat) -> Vec3 {
    orientation * Vec3::Y
}

/// Right axis of an orientation (local +X)
pub fn right(orientation: Quat) -> Vec3 {
    orientation * Vec3::X
}

/// Position and orientation of a scene node
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    /// Position in the parent frame
    pub position: Vec3,
    /// Unit orientation quaternion
    pub orientation: Quat,
}

impl Default for Pose {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            orientation: Quat::IDENTITY,
        }
    }
}

impl Pose {
    /// Create a pose, normalizing the orientation
    pub fn new(position: Vec3, orientation: Quat) -> Self {
        Self {
            position,
            orientation: orientation.normalize(),
        }
    }

    /// Create a pose at `position` facing `target`
    ///
    /// Returns `None` when the two points coincide.
    pub fn looking_from(position: Vec3, target: Vec3) -> Option<Self> {
        Self::new(position, Quat::IDENTITY).looking_at(target)
    }

    /// View direction
    pub fn direction(&self) -> Vec3 {
        direction(self.orientation)
    }

    /// Up axis
    pub fn up(&self) -> Vec3 {
        up(self.orientation)
    }

    /// Right axis
    pub fn right(&self) -> Vec3 {
        right(self.orientation)
    }

    /// Move by a world-space offset
    pub fn translated(&self, offset: Vec3) -> Self {
        Self {
            position: self.position + offset,
            orientation: self.orientation,
        }
    }

    /// Compose a rotation expressed in the local frame
    pub fn rotated(&self, rotation: Quat) -> Self {
        Self {
            position: self.position,
            orientation: (self.orientation * rotation).normalize(),
        }
    }

    /// Rotate about `pivot` by a rotation expressed in the local frame
    ///
    /// The orientation composes `rotation` on the right. The position offset
    /// from the pivot is rotated about the same axis re-expressed in world
    /// space through the *previous* orientation, so that orientation and
    /// position stay consistent:
    ///
    /// ```text
    /// axis'    = orientation * axis(rotation)
    /// position = pivot + R(axis', angle(rotation)) * (position - pivot)
    /// ```
    pub fn rotated_around_point(&self, rotation: Quat, pivot: Vec3) -> Self {
        let (axis, angle) = rotation.to_axis_angle();
        let world_axis = (self.orientation * axis).normalize();
        let world_rotation = Quat::from_axis_angle(world_axis, angle);

        Self {
            position: pivot + world_rotation * (self.position - pivot),
            orientation: (self.orientation * rotation).normalize(),
        }
    }

    /// First-person look composed from a horizontal and a vertical rotation
    ///
    /// Both rotations are in world space. The vertical part is dropped when it
    /// would bring the view direction within `pole_limit` of `up` (measured as
    /// `|up · forward|`) or swing it over the pole, unless it moves the view
    /// away from the pole.
    pub fn looked_around(&self, rot_side: Quat, rot_up: Quat, up: Vec3, pole_limit: f32) -> Self {
        let up = up.normalize_or_zero();
        let pitched = rot_up * self.orientation;

        let forward = direction(self.orientation);
        let pitched_forward = direction(pitched);
        let before = up.dot(forward).abs();
        let after = up.dot(pitched_forward).abs();

        let keep_vertical =
            !crosses_pole(forward, pitched_forward, up) && (after <= pole_limit || after < before);
        let base = if keep_vertical {
            pitched
        } else {
            tracing::trace!(alignment = after, "look-around vertical rotation suppressed");
            self.orientation
        };

        Self {
            position: self.position,
            orientation: (rot_side * base).normalize(),
        }
    }

    /// Orient towards `target`, keeping world +Y as the up reference
    ///
    /// Falls back to the current right axis when the view direction is
    /// parallel to world up. Returns `None` when `target` equals the position.
    pub fn looking_at(&self, target: Vec3) -> Option<Self> {
        let forward = (target - self.position).try_normalize()?;

        let mut right = forward.cross(Vec3::Y);
        if right.length() < DEGENERATE_LENGTH {
            let current = self.right();
            right = current - forward * current.dot(forward);
            if right.length() < DEGENERATE_LENGTH {
                right = forward.any_orthonormal_vector();
            }
        }
        let right = right.normalize();
        let true_up = right.cross(forward);

        let orientation = Quat::from_mat3(&Mat3::from_cols(right, true_up, -forward));
        Some(Self {
            position: self.position,
            orientation: orientation.normalize(),
        })
    }
}

/// Returns true if going from `before` to `after` swings the horizontal
/// heading around, i.e. the direction passed over the pole of `up`
pub fn crosses_pole(before: Vec3, after: Vec3, up: Vec3) -> bool {
    let flat_before = before - up * up.dot(before);
    let flat_after = after - up * up.dot(after);
    flat_before.dot(flat_after) < 0.0
}
