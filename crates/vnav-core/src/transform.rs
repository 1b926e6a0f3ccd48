//! Transform facade over a host scene node
//!
//! [`Transform`] owns no input logic. It reads the node's pose, computes the
//! new pose with the pure functions in [`crate::pose`], and writes the result
//! back synchronously.

use glam::{Quat, Vec3};

use crate::fov::{FovMetadata, field_of_view};
use crate::pose::Pose;

/// A scene node whose pose can be read and written
///
/// Implemented by the host's handle to the controlled node. Writes must take
/// effect immediately.
pub trait SceneNode {
    /// Position in the parent frame
    fn position(&self) -> Vec3;

    /// Set the position
    fn set_position(&mut self, position: Vec3);

    /// Orientation in the parent frame
    fn orientation(&self) -> Quat;

    /// Set the orientation
    fn set_orientation(&mut self, orientation: Quat);

    /// Field-of-view metadata, if the node carries any
    fn fov_metadata(&self) -> FovMetadata {
        FovMetadata::default()
    }

    /// World translation of the parent node
    fn parent_world_translation(&self) -> Vec3 {
        Vec3::ZERO
    }
}

/// Pose facade for a single scene node
#[derive(Debug)]
pub struct Transform<N> {
    node: N,
}

impl<N: SceneNode> Transform<N> {
    /// Wrap a node
    pub fn new(node: N) -> Self {
        Self { node }
    }

    /// The wrapped node
    pub fn node(&self) -> &N {
        &self.node
    }

    /// Current pose
    pub fn pose(&self) -> Pose {
        Pose {
            position: self.node.position(),
            orientation: self.node.orientation(),
        }
    }

    /// Write a complete pose
    pub fn set_pose(&mut self, pose: Pose) {
        self.node.set_position(pose.position);
        self.node.set_orientation(pose.orientation);
    }

    /// Current position
    pub fn position(&self) -> Vec3 {
        self.node.position()
    }

    /// Current orientation
    pub fn orientation(&self) -> Quat {
        self.node.orientation()
    }

    /// View direction
    pub fn direction(&self) -> Vec3 {
        crate::pose::direction(self.node.orientation())
    }

    /// Up axis
    pub fn up(&self) -> Vec3 {
        crate::pose::up(self.node.orientation())
    }

    /// Right axis
    pub fn right(&self) -> Vec3 {
        crate::pose::right(self.node.orientation())
    }

    /// Vertical field of view in radians
    pub fn field_of_view(&self) -> f32 {
        field_of_view(&self.node.fov_metadata())
    }

    /// Move by a world-space offset
    pub fn translate(&mut self, offset: Vec3) {
        self.node.set_position(self.node.position() + offset);
    }

    /// Compose a local-frame rotation
    pub fn rotate(&mut self, rotation: Quat) {
        let pose = self.pose().rotated(rotation);
        self.node.set_orientation(pose.orientation);
    }

    /// Rotate about a pivot; see [`Pose::rotated_around_point`]
    pub fn rotate_around_point(&mut self, rotation: Quat, pivot: Vec3) {
        let pose = self.pose().rotated_around_point(rotation, pivot);
        self.set_pose(pose);
    }

    /// First-person look; see [`Pose::looked_around`]
    pub fn look_around(&mut self, rot_side: Quat, rot_up: Quat, up: Vec3, pole_limit: f32) {
        let pose = self.pose().looked_around(rot_side, rot_up, up, pole_limit);
        self.node.set_orientation(pose.orientation);
    }

    /// Turn to face `target`
    ///
    /// Returns false and leaves the orientation untouched when `target` is
    /// the current position.
    pub fn look_at(&mut self, target: Vec3) -> bool {
        match self.pose().looking_at(target) {
            Some(pose) => {
                self.node.set_orientation(pose.orientation);
                true
            }
            None => {
                tracing::debug!(?target, "look-at target coincides with position, skipped");
                false
            }
        }
    }
}
