//! Host scene contract
//!
//! The navigation layer never owns the scene. Everything it needs from the
//! rendering environment goes through [`SceneHost`]: unprojecting screen
//! coordinates, the first-hit scene query, bounding boxes for examine, the
//! viewport size and the shared hover-picking flag.

use glam::{Vec2, Vec3};
use uuid::Uuid;

use crate::bounds::BoundingBox;
use crate::picking::HoverPicking;
use crate::ray::Ray;
use crate::transform::SceneNode;

/// Rendering environment hosting the controlled node
pub trait SceneHost {
    /// Handle to a scene node
    type Node: SceneNode;

    /// Whether the environment is attached and usable
    fn is_available(&self) -> bool {
        true
    }

    /// Look up a node by id
    fn node(&self, id: Uuid) -> Option<Self::Node>;

    /// Unproject a screen coordinate into a world-space ray
    fn generate_ray(&self, screen_x: f32, screen_y: f32) -> Ray;

    /// First scene hit along `ray`
    ///
    /// Hosts that signal "no hit" with a non-finite vector may return it as
    /// `Some`; callers validate with [`crate::ray::is_valid_hit`].
    fn intersect_scene(&self, ray: &Ray) -> Option<Vec3>;

    /// Viewport size in pixels
    fn viewport_size(&self) -> Vec2;

    /// World bounding box of a node, if it has one
    fn world_bounding_box(&self, id: Uuid) -> Option<BoundingBox>;

    /// The scene-wide hover-picking flag
    fn hover_picking(&self) -> HoverPicking;
}
