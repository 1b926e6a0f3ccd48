//! Perspective camera driven by a navigation pose

use glam::{Mat4, Vec3, Vec4};
use vnav_core::{FovMetadata, Pose, Ray, field_of_view};

/// Camera state shared between the scene and its node handle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraState {
    /// World pose; the camera looks down local -Z
    pub pose: Pose,
    /// Field of view metadata reported to the navigator
    pub fov: FovMetadata,
    /// Near clipping plane
    pub near: f32,
    /// Far clipping plane
    pub far: f32,
}

impl CameraState {
    /// Create a camera with a 45° vertical field of view
    pub fn new(pose: Pose) -> Self {
        Self {
            pose,
            fov: FovMetadata::default(),
            near: 0.1,
            far: 100000.0,
        }
    }

    /// Camera at `position` facing `target`; `None` if the two coincide
    pub fn looking_at(position: Vec3, target: Vec3) -> Option<Self> {
        Pose::looking_from(position, target).map(Self::new)
    }

    /// Set the vertical field of view in degrees
    pub fn set_fov_degrees(&mut self, fov_degrees: f32) {
        self.fov = FovMetadata::vertical(fov_degrees.clamp(10.0, 120.0).to_radians());
    }

    /// Vertical field of view in radians
    pub fn fov(&self) -> f32 {
        field_of_view(&self.fov)
    }

    /// Get view matrix
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::from_rotation_translation(self.pose.orientation, self.pose.position).inverse()
    }

    /// Get projection matrix for a width / height aspect ratio
    pub fn projection_matrix(&self, aspect: f32) -> Mat4 {
        Mat4::perspective_rh(self.fov(), aspect, self.near, self.far)
    }

    /// Convert screen coordinates to world ray
    pub fn screen_to_ray(
        &self,
        screen_x: f32,
        screen_y: f32,
        screen_width: f32,
        screen_height: f32,
    ) -> Ray {
        // Convert to normalized device coordinates
        let ndc_x = (2.0 * screen_x / screen_width) - 1.0;
        let ndc_y = 1.0 - (2.0 * screen_y / screen_height);

        let inv_proj = self.projection_matrix(screen_width / screen_height).inverse();
        let inv_view = self.view_matrix().inverse();

        // perspective_rh maps depth to [0, 1]
        let near_ndc = Vec4::new(ndc_x, ndc_y, 0.0, 1.0);
        let far_ndc = Vec4::new(ndc_x, ndc_y, 1.0, 1.0);

        let near_view = inv_proj * near_ndc;
        let far_view = inv_proj * far_ndc;
        let near_view = near_view.truncate() / near_view.w;
        let far_view = far_view.truncate() / far_view.w;

        let near_world = (inv_view * near_view.extend(1.0)).truncate();
        let far_world = (inv_view * far_view.extend(1.0)).truncate();

        Ray::new(near_world, (far_world - near_world).normalize())
    }
}
